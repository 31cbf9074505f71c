pub mod timer;

pub use timer::SessionTimer;
