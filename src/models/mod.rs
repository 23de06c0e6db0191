pub mod deploy;
pub mod platform;

pub use deploy::*;
pub use platform::*;
