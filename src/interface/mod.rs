pub mod misc;
pub mod types;

pub use misc::*;
pub use types::*;
