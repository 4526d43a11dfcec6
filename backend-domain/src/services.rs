// Domain services
pub mod payload;

pub use payload::*;
