pub mod public;

pub use public::*;
