// Domain entities
pub mod config;
pub mod record;
pub mod webhook;

pub use config::*;
pub use record::*;
pub use webhook::*;
