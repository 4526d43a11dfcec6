// Domain value objects
pub mod storage_backend;
pub mod webhook_event;

pub use storage_backend::*;
pub use webhook_event::*;
