pub mod ops_handlers;
pub mod page_handlers;
pub mod record_handlers;
pub mod webhook_handlers;

pub use ops_handlers::*;
pub use page_handlers::*;
pub use record_handlers::*;
pub use webhook_handlers::*;
