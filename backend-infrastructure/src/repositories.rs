pub mod clickhouse_records;
pub mod memory_records;

pub use clickhouse_records::*;
pub use memory_records::*;
