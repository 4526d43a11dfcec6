pub mod record_queries;
