pub mod classifier;
pub mod query_service;
pub mod sync_service;
