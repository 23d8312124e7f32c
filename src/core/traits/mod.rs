pub mod message_source;
pub mod record_store;
