pub mod message_sources;
pub mod record_stores;
