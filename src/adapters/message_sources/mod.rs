#[cfg(test)]
pub mod in_memory_message_source;
pub mod jsonl_channel_source;
