pub mod categories;
pub mod classify;
pub mod init;
pub mod project_helpers;
pub mod query;
pub mod status;
pub mod sync;
