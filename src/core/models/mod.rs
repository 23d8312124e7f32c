pub mod attendance_record;
pub mod category;
pub mod raw_message;
