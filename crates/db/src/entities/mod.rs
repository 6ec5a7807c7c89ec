pub mod event;
pub mod institutional_info;
