pub mod accounts;
pub mod essays;
pub mod grading_client;
