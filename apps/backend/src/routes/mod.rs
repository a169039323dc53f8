pub mod accounts;
pub mod essays;
pub mod extract;
