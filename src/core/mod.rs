pub mod aggregate;
pub mod conversion;
pub mod input;
pub mod log;
pub mod summary;
pub mod tracker;
