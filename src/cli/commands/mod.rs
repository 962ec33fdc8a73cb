pub mod config;
pub mod habit;
pub mod info;
pub mod init;
pub mod log;
pub mod shell;
pub mod summary;
