pub mod habit;
pub mod record;
pub mod stats;
