pub mod analytics;
pub mod entry;
