pub mod catalog;
pub mod color;
pub mod constants;
pub mod error;
pub mod fields;
pub mod keys;
pub mod reader;
pub mod record;

// Re-export the main entry points for easy access
pub use reader::{TagHandle, TagScan, read_tag};
pub use record::DecodedFilamentRecord;
