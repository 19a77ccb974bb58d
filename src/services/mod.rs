pub mod field_extractor;
pub mod content_service;
pub mod directory_service;
pub mod status_service;

pub use content_service::{ContentService, ContentSettings};
pub use directory_service::DirectoryService;
pub use status_service::StatusService;
