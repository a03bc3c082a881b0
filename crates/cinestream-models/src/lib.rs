pub mod media;
pub mod list_entry;

pub use media::{MediaItem, MediaKey, MediaKind, IMAGE_BASE_URL};
pub use list_entry::{ListEntry, ListName};
