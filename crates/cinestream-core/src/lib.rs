pub mod error;
pub mod export;
pub mod list_store;
pub mod normalize;
pub mod pipeline;
pub mod playback;
pub mod storage;

pub use error::StoreError;
pub use export::{export_file_name, item_metadata_json, metadata_file_name, ExportFormat};
pub use list_store::ListStore;
pub use normalize::{classify, normalize_page, normalize_record, Classification};
pub use pipeline::{ContentPipeline, ContentView, DisplayMode, PipelineOptions, SearchOutcome};
pub use playback::{embed_url, PlaybackRequest};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
