mod error;
pub use error::Error;

mod patch_entry;
pub use patch_entry::PatchEntry;

mod manifest;
pub use manifest::Manifest;

mod delete_file_list;
pub use delete_file_list::DeleteFileList;

mod progress;
pub use progress::{ProgressCallback, ProgressEvent, ProgressState, Stage};
pub(crate) use progress::ProgressTracker;

mod ini;
pub use ini::{Document, IniDocument, IniSection, IniValue};

mod pipeline_state;
pub use pipeline_state::PipelineState;

mod retry_policy;
pub use retry_policy::RetryPolicy;

mod http_response;
pub use http_response::HttpResponse;

mod options;
pub use options::{ApplyOptions, FetchOptions, NoProcessGuard};

mod reqwest_http_client;
pub use reqwest_http_client::ReqwestHttpClient;
