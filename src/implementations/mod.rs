mod error;
mod patch_entry;
mod manifest;
mod delete_file_list;
mod progress;
mod ini;
mod pipeline_state;
mod retry_policy;
mod options;
mod reqwest_http_client;

pub(crate) use delete_file_list::normalize_separators;
pub(crate) use options::{DEFAULT_CONCURRENCY, DEFAULT_PROGRESS_INTERVAL, DEFAULT_VERSION_RECORD_PATH};
