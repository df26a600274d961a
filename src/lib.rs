//Modules
mod structures;
mod implementations;
mod functions;
pub mod traits;
pub mod patcher;
pub mod patcher_builder;

pub use crate::patcher::Patcher;
pub use crate::patcher_builder::{PatcherBuilder, DEFAULT_CDN_BASE};
pub use crate::structures::{
  ApplyOptions, DeleteFileList, Document, Error, FetchOptions, HttpResponse, IniDocument, IniSection, IniValue, Manifest,
  NoProcessGuard, PatchEntry, PipelineState, ProgressCallback, ProgressEvent, ProgressState, ReqwestHttpClient,
  RetryPolicy, Stage,
};
pub use crate::functions::{
  apply_patch_files, decode_document, decode_patch_list, fetch_and_decompress, fetch_remote_version,
  human_readable_bytesize, is_locked, parse_version_info, pending_versions, read_ini_file, resolve_manifest, retry,
  split_target_path, target_path, write_ini_file,
};
