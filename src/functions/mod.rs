mod significant_lines;
mod decode_patch_list;
mod decode_document;
mod split_target_path;
mod retry;
mod delete_file;
mod copy_file;
mod read_dir;
mod fetch_bytes;
mod resolve_manifest;
mod download_file;
mod decompress_file;
mod get_hash;
mod fetch_and_decompress;
mod apply_patch_files;
mod ini_file;
mod update_version_record;
mod remote_version;
mod pending_versions;
mod human_readable_bytesize;

pub(crate) use significant_lines::significant_lines;
pub use decode_patch_list::decode_patch_list;
pub use decode_document::decode_document;
pub use split_target_path::{split_target_path, target_path};
pub use retry::{is_locked, retry};
pub(crate) use delete_file::delete_file;
pub(crate) use copy_file::copy_file;
pub(crate) use read_dir::read_dir;
pub use resolve_manifest::resolve_manifest;
pub(crate) use resolve_manifest::is_version_token;
pub(crate) use download_file::download_file;
pub(crate) use decompress_file::decompress_file;
pub(crate) use get_hash::get_hash;
pub use fetch_and_decompress::fetch_and_decompress;
pub use apply_patch_files::apply_patch_files;
pub use ini_file::{read_ini_file, write_ini_file};
pub(crate) use update_version_record::{update_version_record, PATCH_SECTION, VERSION_KEY};
pub use remote_version::{fetch_remote_version, parse_version_info};
pub use pending_versions::pending_versions;
pub use human_readable_bytesize::human_readable_bytesize;

#[cfg(test)]
pub(crate) use decompress_file::tests::lzma;
