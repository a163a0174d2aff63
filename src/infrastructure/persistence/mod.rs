pub mod file_snapshot;
pub mod index_codec;
