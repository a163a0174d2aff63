pub mod answer_generator;
pub mod embedding_port;
pub mod snapshot_repository;
pub mod text_extractor;
