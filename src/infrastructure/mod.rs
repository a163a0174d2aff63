pub mod embeddings;
pub mod llm;
pub mod persistence;
pub mod web;
