pub mod document;
pub mod document_store;
pub mod flat_index;
pub mod snapshot;
