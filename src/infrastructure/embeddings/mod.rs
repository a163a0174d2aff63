#[cfg(feature = "fastembed")]
pub mod fastembed;
pub mod hashing;
pub mod openai;
