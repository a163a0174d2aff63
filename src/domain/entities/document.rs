use serde::Serialize;

/// A stored page's text, its ordinal in the document store, and its squared
/// L2 distance from the question that retrieved it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedDocument {
    pub position: usize,
    pub distance: f32,
    pub text: String,
}

impl RetrievedDocument {
    /// First `max_chars` characters of the text, for terminal previews.
    pub fn preview(&self, max_chars: usize) -> String {
        let trimmed = self.text.trim();
        match trimmed.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        }
    }
}
