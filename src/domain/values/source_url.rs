use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A URL that passed the syntactic check the UI applies before processing:
/// http, https, or ftp scheme followed by a non-empty host and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(String);

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#].[^\s]*$").expect("source url pattern")
    })
}

impl SourceUrl {
    pub fn parse(value: &str) -> Result<Self, String> {
        if url_pattern().is_match(value) {
            Ok(SourceUrl(value.to_string()))
        } else {
            Err(format!("Invalid URL: {value}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits pasted input into trimmed, non-blank lines and validates each.
    /// On failure returns every rejected line so the caller can report them
    /// together.
    pub fn parse_lines(input: &str) -> Result<Vec<SourceUrl>, Vec<String>> {
        let mut urls = Vec::new();
        let mut invalid = Vec::new();
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match SourceUrl::parse(line) {
                Ok(url) => urls.push(url),
                Err(_) => invalid.push(line.to_string()),
            }
        }
        if invalid.is_empty() {
            Ok(urls)
        } else {
            Err(invalid)
        }
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_schemes() {
        assert!(SourceUrl::parse("https://pmkisan.gov.in/").is_ok());
        assert!(SourceUrl::parse("http://example.com/a?b=c").is_ok());
        assert!(SourceUrl::parse("FTP://files.example.org/x").is_ok());
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(SourceUrl::parse("example.com").is_err());
        assert!(SourceUrl::parse("mailto:someone@example.com").is_err());
        assert!(SourceUrl::parse("https://").is_err());
        assert!(SourceUrl::parse("https://exa mple.com").is_err());
        assert!(SourceUrl::parse("https://.hidden").is_err());
    }

    #[test]
    fn test_parse_lines_skips_blanks_and_collects_invalid() {
        let ok = SourceUrl::parse_lines("  https://a.example/x \n\n http://b.example/y\n").unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[0].as_str(), "https://a.example/x");

        let bad = SourceUrl::parse_lines("https://a.example/x\nnot a url\nftp:/nope").unwrap_err();
        assert_eq!(bad, vec!["not a url".to_string(), "ftp:/nope".to_string()]);
    }
}
