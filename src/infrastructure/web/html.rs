//! Visible-text extraction from HTML.

use scraper::{ElementRef, Html, Node};

/// Subtrees whose text is never shown to a reader.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Concatenates every visible text node in document order. Whitespace is
/// left as the parser produced it, apart from trimming the ends.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    collect_text(document.root_element(), &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if SKIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_in_document_order() {
        let html = "<html><body><h1>PM-KISAN</h1><p>Income <b>support</b> of 6000.</p></body></html>";
        assert_eq!(visible_text(html), "PM-KISANIncome support of 6000.");
    }

    #[test]
    fn test_skips_script_style_and_head() {
        let html = r#"<html><head><title>T</title><style>p{color:red}</style></head>
            <body><script>var x = 1;</script><p>Visible</p><noscript>enable js</noscript></body></html>"#;
        assert_eq!(visible_text(html), "Visible");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(visible_text("just words"), "just words");
    }

    #[test]
    fn test_empty_markup_yields_empty_text() {
        assert_eq!(visible_text("<html><body>  <div></div> </body></html>"), "");
    }
}
