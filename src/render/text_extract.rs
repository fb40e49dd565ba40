//! Visible-text extraction from a rendered DOM snapshot.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Elements whose text content counts as page text, in document order.
static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, span, div")
        .expect("static selector is valid")
});

/// Extract visible text from heading/paragraph/list/div/span elements in
/// document order, one blank line between elements.
///
/// Nested containers repeat their descendants' text; that mirrors the
/// service's historical output and keeps merged documents stable.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&TEXT_SELECTOR)
        .filter_map(|element| {
            let text = element
                .text()
                .map(str::trim)
                .filter(|chunk| !chunk.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() { None } else { Some(text) }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_paragraphs_in_document_order() {
        let html = "<html><body><h1>Title</h1><p>First.</p><p>Second.</p></body></html>";
        let text = visible_text(html);
        assert_eq!(text, "Title\n\nFirst.\n\nSecond.");
    }

    #[test]
    fn script_and_style_content_is_ignored() {
        let html = "<html><head><style>p{color:red}</style></head>\
                    <body><script>var x=1;</script><p>Visible</p></body></html>";
        let text = visible_text(html);
        assert_eq!(text, "Visible");
    }

    #[test]
    fn whitespace_only_elements_are_dropped() {
        let html = "<body><div>  </div><span>\n</span><p>kept</p></body>";
        assert_eq!(visible_text("<body><p>kept</p></body>"), "kept");
        assert_eq!(visible_text(html), "kept");
    }

    #[test]
    fn list_items_are_included() {
        let html = "<body><ul><li>one</li><li>two</li></ul></body>";
        let text = visible_text(html);
        assert!(text.contains("one"));
        assert!(text.contains("two"));
    }
}
