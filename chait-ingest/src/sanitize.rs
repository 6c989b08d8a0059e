//! Markup stripping for provider free text
//!
//! Labels and scope notes come from untrusted exports and may contain HTML.
//! Nothing is allowed through: every tag and attribute is dropped and the
//! text content of script-like elements is discarded entirely. The
//! remaining text keeps `&`, `<` and `>` entity-encoded, so stripping an
//! already stripped value returns it unchanged.

use scraper::Html;

/// Elements whose text content is dropped along with the tag
const DISCARDED_CONTENT: [&str; 5] = ["script", "style", "noscript", "textarea", "option"];

/// Strip all markup from `input`
pub fn strip_markup(input: &str) -> String {
    if !input.contains(['<', '>', '&']) {
        return input.to_string();
    }

    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());

    for node in fragment.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            let discarded = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|elem| DISCARDED_CONTENT.contains(&elem.name()))
            });
            if !discarded {
                push_escaped(&mut text, text_node);
            }
        }
    }

    text
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
