use crate::constants::{HINT_STYLE, KEY_HELP};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the hint overlay: the status line above the key reference.
pub fn hint_html(status: &str) -> String {
    format!(
        "<div style='{HINT_STYLE}'>{}<br><span style='opacity: 0.7'>{KEY_HELP}</span></div>",
        escape(status)
    )
}
