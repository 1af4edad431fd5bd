use regex::{Captures, Regex};
use std::sync::OnceLock;

fn link_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?x)
            (?:^|[\s(\[<>"',;:])
            (?:
                (?P<url>(?:https?://|www\.)[^\s<>"']+)
              | (?P<email>[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,})
            )
            "#,
        )
        .ok()
    })
    .as_ref()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `text` and wraps URLs and e-mail addresses in anchors.
///
/// Only the matched spans become markup; everything else, including the
/// matched text itself, is escaped, so record content can never inject tags
/// or break out of the `href` attribute.
pub fn urlize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let Some(pattern) = link_pattern() else {
        return escape_html(text);
    };

    for caps in pattern.captures_iter(text) {
        let Some((start, end, href)) = link_span(text, &caps) else {
            continue;
        };
        let shown = &text[start..end];
        out.push_str(&escape_html(&text[last..start]));
        out.push_str(&format!(
            r#"<a href="{}" rel="noopener">{}</a>"#,
            escape_html(&href),
            escape_html(shown)
        ));
        last = end;
    }

    out.push_str(&escape_html(&text[last..]));
    out
}

fn link_span(text: &str, caps: &Captures<'_>) -> Option<(usize, usize, String)> {
    if let Some(m) = caps.name("email") {
        return Some((m.start(), m.end(), format!("mailto:{}", m.as_str())));
    }

    let m = caps.name("url")?;
    let raw = m.as_str();
    let prefix_len = if raw.starts_with("www.") {
        "www.".len()
    } else {
        raw.find("://").map(|i| i + 3).unwrap_or(0)
    };
    let trimmed = trim_trailing(raw);
    if trimmed.len() <= prefix_len {
        return None;
    }

    let end = m.start() + trimmed.len();
    let shown = &text[m.start()..end];
    let href = if shown.starts_with("www.") {
        format!("https://{}", shown)
    } else {
        shown.to_string()
    };
    Some((m.start(), end, href))
}

// Sentence punctuation and unbalanced closing brackets stay outside the link.
fn trim_trailing(candidate: &str) -> &str {
    let mut s = candidate;
    loop {
        let Some(last) = s.chars().last() else {
            return s;
        };
        let drop = match last {
            '.' | ',' | ':' | ';' | '!' | '?' => true,
            ')' => s.matches(')').count() > s.matches('(').count(),
            ']' => s.matches(']').count() > s.matches('[').count(),
            _ => false,
        };
        if !drop {
            return s;
        }
        s = &s[..s.len() - last.len_utf8()];
    }
}
