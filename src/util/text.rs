//! Small text helpers shared by the exporters.

/// Escape a string for use in XML text or a double-quoted attribute.
#[must_use]
pub fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Lowercase file-name slug: ASCII alphanumerics kept, runs of anything
/// else collapsed to a single `-`. Empty input yields `"view"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "view".to_owned()
    } else {
        slug
    }
}

/// Format a coordinate with three decimals, trimming trailing zeros so the
/// output stays compact and byte-stable.
#[must_use]
pub fn fmt_coord(value: f32) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            let _ = s.pop();
        }
        if s.ends_with('.') {
            let _ = s.pop();
        }
    }
    if s == "-0" {
        "0".to_owned()
    } else {
        s
    }
}
