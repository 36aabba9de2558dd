//! Pure string helpers for tooltip markup.
//!
//! These run before anything touches the DOM: escaping plain-text titles,
//! splicing escaped text into the title wrapper, and reading the class list
//! of the template's root element so it can be restored on every show.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// Default title callback: escapes `<`, `>` and `"`.
///
/// Ampersands pass through so titles may carry character references.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace the children of the wrapper's root element with `inner_html`.
///
/// `<p></p>` with `a` gives `<p>a</p>`. A wrapper without a closing tag gets
/// the content appended.
#[must_use]
pub fn wrap_html(wrapper: &str, inner_html: &str) -> String {
    let wrapper = wrapper.trim();
    let Some(open_end) = opening_tag(wrapper).map(|(start, len)| start + len) else {
        return format!("{wrapper}{inner_html}");
    };
    match wrapper.rfind("</") {
        Some(close_start) if close_start >= open_end => {
            format!("{}{inner_html}{}", &wrapper[..open_end], &wrapper[close_start..])
        }
        _ => format!("{wrapper}{inner_html}"),
    }
}

/// The `class` attribute of the template's root element, or `""`.
#[must_use]
pub fn root_class(template: &str) -> String {
    let Some((start, len)) = opening_tag(template) else {
        return String::new();
    };
    attribute_value(&template[start..start + len], "class").unwrap_or_default()
}

/// The user-agent `display` value for an element named `tag`.
///
/// Used to reveal a markup clone whose source is hidden by a stylesheet rule.
#[must_use]
pub fn default_display(tag: &str) -> &'static str {
    match tag.to_ascii_lowercase().as_str() {
        "a" | "abbr" | "b" | "bdi" | "bdo" | "br" | "cite" | "code" | "data" | "dfn" | "em" | "i" | "img"
        | "kbd" | "label" | "mark" | "q" | "s" | "samp" | "small" | "span" | "strong" | "sub" | "sup"
        | "time" | "u" | "var" => "inline",
        "button" | "input" | "select" | "textarea" => "inline-block",
        "li" => "list-item",
        "table" => "table",
        "caption" => "table-caption",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        _ => "block",
    }
}

/// Byte range of the first opening tag, `<` through `>` inclusive.
fn opening_tag(markup: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(offset) = markup[search_from..].find('<') {
        let start = search_from + offset;
        let rest = &markup[start + 1..];
        let is_element = rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        let end = rest.find('>')?;
        if is_element {
            return Some((start, end + 2));
        }
        search_from = start + end + 2;
    }
    None
}

/// Value of `name` inside one opening tag. Handles single, double and no quotes.
fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let inner = tag.trim_start_matches('<').trim_end_matches('>').trim_end_matches('/');
    let mut rest = inner.split_once(char::is_whitespace)?.1;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let key_end = rest.find(|c: char| c == '=' || c.is_whitespace()).unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = rest[key_end..].trim_start();
        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(quote).unwrap_or(body.len());
                    (&body[..close], body.get(close + 1..).unwrap_or(""))
                }
                _ => {
                    let close = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    (&after_eq[..close], &after_eq[close..])
                }
            };
            rest = remaining;
            value
        } else {
            ""
        };
        if key.eq_ignore_ascii_case(name) {
            return Some(value.to_owned());
        }
    }
}
