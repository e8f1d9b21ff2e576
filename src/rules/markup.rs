//! Tolerant tag scanning for HTML and JSX.
//!
//! This is not a parser: it reads one opening tag at a time, understands
//! quoted attribute values and balanced `{...}` expressions, and can walk a
//! bounded stretch of text to approximate the open-element stack. Anything
//! it cannot make sense of is reported as "unknown" so callers can stay
//! quiet rather than guess.

use crate::checker::engine::floor_boundary;

/// Upper bound on the length of a single opening tag.
const MAX_TAG_LEN: usize = 4096;

/// Elements that never have children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// An attribute value as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// Quoted or bare literal.
    Text(&'a str),
    /// JSX expression, without the surrounding braces.
    Expr(&'a str),
}

impl<'a> AttrValue<'a> {
    /// Literal text, including string literals wrapped in an expression
    /// such as `{"Close"}`.
    #[must_use]
    pub fn text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Expr(expr) => string_literal(expr.trim()),
        }
    }

    #[must_use]
    pub fn is_blank(self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Expr(expr) => {
                let expr = expr.trim();
                expr.is_empty() || string_literal(expr).is_some_and(|s| s.trim().is_empty())
            }
        }
    }
}

fn string_literal(expr: &str) -> Option<&str> {
    let bytes = expr.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return Some(&expr[1..expr.len() - 1]);
        }
    }
    None
}

/// A parsed opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag<'a> {
    pub name: &'a str,
    /// Offset of the `<`.
    pub start: usize,
    /// Offset just past the closing `>`.
    pub end: usize,
    pub self_closing: bool,
    attrs: Vec<(&'a str, Option<AttrValue<'a>>)>,
}

impl<'a> OpenTag<'a> {
    /// Attribute lookup, ignoring ASCII case so `htmlFor`/`for` style
    /// differences between JSX and HTML do not matter.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<Option<AttrValue<'a>>> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Literal value of an attribute.
    #[must_use]
    pub fn attr_text(&self, name: &str) -> Option<&'a str> {
        self.attr(name).flatten().and_then(AttrValue::text)
    }

    /// True when the attribute is present with a non-blank value. A JSX
    /// expression counts as non-blank unless it is an empty string literal.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.attr(name)
            .flatten()
            .is_some_and(|value| !value.is_blank())
    }

    /// Capitalized or dotted names are components whose rendered markup is
    /// not visible here.
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.name.starts_with(|c: char| c.is_ascii_uppercase()) || self.name.contains('.')
    }

    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.iter().any(|v| self.is_named(v))
    }

    /// Accessible name supplied through `aria-label` or `aria-labelledby`.
    #[must_use]
    pub fn has_aria_name(&self) -> bool {
        self.has_value("aria-label") || self.has_value("aria-labelledby")
    }
}

/// Role of an element as far as the scanner can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole<'a> {
    Role(&'a str),
    /// Role depends on code or on a component's rendering.
    Opaque,
    /// Element has no role the tables care about.
    NoRole,
}

/// Explicit `role` first, then the implicit role of the tag.
#[must_use]
pub fn element_role<'a>(tag: &OpenTag<'a>) -> ElementRole<'a> {
    match tag.attr("role") {
        Some(Some(value)) => match value.text() {
            Some(text) => text
                .split_whitespace()
                .next()
                .map_or(ElementRole::NoRole, ElementRole::Role),
            None => ElementRole::Opaque,
        },
        _ if tag.is_component() => ElementRole::Opaque,
        _ => implicit_role(tag).map_or(ElementRole::NoRole, ElementRole::Role),
    }
}

/// Implicit ARIA role of a native element.
#[must_use]
pub fn implicit_role(tag: &OpenTag<'_>) -> Option<&'static str> {
    let name = tag.name.to_ascii_lowercase();
    let role = match name.as_str() {
        "a" | "area" => return tag.has_attr("href").then_some("link"),
        "button" | "summary" => "button",
        "input" => return input_role(tag),
        "select" => {
            let multi = tag.has_attr("multiple")
                || tag
                    .attr_text("size")
                    .and_then(|s| s.parse::<u32>().ok())
                    .is_some_and(|s| s > 1);
            if multi { "listbox" } else { "combobox" }
        }
        "textarea" => "textbox",
        "option" => "option",
        "li" => "listitem",
        "ul" | "ol" | "menu" => "list",
        "table" => "table",
        "tr" => "row",
        "td" => "cell",
        "th" => "columnheader",
        "thead" | "tbody" | "tfoot" => "rowgroup",
        "nav" => "navigation",
        "main" => "main",
        "footer" => "contentinfo",
        "header" => "banner",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "progress" => "progressbar",
        "meter" => "meter",
        "dialog" => "dialog",
        "details" | "fieldset" | "optgroup" => "group",
        "form" => "form",
        "img" => "img",
        _ => return None,
    };
    Some(role)
}

fn input_role(tag: &OpenTag<'_>) -> Option<&'static str> {
    let kind = tag.attr_text("type").unwrap_or("text").to_ascii_lowercase();
    let role = match kind.as_str() {
        "checkbox" => "checkbox",
        "radio" => "radio",
        "range" => "slider",
        "number" => "spinbutton",
        "button" | "submit" | "reset" | "image" => "button",
        "search" => "searchbox",
        "text" | "email" | "tel" | "url" => "textbox",
        _ => return None,
    };
    Some(role)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':')
}

/// Skip a `{...}` expression starting at `pos` (which must be `{`). Returns
/// the offset just past the matching `}`.
fn skip_braces(bytes: &[u8], pos: usize, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = pos;
    while i < limit {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < limit && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize, limit: usize) -> usize {
    while i < limit && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Parse the opening tag whose `<` is at `start`.
#[must_use]
pub fn open_tag_at(content: &str, start: usize) -> Option<OpenTag<'_>> {
    let bytes = content.as_bytes();
    if bytes.get(start) != Some(&b'<') || !bytes.get(start + 1)?.is_ascii_alphabetic() {
        return None;
    }
    let limit = floor_boundary(content, start + MAX_TAG_LEN);
    let mut i = start + 1;
    while i < limit && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = &content[start + 1..i];
    let mut attrs = Vec::new();

    loop {
        i = skip_whitespace(bytes, i, limit);
        match bytes.get(i).copied() {
            _ if i >= limit => return None,
            Some(b'>') => {
                return Some(OpenTag {
                    name,
                    start,
                    end: i + 1,
                    self_closing: false,
                    attrs,
                });
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                return Some(OpenTag {
                    name,
                    start,
                    end: i + 2,
                    self_closing: true,
                    attrs,
                });
            }
            Some(b'{') => i = skip_braces(bytes, i, limit)?,
            Some(b'/') => i += 1,
            Some(_) => {
                let (attr, next) = parse_attribute(content, i, limit)?;
                attrs.push(attr);
                i = next;
            }
            None => return None,
        }
    }
}

type Attribute<'a> = (&'a str, Option<AttrValue<'a>>);

fn parse_attribute(content: &str, start: usize, limit: usize) -> Option<(Attribute<'_>, usize)> {
    let bytes = content.as_bytes();
    let mut i = start;
    while i < limit && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/')
    {
        i += 1;
    }
    if i == start {
        return None;
    }
    let name = &content[start..i];
    let after_name = skip_whitespace(bytes, i, limit);
    if bytes.get(after_name) != Some(&b'=') {
        return Some(((name, None), i));
    }
    let v = skip_whitespace(bytes, after_name + 1, limit);
    match bytes.get(v).copied() {
        Some(quote @ (b'"' | b'\'')) => {
            let close = content[v + 1..limit].find(quote as char)? + v + 1;
            let value = AttrValue::Text(&content[v + 1..close]);
            Some(((name, Some(value)), close + 1))
        }
        Some(b'{') => {
            let close = skip_braces(bytes, v, limit)?;
            let value = AttrValue::Expr(&content[v + 1..close - 1]);
            Some(((name, Some(value)), close))
        }
        Some(_) => {
            let mut end = v;
            while end < limit && !bytes[end].is_ascii_whitespace() && bytes[end] != b'>' {
                end += 1;
            }
            Some(((name, Some(AttrValue::Text(&content[v..end]))), end))
        }
        None => None,
    }
}

/// The opening tag whose span contains `offset`, if `offset` sits inside a
/// tag rather than in text.
#[must_use]
pub fn enclosing_open_tag(content: &str, offset: usize) -> Option<OpenTag<'_>> {
    let window_start = offset.saturating_sub(MAX_TAG_LEN);
    let bytes = content.as_bytes();
    let mut pos = offset.min(content.len());
    while pos > window_start {
        pos -= 1;
        if bytes[pos] == b'<' && bytes.get(pos + 1).is_some_and(u8::is_ascii_alphabetic) {
            let tag = open_tag_at(content, pos)?;
            return (tag.end > offset).then_some(tag);
        }
    }
    None
}

fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

fn is_tag_boundary(bytes: &[u8], at: usize) -> bool {
    bytes
        .get(at)
        .is_none_or(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
}

/// Content between `tag` and its matching close tag, searching at most
/// `limit` bytes. Self-closing and void tags have empty content; an
/// unterminated element yields `None`.
#[must_use]
pub fn element_inner<'a>(content: &'a str, tag: &OpenTag<'_>, limit: usize) -> Option<&'a str> {
    if tag.is_void() {
        return Some("");
    }
    let bytes = content.as_bytes();
    let bound = floor_boundary(content, tag.end + limit);
    let scope = &content[..bound];
    let open = format!("<{}", tag.name);
    let close = format!("</{}", tag.name);
    let mut depth = 1usize;
    let mut pos = tag.end;

    loop {
        let next_close = find_ci(scope, &close, pos)?;
        let next_open = find_ci(scope, &open, pos).filter(|&o| o < next_close);
        match next_open {
            Some(o) if is_tag_boundary(bytes, o + open.len()) => {
                let nested = open_tag_at(content, o)?;
                if !nested.is_void() {
                    depth += 1;
                }
                pos = nested.end;
            }
            Some(o) => pos = o + open.len(),
            None => {
                if is_tag_boundary(bytes, next_close + close.len()) {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&content[tag.end..next_close]);
                    }
                }
                pos = next_close + close.len();
            }
        }
    }
}

/// Text a user would see inside an element: tags are dropped, JSX
/// expressions are kept as `{…}` placeholders, whitespace-only literals and
/// comments vanish.
#[must_use]
pub fn visible_text(inner: &str) -> String {
    let bytes = inner.as_bytes();
    let mut out = String::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => i = skip_markup(inner, i),
            b'{' => {
                // An unclosed brace runs to the end of the text.
                let (body_end, end) = skip_braces(bytes, i, bytes.len())
                    .map_or((bytes.len(), bytes.len()), |close| (close - 1, close));
                let expr = inner[i + 1..body_end].trim();
                let is_comment = expr.starts_with("/*") && expr.ends_with("*/");
                let is_blank = string_literal(expr).is_some_and(|s| s.trim().is_empty());
                if !expr.is_empty() && !is_comment && !is_blank {
                    out.push_str("{…}");
                }
                i = end;
            }
            _ => {
                let next = inner[i..]
                    .find(['<', '{'])
                    .map_or(inner.len(), |n| i + n);
                out.push_str(&inner[i..next]);
                i = next;
            }
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn skip_markup(inner: &str, i: usize) -> usize {
    if let Some(tag) = open_tag_at(inner, i) {
        return tag.end;
    }
    if inner[i..].starts_with("<!--") {
        return inner[i..].find("-->").map_or(inner.len(), |n| i + n + 3);
    }
    match inner.as_bytes().get(i + 1) {
        Some(b'/' | b'!') => inner[i..].find('>').map_or(inner.len(), |n| i + n + 1),
        _ => i + 1,
    }
}

/// Approximate stack of elements open at `offset`, outermost first, looking
/// back at most `window` bytes.
#[must_use]
pub fn ancestors(content: &str, offset: usize, window: usize) -> Vec<OpenTag<'_>> {
    let offset = floor_boundary(content, offset);
    let bytes = content.as_bytes();
    let mut stack: Vec<OpenTag<'_>> = Vec::new();
    let mut pos = offset.saturating_sub(window);
    while !content.is_char_boundary(pos) {
        pos += 1;
    }
    while let Some(rel) = content[pos..offset].find('<') {
        let at = pos + rel;
        match bytes.get(at + 1) {
            Some(b'/') if at + 2 >= offset => break,
            Some(b'/') => {
                let name_end = content[at + 2..offset]
                    .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
                    .map_or(offset, |n| at + 2 + n);
                let name = &content[at + 2..name_end];
                if let Some(idx) = stack.iter().rposition(|t| t.name == name) {
                    stack.truncate(idx);
                }
                pos = name_end;
            }
            Some(b) if b.is_ascii_alphabetic() => match open_tag_at(content, at) {
                Some(tag) if tag.end <= offset => {
                    pos = tag.end;
                    if !tag.is_void() {
                        stack.push(tag);
                    }
                }
                _ => pos = at + 1,
            },
            _ => pos = at + 1,
        }
    }
    stack
}

/// True when `offset` sits inside an open `<tag>` element within `window`
/// bytes, judged by counting openings against closings.
#[must_use]
pub fn is_inside(content: &str, offset: usize, tag: &str, window: usize) -> bool {
    let offset = floor_boundary(content, offset);
    let mut from = offset.saturating_sub(window);
    while !content.is_char_boundary(from) {
        from += 1;
    }
    let scope = &content[from..offset];
    let bytes = scope.as_bytes();
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let count = |needle: &str| {
        let mut n = 0usize;
        let mut at = 0;
        while let Some(found) = find_ci(scope, needle, at) {
            if is_tag_boundary(bytes, found + needle.len()) {
                n += 1;
            }
            at = found + needle.len();
        }
        n
    };
    count(&open) > count(&close)
}

/// Every opening tag named `name` in `content`.
#[must_use]
pub fn find_tags<'a>(content: &'a str, name: &str) -> Vec<OpenTag<'a>> {
    let needle = format!("<{name}");
    let bytes = content.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;
    while let Some(at) = find_ci(content, &needle, pos) {
        pos = at + needle.len();
        if !is_tag_boundary(bytes, at + needle.len()) {
            continue;
        }
        if let Some(tag) = open_tag_at(content, at) {
            pos = tag.end;
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
