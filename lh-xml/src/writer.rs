//! XML text writer
//!
//! Elements are written one per line, indented two spaces per level.
//! Attribute values use single quotes. Every piece of text that reaches the
//! document goes through one escaping discipline: the five XML entities,
//! numeric character references for other non-printable characters XML 1.0
//! allows, and a textual `\xNN` escape for the ones it forbids. A literal
//! backslash is doubled so the textual escape stays unambiguous.

use lh_common::SourceLocation;
use lh_ir::Qualifiers;
use std::fmt::{Display, Write};

/// Spaces per nesting level
pub const INDENT: usize = 2;

/// Whether XML 1.0 allows `ch` in a document, literally or as a reference
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        u32::from(ch),
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

fn push_escaped(out: &mut String, ch: char, keep_whitespace: bool) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '\'' => out.push_str("&apos;"),
        '"' => out.push_str("&quot;"),
        '\\' => out.push_str("\\\\"),
        '\n' | '\r' | '\t' if keep_whitespace => out.push(ch),
        ' '..='~' => out.push(ch),
        _ if is_xml_char(ch) => {
            let _ = write!(out, "&#{};", u32::from(ch));
        }
        _ if u32::from(ch) <= 0xFF => {
            let _ = write!(out, "\\x{:02x}", u32::from(ch));
        }
        _ => {
            let _ = write!(out, "\\u{:04x}", u32::from(ch));
        }
    }
}

/// Escape `text` for use in the document. With `keep_whitespace`, newline,
/// carriage return and tab pass through unchanged (used for the raw
/// source, whose layout must survive).
pub fn escape_str(out: &mut String, text: &str, keep_whitespace: bool) {
    for ch in text.chars() {
        push_escaped(out, ch, keep_whitespace);
    }
}

/// Escape raw bytes. Each byte stands for the character of the same value,
/// so arbitrary string constants survive.
pub fn escape_bytes(out: &mut String, bytes: &[u8]) {
    for &byte in bytes {
        push_escaped(out, char::from(byte), false);
    }
}

/// Escape source text. Valid UTF-8 is escaped per character; bytes of
/// invalid sequences are escaped one by one, so nothing is lost.
pub fn escape_source(out: &mut String, source: &[u8]) {
    for chunk in source.utf8_chunks() {
        escape_str(out, chunk.valid(), true);
        escape_bytes(out, chunk.invalid());
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_str(&mut out, text, false);
    out
}

/// Attribute list builder
#[derive(Debug, Default, Clone)]
pub struct Attrs {
    buf: String,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Display) -> Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("='");
        escape_str(&mut self.buf, &value.to_string(), false);
        self.buf.push('\'');
        self
    }

    pub fn opt(self, name: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Boolean attribute, written as `name='1'` when set
    pub fn flag(self, name: &str, set: bool) -> Self {
        if set {
            self.with(name, 1)
        } else {
            self
        }
    }

    pub fn qualifiers(self, quals: Qualifiers) -> Self {
        self.flag("constant", quals.contains(Qualifiers::CONST))
            .flag("volatile", quals.contains(Qualifiers::VOLATILE))
            .flag("restrict", quals.contains(Qualifiers::RESTRICT))
    }

    pub fn location(self, location: Option<&SourceLocation>) -> Self {
        self.opt("location", location)
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn as_str(&self) -> &str {
        &self.buf
    }
}

/// An append-only XML buffer
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose output will be spliced in at nesting `depth`
    pub fn with_depth(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn indent(&mut self) {
        for _ in 0..self.depth * INDENT {
            self.buf.push(' ');
        }
    }

    /// `<tag attrs>` on its own line; subsequent output nests inside it
    pub fn open(&mut self, tag: &str, attrs: Attrs) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(attrs.as_str());
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    /// `<tag attrs />`
    pub fn empty(&mut self, tag: &str, attrs: Attrs) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(attrs.as_str());
        self.buf.push_str(" />\n");
    }

    /// `<tag>escaped</tag>` on one line; `escaped` must already be escaped
    pub fn text_element(&mut self, tag: &str, escaped: &str) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        self.buf.push_str(escaped);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    /// Write a literal line without indentation (document prologue)
    pub fn raw_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    /// Splice in another writer's output verbatim
    pub fn append(&mut self, other: &XmlWriter) {
        self.buf.push_str(&other.buf);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_structural_characters() {
        assert_eq!(escape("a<b && c>'d'\"e\""), "a&lt;b &amp;&amp; c&gt;&apos;d&apos;&quot;e&quot;");
    }

    #[test]
    fn test_escape_control_and_non_ascii() {
        assert_eq!(escape("tab\there\n"), "tab&#9;here&#10;");
        assert_eq!(escape("caf\u{e9}"), "caf&#233;");

        let mut kept = String::new();
        escape_str(&mut kept, "line\n\tnext\u{1}", true);
        assert_eq!(kept, "line\n\tnext\\x01");
    }

    #[test]
    fn test_escape_bytes() {
        let mut out = String::new();
        escape_bytes(&mut out, b"hi\\\n<\x00\xff");
        assert_eq!(out, "hi\\\\&#10;&lt;\\x00&#255;");
    }

    #[test]
    fn test_characters_forbidden_by_xml() {
        assert_eq!(escape("page\u{c}break"), "page\\x0cbreak");
        assert_eq!(escape("a\u{b}\u{1f}b"), "a\\x0b\\x1fb");
        assert_eq!(escape("\u{fffe}"), "\\ufffe");
        // Escaped backslash keeps the textual form unambiguous
        assert_eq!(escape("\\x0c"), "\\\\x0c");
        assert_eq!(escape("\u{85}\u{7f}"), "&#133;&#127;");

        assert!(!is_xml_char('\0'));
        assert!(!is_xml_char('\u{c}'));
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('\u{e9}'));
    }

    #[test]
    fn test_escape_source_keeps_invalid_bytes() {
        let mut out = String::new();
        escape_source(&mut out, b"/* caf\xe9 */\x0c\n");
        assert_eq!(out, "/* caf&#233; */\\x0c\n");

        let mut out = String::new();
        escape_source(&mut out, "caf\u{e9} \\n\n".as_bytes());
        assert_eq!(out, "caf&#233; \\\\n\n");
    }

    #[test]
    fn test_attrs() {
        let attrs = Attrs::new()
            .with("id", 12)
            .opt("name", Some("a'b"))
            .opt("missing", None::<&str>)
            .flag("unsigned", true)
            .flag("off", false)
            .qualifiers(Qualifiers::CONST | Qualifiers::RESTRICT);
        assert_eq!(attrs.as_str(), " id='12' name='a&apos;b' unsigned='1' constant='1' restrict='1'");
    }

    #[test]
    fn test_location_attr() {
        let loc = SourceLocation::new("x.c", 3, 4);
        assert_eq!(Attrs::new().location(Some(&loc)).as_str(), " location='x.c:3:4'");
        let built_in = SourceLocation::built_in();
        assert_eq!(
            Attrs::new().location(Some(&built_in)).as_str(),
            " location='&lt;built-in&gt;:0:0'"
        );
        assert!(Attrs::new().location(None).is_empty());
    }

    #[test]
    fn test_nesting() {
        let mut w = XmlWriter::with_depth(1);
        w.open("block", Attrs::new().with("id", 2));
        w.empty("next", Attrs::new().with("id", 3));
        w.text_element("string-literal", "x");
        w.close("block");
        assert_eq!(
            w.as_str(),
            "  <block id='2'>\n    <next id='3' />\n    <string-literal>x</string-literal>\n  </block>\n"
        );
        assert_eq!(w.depth(), 1);
    }
}
