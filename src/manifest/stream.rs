//! Multi-document YAML streams.
//!
//! A manifest file is split at document markers before any parsing happens, so
//! that a syntax error in one document cannot hide the documents after it.

use super::{ManifestDocument, ParseError};
use crate::value::Value;

/// ParsedStream holds the outcome of parsing every document of one stream.
#[derive(Debug, Default)]
pub struct ParsedStream {
    /// Documents that parsed, in source order.
    pub documents: Vec<ManifestDocument>,
    /// Documents that did not.
    pub errors: Vec<ParseError>,
}

impl ParsedStream {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Splits a YAML stream into the text of its individual documents.
///
/// A document starts at a line consisting of `---` (optionally followed by
/// whitespace and inline content) and ends at the next such line or at a
/// `...` end marker. Directive lines (`%YAML`, `%TAG`) stay with the document
/// they introduce. The returned slices may be blank.
pub fn split_documents(content: &str) -> Vec<&str> {
    let mut documents = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if is_document_start(trimmed) {
            let pending = &content[start..offset];
            if !is_directive_prelude(pending) {
                documents.push(pending);
                // Keep inline content such as `--- {a: 1}`.
                start = offset + 3;
            }
        } else if trimmed == "..." {
            documents.push(&content[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    documents.push(&content[start..]);
    documents
}

fn is_document_start(line: &str) -> bool {
    match line.strip_prefix("---") {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}

/// Returns true if the text is directives, optionally mixed with blank and
/// comment lines.
fn is_directive_prelude(text: &str) -> bool {
    let mut directives = false;
    for line in text.lines() {
        let line = line.trim_end();
        if line.starts_with('%') {
            directives = true;
        } else if !(line.trim_start().is_empty() || line.trim_start().starts_with('#')) {
            return false;
        }
    }
    directives
}

/// Returns true if the text holds nothing but whitespace and comments.
fn is_blank(document: &str) -> bool {
    document.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Parses every document of a YAML stream.
///
/// Blank documents are dropped. Document indices in errors count only
/// non-blank documents and start at 1.
pub fn parse_documents(content: &str) -> ParsedStream {
    let mut stream = ParsedStream::default();

    let documents = split_documents(content)
        .into_iter()
        .filter(|doc| !is_blank(doc));
    for (i, text) in documents.enumerate() {
        let index = i + 1;
        let parsed = serde_yaml::from_str::<Value>(text)
            .map_err(|source| ParseError::Yaml { index, source })
            .and_then(|value| match value {
                // A document of only `~` carries nothing worth keeping.
                Value::Null => Ok(None),
                value => ManifestDocument::from_value(value, index).map(Some),
            });

        match parsed {
            Ok(Some(doc)) => stream.documents.push(doc),
            Ok(None) => {}
            Err(e) => stream.errors.push(e),
        }
    }

    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_plain_stream() {
        let docs = split_documents("a: 1\n---\nb: 2\n");
        assert_eq!(docs, vec!["a: 1\n", "\nb: 2\n"]);
    }

    #[test]
    fn test_split_leading_marker_and_inline_content() {
        let docs = split_documents("---\na: 1\n--- {b: 2}\n");
        assert_eq!(docs, vec!["", "\na: 1\n", " {b: 2}\n"]);
    }

    #[test]
    fn test_split_ignores_indented_and_prefixed_dashes() {
        let content = "a: |\n  ---\n  text\nb: ----\n----\n";
        assert_eq!(split_documents(content), vec![content]);
    }

    #[test]
    fn test_split_end_marker() {
        let docs = split_documents("a: 1\n...\n---\nb: 2\n");
        assert_eq!(docs, vec!["a: 1\n", "", "\nb: 2\n"]);
    }

    #[test]
    fn test_split_keeps_directives_with_their_document() {
        let docs = split_documents("%YAML 1.2\n%TAG ! tag:example.com,2000:\n---\nkind: X\n");
        assert_eq!(docs, vec!["%YAML 1.2\n%TAG ! tag:example.com,2000:\n---\nkind: X\n"]);

        let docs = split_documents("a: 1\n...\n%YAML 1.2\n---\nb: 2\n---\nc: 3\n");
        assert_eq!(docs, vec!["a: 1\n", "%YAML 1.2\n---\nb: 2\n", "\nc: 3\n"]);
    }

    #[test]
    fn test_parse_document_with_directive() {
        let stream = parse_documents("%YAML 1.1\n---\nkind: X\n---\nkind: Y\n");
        assert!(!stream.has_errors(), "{:?}", stream.errors);
        assert_eq!(stream.documents.len(), 2);
        assert_eq!(stream.documents[0].kind().as_str(), "X");
    }

    #[test]
    fn test_split_crlf() {
        let docs = split_documents("a: 1\r\n---\r\nb: 2\r\n");
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_parse_skips_blank_documents() {
        let stream = parse_documents("---\n# just a comment\n---\nkind: ConfigMap\n---\n\n");
        assert!(!stream.has_errors());
        assert_eq!(stream.documents.len(), 1);
        assert_eq!(stream.documents[0].kind().as_str(), "ConfigMap");
    }

    #[test]
    fn test_parse_continues_past_bad_document() {
        let stream =
            parse_documents("kind: A\n---\nkind: [broken\n---\n- not\n- a map\n---\nkind: B\n");
        let kinds: Vec<String> = stream
            .documents
            .iter()
            .map(|d| d.kind().to_string())
            .collect();
        assert_eq!(kinds, vec!["A", "B"]);
        assert_eq!(stream.errors.len(), 2);
        assert!(matches!(stream.errors[0], ParseError::Yaml { index: 2, .. }));
        assert!(matches!(stream.errors[1], ParseError::NotAMapping { index: 3, .. }));
    }
}
