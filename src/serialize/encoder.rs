//! Encodes manifest documents as a YAML stream.

use thiserror::Error;

use super::KeyOrder;
use crate::manifest::ManifestDocument;
use crate::value::Value;

/// Separator written between consecutive documents.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// EncodeError is raised when a document cannot be written as YAML.
#[derive(Debug, Error)]
#[error("failed to encode {kind} {resource}: {source}")]
pub struct EncodeError {
    pub kind: String,
    pub resource: String,
    #[source]
    pub source: serde_yaml::Error,
}

/// Encodes a single document.
pub fn encode_document(doc: &ManifestDocument, order: KeyOrder) -> Result<String, EncodeError> {
    let kind = doc.kind();
    let root = order.apply(doc.root(), kind.is_workload());
    serde_yaml::to_string(&Value::Map(root)).map_err(|source| EncodeError {
        kind: kind.to_string(),
        resource: doc.resource_id(),
        source,
    })
}

/// Encodes documents as one multi-document stream.
///
/// Documents are separated by `---` lines; nothing follows the last one.
pub fn encode(docs: &[ManifestDocument], order: KeyOrder) -> Result<String, EncodeError> {
    let encoded = docs
        .iter()
        .map(|doc| encode_document(doc, order))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(encoded.join(DOCUMENT_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_documents;
    use pretty_assertions::assert_eq;

    const STREAM: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  labels:
    tier: backend
data:
  MODE: fast
  RETRIES: '3'
---
kind: Deployment
apiVersion: apps/v1
metadata:
  name: web
spec:
  template:
    spec:
      containers:
      - name: app
        image: nginx
  replicas: 2
---
apiVersion: example.com/v1
kind: Widget
metadata:
  name: w
spec:
  size: 3
  enabled: true
  ratio: 0.5
  notes: null
"#;

    #[test]
    fn test_round_trip_preserves_stream() {
        let stream = parse_documents(STREAM);
        assert!(!stream.has_errors());
        assert_eq!(stream.documents.len(), 3);

        let out = encode(&stream.documents, KeyOrder::Preserve).unwrap();
        assert_eq!(out, STREAM);
    }

    #[test]
    fn test_separator_only_between_documents() {
        let stream = parse_documents("a: 1\n---\nb: 2\n");
        let out = encode(&stream.documents, KeyOrder::Preserve).unwrap();
        assert_eq!(out, "a: 1\n---\nb: 2\n");
        assert!(!out.ends_with(DOCUMENT_SEPARATOR));

        let single = encode(&stream.documents[..1], KeyOrder::Preserve).unwrap();
        assert_eq!(single, "a: 1\n");
        assert_eq!(encode(&[], KeyOrder::Preserve).unwrap(), "");
    }

    #[test]
    fn test_kubernetes_order_only_moves_keys() {
        let stream = parse_documents(STREAM);
        let out = encode(&stream.documents, KeyOrder::Kubernetes).unwrap();

        assert!(out.contains(
            "---\napiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n\
             spec:\n  replicas: 2\n  template:\n"
        ));

        let reparsed = parse_documents(&out);
        assert_eq!(reparsed.documents, stream.documents);
    }
}
