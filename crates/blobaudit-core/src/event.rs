use serde::{Deserialize, Serialize};

/// A single uploaded blob as handed over by the trigger runtime.
///
/// Constructed once per invocation and consumed by the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobEvent {
    /// Full path/name of the uploaded object
    pub name: String,
    /// Byte size reported by the blob store
    pub length: u64,
    #[serde(default, skip_serializing)]
    pub content: Vec<u8>,
}

impl BlobEvent {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            length: content.len() as u64,
            content,
        }
    }

    /// Override the reported length (the store metadata may differ from the body read)
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = length;
        self
    }

    /// Byte length of the body that was actually read
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_content_length() {
        let event = BlobEvent::new("a.txt", b"hello".to_vec());
        assert_eq!(event.length, 5);
        assert_eq!(event.content_len(), 5);
    }

    #[test]
    fn test_with_length() {
        let event = BlobEvent::new("invoice-2024.edi", Vec::new()).with_length(4096);
        assert_eq!(event.length, 4096);
        assert_eq!(event.content_len(), 0);
    }

    #[test]
    fn test_content_not_serialized() {
        let event = BlobEvent::new("a.txt", b"secret".to_vec());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "a.txt");
        assert_eq!(json["length"], 6);
        assert!(json.get("content").is_none());
    }
}
