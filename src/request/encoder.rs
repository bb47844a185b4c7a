//! Encoding of file-backed request bodies.

use super::ContentType;

/// Wire form of an encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPayload {
    /// Text content (JSON, XML, plain text)
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
}

/// A body ready to attach to a request, with its `Content-Type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// MIME type to send
    pub content_type: &'static str,
    /// Encoded content
    pub payload: BodyPayload,
}

impl EncodedBody {
    /// Consumes the body and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self.payload {
            BodyPayload::Text(text) => text.into_bytes(),
            BodyPayload::Binary(bytes) => bytes,
        }
    }
}

/// Encodes the full content of an external reference.
///
/// Text kinds are decoded as UTF-8 (invalid sequences become U+FFFD);
/// [`ContentType::Binary`] keeps the bytes unchanged.
#[must_use]
pub fn encode(content_type: ContentType, source: Vec<u8>) -> EncodedBody {
    let payload = if content_type.is_text() {
        let text = match String::from_utf8(source) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        BodyPayload::Text(text)
    } else {
        BodyPayload::Binary(source)
    };

    EncodedBody {
        content_type: content_type.mime(),
        payload,
    }
}
