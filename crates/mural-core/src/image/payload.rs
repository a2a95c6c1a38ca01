use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use super::mime::MimeType;

/// Inline image bytes together with their media type.
///
/// Serialized as a self-describing `data:` URI so the persisted blob and
/// the folder manifest stay readable without a side channel for the mime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime: MimeType,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn from_bytes(mime: MimeType, bytes: Vec<u8>) -> Self {
        Self { mime, bytes }
    }

    pub fn mime(&self) -> &MimeType {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }

    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| anyhow!("not a data URI"))?;
        let (mime, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| anyhow!("data URI is not base64-encoded"))?;
        if mime.is_empty() {
            return Err(anyhow!("data URI has no media type"));
        }
        let bytes = BASE64.decode(data)?;
        Ok(Self {
            mime: MimeType(mime.to_string()),
            bytes,
        })
    }
}

impl FromStr for ImagePayload {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_data_uri(s)
    }
}

impl Serialize for ImagePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for ImagePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::from_data_uri(&uri).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let payload = ImagePayload::from_bytes(MimeType::image_png(), vec![1, 2, 3, 255]);
        let uri = payload.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(ImagePayload::from_data_uri(&uri).unwrap(), payload);
    }

    #[test]
    fn test_rejects_non_data_uri() {
        assert!(ImagePayload::from_data_uri("https://example.com/a.png").is_err());
        assert!(ImagePayload::from_data_uri("data:image/png,plain").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let payload = ImagePayload::from_bytes(MimeType::image_jpeg(), b"jpegdata".to_vec());
        let json = serde_json::to_string(&payload).unwrap();
        let back: ImagePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
