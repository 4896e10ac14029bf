//! Meme engine port — the boundary to the external rendering engine.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::MemeError;
use crate::model::{Meme, MemeProperties};

/// Boxed future type returned by every [`MemeEngine`] operation.
pub type EngineFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, MemeError>> + Send + 'a>>;

/// One input image paired with the identifier it was collected under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedImage {
    /// Identifier of the image source (e.g., the sender it was taken from).
    pub name: String,
    /// Raw encoded image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Inputs for synthesizing one meme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Template key to generate with.
    pub key: String,
    /// Input images in collection order.
    pub images: Vec<NamedImage>,
    /// Input texts in collection order.
    pub texts: Vec<String>,
    /// Template-specific options.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Inputs for rendering the catalog index image.
#[derive(Debug, Clone, Default)]
pub struct ListRenderRequest {
    /// Display properties per template key, in catalog order.
    pub properties: Vec<(String, MemeProperties)>,
}

/// Versioned capability set of the external meme engine.
///
/// Each engine API generation supplies its own implementation; the binding
/// is selected once at startup and never re-detected per call.
pub trait MemeEngine: Send + Sync {
    /// Fetch the full template catalog.
    fn load_memes(&self) -> EngineFuture<'_, Vec<Meme>>;

    /// Verify (and if needed download) the engine's rendering resources.
    fn check_resources(&self) -> EngineFuture<'_, ()>;

    /// Render the browsable catalog index image.
    fn render_list(&self, request: &ListRenderRequest) -> EngineFuture<'_, Vec<u8>>;

    /// Render the preview image for one template.
    fn render_preview(&self, key: &str) -> EngineFuture<'_, Vec<u8>>;

    /// Synthesize one meme from the given inputs.
    fn generate(&self, request: &GenerateRequest) -> EngineFuture<'_, Vec<u8>>;
}

/// Serde helper for carrying image bytes as base64 strings in JSON bodies.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as a base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize a base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_image_base64_round_trip() {
        let image = NamedImage {
            name: "12345".into(),
            data: vec![0x89, 0x50, 0x4E, 0x47], // PNG magic bytes
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("iVBORw=="));
        let deserialized: NamedImage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.name, "12345");
        assert_eq!(deserialized.data, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn generate_request_serialization() {
        let request = GenerateRequest {
            key: "petpet".into(),
            images: vec![NamedImage { name: "sender".into(), data: vec![1, 2, 3] }],
            texts: vec!["hello".into()],
            options: serde_json::Map::new(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: GenerateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.key, "petpet");
        assert_eq!(deserialized.images.len(), 1);
        assert_eq!(deserialized.images[0].data, vec![1, 2, 3]);
        assert_eq!(deserialized.texts, vec!["hello".to_string()]);
    }

    #[test]
    fn generate_request_options_default_to_empty() {
        let json = r#"{"key":"petpet","images":[],"texts":[]}"#;
        let deserialized: GenerateRequest = serde_json::from_str(json).unwrap();
        assert!(deserialized.options.is_empty());
    }
}
