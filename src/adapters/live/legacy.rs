//! HTTP binding for legacy meme engines (versions before `0.2.0`).

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use super::{expect_bytes, expect_success};
use crate::error::MemeError;
use crate::model::{Meme, MemeParams};
use crate::ports::meme_engine::{EngineFuture, GenerateRequest, ListRenderRequest, MemeEngine};

/// Entry text template used on the legacy catalog index image.
const LIST_TEXT_TEMPLATE: &str = "{index}.{keywords}";

/// Binding for the legacy engine API.
///
/// The legacy catalog is fetched in two steps (key listing, then per-key
/// info) and generation uploads a multipart form whose image parts carry no
/// identifiers.
pub struct LegacyHttpEngine {
    client: Client,
    base_url: String,
}

impl LegacyHttpEngine {
    /// Create a binding against the given engine base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MemeError> {
        Ok(Self {
            client: super::build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl MemeEngine for LegacyHttpEngine {
    fn load_memes(&self) -> EngineFuture<'_, Vec<Meme>> {
        Box::pin(async move {
            let url = format!("{}/memes/keys", self.base_url);
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await?;
                return Err(MemeError::Api { status: status.as_u16(), message });
            }
            let keys: Vec<String> = response.json().await?;

            let mut memes = Vec::with_capacity(keys.len());
            for key in keys {
                let url = format!("{}/memes/{key}/info", self.base_url);
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    let message = response.text().await?;
                    return Err(MemeError::Api { status: status.as_u16(), message });
                }
                let info: LegacyMemeInfo = response.json().await?;
                memes.push(info.into_meme());
            }
            Ok(memes)
        })
    }

    fn check_resources(&self) -> EngineFuture<'_, ()> {
        Box::pin(async move {
            let url = format!("{}/memes/check_resources", self.base_url);
            let response = self.client.post(&url).send().await?;
            expect_success(response).await
        })
    }

    fn render_list(&self, request: &ListRenderRequest) -> EngineFuture<'_, Vec<u8>> {
        let entries: Vec<serde_json::Value> = request
            .properties
            .iter()
            .map(|(key, props)| {
                serde_json::json!({
                    "meme_key": key,
                    "disabled": props.disabled,
                    "labels": props.labels,
                })
            })
            .collect();
        Box::pin(async move {
            let url = format!("{}/memes/render_list", self.base_url);
            let body = serde_json::json!({
                "meme_list": entries,
                "text_template": LIST_TEXT_TEMPLATE,
                "add_category_icon": true,
            });
            let response = self.client.post(&url).json(&body).send().await?;
            expect_bytes(response).await
        })
    }

    fn render_preview(&self, key: &str) -> EngineFuture<'_, Vec<u8>> {
        let url = format!("{}/memes/{key}/preview", self.base_url);
        Box::pin(async move {
            let response = self.client.get(&url).send().await?;
            expect_bytes(response).await
        })
    }

    fn generate(&self, request: &GenerateRequest) -> EngineFuture<'_, Vec<u8>> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/memes/{}/", self.base_url, request.key);

            // The legacy API takes bare image uploads; identifiers are dropped.
            let mut form = Form::new();
            for image in request.images {
                form = form.part("images", Part::bytes(image.data).file_name("image"));
            }
            for text in request.texts {
                form = form.text("texts", text);
            }
            let args = serde_json::to_string(&request.options)
                .map_err(|e| MemeError::Engine(format!("unserializable options: {e}")))?;
            form = form.text("args", args);

            let response = self.client.post(&url).multipart(form).send().await?;
            expect_bytes(response).await
        })
    }
}

// --- Legacy engine wire types ---

#[derive(Deserialize)]
struct LegacyMemeInfo {
    key: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    params_type: LegacyParamsInfo,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Default, Deserialize)]
struct LegacyParamsInfo {
    #[serde(default)]
    min_images: u32,
    #[serde(default)]
    max_images: u32,
    #[serde(default)]
    min_texts: u32,
    #[serde(default)]
    max_texts: u32,
    #[serde(default)]
    default_texts: Vec<String>,
    #[serde(default)]
    args_type: serde_json::Value,
}

impl LegacyMemeInfo {
    fn into_meme(self) -> Meme {
        Meme {
            key: self.key,
            keywords: self.keywords,
            params: MemeParams {
                min_images: self.params_type.min_images,
                max_images: self.params_type.max_images,
                min_texts: self.params_type.min_texts,
                max_texts: self.params_type.max_texts,
                default_texts: self.params_type.default_texts,
                options: self.params_type.args_type,
            },
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_info_maps_to_meme() {
        let json = r#"{
            "key": "ksyx",
            "keywords": ["看upx", "看寺"],
            "params_type": {"min_images": 1, "max_images": 1},
            "tags": []
        }"#;
        let info: LegacyMemeInfo = serde_json::from_str(json).unwrap();
        let meme = info.into_meme();
        assert_eq!(meme.key, "ksyx");
        assert_eq!(meme.keywords, vec!["看upx".to_string(), "看寺".to_string()]);
        assert_eq!(meme.params.min_images, 1);
        assert_eq!(meme.params.max_images, 1);
        assert_eq!(meme.params.max_texts, 0);
    }

    #[test]
    fn legacy_info_tolerates_missing_fields() {
        let info: LegacyMemeInfo = serde_json::from_str(r#"{"key": "say"}"#).unwrap();
        let meme = info.into_meme();
        assert_eq!(meme.key, "say");
        assert!(meme.keywords.is_empty());
        assert_eq!(meme.params, MemeParams::default());
    }
}
