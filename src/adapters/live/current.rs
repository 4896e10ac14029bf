//! HTTP binding for current meme engines (versions `0.2.0` and later).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{expect_bytes, expect_success};
use crate::error::MemeError;
use crate::model::{Meme, MemeParams, MemeSortBy};
use crate::ports::meme_engine::{EngineFuture, GenerateRequest, ListRenderRequest, MemeEngine};

/// Entry text template used on the current catalog index image.
const LIST_TEXT_TEMPLATE: &str = "{index}. {keywords}";

/// Binding for the current engine API.
///
/// The catalog arrives in a single listing call, generation posts JSON with
/// named base64 image records, and the index image is sorted by keyword
/// pinyin on the engine side.
pub struct CurrentHttpEngine {
    client: Client,
    base_url: String,
}

impl CurrentHttpEngine {
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

impl MemeEngine for CurrentHttpEngine {
    fn load_memes(&self) -> EngineFuture<'_, Vec<Meme>> {
        Box::pin(async move {
            let url = format!("{}/meme/infos", self.base_url);
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await?;
                return Err(MemeError::Api { status: status.as_u16(), message });
            }
            let items: Vec<MemeItem> = response.json().await?;
            Ok(items.into_iter().map(MemeItem::into_meme).collect())
        })
    }

    fn check_resources(&self) -> EngineFuture<'_, ()> {
        Box::pin(async move {
            let url = format!("{}/meme/check_resources", self.base_url);
            let response = self.client.post(&url).send().await?;
            expect_success(response).await
        })
    }

    fn render_list(&self, request: &ListRenderRequest) -> EngineFuture<'_, Vec<u8>> {
        let mut properties = serde_json::Map::new();
        for (key, props) in &request.properties {
            if let Ok(value) = serde_json::to_value(props) {
                properties.insert(key.clone(), value);
            }
        }
        Box::pin(async move {
            let url = format!("{}/tools/render_list", self.base_url);
            let body = serde_json::json!({
                "meme_properties": properties,
                "exclude_memes": [],
                "sort_by": MemeSortBy::KeywordsPinyin,
                "sort_reverse": false,
                "text_template": LIST_TEXT_TEMPLATE,
                "add_category_icon": true,
            });
            let response = self.client.post(&url).json(&body).send().await?;
            expect_bytes(response).await
        })
    }

    fn render_preview(&self, key: &str) -> EngineFuture<'_, Vec<u8>> {
        let url = format!("{}/meme/{key}/preview", self.base_url);
        Box::pin(async move {
            let response = self.client.get(&url).send().await?;
            expect_bytes(response).await
        })
    }

    fn generate(&self, request: &GenerateRequest) -> EngineFuture<'_, Vec<u8>> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/meme/{}", self.base_url, request.key);
            let body = serde_json::json!({
                "images": request.images,
                "texts": request.texts,
                "options": request.options,
            });
            let response = self.client.post(&url).json(&body).send().await?;
            expect_bytes(response).await
        })
    }
}

// --- Current engine wire types ---

#[derive(Deserialize)]
struct MemeItem {
    key: String,
    info: MemeInfo,
}

#[derive(Deserialize)]
struct MemeInfo {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    params: ParamsInfo,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Default, Deserialize)]
struct ParamsInfo {
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
    options: serde_json::Value,
}

impl MemeItem {
    fn into_meme(self) -> Meme {
        Meme {
            key: self.key,
            keywords: self.info.keywords,
            params: MemeParams {
                min_images: self.info.params.min_images,
                max_images: self.info.params.max_images,
                min_texts: self.info.params.min_texts,
                max_texts: self.info.params.max_texts,
                default_texts: self.info.params.default_texts,
                options: self.info.params.options,
            },
            tags: self.info.tags,
        }
    }
}
