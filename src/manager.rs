//! The meme manager façade.
//!
//! One manager per process: it owns the template catalog, resolves keywords
//! to templates, renders info cards and the catalog index, and drives the
//! generation pipeline through the selected engine binding. All state is
//! read-only after the one-time catalog load; the `loaded` flag never
//! reverts within the process lifetime.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::MemeConfig;
use crate::context::{EngineBinding, EngineContext};
use crate::error::MemeError;
use crate::model::{EngineGeneration, Meme, MemeProperties};
use crate::ports::meme_engine::{GenerateRequest, ListRenderRequest, NamedImage};
use crate::ports::param_collector::ParamsCollector;

/// Catalog state: populated at most once, then read-only.
#[derive(Default)]
struct Catalog {
    memes: Vec<Meme>,
    /// All alias keywords flattened in catalog order, then per-template
    /// keyword order. Duplicates are kept; membership is what matters.
    keywords: Vec<String>,
    loaded: bool,
}

/// Keyword-driven façade over the meme engine.
///
/// `E` is the host platform's chat event type; it is passed through to the
/// parameter collector unexamined.
pub struct MemeManager<E> {
    config: MemeConfig,
    collector: Arc<dyn ParamsCollector<E>>,
    binding: Option<EngineBinding>,
    catalog: RwLock<Catalog>,
}

impl<E> MemeManager<E> {
    /// Create a manager from an already-resolved engine context.
    #[must_use]
    pub fn new(
        config: MemeConfig,
        collector: Arc<dyn ParamsCollector<E>>,
        context: EngineContext,
    ) -> Self {
        Self {
            config,
            collector,
            binding: context.into_binding(),
            catalog: RwLock::new(Catalog::default()),
        }
    }

    /// Probe the configured engine and create a manager bound to it.
    ///
    /// Never fails: an unreachable engine produces a disabled manager whose
    /// operations degrade to logged no-ops.
    pub async fn connect(config: MemeConfig, collector: Arc<dyn ParamsCollector<E>>) -> Self {
        let context = EngineContext::connect(&config).await;
        Self::new(config, collector, context)
    }

    /// Whether an engine binding was selected at startup.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.binding.is_some()
    }

    /// The engine API generation in use, if any.
    #[must_use]
    pub fn generation(&self) -> Option<EngineGeneration> {
        self.binding.as_ref().map(|b| b.generation)
    }

    /// Whether the template catalog has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.catalog.read().loaded
    }

    /// Verify engine resources, then load the template catalog.
    ///
    /// A failed resource check is never fatal; it is logged and the load
    /// proceeds anyway. When `check_resources` is disabled in the
    /// configuration the check is skipped entirely.
    pub async fn check_resources(&self) {
        let Some(binding) = &self.binding else {
            error!("skipping resource check: meme engine is not available");
            return;
        };
        if !self.config.check_resources {
            info!("skipping resource check, loading memes directly");
            self.load_memes().await;
            return;
        }
        info!("checking meme resources");
        match binding.engine.check_resources().await {
            Ok(()) => info!("resource check complete, loading memes"),
            Err(e) => warn!("resource check failed: {e}, loading memes anyway"),
        }
        self.load_memes().await;
    }

    /// Load the catalog and flatten the keyword index. Idempotent; a failed
    /// or empty load leaves the manager unloaded so a later call can retry.
    async fn load_memes(&self) {
        if self.catalog.read().loaded {
            return;
        }
        let Some(binding) = &self.binding else {
            error!("cannot load memes: meme engine is not available");
            return;
        };
        match binding.engine.load_memes().await {
            Ok(memes) if memes.is_empty() => {
                warn!("no memes found, engine resources may still be downloading");
            }
            Ok(memes) => {
                let keywords: Vec<String> =
                    memes.iter().flat_map(|m| m.keywords.iter().cloned()).collect();
                info!(memes = memes.len(), keywords = keywords.len(), "meme catalog loaded");
                let mut catalog = self.catalog.write();
                catalog.memes = memes;
                catalog.keywords = keywords;
                catalog.loaded = true;
            }
            Err(e @ MemeError::Api { .. }) => {
                error!("failed to load memes: {e}");
                error!("engine resources may be incomplete, retrying on the next check");
                self.reset_catalog();
            }
            Err(e) => {
                error!("failed to load memes: {e}");
                self.reset_catalog();
            }
        }
    }

    fn reset_catalog(&self) {
        let mut catalog = self.catalog.write();
        catalog.memes = Vec::new();
        catalog.keywords = Vec::new();
    }

    /// Find the first template whose key equals `keyword` or whose alias
    /// list contains it. Catalog order decides ties.
    #[must_use]
    pub fn find_meme(&self, keyword: &str) -> Option<Meme> {
        let catalog = self.catalog.read();
        if !catalog.loaded {
            warn!("meme catalog not loaded yet");
            return None;
        }
        catalog
            .memes
            .iter()
            .find(|m| m.key == keyword || m.keywords.iter().any(|k| k == keyword))
            .cloned()
    }

    /// Whether `name` is a registered meme keyword.
    #[must_use]
    pub fn is_meme_keyword(&self, name: &str) -> bool {
        let catalog = self.catalog.read();
        catalog.loaded && catalog.keywords.iter().any(|k| k == name)
    }

    /// Match a keyword inside free-form text.
    ///
    /// Fuzzy mode returns the first keyword (in keyword-flattening order)
    /// occurring anywhere in `text`; exact mode requires equality with the
    /// first whitespace-delimited token of `text`.
    #[must_use]
    pub fn match_meme_keyword(&self, text: &str, fuzzy_match: bool) -> Option<String> {
        let catalog = self.catalog.read();
        if !catalog.loaded {
            return None;
        }
        if fuzzy_match {
            catalog.keywords.iter().find(|k| text.contains(k.as_str())).cloned()
        } else {
            let first = text.split_whitespace().next()?;
            catalog.keywords.iter().find(|k| k.as_str() == first).cloned()
        }
    }

    /// Render the browsable catalog index image.
    ///
    /// Returns `Ok(None)` when the engine is unavailable or the catalog is
    /// not loaded.
    ///
    /// # Errors
    ///
    /// Propagates engine rendering failures.
    pub async fn render_meme_list_image(&self) -> Result<Option<Vec<u8>>, MemeError> {
        let Some(binding) = &self.binding else {
            warn!("cannot render meme list: meme engine is not available");
            return Ok(None);
        };
        let properties: Vec<(String, MemeProperties)> = {
            let catalog = self.catalog.read();
            if !catalog.loaded {
                warn!("meme catalog not loaded, cannot render list");
                return Ok(None);
            }
            catalog.memes.iter().map(|m| (m.key.clone(), MemeProperties::default())).collect()
        };
        let request = ListRenderRequest { properties };
        let image = binding.engine.render_list(&request).await?;
        Ok(Some(image))
    }

    /// Resolve a keyword and return the template's info card: description
    /// text plus rendered preview bytes.
    ///
    /// Returns `Ok(None)` when the keyword resolves to no template.
    ///
    /// # Errors
    ///
    /// Propagates preview rendering failures.
    pub async fn get_meme_info(&self, keyword: &str) -> Result<Option<(String, Vec<u8>)>, MemeError> {
        let Some(meme) = self.find_meme(keyword) else {
            return Ok(None);
        };
        let Some(binding) = &self.binding else {
            return Ok(None);
        };
        let description = meme.description();
        let preview = binding.engine.render_preview(&meme.key).await?;
        Ok(Some((description, preview)))
    }

    /// Drive the full generation pipeline for one chat event: resolve the
    /// keyword, collect images/texts/options from the event, and invoke the
    /// engine.
    ///
    /// Returns `Ok(None)` when the keyword resolves to no template.
    ///
    /// # Errors
    ///
    /// Collection and generation failures propagate unchanged; they are
    /// specific to the user's input and the caller is expected to surface
    /// them.
    pub async fn generate_meme(
        &self,
        event: &E,
        keyword: &str,
    ) -> Result<Option<Vec<u8>>, MemeError> {
        let Some(meme) = self.find_meme(keyword) else {
            return Ok(None);
        };
        let Some(binding) = &self.binding else {
            return Ok(None);
        };

        let params = self.collector.collect_params(event, &meme.params).await?;
        debug!(
            key = %meme.key,
            images = params.images.len(),
            texts = params.texts.len(),
            "generating meme"
        );

        let request = GenerateRequest {
            key: meme.key.clone(),
            images: params
                .images
                .into_iter()
                .map(|(name, data)| NamedImage { name, data })
                .collect(),
            texts: params.texts,
            options: params.options,
        };
        let image = binding.engine.generate(&request).await?;
        Ok(Some(image))
    }
}
