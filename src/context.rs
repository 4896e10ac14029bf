//! Engine binding selection.
//!
//! The engine's API generation is detected once, at startup, by a version
//! probe; every later call goes through the adapter chosen here. A probe
//! failure is never an error: it produces a disabled context whose manager
//! degrades every operation to a logged no-op.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::adapters::live::current::CurrentHttpEngine;
use crate::adapters::live::legacy::LegacyHttpEngine;
use crate::config::MemeConfig;
use crate::error::MemeError;
use crate::model::{detect_generation, EngineGeneration};
use crate::ports::MemeEngine;

/// The engine adapter selected for this process, plus the generation it
/// speaks.
pub struct EngineBinding {
    /// Selected engine adapter.
    pub engine: Arc<dyn MemeEngine>,
    /// API generation the adapter was selected for.
    pub generation: EngineGeneration,
}

/// Holds the engine binding, or nothing when the engine is unavailable.
pub struct EngineContext {
    binding: Option<EngineBinding>,
}

impl EngineContext {
    /// Probe the configured engine and select the matching binding.
    ///
    /// Never fails: when the engine is unreachable or the adapter cannot be
    /// constructed, diagnostics are logged and a disabled context is
    /// returned.
    pub async fn connect(config: &MemeConfig) -> Self {
        let base_url = config.engine_url();
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let version = match probe_version(&base_url, timeout).await {
            Ok(version) => version,
            Err(e) => {
                error!("meme engine is unreachable: {e}");
                error!("1. check that the meme engine service is running");
                error!("2. check the configured engine_url (currently {base_url})");
                error!("3. meme features stay disabled until the next restart");
                return Self::disabled();
            }
        };

        let generation = detect_generation(&version);
        let engine: Result<Arc<dyn MemeEngine>, MemeError> = match generation {
            EngineGeneration::Legacy => LegacyHttpEngine::new(&base_url, timeout)
                .map(|e| Arc::new(e) as Arc<dyn MemeEngine>),
            EngineGeneration::Current => CurrentHttpEngine::new(&base_url, timeout)
                .map(|e| Arc::new(e) as Arc<dyn MemeEngine>),
        };

        match engine {
            Ok(engine) => {
                info!(%version, ?generation, "meme engine detected");
                Self { binding: Some(EngineBinding { engine, generation }) }
            }
            Err(e) => {
                error!("failed to construct meme engine binding: {e}");
                Self::disabled()
            }
        }
    }

    /// A context with no engine; every manager operation becomes a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self { binding: None }
    }

    /// Wire an explicit engine instead of probing, e.g. for an in-process
    /// engine behind the sync bridge.
    #[must_use]
    pub fn with_engine(engine: Arc<dyn MemeEngine>, generation: EngineGeneration) -> Self {
        Self { binding: Some(EngineBinding { engine, generation }) }
    }

    pub(crate) fn into_binding(self) -> Option<EngineBinding> {
        self.binding
    }
}

/// Ask the engine for its version, trying the current route first and the
/// legacy route second.
async fn probe_version(base_url: &str, timeout: Duration) -> Result<String, MemeError> {
    let client = crate::adapters::live::build_client(timeout)?;
    let base_url = base_url.trim_end_matches('/');

    let mut last_error = None;
    for path in ["/meme/version", "/memes/version"] {
        match client.get(format!("{base_url}{path}")).send().await {
            Ok(response) if response.status().is_success() => {
                let text = response.text().await?;
                // The legacy route returns plain text, the current route a
                // JSON string.
                return Ok(text.trim().trim_matches('"').to_string());
            }
            Ok(response) => {
                last_error = Some(MemeError::Api {
                    status: response.status().as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }
            Err(e) => last_error = Some(MemeError::Network(e)),
        }
    }
    Err(last_error
        .unwrap_or_else(|| MemeError::Config(format!("no version endpoint at {base_url}"))))
}
