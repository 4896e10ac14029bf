//! Parameter collector port — the boundary to the host platform.

use std::future::Future;
use std::pin::Pin;

use crate::error::MemeError;
use crate::model::MemeParams;

/// Everything a template needs, gathered from one chat event.
#[derive(Debug, Clone, Default)]
pub struct CollectedParams {
    /// `(identifier, raw bytes)` pairs in collection order.
    pub images: Vec<(String, Vec<u8>)>,
    /// Input texts in collection order.
    pub texts: Vec<String>,
    /// Template-specific options parsed from the event.
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Boxed future type returned by [`ParamsCollector::collect_params`].
pub type CollectFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CollectedParams, MemeError>> + Send + 'a>>;

/// Gathers images, texts and options for a template from a chat event.
///
/// The event type `E` is owned by the host platform and passed through
/// unexamined. Collection failures propagate unchanged out of the
/// generation pipeline.
pub trait ParamsCollector<E>: Send + Sync {
    /// Collect generation inputs matching `params` from `event`.
    fn collect_params<'a>(&'a self, event: &'a E, params: &'a MemeParams) -> CollectFuture<'a>;
}
