//! Bridge that runs a synchronous engine implementation on the blocking
//! thread pool.
//!
//! In-process engines expose blocking render calls; running one directly on
//! the host's event loop would stall every other event. The bridge offloads
//! each call through [`tokio::task::spawn_blocking`] and surfaces the result
//! or failure to the awaiting caller. There is no cancellation: a caller
//! that disappears mid-await leaves the worker running to completion.

use std::sync::Arc;

use crate::error::MemeError;
use crate::model::Meme;
use crate::ports::meme_engine::{EngineFuture, GenerateRequest, ListRenderRequest, MemeEngine};

/// A synchronous, in-process meme engine.
pub trait SyncMemeEngine: Send + Sync + 'static {
    /// Fetch the full template catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be produced.
    fn load_memes(&self) -> Result<Vec<Meme>, MemeError>;

    /// Verify (and if needed download) the engine's rendering resources.
    ///
    /// # Errors
    ///
    /// Returns an error if resources are missing or cannot be fetched.
    fn check_resources(&self) -> Result<(), MemeError>;

    /// Render the browsable catalog index image.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render_list(&self, request: &ListRenderRequest) -> Result<Vec<u8>, MemeError>;

    /// Render the preview image for one template.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render_preview(&self, key: &str) -> Result<Vec<u8>, MemeError>;

    /// Synthesize one meme from the given inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<u8>, MemeError>;
}

/// Adapts a [`SyncMemeEngine`] to the async [`MemeEngine`] port.
pub struct SyncEngineBridge<T> {
    inner: Arc<T>,
}

impl<T> SyncEngineBridge<T> {
    /// Wrap a synchronous engine.
    pub fn new(inner: T) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl<T: SyncMemeEngine> MemeEngine for SyncEngineBridge<T> {
    fn load_memes(&self) -> EngineFuture<'_, Vec<Meme>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move { tokio::task::spawn_blocking(move || inner.load_memes()).await? })
    }

    fn check_resources(&self) -> EngineFuture<'_, ()> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move { tokio::task::spawn_blocking(move || inner.check_resources()).await? })
    }

    fn render_list(&self, request: &ListRenderRequest) -> EngineFuture<'_, Vec<u8>> {
        let inner = Arc::clone(&self.inner);
        let request = request.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || inner.render_list(&request)).await?
        })
    }

    fn render_preview(&self, key: &str) -> EngineFuture<'_, Vec<u8>> {
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || inner.render_preview(&key)).await?
        })
    }

    fn generate(&self, request: &GenerateRequest) -> EngineFuture<'_, Vec<u8>> {
        let inner = Arc::clone(&self.inner);
        let request = request.clone();
        Box::pin(
            async move { tokio::task::spawn_blocking(move || inner.generate(&request)).await? },
        )
    }
}
