//! memebridge — keyword-driven bridge between chat-bot hosts and a meme
//! rendering engine.
//!
//! The host hands the [`MemeManager`] a configuration and a parameter
//! collector; the manager probes the engine once to pick the matching API
//! binding, loads the template catalog lazily after a resource check, and
//! then serves keyword lookups, info cards, a catalog index image and
//! end-to-end meme generation. An unreachable engine degrades the manager
//! to a logged no-op instead of failing construction.

pub mod adapters;
pub mod config;
pub mod context;
pub mod error;
pub mod manager;
pub mod model;
pub mod ports;

pub use config::MemeConfig;
pub use context::{EngineBinding, EngineContext};
pub use error::MemeError;
pub use manager::MemeManager;
pub use model::{
    detect_generation, EngineGeneration, Meme, MemeLabel, MemeParams, MemeProperties, MemeSortBy,
};
pub use ports::{CollectedParams, MemeEngine, ParamsCollector};
