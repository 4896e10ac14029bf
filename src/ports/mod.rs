//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the manager and an external
//! system. Engine implementations live in `src/adapters/`; the parameter
//! collector is implemented by the host platform.

pub mod meme_engine;
pub mod param_collector;

pub use meme_engine::{EngineFuture, GenerateRequest, ListRenderRequest, MemeEngine, NamedImage};
pub use param_collector::{CollectFuture, CollectedParams, ParamsCollector};
