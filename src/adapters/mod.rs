//! Engine adapter implementations for the [`MemeEngine`] port.
//!
//! - `live/` — HTTP bindings for the engine's web API, one per generation
//! - `blocking` — bridge for synchronous in-process engines
//!
//! [`MemeEngine`]: crate::ports::MemeEngine

pub mod blocking;
pub mod live;
