//! Core library for modelpick.
//!
//! - `catalog`: model descriptors, the fallback catalog, search filtering and display formatting
//! - `loader`: catalog sources and the loader that applies fallback and default selection
//! - `config`: `${MODELPICK_HOME}/config.toml` loading
//! - `logging`: tracing subscriber setup

pub mod catalog;
pub mod config;
pub mod loader;
pub mod logging;
