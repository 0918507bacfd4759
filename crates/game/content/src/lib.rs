//! Data-driven catalogs and loaders for the dungeon engine.
//!
//! This crate converts TOML data files into the validated, immutable
//! values `delve-core` consumes at engine construction:
//! - Monster catalogs ([`MonsterLoader`] -> `MonsterRegistry`)
//! - Drop tables ([`DropTableLoader`] -> `DropTableRegistry`)
//! - Engine configuration ([`ConfigLoader`] -> `EngineConfig`)
//!
//! All loaders use delve-core types directly with serde deserialization;
//! catalog defects (zero-weight tables, dangling elite variants) surface
//! at load time, never during action execution.

pub mod loaders;

pub use loaders::{ConfigLoader, DropTableLoader, MonsterLoader};
