#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod binder;
pub mod diagram;
mod error;
pub mod graph;
pub mod ledger;
pub mod order;
pub mod service;

#[doc(hidden)]
pub mod prelude;

pub use error::{EngineError, EngineResult};
pub use service::{GovernanceService, ServiceConfig};

/// Tracing target for engine operations.
pub const TRACING_TARGET: &str = "charter_engine";
