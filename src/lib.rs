//! Solar proposal engine.
//!
//! Turns a lead's monthly consumption and electrical phase into a complete
//! proposal: system size, monthly production, savings, two financing plans,
//! environmental impact, payback and inverter selection. The engine is pure
//! and synchronous; the `api` module wraps it in a small HTTP service.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod telemetry;

pub use domain::{ConstantsTable, Proposal, ProposalInput};
pub use engine::{build_proposal, EngineError, ProposalEngine};
