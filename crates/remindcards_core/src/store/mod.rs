//! Core store objects consumed by the presentation layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into caller-facing store APIs.
//! - Hold read-through caches and the card navigation cursor.
//! - Convert repository failures to soft results at the boundary, after
//!   logging them.
//!
//! # Invariants
//! - Caches refresh only through explicit `reload()`; readers may observe
//!   stale data between a write and the next reload. This window is an
//!   accepted part of the contract, not a defect.

pub mod card_store;
pub mod folder_store;
