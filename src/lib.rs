//! # gitviz-rs
//!
//! A commit-graph layout and merge-relationship inference engine for repository visualization.
//!
//! This library takes a flat list of commits (with parent-hash references and branch labels)
//! plus a branch list and a designated default branch, and derives everything a renderer
//! needs to draw an interactive history graph: a deterministic 2D position for every commit,
//! branch lanes and their visual ordering, inferred fork/merge/continuation edges between
//! branches, and per-commit classification (merge vs. regular, first/last-in-branch).
//!
//! ## Architecture
//!
//! The library is organized into three main modules:
//! - [`models`] - Wire-facing data records and derived value objects
//! - [`graph`] - The layout engine: classification, lanes, positions, fork/merge inference
//! - [`state`] - Explicit computation context: layout configuration and view state
//!
//! ## Features
//!
//! - **Merge Provenance Recovery**: Ordered message recognizers reconstruct pull-request
//!   and branch-merge provenance from commit message text
//! - **Deterministic Layout**: Identical inputs always produce bit-identical positions,
//!   lane assignments, and edge sets
//! - **Fork Inference**: Common-ancestor matching with a timestamp heuristic fallback
//! - **Pure Computation**: No I/O, no shared state; the full derived data set is rebuilt
//!   from scratch on every call
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitviz_rs::models::RepositoryData;
//! use gitviz_rs::state::LayoutConfig;
//! use gitviz_rs::compute_layout;
//!
//! # fn main() -> anyhow::Result<()> {
//! let json = std::fs::read_to_string("repository.json")?;
//! let data: RepositoryData = serde_json::from_str(&json)?;
//!
//! let layout = compute_layout(&data, &LayoutConfig::default())?;
//! println!("Positioned {} commits", layout.positioned_commits.len());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![allow(clippy::cargo)]
#![allow(clippy::restriction)]
#![allow(clippy::style)]
#![allow(clippy::complexity)]
#![allow(clippy::perf)]
#![allow(clippy::suspicious)]
#![allow(clippy::correctness)]
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(missing_docs)]
#![allow(missing_debug_implementations)]
#![allow(missing_copy_implementations)]
#![allow(trivial_casts)]
#![allow(trivial_numeric_casts)]
#![allow(unused_import_braces)]
#![allow(unused_qualifications)]

pub mod graph;
pub mod models;
pub mod state;

pub use graph::layout::{compute_layout, LayoutResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
