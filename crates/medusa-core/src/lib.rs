#![forbid(unsafe_code)]

//! Outline validation + tree model for radial mind maps (headless).
//!
//! Design goals:
//! - deterministic, testable state: node ids are assigned once at tree
//!   construction and never recomputed from render order
//! - explicit expand/collapse state per node (no ambient counters)
//! - runtime-agnostic: no I/O, no executor

pub mod config;
pub mod error;
pub mod outline;
pub mod tree;

pub use config::MindmapConfig;
pub use error::{Error, Result};
pub use outline::Outline;
pub use tree::{ChildState, MindmapTree, NodeId, ToggleOutcome, TreeNode};
