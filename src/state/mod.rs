//! State Management Module
//!
//! Undo history and the scoped transactions that feed it.

pub mod transaction;
pub mod undo;

pub use transaction::Transaction;
pub use undo::{CelOperation, UndoEntry, UndoHistory, DEFAULT_MAX_UNDO_LEVELS};
