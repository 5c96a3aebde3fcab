//! Game state module — the life point tracker, its undo/redo history, the
//! custom amount keypad, and the HTML fragments the board swaps in.
//!
//! The tracker lives in WASM memory (thread_local) for the lifetime of the
//! Web Worker. Nothing is persisted between sessions.

pub mod board;
pub mod history;
pub mod keypad;
pub mod rules;
pub mod state;
pub mod tracker;
