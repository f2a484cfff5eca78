//! Specification document table editing library
//!
//! A headless core for editing tabular specification documents: an ordered
//! table model, drag-reorder controllers for rows and columns, inline edit
//! sessions for headers and cells, and a facade that reports every committed
//! change to the host through [`TableHooks`].

pub mod config;
pub mod document;
pub mod drag;
pub mod edit;
pub mod error;
pub mod id;
pub mod model;

mod editor;
mod expansion;
mod hooks;

pub use config::*;
pub use editor::*;
pub use expansion::*;
pub use hooks::*;
