//! Error types

mod config;
mod document;
mod table;
mod validation;

pub use config::*;
pub use document::*;
pub use table::*;
pub use validation::*;
