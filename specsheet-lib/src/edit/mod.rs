//! Inline editing of header titles and cell values.
//!
//! A target is in the viewing state unless it has an [`EditSession`]; the
//! session holds the draft until it is committed to the model on blur (or
//! Enter for headers).

mod controller;
mod session;

pub use controller::*;
pub use session::*;
