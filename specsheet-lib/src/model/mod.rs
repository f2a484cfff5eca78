//! Table model types

mod column;
pub mod order;
mod row;
mod table;
mod value;

pub use column::*;
pub use row::*;
pub use table::*;
pub use value::*;
