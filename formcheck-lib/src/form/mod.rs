//! Form model: field values, snapshots and an in-memory form.

mod builder;
mod source;
mod state;
mod value;

pub use builder::*;
pub use source::FieldSource;
pub use state::Form;
pub use value::{FieldValue, FormSnapshot};
