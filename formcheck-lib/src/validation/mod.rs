//! Form validation.
//!
//! Pure validators live in [`rules`]. [`FormRules`] strings them together per
//! field, in order, and evaluates them against a [`FormSnapshot`].
//!
//! # Example
//!
//! ```
//! use formcheck_lib::form::FormSnapshot;
//! use formcheck_lib::validation::{FormRules, rules::NAME_PATTERN};
//!
//! let rules = FormRules::new()
//!     .field("first_Name")
//!         .pattern(&NAME_PATTERN, "First name must only contain letters.")
//!     .field("email")
//!         .required("Email is required")
//!         .email("Please enter a valid email address.")
//!     .field("checkbox")
//!         .checked("Please check the box.")
//!     .finish();
//!
//! let mut snapshot = FormSnapshot::new();
//! snapshot.insert("first_Name", "John");
//! snapshot.insert("email", "");
//! snapshot.insert("checkbox", true);
//!
//! let results = rules.evaluate(&snapshot);
//! assert!(results[0].is_valid());
//! assert_eq!(results[1].message(), Some("Email is required"));
//! assert!(results[2].is_valid());
//! ```
//!
//! [`FormSnapshot`]: crate::form::FormSnapshot

pub mod messages;
mod result;
pub mod rules;
mod validator;

pub use result::{FieldError, FieldResult, ValidationResult};
pub use validator::{FieldBuilder, FormRules};
