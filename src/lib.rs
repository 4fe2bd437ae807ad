//! `usage` is a declarative model of a program's command line arguments.
//!
//! Arguments are declared into a [`Registry`] — either *named* (introduced on
//! the command line by a switch-prefixed name or one-character shortcut) or
//! *positional* (matched by position among the non-switch tokens).
//! Relationships between arguments are declared as *requirement* edges
//! ("`field_separator` needs `position`") and *conflict* edges
//! ("`position` and `fixed` cannot be used together"), and the registry
//! validates a raw argument vector against all declared rules.
//!
//! ### Example
//! ```
//! use usage::{Argument, ArgumentType, Evaluation, Registry};
//!
//! let mut registry = Registry::new("sort");
//! registry
//!     .add(
//!         Argument::positional("file")
//!             .help("File(s) to compute.")
//!             .required(true)
//!             .unwrap()
//!             .many(true)
//!             .unwrap(),
//!     )
//!     .unwrap();
//! registry
//!     .add(
//!         Argument::named("position")
//!             .shortcut('p')
//!             .unwrap()
//!             .typed(ArgumentType::String)
//!             .unwrap()
//!             .required(true)
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     registry.evaluate(&["sort", "data.txt", "-p:2"]),
//!     Evaluation::Success,
//! );
//! assert_eq!(registry.values("position").unwrap(), ["2"]);
//! ```
//!
//! Declaration mistakes (duplicate names, self-referential edges, a default
//! value on a required argument, ..) surface as [`InvariantError`] — they are
//! programmer errors, distinct from the user-input diagnostics carried by
//! [`Evaluation::Failure`].
#![deny(missing_docs)]
mod argument;
mod model;
mod parser;
mod registry;
mod relation;
pub mod prelude;

pub use argument::{Argument, InvariantError};
pub use model::{ArgumentType, Dialect};
pub use parser::{ErrorKind, Evaluation, ParseError};
pub use registry::Registry;
pub use relation::{RelationError, RelationGraph};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
