//! Single-import convenience for the common declaration and evaluation
//! surface.
//!
//! ```
//! use usage::prelude::*;
//!
//! let mut registry = Registry::new("program");
//! registry.add(Argument::named("verbose").shortcut('v').unwrap()).unwrap();
//! ```

pub use crate::argument::{Argument, InvariantError};
pub use crate::model::{ArgumentType, Dialect};
pub use crate::parser::{ErrorKind, Evaluation, ParseError};
pub use crate::registry::Registry;
