use thiserror::Error;

use crate::model::ArgumentType;

/// A structural rule of the argument declaration was violated.
///
/// These are programmer errors — the declaring program's argument set is
/// inconsistent, independently of any user input.
/// Callers typically treat them as fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    /// The registry already owns an argument with this name.
    #[error("Argument '{0}' already exists.")]
    DuplicateArgument(String),

    /// No argument with this name is declared.
    #[error("Unknown argument '{0}'.")]
    UnknownArgument(String),

    /// A named-only setter was applied to a positional argument.
    #[error("Argument '{0}' is not a named argument.")]
    NotNamed(String),

    /// A positional-only setter was applied to a named argument.
    #[error("Argument '{0}' is not a positional argument.")]
    NotPositional(String),

    /// `required(true)` while a default value is set.
    #[error("An argument can't be required if it defines a default value.")]
    RequiredWithDefault,

    /// `typed(Simple)` while a default value is set.
    #[error("Type 'simple' can't be set for an argument with a default value.")]
    SimpleWithDefault,

    /// A default value on a required argument.
    #[error("A default value can't be set for a required argument.")]
    DefaultForRequired,

    /// A default value on an argument of type `Simple`.
    #[error("A default value can't be set for an argument of type 'simple'.")]
    DefaultForSimple,

    /// A requirement edge from an argument to itself.
    #[error("Argument '{0}' cannot require itself.")]
    SelfRequirement(String),

    /// A conflict edge from an argument to itself.
    #[error("Argument '{0}' cannot be in conflict with itself.")]
    SelfConflict(String),

    /// The requirement edge is already declared.
    #[error("The requirement '{dependent}' -> '{requirement}' is already defined.")]
    RequirementExists {
        /// The argument that depends on the other.
        dependent: String,
        /// The argument being required.
        requirement: String,
    },

    /// The requirement edge does not exist.
    #[error("The requirement '{dependent}' -> '{requirement}' does not exist.")]
    RequirementNotFound {
        /// The argument that depends on the other.
        dependent: String,
        /// The argument being required.
        requirement: String,
    },

    /// `remove_requirements` on an argument with no requirement edges.
    #[error("No requirement exists for argument '{0}'.")]
    NoRequirements(String),

    /// The conflict edge is already declared (directly or through the group).
    #[error("The conflict between '{first}' and '{second}' is already defined.")]
    ConflictExists {
        /// One side of the conflict.
        first: String,
        /// The other side of the conflict.
        second: String,
    },

    /// The conflict edge does not exist.
    #[error("No conflict exists between '{first}' and '{second}'.")]
    ConflictNotFound {
        /// One side of the conflict.
        first: String,
        /// The other side of the conflict.
        second: String,
    },

    /// `remove_conflicts` on an argument with no conflict edges.
    #[error("No conflict exists for argument '{0}'.")]
    NoConflicts(String),

    /// A requirement edge between arguments already in conflict.
    #[error("A requirement cannot be set between arguments in conflict.")]
    RequirementAcrossConflict,

    /// A conflict edge between arguments linked by a requirement.
    #[error("Dependent arguments cannot be in conflict.")]
    ConflictAcrossRequirement,

    /// A conflict edge between a required and an optional argument.
    #[error("Arguments in conflict must be either all required or all optional.")]
    ConflictRequiredMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Kind {
    Named {
        shortcut: Option<char>,
        typed: ArgumentType,
        // An empty string means "no default".
        default: String,
    },
    Positional {
        many: bool,
    },
}

/// One declared command line argument — named or positional.
///
/// Built with [`Argument::named`] or [`Argument::positional`] plus the
/// consuming setters, then handed over to
/// [`Registry::add`](crate::Registry::add).
/// The name is immutable, and the kind is fixed at construction.
///
/// ### Example
/// ```
/// use usage::{Argument, ArgumentType};
///
/// let extension = Argument::named("extension")
///     .shortcut('o')
///     .unwrap()
///     .typed(ArgumentType::String)
///     .unwrap()
///     .default_value("sor.txt")
///     .unwrap()
///     .help("Extension of the output file.");
/// assert_eq!(extension.default(), Some("sor.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    help: String,
    required: bool,
    values: Vec<String>,
    kind: Kind,
}

impl Argument {
    /// Declare a named argument.
    /// Its type starts out as [`ArgumentType::Simple`], with no shortcut and
    /// no default value.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::default(),
            required: false,
            values: Vec::default(),
            kind: Kind::Named {
                shortcut: None,
                typed: ArgumentType::default(),
                default: String::default(),
            },
        }
    }

    /// Declare a positional argument.
    /// It still carries a name — used by the relation rules and diagnostics —
    /// but the name is never passed on the command line.
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::default(),
            required: false,
            values: Vec::default(),
            kind: Kind::Positional { many: false },
        }
    }

    /// Document the argument.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    /// Mark the argument as mandatory (or not).
    ///
    /// Fails for a named argument that carries a default value — a defaulted
    /// argument can never be missing, so requiring it is contradictory.
    pub fn required(mut self, required: bool) -> Result<Self, InvariantError> {
        if required {
            if let Kind::Named { default, .. } = &self.kind {
                if !default.is_empty() {
                    return Err(InvariantError::RequiredWithDefault);
                }
            }
        }

        self.required = required;
        Ok(self)
    }

    /// Set the one-character shortcut of a named argument.
    pub fn shortcut(mut self, shortcut: char) -> Result<Self, InvariantError> {
        match &mut self.kind {
            Kind::Named { shortcut: s, .. } => {
                s.replace(shortcut);
                Ok(self)
            }
            Kind::Positional { .. } => Err(InvariantError::NotNamed(self.name)),
        }
    }

    /// Set the type of a named argument.
    ///
    /// Fails when setting [`ArgumentType::Simple`] while a default value is
    /// in place; type and default are checked symmetrically from whichever
    /// setter runs last.
    pub fn typed(mut self, typed: ArgumentType) -> Result<Self, InvariantError> {
        match &mut self.kind {
            Kind::Named {
                typed: t, default, ..
            } => {
                if typed == ArgumentType::Simple && !default.is_empty() {
                    return Err(InvariantError::SimpleWithDefault);
                }
                *t = typed;
                Ok(self)
            }
            Kind::Positional { .. } => Err(InvariantError::NotNamed(self.name)),
        }
    }

    /// Set the default value applied when the named argument is not used.
    ///
    /// Fails on a required argument, and on an argument of type
    /// [`ArgumentType::Simple`].
    pub fn default_value(mut self, value: impl Into<String>) -> Result<Self, InvariantError> {
        let value = value.into();
        match &mut self.kind {
            Kind::Named { typed, default, .. } => {
                if !value.is_empty() {
                    if self.required {
                        return Err(InvariantError::DefaultForRequired);
                    }
                    if *typed == ArgumentType::Simple {
                        return Err(InvariantError::DefaultForSimple);
                    }
                }
                *default = value;
                Ok(self)
            }
            Kind::Positional { .. } => Err(InvariantError::NotNamed(self.name)),
        }
    }

    /// Allow a positional argument to absorb an unbounded run of consecutive
    /// non-switch tokens.
    pub fn many(mut self, many: bool) -> Result<Self, InvariantError> {
        match &mut self.kind {
            Kind::Positional { many: m } => {
                *m = many;
                Ok(self)
            }
            Kind::Named { .. } => Err(InvariantError::NotPositional(self.name)),
        }
    }

    /// The unique name, fixed at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help string.
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Whether the argument is mandatory.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the argument is named (as opposed to positional).
    pub fn is_named(&self) -> bool {
        matches!(self.kind, Kind::Named { .. })
    }

    /// Whether the argument absorbs many values.
    /// Always `false` for named arguments.
    pub fn is_many(&self) -> bool {
        match &self.kind {
            Kind::Positional { many } => *many,
            Kind::Named { .. } => false,
        }
    }

    /// The one-character shortcut, if the argument is named and has one.
    pub fn shortcut_char(&self) -> Option<char> {
        match &self.kind {
            Kind::Named { shortcut, .. } => *shortcut,
            Kind::Positional { .. } => None,
        }
    }

    /// The declared type of a named argument; `None` for positionals.
    pub fn argument_type(&self) -> Option<ArgumentType> {
        match &self.kind {
            Kind::Named { typed, .. } => Some(*typed),
            Kind::Positional { .. } => None,
        }
    }

    /// The default value of a named argument, if a non-empty one is set.
    pub fn default(&self) -> Option<&str> {
        match &self.kind {
            Kind::Named { default, .. } if !default.is_empty() => Some(default),
            _ => None,
        }
    }

    /// The values assigned by the last evaluation, in assignment order.
    /// Only a `many` positional accumulates more than one.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn push_value(&mut self, value: String) {
        self.values.push(value);
    }
}
