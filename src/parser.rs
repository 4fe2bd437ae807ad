mod tokenize;
mod validate;

use thiserror::Error;

use crate::model::{ArgumentType, Dialect};
use crate::registry::Registry;

pub(crate) use tokenize::Action;

/// The rule violated by the user's argument vector.
///
/// Rendered through [`ParseError`], which appends the
/// `- see {program} {switch}{help} for help.` suffix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// A token could not be tokenized at all.
    /// The index is 1-based; the program name is token `0`.
    #[error("Error found in command line argument number {index}: '{token}'")]
    Syntax {
        /// The 1-based position of the offending token.
        index: usize,
        /// The offending token, verbatim.
        token: String,
    },

    /// A named token used the wrong value syntax for its argument.
    #[error("Argument '{name}' passed as '{passed}' while expected type is '{expected}'")]
    TypeMismatch {
        /// The declared name of the matched argument.
        name: String,
        /// The type inferred from the token's syntax.
        passed: ArgumentType,
        /// The type the argument was declared with.
        expected: ArgumentType,
    },

    /// A named token matched no declared argument (by name or shortcut).
    #[error("Unknown argument '{name}'")]
    Unknown {
        /// The unmatched name, prefixed with the switch character.
        name: String,
    },

    /// A required argument was neither passed nor excused by an assigned
    /// conflict partner.
    #[error("Missing required argument '{name}'")]
    MissingRequired {
        /// The name of the missing argument.
        name: String,
    },

    /// Two mutually-exclusive arguments were both passed.
    #[error("Arguments '{first}' and '{second}' can't be used together")]
    Conflict {
        /// The earlier-declared assigned argument.
        first: String,
        /// The later-declared assigned argument.
        second: String,
    },

    /// The argument vector was empty — not even a program name.
    #[error("No argument to evaluate.")]
    NoArguments,
}

/// A user-input diagnostic: what went wrong, plus the context needed to point
/// the user at the program's help flag.
///
/// `Display` produces the full message, for example:
/// `Unknown argument '/z' - see program.exe /? for help.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    program: String,
    switch: char,
    help: String,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, program: impl Into<String>, dialect: &Dialect) -> Self {
        Self {
            kind,
            program: program.into(),
            switch: dialect.switch(),
            help: dialect.help().to_string(),
        }
    }

    /// The rule that was violated.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            // The degenerate no-input case carries no help pointer.
            ErrorKind::NoArguments => write!(f, "{}", self.kind),
            kind => write!(
                f,
                "{kind} - see {program} {switch}{help} for help.",
                program = self.program,
                switch = self.switch,
                help = self.help,
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// The outcome of evaluating an argument vector against a
/// [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every rule was satisfied; values (including applicable defaults) are
    /// populated on the registry's arguments.
    Success,
    /// The help flag was encountered; all further processing was skipped.
    /// Not an error — the caller should display usage.
    Help,
    /// The argument vector violated a declared rule.
    Failure(ParseError),
}

/// One evaluation pass over a registry: tokenization state plus the
/// per-argument assignment flags shared with the validator.
pub(crate) struct Session<'a> {
    pub(crate) registry: &'a mut Registry,
    pub(crate) assigned: Vec<bool>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(registry: &'a mut Registry) -> Self {
        let assigned = vec![false; registry.order.len()];
        Self { registry, assigned }
    }

    pub(crate) fn run(mut self, argv: &[&str]) -> Evaluation {
        match self.tokenize(argv) {
            Ok(Action::HelpRequested) => Evaluation::Help,
            Ok(Action::Complete) => match self.validate() {
                Ok(()) => Evaluation::Success,
                Err(kind) => Evaluation::Failure(self.failure(kind)),
            },
            Err(kind) => Evaluation::Failure(self.failure(kind)),
        }
    }

    fn failure(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.registry.program.clone(), &self.registry.dialect)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.registry.order.iter().position(|n| n == name)
    }
}
