/// The value syntax of a named argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgumentType {
    /// Passed as `NAME:VALUE`.
    String,
    /// Passed as `NAME+` (true) or `NAME-` (false).
    Boolean,
    /// Passed as `NAME` alone; the value is always `"true"`.
    #[default]
    Simple,
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentType::String => write!(f, "string"),
            ArgumentType::Boolean => write!(f, "boolean"),
            ArgumentType::Simple => write!(f, "simple"),
        }
    }
}

/// The command line conventions under which a [`Registry`](crate::Registry)
/// evaluates its argument vector: the switch character that introduces a named
/// argument, and the spelling of the help flag.
///
/// Supplied at registry construction; nothing in the crate is selected at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    switch: char,
    help: String,
}

impl Dialect {
    /// A dialect with an arbitrary switch character and help spelling.
    pub fn new(switch: char, help: impl Into<String>) -> Self {
        Self {
            switch,
            help: help.into(),
        }
    }

    /// `-` switched, with `-h` requesting help.
    pub fn unix() -> Self {
        Self::new('-', "h")
    }

    /// `/` switched, with `/?` requesting help.
    pub fn windows() -> Self {
        Self::new('/', "?")
    }

    /// The switch character identifying a token as a named argument.
    pub fn switch(&self) -> char {
        self.switch
    }

    /// The help-flag spelling (matched against a switch-stripped token).
    pub fn help(&self) -> &str {
        &self.help
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::unix()
    }
}
