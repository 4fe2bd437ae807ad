use crate::model::ArgumentType;
use crate::parser::{ErrorKind, Session};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Complete,
    HelpRequested,
}

/// A switch-stripped named token, decomposed by its trailing syntax.
#[derive(Debug, PartialEq, Eq)]
struct NamedToken {
    name: String,
    inferred: ArgumentType,
    value: String,
}

/// Decompose a named token (already stripped of its switch character) into
/// name, inferred type, and value.
///
/// The first `"` detaches an inline value: everything after the quote is kept
/// verbatim (embedded quote content is never re-formatted).
/// A `:` infers `string` with the text after the colon prepended to any
/// detached value; a trailing `+`/`-` infers `boolean`; otherwise `simple`.
/// `Err` marks a malformed token — an empty name portion, or an inline value
/// on a boolean/simple token.
fn split_named(token: &str) -> Result<NamedToken, ()> {
    let (mut head, mut value) = match token.find('"') {
        Some(quote) => (
            token[..quote].to_string(),
            token[quote + 1..].to_string(),
        ),
        None => (token.to_string(), String::default()),
    };

    if head.is_empty() {
        return Err(());
    }

    let inferred;
    if let Some(colon) = head.find(':') {
        if colon < head.len() - 1 {
            value = format!("{}{}", &head[colon + 1..], value);
        }
        inferred = ArgumentType::String;
        head.truncate(colon);
    } else if head.ends_with('+') || head.ends_with('-') {
        let sign = head.pop().ok_or(())?;
        if !value.is_empty() {
            return Err(());
        }
        inferred = ArgumentType::Boolean;
        value = if sign == '+' { "true" } else { "false" }.to_string();
    } else {
        if !value.is_empty() {
            return Err(());
        }
        inferred = ArgumentType::Simple;
        value = "true".to_string();
    }

    if head.is_empty() {
        return Err(());
    }

    Ok(NamedToken {
        name: head,
        inferred,
        value,
    })
}

impl Session<'_> {
    /// Single left-to-right pass over the argument vector, assigning raw
    /// values onto the declared arguments.
    ///
    /// The program name (token `0`) is skipped; diagnostics index tokens from
    /// `1`.
    pub(crate) fn tokenize(&mut self, argv: &[&str]) -> Result<Action, ErrorKind> {
        let switch = self.registry.dialect.switch();
        let help = self.registry.dialect.help().to_string();
        // The positional currently absorbing consecutive non-switch tokens.
        let mut many_cursor: Option<usize> = None;

        for (index, &raw) in argv.iter().enumerate().skip(1) {
            if raw.is_empty() {
                continue;
            }

            let syntax_error = || ErrorKind::Syntax {
                index,
                token: raw.to_string(),
            };
            let named = raw.starts_with(switch);
            let token = if named {
                &raw[switch.len_utf8()..]
            } else {
                raw
            };

            if token.is_empty() {
                return Err(syntax_error());
            }
            if token == help {
                // Help short-circuits everything, discarding partial state.
                return Ok(Action::HelpRequested);
            }

            if !named {
                // The whole token is a value for the next eligible positional.
                // Quote content is preserved verbatim.
                if !self.assign_positional(token, &mut many_cursor) {
                    return Err(syntax_error());
                }
                continue;
            }

            many_cursor = None;
            let named_token = split_named(token).map_err(|()| syntax_error())?;
            self.assign_named(named_token, switch)?;
        }

        Ok(Action::Complete)
    }

    /// Attach a non-switch token to a positional argument: the active `many`
    /// absorber if one is open, otherwise the first positional (in declaration
    /// order) without a value.
    fn assign_positional(&mut self, value: &str, many_cursor: &mut Option<usize>) -> bool {
        let target = match *many_cursor {
            Some(index) => Some(index),
            None => self.registry.order.iter().enumerate().find_map(|(i, name)| {
                (!self.assigned[i] && !self.registry.arguments[name].is_named()).then_some(i)
            }),
        };

        match target {
            Some(index) => {
                let name = self.registry.order[index].clone();
                let argument = self.registry.arguments.get_mut(&name).unwrap();
                argument.push_value(value.to_string());
                self.assigned[index] = true;

                if argument.is_many() {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Positional '{name}' absorbs subsequent values.");
                    }

                    many_cursor.replace(index);
                }

                true
            }
            None => false,
        }
    }

    /// Resolve a named token against the not-yet-assigned named arguments, by
    /// full name or one-character shortcut, and assign its value.
    fn assign_named(&mut self, token: NamedToken, switch: char) -> Result<(), ErrorKind> {
        for (index, name) in self.registry.order.iter().enumerate() {
            if self.assigned[index] {
                continue;
            }

            let argument = &self.registry.arguments[name];
            let Some(expected) = argument.argument_type() else {
                // Positional arguments never match a switched token.
                continue;
            };
            let shortcut_match =
                matches!(argument.shortcut_char(), Some(c) if token.name == c.to_string());

            if token.name == *name || shortcut_match {
                if token.inferred != expected {
                    return Err(ErrorKind::TypeMismatch {
                        name: name.clone(),
                        passed: token.inferred,
                        expected,
                    });
                }

                let name = name.clone();
                self.registry
                    .arguments
                    .get_mut(&name)
                    .unwrap()
                    .push_value(token.value);
                self.assigned[index] = true;
                return Ok(());
            }
        }

        Err(ErrorKind::Unknown {
            name: format!("{switch}{name}", name = token.name),
        })
    }
}
