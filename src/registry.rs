use std::collections::HashMap;

use crate::argument::{Argument, InvariantError};
use crate::model::Dialect;
use crate::parser::{ErrorKind, Evaluation, ParseError, Session};
use crate::relation::RelationGraph;

/// The owner of a program's declared arguments and the rules between them.
///
/// Arguments are held by name, with declaration order preserved (positional
/// matching and every diagnostic follow that order).
/// Two relation graphs sit alongside: a directed, non-cascading *requirement*
/// graph ("dependent needs requirement"), and an undirected, cascading
/// *conflict* graph (mutual exclusion, closed over conflict groups).
///
/// Every declaration-side precondition failure is an [`InvariantError`];
/// user-input problems only ever surface from [`Registry::evaluate`].
///
/// The registry is a unit of exclusive mutation — share it across threads
/// only behind external synchronization.
pub struct Registry {
    pub(crate) program: String,
    description: String,
    usage: String,
    pub(crate) dialect: Dialect,
    pub(crate) arguments: HashMap<String, Argument>,
    pub(crate) order: Vec<String>,
    pub(crate) requirements: RelationGraph<String>,
    pub(crate) conflicts: RelationGraph<String>,
    syntax: String,
    syntax_valid: bool,
}

impl Registry {
    /// A registry for `program` using the default (unix) [`Dialect`].
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_dialect(program, Dialect::default())
    }

    /// A registry for `program` evaluating under the given [`Dialect`].
    pub fn with_dialect(program: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            program: program.into(),
            description: String::default(),
            usage: String::default(),
            dialect,
            arguments: HashMap::default(),
            order: Vec::default(),
            requirements: RelationGraph::new(false),
            conflicts: RelationGraph::new(true),
            syntax: String::default(),
            syntax_valid: false,
        }
    }

    fn ensure(&self, name: &str) -> Result<(), InvariantError> {
        if self.arguments.contains_key(name) {
            Ok(())
        } else {
            Err(InvariantError::UnknownArgument(name.to_string()))
        }
    }

    fn invalidate(&mut self) {
        self.syntax_valid = false;
    }

    //
    // Argument lifecycle.
    //

    /// Take ownership of a declared argument.
    pub fn add(&mut self, argument: Argument) -> Result<(), InvariantError> {
        let name = argument.name().to_string();

        if self.arguments.contains_key(&name) {
            return Err(InvariantError::DuplicateArgument(name));
        }

        self.order.push(name.clone());
        self.arguments.insert(name, argument);
        self.invalidate();
        Ok(())
    }

    /// Remove an argument by name, cascade-removing every requirement and
    /// conflict edge touching it.
    /// Returns the removed argument.
    pub fn remove(&mut self, name: &str) -> Result<Argument, InvariantError> {
        self.ensure(name)?;

        let key = name.to_string();
        self.requirements.remove_all(&key);
        self.conflicts.remove_all(&key);
        self.order.retain(|n| n != name);
        let argument = self.arguments.remove(name).unwrap();
        self.invalidate();
        Ok(argument)
    }

    /// Remove every argument, along with all relation edges.
    pub fn remove_all(&mut self) {
        self.arguments.clear();
        self.order.clear();
        self.requirements.clear();
        self.conflicts.clear();
        self.invalidate();
    }

    /// [`Registry::remove_all`], additionally clearing the description,
    /// syntax, and usage strings.
    pub fn clear(&mut self) {
        self.remove_all();
        self.description.clear();
        self.usage.clear();
        self.syntax.clear();
    }

    /// Look up an argument by name.
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.arguments.get(name)
    }

    /// The arguments in declaration order.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.order.iter().map(|name| &self.arguments[name])
    }

    /// The values assigned to one argument by the last evaluation.
    pub fn values(&self, name: &str) -> Result<&[String], InvariantError> {
        self.ensure(name)?;
        Ok(self.arguments[name].values())
    }

    /// Every argument's assigned values, keyed by name.
    pub fn all_values(&self) -> HashMap<&str, &[String]> {
        self.arguments
            .iter()
            .map(|(name, argument)| (name.as_str(), argument.values()))
            .collect()
    }

    //
    // Program metadata.
    //

    /// The program name used in diagnostics.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The dialect the registry evaluates under.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The brief program description (displayed ahead of usage help).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the brief program description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// The trailing usage/examples help text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Set the trailing usage/examples help text.
    pub fn set_usage(&mut self, usage: impl Into<String>) {
        self.usage = usage.into();
    }

    /// The command line syntax string, if one was set.
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Set the command line syntax string.
    pub fn set_syntax(&mut self, syntax: impl Into<String>) {
        self.syntax = syntax.into();
        self.syntax_valid = true;
    }

    /// Whether the syntax string still reflects the declared arguments.
    /// Any mutation of the arguments or relations invalidates it.
    pub fn syntax_is_valid(&self) -> bool {
        self.syntax_valid
    }

    //
    // Requirement edges (directed, non-cascading).
    //

    /// Declare that `dependent`, when used, needs `requirement` present.
    pub fn add_requirement(
        &mut self,
        dependent: &str,
        requirement: &str,
    ) -> Result<(), InvariantError> {
        self.ensure(dependent)?;
        self.ensure(requirement)?;

        if dependent == requirement {
            return Err(InvariantError::SelfRequirement(dependent.to_string()));
        }

        let first = dependent.to_string();
        let second = requirement.to_string();

        // A requirement between mutually-exclusive arguments is meaningless.
        if self.conflicts.exists(&first, &second, false) {
            return Err(InvariantError::RequirementAcrossConflict);
        }

        self.requirements
            .add(first, second)
            .map_err(|_| InvariantError::RequirementExists {
                dependent: dependent.to_string(),
                requirement: requirement.to_string(),
            })?;
        self.invalidate();
        Ok(())
    }

    /// Remove a declared requirement edge.
    pub fn remove_requirement(
        &mut self,
        dependent: &str,
        requirement: &str,
    ) -> Result<(), InvariantError> {
        self.ensure(dependent)?;
        self.ensure(requirement)?;

        self.requirements
            .remove(&dependent.to_string(), &requirement.to_string())
            .map_err(|_| InvariantError::RequirementNotFound {
                dependent: dependent.to_string(),
                requirement: requirement.to_string(),
            })?;
        self.invalidate();
        Ok(())
    }

    /// Remove every requirement declared by `dependent`.
    pub fn remove_requirements(&mut self, dependent: &str) -> Result<(), InvariantError> {
        self.ensure(dependent)?;

        let key = dependent.to_string();
        if !self.requirements.has_relations(&key) {
            return Err(InvariantError::NoRequirements(key));
        }

        let targets: Vec<String> = self
            .requirements
            .direct_relations(&key)
            .into_iter()
            .cloned()
            .collect();
        for target in targets {
            self.requirements.remove(&key, &target).unwrap();
        }
        self.invalidate();
        Ok(())
    }

    /// Remove every requirement edge.
    pub fn clear_requirements(&mut self) {
        self.requirements.clear();
        self.invalidate();
    }

    /// Whether `dependent` requires `requirement` — directly, or (with
    /// `transitive`) through intermediate dependencies.
    pub fn requirement_exists(
        &self,
        dependent: &str,
        requirement: &str,
        transitive: bool,
    ) -> Result<bool, InvariantError> {
        self.ensure(dependent)?;
        self.ensure(requirement)?;
        Ok(self
            .requirements
            .exists(&dependent.to_string(), &requirement.to_string(), transitive))
    }

    /// Whether `dependent` declares any requirement.
    pub fn has_requirements(&self, dependent: &str) -> Result<bool, InvariantError> {
        self.ensure(dependent)?;
        Ok(self.requirements.has_relations(&dependent.to_string()))
    }

    /// Whether any argument depends on `requirement`.
    pub fn has_dependents(&self, requirement: &str) -> Result<bool, InvariantError> {
        self.ensure(requirement)?;
        Ok(self.requirements.has_incoming(&requirement.to_string()))
    }

    /// The names `dependent` directly requires.
    pub fn requirements_of(&self, dependent: &str) -> Result<Vec<&str>, InvariantError> {
        self.ensure(dependent)?;
        Ok(self
            .requirements
            .direct_relations(&dependent.to_string())
            .into_iter()
            .map(String::as_str)
            .collect())
    }

    /// The names that directly depend on `requirement`.
    pub fn dependents_of(&self, requirement: &str) -> Result<Vec<&str>, InvariantError> {
        self.ensure(requirement)?;
        Ok(self
            .requirements
            .incoming_relations(&requirement.to_string())
            .into_iter()
            .map(String::as_str)
            .collect())
    }

    /// Every declared requirement edge as `(dependent, requirement)` pairs.
    pub fn requirement_pairs(&self) -> Vec<(&str, &str)> {
        self.requirements
            .all_pairs()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }

    /// Declare a batch of `(dependent, requirement)` edges.
    pub fn set_requirements<I>(&mut self, pairs: I) -> Result<(), InvariantError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (dependent, requirement) in pairs {
            self.add_requirement(&dependent, &requirement)?;
        }
        Ok(())
    }

    //
    // Conflict edges (undirected, cascading).
    //

    /// Declare that `first` and `second` are mutually exclusive.
    ///
    /// Both must share the same `required` status, must not be linked by a
    /// requirement (in either direction, including transitively), and must
    /// not already conflict (directly or through their group).
    pub fn add_conflict(&mut self, first: &str, second: &str) -> Result<(), InvariantError> {
        self.ensure(first)?;
        self.ensure(second)?;

        if first == second {
            return Err(InvariantError::SelfConflict(first.to_string()));
        }
        if self.arguments[first].is_required() != self.arguments[second].is_required() {
            return Err(InvariantError::ConflictRequiredMismatch);
        }

        let a = first.to_string();
        let b = second.to_string();

        if self.requirements.exists(&a, &b, true) || self.requirements.exists(&b, &a, true) {
            return Err(InvariantError::ConflictAcrossRequirement);
        }
        // Group membership already implies exclusion; a redundant edge is a
        // declaration mistake.
        if self.conflicts.exists(&a, &b, false) {
            return Err(InvariantError::ConflictExists {
                first: a,
                second: b,
            });
        }

        self.conflicts
            .add(a, b)
            .map_err(|_| InvariantError::ConflictExists {
                first: first.to_string(),
                second: second.to_string(),
            })?;
        self.invalidate();
        Ok(())
    }

    /// Remove a declared conflict edge (either orientation).
    pub fn remove_conflict(&mut self, first: &str, second: &str) -> Result<(), InvariantError> {
        self.ensure(first)?;
        self.ensure(second)?;

        self.conflicts
            .remove(&first.to_string(), &second.to_string())
            .map_err(|_| InvariantError::ConflictNotFound {
                first: first.to_string(),
                second: second.to_string(),
            })?;
        self.invalidate();
        Ok(())
    }

    /// Remove every conflict edge touching `name`.
    pub fn remove_conflicts(&mut self, name: &str) -> Result<(), InvariantError> {
        self.ensure(name)?;

        let key = name.to_string();
        if !self.conflicts.has_relations(&key) {
            return Err(InvariantError::NoConflicts(key));
        }

        self.conflicts.remove_all(&key);
        self.invalidate();
        Ok(())
    }

    /// Remove every conflict edge.
    pub fn clear_conflicts(&mut self) {
        self.conflicts.clear();
        self.invalidate();
    }

    /// Whether `name` is in conflict with any argument.
    pub fn in_conflict(&self, name: &str) -> Result<bool, InvariantError> {
        self.ensure(name)?;
        Ok(self.conflicts.has_relations(&name.to_string()))
    }

    /// Whether `first` and `second` are mutually exclusive — directly, or
    /// through their cascaded conflict group.
    pub fn conflict_exists(&self, first: &str, second: &str) -> Result<bool, InvariantError> {
        self.ensure(first)?;
        self.ensure(second)?;
        Ok(self
            .conflicts
            .exists(&first.to_string(), &second.to_string(), false))
    }

    /// Every argument mutually exclusive with `name`: the full cascaded
    /// conflict group, not just the directly-declared partners.
    pub fn conflicts_of(&self, name: &str) -> Result<Vec<&str>, InvariantError> {
        self.ensure(name)?;
        Ok(self
            .conflicts
            .group_relations(&name.to_string())
            .into_iter()
            .map(String::as_str)
            .collect())
    }

    /// Every declared conflict edge as `(first, second)` pairs — the literal
    /// edges, not the group closure.
    pub fn conflict_pairs(&self) -> Vec<(&str, &str)> {
        self.conflicts
            .all_pairs()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect()
    }

    /// Declare a batch of conflict edges.
    pub fn set_conflicts<I>(&mut self, pairs: I) -> Result<(), InvariantError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (first, second) in pairs {
            self.add_conflict(&first, &second)?;
        }
        Ok(())
    }

    //
    // Evaluation.
    //

    /// Evaluate a raw argument vector against the declared rules.
    ///
    /// `argv[0]` is the program name (informational only); the remaining
    /// tokens are parsed and validated.
    /// On [`Evaluation::Success`] the values — including applicable defaults —
    /// are populated on the arguments, readable via [`Registry::values`].
    ///
    /// Partial state is *not* rolled back: on [`Evaluation::Failure`], values
    /// assigned by tokens before the failing one (and defaults applied before
    /// the first violation) remain on the arguments.
    pub fn evaluate(&mut self, argv: &[&str]) -> Evaluation {
        if argv.is_empty() {
            return Evaluation::Failure(ParseError::new(
                ErrorKind::NoArguments,
                self.program.clone(),
                &self.dialect,
            ));
        }

        Session::new(self).run(argv)
    }
}
