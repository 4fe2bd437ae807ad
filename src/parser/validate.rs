use crate::parser::{ErrorKind, Session};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

impl Session<'_> {
    /// Post-parse rule check: apply eligible defaults, then enforce the
    /// required/requirement/conflict rules.
    ///
    /// Fail-fast — only the first violation (in declaration order) is
    /// reported.
    pub(crate) fn validate(&mut self) -> Result<(), ErrorKind> {
        self.scan_defaults_and_required()?;
        self.check_pairwise()
    }

    /// Single scan in declaration order: each unassigned required argument is
    /// a violation unless an assigned conflict partner excuses it ("either A
    /// or B"); each unassigned named argument with an eligible default has the
    /// default applied as a side effect of the same scan.
    fn scan_defaults_and_required(&mut self) -> Result<(), ErrorKind> {
        for index in 0..self.registry.order.len() {
            let name = self.registry.order[index].clone();

            if !self.assigned[index] && self.registry.arguments[&name].is_required() {
                let excused = self
                    .registry
                    .conflicts
                    .group_relations(&name)
                    .iter()
                    .filter_map(|partner| self.index_of(partner.as_str()))
                    .any(|partner_index| self.assigned[partner_index]);

                if !excused {
                    return Err(ErrorKind::MissingRequired { name });
                }
            }

            self.apply_default(index, &name);
        }

        Ok(())
    }

    /// Apply the default value of an unassigned named argument, but only when
    /// it is unconditionally eligible (no requirement edges) or at least one
    /// of its requirement targets is itself assigned.
    fn apply_default(&mut self, index: usize, name: &str) {
        if self.assigned[index] {
            return;
        }

        let name = name.to_string();
        let Some(default) = self.registry.arguments[&name].default() else {
            return;
        };
        let default = default.to_string();

        let requirements = self.registry.requirements.direct_relations(&name);
        let eligible = requirements.is_empty()
            || requirements
                .iter()
                .filter_map(|requirement| self.index_of(requirement.as_str()))
                .any(|requirement_index| self.assigned[requirement_index]);

        if eligible {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Applying default '{default}' to '{name}'.");
            }

            self.registry
                .arguments
                .get_mut(&name)
                .unwrap()
                .push_value(default);
            self.assigned[index] = true;
        }
    }

    /// Pairwise relation check over the assigned arguments: an assigned pair
    /// in (direct or cascaded) conflict is a violation, and an assigned
    /// argument whose (direct or transitive) requirement is unassigned is a
    /// missing-required violation.
    fn check_pairwise(&self) -> Result<(), ErrorKind> {
        let order = &self.registry.order;

        for (i, first) in order.iter().enumerate() {
            if !self.assigned[i] {
                continue;
            }

            for (j, second) in order.iter().enumerate() {
                if i == j {
                    continue;
                }

                if self.assigned[j] && self.registry.conflicts.exists(first, second, false) {
                    return Err(ErrorKind::Conflict {
                        first: first.clone(),
                        second: second.clone(),
                    });
                }

                if !self.assigned[j] && self.registry.requirements.exists(first, second, true) {
                    return Err(ErrorKind::MissingRequired {
                        name: second.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
