//! Group phase.

use std::collections::HashSet;

use roomconf_domain::error::ValidationErrorKind;
use roomconf_domain::group::{Group, split_members};
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::section::{Row, SectionKind};

use super::{PhaseOutput, RowErrors, SectionNames};

/// Compile group rows, resolving every member against `registry`.
///
/// Members are read from the `devices` column (`members` is accepted too).
/// A group with any problem is left out of the output entirely.
pub fn compile_groups(rows: &[Row], registry: &DeviceRegistry) -> PhaseOutput<Group> {
    let mut output = PhaseOutput::default();
    let mut names = SectionNames::default();

    for (index, row) in rows.iter().enumerate() {
        let mut errors = RowErrors::new(SectionKind::Groups);
        let claimed = names.claim(index, row, &mut errors);

        let members = row
            .get("devices")
            .or_else(|| row.get("members"))
            .map(split_members)
            .unwrap_or_default();
        if members.is_empty() {
            errors.push(&claimed.subject, ValidationErrorKind::NoMembers);
        }

        let mut seen = HashSet::new();
        let mut builder = Group::builder().name(&claimed.subject);
        for member in members {
            if !seen.insert(member.clone()) {
                errors.push_referenced(
                    &member,
                    &claimed.subject,
                    ValidationErrorKind::DuplicateMember,
                );
                continue;
            }
            if !registry.contains(&member) {
                errors.push_referenced(
                    &member,
                    &claimed.subject,
                    ValidationErrorKind::UnresolvedDevice,
                );
                continue;
            }
            builder = builder.member(member);
        }

        if !claimed.valid || !errors.is_empty() {
            output.reject(index, &claimed.subject, errors);
            continue;
        }
        match builder.build() {
            Ok(group) => output.entities.push(group),
            Err(kind) => {
                errors.push(&claimed.subject, kind);
                output.reject(index, &claimed.subject, errors);
            }
        }
    }

    output
}
