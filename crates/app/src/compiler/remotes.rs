//! Remote control phase.

use std::collections::BTreeSet;

use roomconf_domain::error::ValidationErrorKind;
use roomconf_domain::group::Group;
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::remote::{Binding, Button, RemoteControl};
use roomconf_domain::scene::Scene;
use roomconf_domain::section::{Row, SectionKind};
use roomconf_domain::target::TargetKind;

use super::{PhaseOutput, RowErrors, SectionNames};

fn resolve(target: &str, registry: &DeviceRegistry, groups: &[Group], scenes: &[Scene]) -> Option<TargetKind> {
    if registry.contains(target) {
        Some(TargetKind::Device)
    } else if groups.iter().any(|group| group.name == target) {
        Some(TargetKind::Group)
    } else if scenes.iter().any(|scene| scene.name == target) {
        Some(TargetKind::Scene)
    } else {
        None
    }
}

/// Compile remote control rows. Button targets resolve against `registry`,
/// then `groups`, then `scenes`.
///
/// Empty button cells leave the button unassigned. A remote with any problem
/// is left out of the output entirely.
pub fn compile_remotes(
    rows: &[Row],
    registry: &DeviceRegistry,
    groups: &[Group],
    scenes: &[Scene],
) -> PhaseOutput<RemoteControl> {
    let mut output = PhaseOutput::default();
    let mut names = SectionNames::default();

    for (index, row) in rows.iter().enumerate() {
        let mut errors = RowErrors::new(SectionKind::RemoteControls);
        let claimed = names.claim(index, row, &mut errors);
        let remote = claimed.subject.as_str();

        let mut assigned = BTreeSet::new();
        let mut builder = RemoteControl::builder().name(remote);
        for (column, target) in row.cells() {
            if target.is_empty() {
                continue;
            }
            let button = match Button::from_column(column) {
                None => continue,
                Some(Ok(button)) => button,
                Some(Err(kind)) => {
                    errors.push(remote, kind);
                    continue;
                }
            };
            if !assigned.insert(button) {
                errors.push_referenced(
                    &button.to_string(),
                    remote,
                    ValidationErrorKind::DuplicateButton,
                );
                continue;
            }
            let Some(kind) = resolve(target, registry, groups, scenes) else {
                errors.push_referenced(target, remote, ValidationErrorKind::UnresolvedTarget);
                continue;
            };
            builder = builder.bind(
                button,
                Binding {
                    target: target.to_string(),
                    kind,
                },
            );
        }

        if !claimed.valid || !errors.is_empty() {
            output.reject(index, remote, errors);
            continue;
        }
        match builder.build() {
            Ok(compiled) => output.entities.push(compiled),
            Err(kind) => {
                errors.push(remote, kind);
                output.reject(index, remote, errors);
            }
        }
    }

    output
}
