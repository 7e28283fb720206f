//! Scene phase.

use std::collections::BTreeMap;

use roomconf_domain::device::DeviceKind;
use roomconf_domain::error::ValidationErrorKind;
use roomconf_domain::group::Group;
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::scene::{Command, CommandName, Scene, SceneAction};
use roomconf_domain::section::{Row, SectionKind};
use roomconf_domain::target::TargetKind;

use super::{PhaseOutput, RowErrors, SectionNames};

/// The cells of one numbered action (`target_N`, `command_N`, `value_N`).
#[derive(Debug, Default)]
struct ActionSlot<'a> {
    target: Option<&'a str>,
    command: Option<&'a str>,
    value: Option<&'a str>,
}

/// Gather action cells by number, ordered numerically (`target_10` after
/// `target_9`). Empty cells are ignored; the first non-empty cell wins.
fn action_slots(row: &Row) -> BTreeMap<u32, ActionSlot<'_>> {
    let mut slots: BTreeMap<u32, ActionSlot<'_>> = BTreeMap::new();
    for (column, value) in row.cells() {
        if value.is_empty() {
            continue;
        }
        let Some((field, number)) = column.rsplit_once('_') else {
            continue;
        };
        let Ok(number) = number.parse::<u32>() else {
            continue;
        };
        if number == 0 {
            continue;
        }
        let slot = slots.entry(number).or_default();
        let cell = match field {
            "target" => &mut slot.target,
            "command" => &mut slot.command,
            "value" => &mut slot.value,
            _ => continue,
        };
        if cell.is_none() {
            *cell = Some(value);
        }
    }
    slots.retain(|_, slot| slot.target.is_some() || slot.command.is_some() || slot.value.is_some());
    slots
}

/// What an action target resolved to.
enum Resolved<'a> {
    Device(DeviceKind),
    Group(&'a Group),
}

impl Resolved<'_> {
    fn target_kind(&self) -> TargetKind {
        match self {
            Self::Device(_) => TargetKind::Device,
            Self::Group(_) => TargetKind::Group,
        }
    }

    /// First device kind behind the target that cannot run `command`.
    fn unsupported(&self, command: CommandName, registry: &DeviceRegistry) -> Option<DeviceKind> {
        match self {
            Self::Device(kind) => (!kind.supports(command)).then_some(*kind),
            Self::Group(group) => group
                .members
                .iter()
                .filter_map(|member| registry.kind_of(member))
                .find(|kind| !kind.supports(command)),
        }
    }
}

fn resolve<'a>(target: &str, registry: &DeviceRegistry, groups: &'a [Group]) -> Option<Resolved<'a>> {
    if let Some(kind) = registry.kind_of(target) {
        return Some(Resolved::Device(kind));
    }
    groups
        .iter()
        .find(|group| group.name == target)
        .map(Resolved::Group)
}

/// Compile scene rows. Targets resolve against `registry` first, then
/// against the already compiled `groups`.
///
/// A scene with any problem is left out of the output entirely.
pub fn compile_scenes(rows: &[Row], registry: &DeviceRegistry, groups: &[Group]) -> PhaseOutput<Scene> {
    let mut output = PhaseOutput::default();
    let mut names = SectionNames::default();

    for (index, row) in rows.iter().enumerate() {
        let mut errors = RowErrors::new(SectionKind::Scenes);
        let claimed = names.claim(index, row, &mut errors);
        let scene = claimed.subject.as_str();

        let slots = action_slots(row);
        if slots.is_empty() {
            errors.push(scene, ValidationErrorKind::NoActions);
        }

        let mut builder = Scene::builder().name(scene);
        for (number, slot) in slots {
            let Some(target) = slot.target else {
                errors.push(scene, ValidationErrorKind::MissingTarget { index: number });
                continue;
            };
            let Some(raw_command) = slot.command else {
                errors.push(scene, ValidationErrorKind::MissingCommand { index: number });
                continue;
            };

            let resolved = resolve(target, registry, groups);
            if resolved.is_none() {
                errors.push_referenced(target, scene, ValidationErrorKind::UnresolvedTarget);
            }

            let name = match raw_command.parse::<CommandName>() {
                Ok(name) => name,
                Err(kind) => {
                    errors.push_referenced(target, scene, kind);
                    continue;
                }
            };
            if let Some(device_kind) = resolved
                .as_ref()
                .and_then(|resolved| resolved.unsupported(name, registry))
            {
                errors.push_referenced(
                    target,
                    scene,
                    ValidationErrorKind::UnsupportedCommand {
                        command: name,
                        device_kind,
                    },
                );
            }

            let command = match Command::parse(name, slot.value) {
                Ok(command) => command,
                Err(kind) => {
                    errors.push_referenced(target, scene, kind);
                    continue;
                }
            };
            if let Some(resolved) = resolved {
                builder = builder.action(SceneAction {
                    target: target.to_string(),
                    kind: resolved.target_kind(),
                    command,
                });
            }
        }

        if !claimed.valid || !errors.is_empty() {
            output.reject(index, scene, errors);
            continue;
        }
        match builder.build() {
            Ok(compiled) => output.entities.push(compiled),
            Err(kind) => {
                errors.push(scene, kind);
                output.reject(index, scene, errors);
            }
        }
    }

    output
}
