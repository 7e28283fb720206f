//! Compilation pipeline: turns split spreadsheet sections into a document.
//!
//! Phases run in a fixed order, each one only seeing what earlier phases
//! produced:
//!
//! 1. devices (fills the [`DeviceRegistry`])
//! 2. groups (members resolved against the registry)
//! 3. scenes (targets resolved against the registry, then groups)
//! 4. remote controls (targets resolved against registry, groups, scenes)
//!
//! A failed device phase stops the run because every later phase depends on
//! the registry. Failures in later phases do not: the remaining phases still
//! run against whatever did compile, and all errors are reported together.

mod devices;
mod groups;
mod remotes;
mod scenes;

pub use devices::compile_devices;
pub use groups::compile_groups;
pub use remotes::compile_remotes;
pub use scenes::compile_scenes;

use std::collections::HashSet;

use roomconf_domain::device::Device;
use roomconf_domain::document::{CompilationResult, ConfigDocument};
use roomconf_domain::error::{ValidationError, ValidationErrorKind};
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::section::{RawSections, Row, SectionInput, SectionKind};

/// Entities and errors produced by one phase.
#[derive(Debug)]
pub struct PhaseOutput<T> {
    pub entities: Vec<T>,
    pub errors: Vec<ValidationError>,
}

impl<T> Default for PhaseOutput<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Runs the phases over one set of sections.
///
/// The compiler owns the registry of the current run and clears it at the
/// start of every [`compile`](Self::compile), so a compiler can be reused
/// after the input changed without leaking names from the previous run.
/// Compiling takes `&mut self`: one compiler never serves two runs at once.
#[derive(Debug, Default)]
pub struct Compiler {
    registry: DeviceRegistry,
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry left by the last run; empty if that run's device phase failed.
    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Compile all four sections into a [`ConfigDocument`].
    #[tracing::instrument(skip_all)]
    pub fn compile(&mut self, sections: &RawSections) -> CompilationResult {
        self.registry.clear();

        let devices = match self.device_phase(sections) {
            Ok(devices) => devices,
            Err(errors) => {
                tracing::warn!(errors = errors.len(), "device phase failed, stopping");
                return CompilationResult::Failed(errors);
            }
        };

        let registry = &self.registry;
        let mut errors = Vec::new();

        let groups = run_phase(SectionKind::Groups, &sections.groups, &mut errors, |rows| {
            compile_groups(rows, registry)
        });
        let scenes = run_phase(SectionKind::Scenes, &sections.scenes, &mut errors, |rows| {
            compile_scenes(rows, registry, &groups)
        });
        let remote_controls = run_phase(
            SectionKind::RemoteControls,
            &sections.remote_controls,
            &mut errors,
            |rows| compile_remotes(rows, registry, &groups, &scenes),
        );

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "compilation failed");
            return CompilationResult::Failed(errors);
        }

        tracing::info!(
            devices = devices.len(),
            groups = groups.len(),
            scenes = scenes.len(),
            remote_controls = remote_controls.len(),
            "compiled room configuration"
        );
        CompilationResult::Ok(ConfigDocument {
            devices,
            groups,
            scenes,
            remote_controls,
        })
    }

    /// Run only the device phase and return the resulting name → type table.
    ///
    /// # Errors
    ///
    /// Returns every device error when the device section does not validate.
    #[tracing::instrument(skip_all)]
    pub fn validate_devices(
        &mut self,
        sections: &RawSections,
    ) -> Result<&DeviceRegistry, Vec<ValidationError>> {
        self.registry.clear();
        self.device_phase(sections)?;
        Ok(&self.registry)
    }

    fn device_phase(&mut self, sections: &RawSections) -> Result<Vec<Device>, Vec<ValidationError>> {
        let output = match section_rows(SectionKind::Devices, &sections.devices) {
            Ok(rows) => compile_devices(rows, &mut self.registry),
            Err(err) => return Err(vec![err]),
        };
        if output.errors.is_empty() {
            Ok(output.entities)
        } else {
            self.registry.clear();
            Err(output.errors)
        }
    }
}

/// Compile `sections` with a fresh [`Compiler`].
#[must_use]
pub fn compile(sections: &RawSections) -> CompilationResult {
    Compiler::new().compile(sections)
}

/// Rows of a section, or the structural error that stops its phase.
///
/// Only the devices section is required; the others may be absent.
fn section_rows(kind: SectionKind, input: &SectionInput) -> Result<&[Row], ValidationError> {
    match input {
        SectionInput::Rows(rows) => Ok(rows),
        SectionInput::Missing if kind != SectionKind::Devices => Ok(&[]),
        SectionInput::Missing => Err(ValidationError::new(
            kind,
            kind.key(),
            ValidationErrorKind::MalformedSection {
                reason: "section is missing".to_string(),
            },
        )),
        SectionInput::Malformed(reason) => Err(ValidationError::new(
            kind,
            kind.key(),
            ValidationErrorKind::MalformedSection {
                reason: reason.clone(),
            },
        )),
    }
}

fn run_phase<T>(
    kind: SectionKind,
    input: &SectionInput,
    errors: &mut Vec<ValidationError>,
    phase: impl FnOnce(&[Row]) -> PhaseOutput<T>,
) -> Vec<T> {
    match section_rows(kind, input) {
        Ok(rows) => {
            let output = phase(rows);
            errors.extend(output.errors);
            output.entities
        }
        Err(err) => {
            errors.push(err);
            Vec::new()
        }
    }
}

/// Errors collected for the row being compiled.
struct RowErrors {
    section: SectionKind,
    errors: Vec<ValidationError>,
}

impl RowErrors {
    fn new(section: SectionKind) -> Self {
        Self {
            section,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, subject: &str, kind: ValidationErrorKind) {
        self.errors
            .push(ValidationError::new(self.section, subject, kind));
    }

    /// Record a problem with a name referenced from `owner`.
    fn push_referenced(&mut self, subject: &str, owner: &str, kind: ValidationErrorKind) {
        self.errors
            .push(ValidationError::new(self.section, subject, kind).with_owner(owner));
    }

    fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Name of the row being compiled, as used to tag its errors.
struct Claimed {
    subject: String,
    valid: bool,
}

/// Enforces non-empty, unique names within one section.
#[derive(Default)]
struct SectionNames {
    seen: HashSet<String>,
}

impl SectionNames {
    fn claim(&mut self, index: usize, row: &Row, errors: &mut RowErrors) -> Claimed {
        let Some(name) = row.get("name") else {
            let subject = format!("row {}", index + 1);
            errors.push(&subject, ValidationErrorKind::EmptyName);
            return Claimed {
                subject,
                valid: false,
            };
        };

        let valid = self.seen.insert(name.to_string());
        if !valid {
            errors.push(name, ValidationErrorKind::DuplicateName);
        }
        Claimed {
            subject: name.to_string(),
            valid,
        }
    }
}

impl<T> PhaseOutput<T> {
    fn reject(&mut self, index: usize, subject: &str, errors: RowErrors) {
        tracing::debug!(
            section = %errors.section,
            row = index + 1,
            subject,
            errors = errors.len(),
            "rejected row"
        );
        self.errors.extend(errors.errors);
    }
}
