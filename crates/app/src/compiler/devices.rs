//! Device phase.

use roomconf_domain::device::{Device, DeviceKind};
use roomconf_domain::error::ValidationErrorKind;
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::section::{Row, SectionKind};

use super::{PhaseOutput, RowErrors, SectionNames};

/// Compile device rows, registering every valid device in `registry`.
///
/// Each row is checked completely: a row with a blank name, a bad type and a
/// bad attribute yields all three errors. A row with any error is skipped.
pub fn compile_devices(rows: &[Row], registry: &mut DeviceRegistry) -> PhaseOutput<Device> {
    let mut output = PhaseOutput::default();
    let mut names = SectionNames::default();

    for (index, row) in rows.iter().enumerate() {
        let mut errors = RowErrors::new(SectionKind::Devices);
        let claimed = names.claim(index, row, &mut errors);

        let kind = match row.get("type").map(str::parse::<DeviceKind>) {
            Some(Ok(kind)) => Some(kind),
            Some(Err(kind)) => {
                errors.push(&claimed.subject, kind);
                None
            }
            None => {
                errors.push(
                    &claimed.subject,
                    ValidationErrorKind::MissingColumn { column: "type" },
                );
                None
            }
        };

        let attributes = kind.map(|kind| kind.parse_attributes(row));
        if let Some(Err(problems)) = &attributes {
            for problem in problems {
                errors.push(&claimed.subject, problem.clone());
            }
        }

        if !claimed.valid || !errors.is_empty() {
            output.reject(index, &claimed.subject, errors);
            continue;
        }
        let (Some(kind), Some(Ok(attributes))) = (kind, attributes) else {
            continue;
        };

        match Device::builder()
            .name(&claimed.subject)
            .kind(kind)
            .attributes(attributes)
            .build()
        {
            Ok(device) => {
                registry.register(device.name.clone(), device.kind);
                output.entities.push(device);
            }
            Err(kind) => {
                errors.push(&claimed.subject, kind);
                output.reject(index, &claimed.subject, errors);
            }
        }
    }

    output
}
