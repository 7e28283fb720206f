//! Section source port: where split spreadsheet sections come from.

use std::future::Future;

use roomconf_domain::error::RoomConfError;
use roomconf_domain::section::RawSections;

/// Supplies the four sections of a spreadsheet, already split by the
/// parsing step.
pub trait SectionSource {
    /// Load the sections.
    fn load(&self) -> impl Future<Output = Result<RawSections, RoomConfError>> + Send;
}

impl<T: SectionSource + Send + Sync> SectionSource for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<RawSections, RoomConfError>> + Send {
        (**self).load()
    }
}
