//! Configuration service: use-cases for compiling and publishing a room
//! configuration.

use roomconf_domain::document::CompilationResult;
use roomconf_domain::error::{CompilationErrors, RoomConfError};
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::section::RawSections;

use crate::compiler::Compiler;
use crate::ports::{ConfigurationSink, SectionSource, Submission};

/// Application service that compiles sections and hands the result to a sink.
///
/// Every call builds its own [`Compiler`], so one service can serve
/// concurrent requests without sharing a registry between them.
pub struct ConfigurationService<K> {
    sink: K,
}

impl<K: ConfigurationSink> ConfigurationService<K> {
    /// Create a new service publishing to the given sink.
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// Compile `sections` without publishing anything.
    #[tracing::instrument(skip_all)]
    pub fn compile(&self, sections: &RawSections) -> CompilationResult {
        Compiler::new().compile(sections)
    }

    /// Run the device phase only and return the name → type table.
    ///
    /// # Errors
    ///
    /// Returns [`CompilationErrors`] holding every device error.
    #[tracing::instrument(skip_all)]
    pub fn validate_devices(&self, sections: &RawSections) -> Result<DeviceRegistry, CompilationErrors> {
        let mut compiler = Compiler::new();
        compiler
            .validate_devices(sections)
            .cloned()
            .map_err(CompilationErrors)
    }

    /// Compile `sections` and submit the pretty-printed document.
    ///
    /// # Errors
    ///
    /// Returns [`RoomConfError::Compilation`] if the sections do not compile,
    /// or an error propagated from serialization or the sink.
    #[tracing::instrument(skip_all)]
    pub async fn publish(&self, sections: &RawSections) -> Result<Submission, RoomConfError> {
        let document = self.compile(sections).into_result()?;
        let json = document.to_json_pretty()?;
        self.submit_json(json).await
    }

    /// Load sections from `source`, then [`publish`](Self::publish) them.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or any error of [`publish`](Self::publish).
    #[tracing::instrument(skip_all)]
    pub async fn publish_from<S: SectionSource + Sync>(
        &self,
        source: &S,
    ) -> Result<Submission, RoomConfError> {
        let sections = source.load().await?;
        self.publish(&sections).await
    }

    /// Submit an already serialized document.
    ///
    /// # Errors
    ///
    /// Returns [`RoomConfError::EmptyDocument`] when `json` is blank, without
    /// reaching the sink; otherwise the sink's error.
    #[tracing::instrument(skip_all, fields(bytes = json.len()))]
    pub async fn submit_json(&self, json: String) -> Result<Submission, RoomConfError> {
        if json.trim().is_empty() {
            return Err(RoomConfError::EmptyDocument);
        }
        let submission = self.sink.submit(json).await?;
        if submission.success {
            tracing::info!("configuration submitted");
        } else {
            tracing::warn!(error = ?submission.error_msg, "configuration refused by sink");
        }
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomconf_domain::section::Row;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemorySink {
        submitted: Mutex<Vec<String>>,
    }

    impl ConfigurationSink for InMemorySink {
        fn submit(
            &self,
            document_json: String,
        ) -> impl Future<Output = Result<Submission, RoomConfError>> + Send {
            self.submitted.lock().unwrap().push(document_json);
            async { Ok(Submission::accepted()) }
        }
    }

    struct RefusingSink;

    impl ConfigurationSink for RefusingSink {
        fn submit(
            &self,
            _document_json: String,
        ) -> impl Future<Output = Result<Submission, RoomConfError>> + Send {
            async { Ok(Submission::rejected("backend offline")) }
        }
    }

    struct StaticSource(RawSections);

    impl SectionSource for StaticSource {
        fn load(&self) -> impl Future<Output = Result<RawSections, RoomConfError>> + Send {
            let sections = self.0.clone();
            async { Ok(sections) }
        }
    }

    fn make_service() -> ConfigurationService<InMemorySink> {
        ConfigurationService::new(InMemorySink::default())
    }

    fn valid_sections() -> RawSections {
        RawSections::new()
            .with_devices(vec![Row::new().with("name", "Light1").with("type", "DIMMER")])
            .with_groups(vec![
                Row::new()
                    .with("name", "Living Room")
                    .with("devices", "Light1"),
            ])
    }

    #[tokio::test]
    async fn should_submit_pretty_printed_document() {
        let service = make_service();

        let submission = service.publish(&valid_sections()).await.unwrap();

        assert!(submission.success);
        let submitted = service.sink.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert!(submitted[0].starts_with("{\n  \"devices\": ["));
        assert!(submitted[0].contains("\"Living Room\""));
    }

    #[tokio::test]
    async fn should_not_submit_when_compilation_fails() {
        let service = make_service();
        let sections = RawSections::new().with_devices(vec![Row::new().with("name", "Light1")]);

        let err = service.publish(&sections).await.unwrap_err();

        assert!(matches!(err, RoomConfError::Compilation(ref errors) if errors.errors().len() == 1));
        assert!(service.sink.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_empty_json_before_reaching_sink() {
        let service = make_service();

        let err = service.submit_json("  \n".to_string()).await.unwrap_err();

        assert!(matches!(err, RoomConfError::EmptyDocument));
        assert_eq!(err.to_string(), "JSON content is empty");
        assert!(service.sink.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_refusal_from_sink() {
        let service = ConfigurationService::new(RefusingSink);

        let submission = service.publish(&valid_sections()).await.unwrap();

        assert!(!submission.success);
        assert_eq!(submission.error_msg.as_deref(), Some("backend offline"));
    }

    #[tokio::test]
    async fn should_publish_sections_loaded_from_source() {
        let service = make_service();
        let source = StaticSource(valid_sections());

        let submission = service.publish_from(&source).await.unwrap();

        assert!(submission.success);
        assert_eq!(service.sink.submitted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_submit_identical_bytes_for_identical_input() {
        let service = make_service();

        service.publish(&valid_sections()).await.unwrap();
        service.publish(&valid_sections()).await.unwrap();

        let submitted = service.sink.submitted.lock().unwrap();
        assert_eq!(submitted[0], submitted[1]);
    }

    #[test]
    fn should_list_identified_devices() {
        let service = make_service();

        let registry = service.validate_devices(&valid_sections()).unwrap();

        let devices: Vec<_> = registry.iter().map(|(name, kind)| (name, kind.as_str())).collect();
        assert_eq!(devices, vec![("Light1", "DIMMER")]);
    }

    #[test]
    fn should_return_device_errors_from_validation() {
        let service = make_service();
        let sections = RawSections::new().with_devices(vec![
            Row::new().with("name", "A").with("type", "RELAY"),
            Row::new().with("name", "A").with("type", "RELAY"),
        ]);

        let errors = service.validate_devices(&sections).unwrap_err();

        assert_eq!(errors.errors()[0].subject, "A");
    }
}
