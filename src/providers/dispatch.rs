use crate::core::error::FlowdeckError;
use crate::providers::CompletionBackend;
use crate::providers::cohere::CohereBackend;
use crate::providers::huggingface::HuggingFaceBackend;
use crate::providers::openai::OpenAiBackend;
use crate::providers::registry::{self, ApiFlavor, ProviderDescriptor};
use crate::providers::selection::ProviderSelection;

/// Builds a backend for a resolved descriptor from the selection's
/// endpoint and credentials. Injectable so tests can count and stub calls.
pub trait BackendFactory: Send + Sync {
    fn build(
        &self,
        descriptor: &'static ProviderDescriptor,
        selection: &ProviderSelection,
    ) -> Box<dyn CompletionBackend>;
}

struct HttpBackendFactory;

impl BackendFactory for HttpBackendFactory {
    fn build(
        &self,
        descriptor: &'static ProviderDescriptor,
        selection: &ProviderSelection,
    ) -> Box<dyn CompletionBackend> {
        let base_url = selection.base_url.clone();
        let api_key = selection.api_key.clone();
        match descriptor.flavor {
            ApiFlavor::OpenAiChat => Box::new(OpenAiBackend::new(base_url, api_key)),
            ApiFlavor::Cohere => Box::new(CohereBackend::new(base_url, api_key)),
            ApiFlavor::HfInference => Box::new(HuggingFaceBackend::new(base_url, api_key)),
        }
    }
}

/// Routes a prompt to the backend implied by the selection and returns the
/// completion. Pure apart from the single outbound call: no retry, no
/// timeout enforcement, no shared mutable state.
pub struct Dispatcher {
    factory: Box<dyn BackendFactory>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            factory: Box::new(HttpBackendFactory),
        }
    }

    pub fn with_factory(factory: Box<dyn BackendFactory>) -> Self {
        Self { factory }
    }

    /// Issues one completion request for `prompt` against the selected
    /// provider.
    ///
    /// The effective model is `model_override` when non-empty, otherwise the
    /// descriptor's first supported model. An unknown provider id fails with
    /// `UnknownProvider` rather than falling back to a default; any
    /// transport or provider-side failure is wrapped as `Upstream` carrying
    /// the provider id and the original message.
    pub async fn dispatch(
        &self,
        selection: Option<&ProviderSelection>,
        prompt: &str,
        model_override: &str,
    ) -> Result<String, FlowdeckError> {
        let selection = selection.ok_or(FlowdeckError::MissingProvider)?;
        let descriptor = registry::require(&selection.provider_id)?;

        let model = if model_override.is_empty() {
            descriptor.supported_models[0]
        } else {
            model_override
        };

        let backend = self.factory.build(descriptor, selection);
        backend
            .complete(prompt, model)
            .await
            .map_err(|err| match err {
                upstream @ FlowdeckError::Upstream { .. } => upstream,
                other => FlowdeckError::Upstream {
                    provider: descriptor.id.to_string(),
                    message: other.to_string(),
                },
            })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// What the stubbed transport should do for each call.
    #[derive(Clone)]
    pub enum StubReply {
        Text(String),
        EchoModel,
        Fail(String),
    }

    pub struct StubBackend {
        reply: StubReply,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, _prompt: &str, model: &str) -> Result<String, FlowdeckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                StubReply::Text(text) => Ok(text.clone()),
                StubReply::EchoModel => Ok(model.to_string()),
                StubReply::Fail(message) => Err(FlowdeckError::Api(message.clone())),
            }
        }
    }

    pub struct StubFactory {
        pub reply: StubReply,
        pub calls: Arc<AtomicUsize>,
    }

    impl StubFactory {
        pub fn dispatcher(reply: StubReply) -> (Dispatcher, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let factory = StubFactory {
                reply,
                calls: calls.clone(),
            };
            (Dispatcher::with_factory(Box::new(factory)), calls)
        }
    }

    impl BackendFactory for StubFactory {
        fn build(
            &self,
            _descriptor: &'static ProviderDescriptor,
            _selection: &ProviderSelection,
        ) -> Box<dyn CompletionBackend> {
            Box::new(StubBackend {
                reply: self.reply.clone(),
                calls: self.calls.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::{StubFactory, StubReply};
    use super::*;
    use crate::providers::selection::SelectionState;
    use std::sync::atomic::Ordering;

    fn openai_selection() -> SelectionState {
        let mut state = SelectionState::new();
        state
            .select(registry::require("openai").unwrap(), "gpt-4", None, None)
            .unwrap();
        state
    }

    #[tokio::test]
    async fn missing_selection_fails_before_any_call() {
        let (dispatcher, calls) = StubFactory::dispatcher(StubReply::Text("T".to_string()));

        let result = dispatcher.dispatch(None, "hi", "gpt-4").await;

        assert!(matches!(result, Err(FlowdeckError::MissingProvider)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_provider_id_is_never_substituted() {
        let (dispatcher, calls) = StubFactory::dispatcher(StubReply::Text("T".to_string()));
        let selection = ProviderSelection {
            provider_id: "vanished".to_string(),
            model: "gpt-4".to_string(),
            base_url: "https://example.invalid".to_string(),
            api_key: String::new(),
        };

        let result = dispatcher.dispatch(Some(&selection), "hi", "gpt-4").await;

        match result {
            Err(FlowdeckError::UnknownProvider(id)) => assert_eq!(id, "vanished"),
            other => panic!("expected UnknownProvider, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn completion_text_is_returned_verbatim() {
        let (dispatcher, calls) = StubFactory::dispatcher(StubReply::Text("T".to_string()));
        let state = openai_selection();

        let result = dispatcher
            .dispatch(state.current(), "hi", "gpt-4")
            .await
            .unwrap();

        assert_eq!(result, "T");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn whitespace_is_not_trimmed_from_completions() {
        let (dispatcher, _) = StubFactory::dispatcher(StubReply::Text("  spaced  \n".to_string()));
        let state = openai_selection();

        let result = dispatcher
            .dispatch(state.current(), "hi", "gpt-4")
            .await
            .unwrap();

        assert_eq!(result, "  spaced  \n");
    }

    #[tokio::test]
    async fn empty_override_falls_back_to_first_supported_model() {
        let (dispatcher, _) = StubFactory::dispatcher(StubReply::EchoModel);
        let state = openai_selection();

        let effective = dispatcher.dispatch(state.current(), "hi", "").await.unwrap();

        assert_eq!(effective, "gpt-4");

        let overridden = dispatcher
            .dispatch(state.current(), "hi", "gpt-3.5-turbo")
            .await
            .unwrap();
        assert_eq!(overridden, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn backend_failures_are_wrapped_with_the_provider_id() {
        let (dispatcher, calls) =
            StubFactory::dispatcher(StubReply::Fail("boom from upstream".to_string()));
        let state = openai_selection();

        let result = dispatcher.dispatch(state.current(), "hi", "gpt-4").await;

        match result {
            Err(FlowdeckError::Upstream { provider, message }) => {
                assert_eq!(provider, "openai");
                assert!(message.contains("boom from upstream"));
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
