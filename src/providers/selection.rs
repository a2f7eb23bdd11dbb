use crate::core::error::FlowdeckError;
use crate::providers::registry::ProviderDescriptor;

/// The user's current choice of provider/model/credentials for the session.
///
/// Held only in memory; replaced wholesale on re-selection, never partially
/// mutated. Credentials are never written to disk.
#[derive(Debug, Clone)]
pub struct ProviderSelection {
    pub provider_id: String,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
}

/// Holds the single active selection, or none before the user has chosen.
#[derive(Debug, Default)]
pub struct SelectionState {
    current: Option<ProviderSelection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Replaces the active selection atomically. The model must be one of
    /// the descriptor's supported models; on failure the previous selection
    /// is left untouched.
    pub fn select(
        &mut self,
        descriptor: &ProviderDescriptor,
        model: &str,
        base_url_override: Option<String>,
        api_key_override: Option<String>,
    ) -> Result<&ProviderSelection, FlowdeckError> {
        if !descriptor.supported_models.contains(&model) {
            return Err(FlowdeckError::InvalidModel {
                provider: descriptor.id.to_string(),
                model: model.to_string(),
            });
        }

        let selection = ProviderSelection {
            provider_id: descriptor.id.to_string(),
            model: model.to_string(),
            base_url: base_url_override
                .unwrap_or_else(|| descriptor.default_base_url.to_string()),
            api_key: api_key_override
                .unwrap_or_else(|| descriptor.default_api_key.to_string()),
        };

        Ok(self.current.insert(selection))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ProviderSelection> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::registry;

    #[test]
    fn select_accepts_listed_models_only() {
        let openai = registry::require("openai").unwrap();
        let mut state = SelectionState::new();

        let selection = state.select(openai, "gpt-4", None, None).unwrap();
        assert_eq!(selection.provider_id, "openai");
        assert_eq!(selection.model, "gpt-4");
        assert_eq!(selection.base_url, openai.default_base_url);

        match state.select(openai, "gpt-5", None, None) {
            Err(FlowdeckError::InvalidModel { provider, model }) => {
                assert_eq!(provider, "openai");
                assert_eq!(model, "gpt-5");
            }
            other => panic!("expected InvalidModel, got {:?}", other),
        }
    }

    #[test]
    fn failed_select_leaves_previous_selection_unchanged() {
        let openai = registry::require("openai").unwrap();
        let mut state = SelectionState::new();
        state.select(openai, "gpt-4", None, None).unwrap();

        assert!(state.select(openai, "gpt-5", None, None).is_err());

        let current = state.current().unwrap();
        assert_eq!(current.model, "gpt-4");
    }

    #[test]
    fn overrides_replace_descriptor_defaults() {
        let cohere = registry::require("cohere").unwrap();
        let mut state = SelectionState::new();
        state
            .select(
                cohere,
                "command",
                Some("http://localhost:9999/v1".to_string()),
                Some("sk-test".to_string()),
            )
            .unwrap();

        let current = state.current().unwrap();
        assert_eq!(current.base_url, "http://localhost:9999/v1");
        assert_eq!(current.api_key, "sk-test");
    }

    #[test]
    fn clear_resets_to_none() {
        let openai = registry::require("openai").unwrap();
        let mut state = SelectionState::new();
        state.select(openai, "gpt-4", None, None).unwrap();
        state.clear();
        assert!(state.current().is_none());
    }
}
