use crate::core::error::FlowdeckError;

/// Wire-format family a provider speaks. `OpenAiChat` doubles as the
/// generic shape for any OpenAI-compatible endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    OpenAiChat,
    Cohere,
    HfInference,
}

/// Static definition of a provider's identity and capabilities.
///
/// The registry is read-only after process start; only the user's
/// per-session selection is mutable.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// Stable short identifier, unique across the registry
    pub id: &'static str,
    /// Human-readable label
    pub display_name: &'static str,
    pub flavor: ApiFlavor,
    /// Ordered for display only; first entry is the documented fallback model
    pub supported_models: &'static [&'static str],
    pub default_base_url: &'static str,
    /// Template field, normally empty
    pub default_api_key: &'static str,
    /// Environment variable consulted when no key is given explicitly
    pub env_var: &'static str,
}

const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "openai",
        display_name: "OpenAI",
        flavor: ApiFlavor::OpenAiChat,
        supported_models: &["gpt-4", "gpt-4-turbo", "gpt-3.5-turbo"],
        default_base_url: "https://api.openai.com/v1",
        default_api_key: "",
        env_var: "OPENAI_API_KEY",
    },
    ProviderDescriptor {
        id: "cohere",
        display_name: "Cohere",
        flavor: ApiFlavor::Cohere,
        supported_models: &["command", "command-light", "command-r"],
        default_base_url: "https://api.cohere.ai/v1",
        default_api_key: "",
        env_var: "COHERE_API_KEY",
    },
    ProviderDescriptor {
        id: "huggingface",
        display_name: "HuggingFace Inference",
        flavor: ApiFlavor::HfInference,
        supported_models: &[
            "google/flan-t5-xxl",
            "bigscience/bloom",
            "mistralai/Mistral-7B-Instruct-v0.2",
        ],
        default_base_url: "https://api-inference.huggingface.co",
        default_api_key: "",
        env_var: "HUGGINGFACE_API_KEY",
    },
    ProviderDescriptor {
        id: "openrouter",
        display_name: "OpenRouter",
        flavor: ApiFlavor::OpenAiChat,
        supported_models: &[
            "openrouter/auto",
            "google/gemini-2.0-flash-001",
            "anthropic/claude-3.5-sonnet",
        ],
        default_base_url: "https://openrouter.ai/api/v1",
        default_api_key: "",
        env_var: "OPENROUTER_API_KEY",
    },
];

/// Full catalog in registration order.
pub fn all() -> &'static [ProviderDescriptor] {
    PROVIDERS
}

/// Exact-match lookup on `id`. Case-sensitive, no fuzzy matching.
pub fn find(id: &str) -> Option<&'static ProviderDescriptor> {
    PROVIDERS.iter().find(|p| p.id == id)
}

/// Lookup that fails fast on an unknown id instead of substituting a default.
pub fn require(id: &str) -> Result<&'static ProviderDescriptor, FlowdeckError> {
    find(id).ok_or_else(|| FlowdeckError::UnknownProvider(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves_to_itself() {
        for descriptor in all() {
            let found = find(descriptor.id).unwrap();
            assert_eq!(found.id, descriptor.id);
        }
    }

    #[test]
    fn catalog_is_populated_and_usable() {
        assert!(!all().is_empty());
        for descriptor in all() {
            assert!(!descriptor.supported_models.is_empty());
            assert!(descriptor.default_base_url.starts_with("https://"));
        }
    }

    #[test]
    fn unknown_id_fails_instead_of_substituting() {
        assert!(find("nonexistent").is_none());
        match require("nonexistent") {
            Err(FlowdeckError::UnknownProvider(id)) => assert_eq!(id, "nonexistent"),
            other => panic!("expected UnknownProvider, got {:?}", other),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(find("OpenAI").is_none());
        assert!(find("openai").is_some());
    }
}
