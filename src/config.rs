use crate::cli::Args;
use crate::core::error::FlowdeckError;
use crate::providers::registry::{self, ProviderDescriptor};
use crate::providers::selection::SelectionState;
use std::env;
use std::path::PathBuf;

// Configuration is session-only: flags and environment variables feed the
// in-memory selection, and nothing (keys, base URLs, selection) is ever
// written back to disk. Only transcripts and input history land under the
// state directory, at the user's request.

fn state_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".flowdeck")
}

pub fn history_dir() -> PathBuf {
    state_dir().join("history")
}

pub fn input_history_path() -> PathBuf {
    state_dir().join("input_history.txt")
}

/// Key resolution order: the descriptor's environment variable, then its
/// (normally empty) template default.
pub fn api_key_from_env(descriptor: &ProviderDescriptor) -> Option<String> {
    env::var(descriptor.env_var).ok()
}

/// Applies `--provider`/`--model`/`--base-url`/`--api-key` to the session
/// selection. Unknown providers and unlisted models fail here, before any
/// prompt is accepted.
pub fn apply_initial_selection(
    args: &Args,
    selection: &mut SelectionState,
) -> Result<(), FlowdeckError> {
    let Some(provider_id) = args.provider.as_deref() else {
        if args.model.is_some() || args.base_url.is_some() || args.api_key.is_some() {
            return Err(FlowdeckError::Config(
                "--model, --base-url and --api-key require --provider".to_string(),
            ));
        }
        return Ok(());
    };

    let descriptor = registry::require(provider_id)?;
    let model = args
        .model
        .as_deref()
        .unwrap_or(descriptor.supported_models[0]);
    let api_key = args
        .api_key
        .clone()
        .or_else(|| api_key_from_env(descriptor));

    selection.select(descriptor, model, args.base_url.clone(), api_key)?;
    Ok(())
}
