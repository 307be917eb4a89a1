//! Action scripts: recorded builder sessions as JSON.
//!
//! A script is either a bare array of actions or an object with an
//! `actions` array:
//!
//! ```json
//! [
//!   {"action": "drop", "payload": {"text": "heading"}},
//!   {"action": "apply", "values": {"text": "Welcome", "size": "h1"}},
//!   {"action": "save"}
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use pagecraft_core::{Action, BuilderState, Outcome};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Bare(Vec<Action>),
    Wrapped { actions: Vec<Action> },
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a valid script.
pub fn parse_script(json: &str) -> anyhow::Result<Vec<Action>> {
    let file: ScriptFile = serde_json::from_str(json).context("invalid action script")?;
    Ok(match file {
        ScriptFile::Bare(actions) | ScriptFile::Wrapped { actions } => actions,
    })
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Action>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&json).with_context(|| format!("in script {}", path.display()))
}

/// Dispatch every action in order, returning each outcome.
pub fn replay(state: &mut BuilderState, actions: Vec<Action>) -> Vec<Outcome> {
    actions
        .into_iter()
        .enumerate()
        .map(|(step, action)| {
            let outcome = state.dispatch(action);
            match &outcome {
                Outcome::Nothing => tracing::debug!(step, "action had no effect"),
                Outcome::Saved { notice, download } => {
                    tracing::info!(step, file = %download.file_name, "{notice}");
                }
                other => tracing::trace!(step, ?other, "dispatched"),
            }
            outcome
        })
        .collect()
}
