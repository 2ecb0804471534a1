//! Text rendering of a caller's state, in the layout of the alert form.

use safeact_caller::CallState;
use serde::Serialize;

/// Renders `Data`, `Error`, `Is Running` and the revalidated routes.
pub fn render<O: Serialize>(state: &CallState<O>, revalidated: &[String]) -> serde_json::Result<String> {
    let data = serde_json::to_string(&state.data)?;
    let error = serde_json::to_string(&state.error.as_ref().map(ToString::to_string))?;
    let running = if state.is_running { "Yes" } else { "No" };
    let revalidated = if revalidated.is_empty() {
        "(none)".to_string()
    } else {
        revalidated.join(", ")
    };

    Ok(format!(
        "Data: {data}\nError: {error}\nIs Running: {running}\nRevalidated: {revalidated}"
    ))
}
