//! Backend-to-UI events.

use client_core::StoreOutcome;

pub enum UiEvent {
    Info(String),
    /// The worker could not start; no store requests will be served.
    BackendUnavailable(String),
    Store(StoreOutcome),
}

pub fn classify_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("missing store setting") {
        format!(
            "Store is not configured ({message}); set APPWRITE_PROJECT_ID, APPWRITE_DATABASE_ID and APPWRITE_COLLECTION_ID or pass --config."
        )
    } else if lower.contains("settings file") {
        format!("Settings file problem: {message}")
    } else if lower.contains("endpoint") {
        format!("Store endpoint is invalid: {message}")
    } else if lower.contains("runtime") {
        "Backend worker startup failure; verify local app environment and relaunch.".to_string()
    } else {
        format!("Backend unavailable: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::classify_startup_failure;

    #[test]
    fn points_at_env_vars_when_ids_are_missing() {
        let status = classify_startup_failure("missing store setting 'project_id'");
        assert!(status.starts_with("Store is not configured"));
        assert!(status.contains("APPWRITE_PROJECT_ID"));
    }

    #[test]
    fn reports_bad_endpoints() {
        let status =
            classify_startup_failure("invalid store endpoint 'nope': relative URL without a base");
        assert!(status.starts_with("Store endpoint is invalid"));
    }

    #[test]
    fn runtime_failures_get_generic_guidance() {
        assert_eq!(
            classify_startup_failure("failed to build backend runtime: out of threads"),
            "Backend worker startup failure; verify local app environment and relaunch."
        );
    }
}
