use std::{fs, io, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "expense_tracker.toml";
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Connection details for the hosted expense collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            project_id: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            api_key: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    endpoint: Option<String>,
    project_id: Option<String>,
    database_id: Option<String>,
    collection_id: Option<String>,
    api_key: Option<String>,
}

impl StoreSettings {
    /// Checks that every id is present and returns the parsed endpoint.
    pub fn validate(&self) -> Result<Url> {
        let endpoint = Url::parse(self.endpoint.trim())
            .with_context(|| format!("invalid store endpoint '{}'", self.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "store endpoint '{}' must use http or https",
                self.endpoint
            );
        }
        if endpoint.cannot_be_a_base() {
            bail!("store endpoint '{}' cannot carry a path", self.endpoint);
        }

        for (name, value) in [
            ("project_id", &self.project_id),
            ("database_id", &self.database_id),
            ("collection_id", &self.collection_id),
        ] {
            if value.trim().is_empty() {
                bail!("missing store setting '{name}'");
            }
        }

        Ok(endpoint)
    }

    fn merge_file(&mut self, file: SettingsFile) {
        if let Some(v) = file.endpoint {
            self.endpoint = v;
        }
        if let Some(v) = file.project_id {
            self.project_id = v;
        }
        if let Some(v) = file.database_id {
            self.database_id = v;
        }
        if let Some(v) = file.collection_id {
            self.collection_id = v;
        }
        if let Some(v) = file.api_key {
            self.api_key = Some(v);
        }
    }

    fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |names: [&str; 2]| names.into_iter().rev().find_map(&lookup);

        if let Some(v) = read(["APPWRITE_URL", "APP__APPWRITE_URL"]) {
            self.endpoint = v;
        }
        if let Some(v) = read(["APPWRITE_PROJECT_ID", "APP__APPWRITE_PROJECT_ID"]) {
            self.project_id = v;
        }
        if let Some(v) = read(["APPWRITE_DATABASE_ID", "APP__APPWRITE_DATABASE_ID"]) {
            self.database_id = v;
        }
        if let Some(v) = read(["APPWRITE_COLLECTION_ID", "APP__APPWRITE_COLLECTION_ID"]) {
            self.collection_id = v;
        }
        if let Some(v) = read(["APPWRITE_API_KEY", "APP__APPWRITE_API_KEY"]) {
            self.api_key = Some(v);
        }
    }
}

/// Loads settings from defaults, then the settings file, then the environment.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<StoreSettings> {
    load_settings_with(path, |name| {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    })
}

pub(crate) fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<StoreSettings> {
    let mut settings = StoreSettings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?,
        ),
        None => read_optional_file(Path::new(DEFAULT_SETTINGS_FILE))?,
    };
    if let Some(raw) = raw {
        let file: SettingsFile = toml::from_str(&raw).context("failed to parse settings file")?;
        settings.merge_file(file);
    }

    settings.merge_env(lookup);
    settings.validate()?;
    tracing::debug!(
        endpoint = %settings.endpoint,
        project = %settings.project_id,
        collection = %settings.collection_id,
        "loaded store settings"
    );
    Ok(settings)
}

/// Reads `path`, treating only a missing file as absent.
fn read_optional_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err)
            .with_context(|| format!("failed to read settings file '{}'", path.display())),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
