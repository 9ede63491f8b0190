use thiserror::Error;
use url::Url;

/// Feed used when the user has never configured one.
pub const DEFAULT_ENDPOINT: &str = "http://tednewardsandbox.site44.com/questions.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSettings {
    endpoint: String,
}

#[derive(Clone, Debug, Default)]
pub struct SourceSettingsDraft {
    pub endpoint: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

impl SourceSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
        }
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// A blank endpoint falls back to [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidEndpoint` if the endpoint is present but is not
    /// an absolute `http`/`https` URL.
    pub fn validate(self) -> Result<SourceSettings, SettingsError> {
        let Some(endpoint) = normalize_optional(self.endpoint) else {
            return Ok(SourceSettings::default());
        };

        let parsed =
            Url::parse(&endpoint).map_err(|_| SettingsError::InvalidEndpoint(endpoint.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidEndpoint(endpoint));
        }

        Ok(SourceSettings { endpoint })
    }
}

impl SourceSettings {
    /// Rehydrate settings from storage.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the stored endpoint is no longer a valid URL.
    pub fn from_persisted(endpoint: Option<String>) -> Result<Self, SettingsError> {
        SourceSettingsDraft { endpoint }.validate()
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.endpoint == DEFAULT_ENDPOINT
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
