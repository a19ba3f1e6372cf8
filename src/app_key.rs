use std::{convert::TryFrom, str::FromStr};

const PARTS_SEPARATOR: char = '-';
const EVENT_PATH: &str = "/api/v0/event";

/// Deployment target encoded in the middle part of an app key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    Us,
    Eu,
    Dev,
    SelfHosted,
}

impl Region {
    /// Well-known base URL of the region. `None` for self-hosted, where the caller supplies it.
    pub(crate) fn base_url(self) -> Option<&'static str> {
        match self {
            Region::Us => Some("https://us.aptabase.com"),
            Region::Eu => Some("https://eu.aptabase.com"),
            Region::Dev => Some("http://localhost:3000"),
            Region::SelfHosted => None,
        }
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "US" => Ok(Region::Us),
            "EU" => Ok(Region::Eu),
            "DEV" => Ok(Region::Dev),
            "SH" => Ok(Region::SelfHosted),
            other => Err(ConfigError::UnknownRegion(other.to_string())),
        }
    }
}

/// Reasons an app key cannot be turned into an endpoint. Any of these disables tracking.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The app key does not have the `<prefix>-<region>-<suffix>` shape.
    #[error("invalid app key format; expected \"<prefix>-<region>-<suffix>\"")]
    InvalidFormat,
    /// The region part of the app key is not known.
    #[error("unknown region \"{0}\" in app key")]
    UnknownRegion(String),
    /// A self-hosted app key was given without a host.
    #[error("host parameter must be defined when using self-hosted app key")]
    MissingHost,
    /// The self-hosted host does not form a valid URI.
    #[error("invalid host: {0}")]
    InvalidHost(http::uri::InvalidUri),
}

/// A parsed application key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppKey {
    pub(crate) region: Region,
}

impl FromStr for AppKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(PARTS_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ConfigError::InvalidFormat);
        }

        Ok(AppKey {
            region: parts[1].parse()?,
        })
    }
}

/// Resolve the event ingestion endpoint for the given app key.
///
/// The self-hosted host is used verbatim as the base URL.
pub(crate) fn resolve(app_key: &str, host: Option<&str>) -> Result<http::Uri, ConfigError> {
    let key: AppKey = app_key.parse()?;
    let base_url = match key.region.base_url() {
        Some(base_url) => base_url,
        None => host
            .filter(|host| !host.is_empty())
            .ok_or(ConfigError::MissingHost)?,
    };

    http::Uri::try_from(format!("{}{}", base_url, EVENT_PATH)).map_err(ConfigError::InvalidHost)
}
