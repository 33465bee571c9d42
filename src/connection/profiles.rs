//! Endpoint Profiles
//!
//! Saved driver endpoints and their persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::connection::Endpoint;
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

/// A saved driver endpoint
#[derive(Debug, Default, Deserialize, Clone, Serialize, Eq, PartialEq)]
pub struct EndpointProfile {
    /// Unique identifier (UUID)
    pub id: String,
    /// Profile name (user-visible)
    pub name: String,
    /// Driver host
    pub host: String,
    /// Driver control port
    pub port: u16,
    /// Last update timestamp (RFC3339)
    pub updated_at: Option<String>,
}

/// TOML wrapper structure for the profile list
#[derive(Debug, Default, Deserialize, Clone, Serialize)]
pub(crate) struct EndpointProfiles {
    profiles: Vec<EndpointProfile>,
}

impl EndpointProfile {
    /// Create a new profile with a fresh id and current timestamp
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            host: host.into(),
            port,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// The endpoint this profile points at
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    /// Generate display name (e.g. "Desk (127.0.0.1:55472)")
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("{} ({}:{})", self.name, self.host, self.port)
        }
    }
}

/// Get or create the profile file path
fn get_profiles_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join("profiles.toml");

    #[cfg(debug_assertions)]
    info!("Profile file: {}", path.display());

    if !path.exists() {
        std::fs::write(&path, "")?;
    }

    Ok(path)
}

/// Load all endpoint profiles from the default location
pub fn get_profiles() -> Result<Vec<EndpointProfile>> {
    load_profiles_from(&get_profiles_path()?)
}

/// Load endpoint profiles from an explicit path
pub fn load_profiles_from(path: &Path) -> Result<Vec<EndpointProfile>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let value = std::fs::read_to_string(path)?;
    if value.trim().is_empty() {
        return Ok(vec![]);
    }

    let configs: EndpointProfiles = toml::from_str(&value)?;
    Ok(configs.profiles)
}

/// Save endpoint profiles to the default location
pub async fn save_profiles(profiles: Vec<EndpointProfile>) -> Result<()> {
    save_profiles_to(&get_profiles_path()?, profiles).await
}

/// Save endpoint profiles to an explicit path
pub async fn save_profiles_to(path: &Path, profiles: Vec<EndpointProfile>) -> Result<()> {
    let content = toml::to_string_pretty(&EndpointProfiles { profiles })?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Get a single profile by ID
pub fn get_profile_by_id(id: &str) -> Result<EndpointProfile> {
    let profiles = get_profiles()?;
    profiles
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| Error::Invalid {
            message: format!("Profile not found: {id}"),
        })
}
