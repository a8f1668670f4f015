use crate::error::{Error, Result};
use crate::url::Endpoint;
use ini::{Ini, Properties};
use std::path::Path;

pub const DEFAULT_PROFILE_PATH: &str = "~/.capitol";
pub const DEFAULT_PROFILE_SECTION: &str = "default";

/// Environment variable consulted before the profile's key.
pub const API_KEY_ENV: &str = "GOV_API_KEY";

/// Public rate-limited token the API accepts when no key is configured.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

pub const DEFAULT_HOST: &str = "https://api.congress.gov";

const INI_HOST: &str = "host";
const INI_API_KEY: &str = "api_key";

/// One section of the profile file. Both keys are optional; a missing file or
/// section simply yields no profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    host: Option<String>,
    api_key: Option<String>,
}

impl Profile {
    pub fn host(&self) -> Option<&String> {
        self.host.as_ref()
    }

    pub fn api_key(&self) -> Option<&String> {
        self.api_key.as_ref()
    }

    pub fn load(file_path: &str, section: &str) -> Result<Option<Profile>> {
        let extended_path = shellexpand::tilde(file_path).to_string();
        if !Path::new(&extended_path).exists() {
            return Ok(None);
        }
        let ini = Ini::load_from_file(&extended_path)
            .map_err(|e| Error::InvalidConfig(format!("unreadable profile file: {e}")))?;
        let section = match ini.section(Some(section)) {
            Some(s) => s,
            None => return Ok(None),
        };

        fn try_get(section: &Properties, key: &str) -> Option<String> {
            section.get(key).map(|s| s.to_string())
        }

        Ok(Some(Profile {
            host: try_get(section, INI_HOST),
            api_key: try_get(section, INI_API_KEY),
        }))
    }
}

/// Resolved connection settings injected into the request builder and client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    endpoint: Endpoint,
    api_key: String,
}

impl ApiConfig {
    pub fn new(endpoint: Endpoint, api_key: String) -> Self {
        ApiConfig { endpoint, api_key }
    }

    /// Key precedence: environment, then profile, then the demo token.
    /// Host precedence: profile, then the public API host.
    pub fn resolve(profile: Option<&Profile>, env_api_key: Option<String>) -> Result<ApiConfig> {
        let host = profile
            .and_then(|p| p.host().cloned())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let endpoint = host.parse::<Endpoint>()?;

        let api_key = env_api_key
            .filter(|k| !k.is_empty())
            .or_else(|| profile.and_then(|p| p.api_key().cloned()))
            .unwrap_or_else(|| DEMO_API_KEY.to_string());

        Ok(ApiConfig { endpoint, api_key })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
