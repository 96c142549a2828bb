use crate::utils::error::{AuthzError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and as whom to call AWS Config. Unset values fall back to the
/// SDK's default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuthzError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AuthzError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ProviderSettings {
    /// Values set in `overrides` win.
    pub fn merge(self, overrides: ProviderSettings) -> Self {
        Self {
            region: overrides.region.or(self.region),
            profile: overrides.profile.or(self.profile),
            endpoint_url: overrides.endpoint_url.or(self.endpoint_url),
        }
    }
}

impl Validate for ProviderSettings {
    fn validate(&self) -> Result<()> {
        if let Some(region) = &self.region {
            validate_aws_region("provider.region", region)?;
        }
        if let Some(profile) = &self.profile {
            validate_non_empty_string("provider.profile", profile)?;
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            validate_url("provider.endpoint_url", endpoint_url)?;
        }
        Ok(())
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(AuthzError::Validation {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[provider]
region = "us-east-1"
profile = "audit"
endpoint_url = "http://localhost:4566"

[logging]
level = "debug"
json = true
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.provider.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.provider.profile.as_deref(), Some("audit"));
        assert_eq!(
            config.provider.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(config.logging.json, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert_eq!(config.provider, ProviderSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONFIG_AUTHZ_TEST_PROFILE", "ci");

        let toml_content = r#"
[provider]
profile = "${CONFIG_AUTHZ_TEST_PROFILE}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.provider.profile.as_deref(), Some("ci"));

        std::env::remove_var("CONFIG_AUTHZ_TEST_PROFILE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[provider]
endpoint_url = "invalid-url"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let bad_level = FileConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = FileConfig::from_toml_str("[provider\nregion = 1").unwrap_err();
        assert!(matches!(err, AuthzError::Config { .. }));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = ProviderSettings {
            region: Some("us-east-1".to_string()),
            profile: Some("audit".to_string()),
            endpoint_url: None,
        };
        let flags = ProviderSettings {
            region: Some("eu-west-1".to_string()),
            ..Default::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.region.as_deref(), Some("eu-west-1"));
        assert_eq!(merged.profile.as_deref(), Some("audit"));
        assert!(merged.endpoint_url.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\nregion = \"ap-southeast-2\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.provider.region.as_deref(), Some("ap-southeast-2"));
    }
}
