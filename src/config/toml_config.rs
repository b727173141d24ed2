use crate::core::ConfigProvider;
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_CONFIG_FILE: &str = "quote-desk.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub business: BusinessConfig,
    pub storage: StorageConfig,
    pub messaging: MessagingConfig,
    pub allocation: AllocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "P&S REFRIGERAÇÃO".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub base_url: String,
    pub country_code: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            country_code: "55".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub max_attempts: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

fn env_var_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r"\$\{([^}]+)\}").expect("environment placeholder pattern is valid")
    })
}

impl AppConfig {
    /// Loads a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("business.name", &self.business.name)?;
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_url("messaging.base_url", &self.messaging.base_url)?;
        validation::validate_digits("messaging.country_code", &self.messaging.country_code)?;
        validation::validate_positive_number(
            "allocation.max_attempts",
            self.allocation.max_attempts,
            1,
        )?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn business_name(&self) -> &str {
        &self.business.name
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn messaging_base_url(&self) -> &str {
        &self.messaging.base_url
    }

    fn country_code(&self) -> &str {
        &self.messaging.country_code
    }

    fn max_attempts(&self) -> usize {
        self.allocation.max_attempts
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
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
[business]
name = "Frio Bom"

[storage]
backend = "csv"
data_dir = "/var/lib/quotes"

[messaging]
base_url = "https://api.whatsapp.com/send"
country_code = "351"

[allocation]
max_attempts = 5
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.business_name(), "Frio Bom");
        assert_eq!(config.storage.backend, StoreBackend::Csv);
        assert_eq!(config.data_dir(), "/var/lib/quotes");
        assert_eq!(config.country_code(), "351");
        assert_eq!(config.max_attempts(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("[storage]\nbackend = \"json\"\n").unwrap();
        assert_eq!(config.business_name(), "P&S REFRIGERAÇÃO");
        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.messaging_base_url(), "https://wa.me");
        assert_eq!(config.max_attempts(), 3);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUOTE_DESK_TEST_DATA_DIR", "/tmp/quote-desk-test");

        let toml_content = r#"
[storage]
data_dir = "${QUOTE_DESK_TEST_DATA_DIR}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/tmp/quote-desk-test");

        std::env::remove_var("QUOTE_DESK_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            "[messaging]\nbase_url = \"wa.me\"\n",
            "[messaging]\ncountry_code = \"+55\"\n",
            "[allocation]\nmax_attempts = 0\n",
            "[business]\nname = \"  \"\n",
        ];
        for content in invalid {
            let config = AppConfig::from_toml_str(content).unwrap();
            assert!(config.validate().is_err(), "expected invalid: {}", content);
        }
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let err = AppConfig::from_toml_str("[storage]\nbackend = \"sheets\"\n").unwrap_err();
        assert!(matches!(err, QuoteError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[business]\nname = \"Arquivo\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.business_name(), "Arquivo");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file_or_default("/nonexistent/quote-desk.toml").unwrap();
        assert_eq!(config.max_attempts(), 3);
        assert!(AppConfig::from_file("/nonexistent/quote-desk.toml").is_err());
    }
}
