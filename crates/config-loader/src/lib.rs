use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

pub mod schemas;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Schema not found: {schema}")]
    SchemaNotFound { schema: String },

    #[error("Config file not found: {path}")]
    ConfigFileNotFound { path: String },

    #[error("Schema compilation failed: {message}")]
    SchemaCompilationFailed { message: String },

    #[error("Validation failed with {} error(s)", .errors.len())]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Parsing failed: {message}")]
    ParsingFailed { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub json_pointer: String,
    pub message: String,
    pub schema_path: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.json_pointer.is_empty() {
            "/"
        } else {
            self.json_pointer.as_str()
        };
        write!(f, "{}: {}", at, self.message)
    }
}

/// Loads schema-validated documents: named config files from the config
/// directory, and arbitrary JSON/YAML documents such as account snapshots.
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_dir: Self::find_config_dir(),
        }
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    fn find_config_dir() -> PathBuf {
        if let Ok(config_dir) = std::env::var("WASHBAY_CONFIG_DIR") {
            PathBuf::from(config_dir)
        } else {
            PathBuf::from(".washbay/config")
        }
    }

    /// Load `<config_dir>/<name>.json`, falling back to the schema's defaults
    /// when the file does not exist.
    #[instrument(skip(self))]
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        debug!("Loading config: {}", name);
        let config_value = self.load_config_file(name)?;
        self.validate_value(name, &config_value)?;
        from_value(config_value)
    }

    /// Load a JSON or YAML document from `path` and validate it against `schema`.
    #[instrument(skip(self))]
    pub fn load_document<T: DeserializeOwned>(
        &self,
        schema: &str,
        path: &Path,
    ) -> Result<T, ConfigError> {
        let value = read_document(path)?;
        self.validate_value(schema, &value)?;
        from_value(value)
    }

    /// Load a JSON or YAML document without schema validation. Callers that
    /// want richer diagnostics run [`ConfigManager::validate_file`] first.
    pub fn parse_document<T: DeserializeOwned>(&self, path: &Path) -> Result<T, ConfigError> {
        from_value(read_document(path)?)
    }

    #[instrument(skip(self))]
    pub fn validate_file(&self, schema: &str, path: &Path) -> Result<Value, ConfigError> {
        debug!("Validating {:?} against schema {}", path, schema);
        let value = read_document(path)?;
        self.validate_value(schema, &value)?;
        Ok(value)
    }

    pub fn validate_value(&self, schema: &str, value: &Value) -> Result<(), ConfigError> {
        let compiled = schemas::compiled(schema)?;

        if let Err(errors) = compiled.validate(value) {
            let validation_errors: Vec<ValidationError> = errors
                .map(|error| ValidationError {
                    json_pointer: error.instance_path.to_string(),
                    message: error.to_string(),
                    schema_path: error.schema_path.to_string(),
                })
                .collect();

            return Err(ConfigError::ValidationFailed {
                errors: validation_errors,
            });
        }

        Ok(())
    }

    fn load_config_file(&self, name: &str) -> Result<Value, ConfigError> {
        let config_path = self.config_dir.join(format!("{}.json", name));

        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            debug!("Config file not found, loading defaults from schema");
            return self.load_default_config(name);
        }

        read_document(&config_path)
    }

    fn load_default_config(&self, name: &str) -> Result<Value, ConfigError> {
        let schema_value = schemas::parsed(name)?;

        let mut default_config = serde_json::Map::new();

        if let Some(properties) = schema_value.get("properties").and_then(|p| p.as_object()) {
            for (key, property) in properties {
                if let Some(default_value) = property.get("default") {
                    default_config.insert(key.clone(), default_value.clone());
                }
            }
        }

        let default_config_value = Value::Object(default_config);
        debug!("Loaded default config: {}", default_config_value);
        Ok(default_config_value)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_document(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigFileNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
            message: e.to_string(),
        })
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::ParsingFailed {
        message: e.to_string(),
    })
}
