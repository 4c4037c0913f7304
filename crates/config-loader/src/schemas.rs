//! JSON schemas shipped with the binary, compiled at most once per process.

use jsonschema::{Draft, JSONSchema};
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::ConfigError;

pub const ACCESS_CONFIG: &str = "access";
pub const BUSINESS_ACCOUNT: &str = "business-account";

static ACCESS_CONFIG_COMPILED: OnceCell<JSONSchema> = OnceCell::new();
static BUSINESS_ACCOUNT_COMPILED: OnceCell<JSONSchema> = OnceCell::new();

/// Raw schema text for a known schema name.
pub fn source(name: &str) -> Option<&'static str> {
    match name {
        ACCESS_CONFIG => Some(include_str!("../schemas/access-config.v1.json")),
        BUSINESS_ACCOUNT => Some(include_str!("../schemas/business-account.v1.json")),
        _ => None,
    }
}

pub fn parsed(name: &str) -> Result<Value, ConfigError> {
    let raw = source(name).ok_or_else(|| ConfigError::SchemaNotFound {
        schema: name.to_string(),
    })?;
    serde_json::from_str(raw).map_err(|e| ConfigError::ParsingFailed {
        message: format!("schema {}: {}", name, e),
    })
}

pub fn compiled(name: &str) -> Result<&'static JSONSchema, ConfigError> {
    let cell = match name {
        ACCESS_CONFIG => &ACCESS_CONFIG_COMPILED,
        BUSINESS_ACCOUNT => &BUSINESS_ACCOUNT_COMPILED,
        _ => {
            return Err(ConfigError::SchemaNotFound {
                schema: name.to_string(),
            })
        }
    };
    cell.get_or_try_init(|| {
        let schema_value = parsed(name)?;
        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| ConfigError::SchemaCompilationFailed {
                message: e.to_string(),
            })
    })
}
