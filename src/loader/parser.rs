//! YAML parser for operation definitions
//!
//! Parses and validates operation YAML files.

use crate::error::{Error, Result};
use crate::loader::types::OperationDefinition;
use std::fs;
use std::path::Path;

/// Load an operation definition from a file path
pub fn load_operation(path: impl AsRef<Path>) -> Result<OperationDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read operation file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_operation_from_str(&content)
}

/// Load an operation definition from a YAML string
pub fn load_operation_from_str(yaml: &str) -> Result<OperationDefinition> {
    let def: OperationDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse operation YAML: {e}")))?;

    validate_operation(&def)?;
    Ok(def)
}

/// Validate an operation definition
fn validate_operation(def: &OperationDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Operation name cannot be empty"));
    }

    if def.base_url.is_empty() {
        return Err(Error::config(format!(
            "Operation '{}' base_url cannot be empty",
            def.name
        )));
    }
    url::Url::parse(&def.base_url)?;

    if def.items_path.is_empty() {
        return Err(Error::missing_field("items_path"));
    }

    if def.timeout_secs == 0 {
        return Err(Error::invalid_value("timeout_secs", "must be positive"));
    }

    let pagination = &def.pagination;
    if pagination.cursor_param.is_empty() {
        return Err(Error::missing_field("pagination.cursor_param"));
    }
    if pagination.cursor_path.is_empty() {
        return Err(Error::missing_field("pagination.cursor_path"));
    }
    if pagination.page_size_param.as_deref() == Some("") {
        return Err(Error::invalid_value(
            "pagination.page_size_param",
            "cannot be empty",
        ));
    }

    match pagination.max_page_size {
        Some(0) => {
            return Err(Error::invalid_value(
                "pagination.max_page_size",
                "must be positive",
            ));
        }
        Some(_) if pagination.page_size_param.is_none() => {
            return Err(Error::invalid_value(
                "pagination.max_page_size",
                "requires pagination.page_size_param",
            ));
        }
        _ => {}
    }

    if def.params.contains_key(&pagination.cursor_param) {
        return Err(Error::config(format!(
            "Operation '{}' must not set the cursor parameter '{}' in params",
            def.name, pagination.cursor_param
        )));
    }

    Ok(())
}
