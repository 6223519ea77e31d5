use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const VALID_OUTPUT_FORMATS: [&str; 3] = ["json", "csv", "markdown"];

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 副檔名只能是字母或數字 (例如 `svelte`、`vue`)，不含前導的 `.`
pub fn validate_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for extension in extensions {
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: extension.clone(),
                reason: "Extension must be alphanumeric without a leading dot".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !VALID_OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    VALID_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
