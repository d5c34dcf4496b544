use crate::utils::error::{IntakeError, Result};
use serde_json::{Map, Value};
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that `value` holds between 1 and `max` characters.
pub fn validate_length(field_name: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    // SQLite's length() stops at the first NUL
    if value.contains('\0') {
        return Err(IntakeError::validation(field_name, "Value contains null bytes"));
    }
    if length == 0 {
        return Err(IntakeError::validation(field_name, "Value cannot be empty"));
    }
    if length > max {
        return Err(IntakeError::validation(
            field_name,
            format!("Value is {} characters long, maximum is {}", length, max),
        ));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(IntakeError::validation(field_name, "Value must be a number"));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IntakeError::validation(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(IntakeError::validation(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Field-by-field reader over an untyped JSON payload.
///
/// Each accessor reports a validation error naming the wire field, so a
/// payload with a wrong type is rejected the same way as one with an
/// out-of-bounds value.
pub struct PayloadReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a Value) -> Result<Self> {
        match payload.as_object() {
            Some(fields) => Ok(Self { fields }),
            None => Err(IntakeError::validation(
                "payload",
                "Payload must be a JSON object",
            )),
        }
    }

    fn required(&self, field_name: &str) -> Result<&'a Value> {
        match self.fields.get(field_name) {
            Some(Value::Null) | None => {
                Err(IntakeError::validation(field_name, "Field is required"))
            }
            Some(value) => Ok(value),
        }
    }

    pub fn string(&self, field_name: &str, max: usize) -> Result<String> {
        let value = self
            .required(field_name)?
            .as_str()
            .ok_or_else(|| IntakeError::validation(field_name, "Value must be a string"))?;
        validate_length(field_name, value, max)?;
        Ok(value.to_string())
    }

    pub fn number(&self, field_name: &str) -> Result<f64> {
        self.required(field_name)?
            .as_f64()
            .ok_or_else(|| IntakeError::validation(field_name, "Value must be a number"))
    }

    pub fn integer(&self, field_name: &str) -> Result<i64> {
        let value = self.required(field_name)?;
        if !value.is_number() {
            return Err(IntakeError::validation(field_name, "Value must be a number"));
        }
        if let Some(whole) = value.as_i64() {
            return Ok(whole);
        }

        // Float spellings such as 1000.0 or 1e3 are accepted when integral.
        match value.as_f64() {
            Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Ok(v as i64)
            }
            _ => Err(IntakeError::validation(
                field_name,
                "Value must be a whole number",
            )),
        }
    }

    /// Reads a string field and checks membership in a closed set.
    pub fn member<T>(&self, field_name: &str, supported: &[&str]) -> Result<T>
    where
        T: FromStr,
    {
        let raw = self.required(field_name)?;
        raw.as_str()
            .and_then(|value| value.parse::<T>().ok())
            .ok_or_else(|| {
                IntakeError::validation(
                    field_name,
                    format!(
                        "Unsupported value {}. Supported values: {}",
                        raw,
                        supported.join(", ")
                    ),
                )
            })
    }
}
