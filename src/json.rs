use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::error::{DocumentError, Error, Result};

/// A JSON document stored as its original text.
///
/// The text is kept as it is and is not checked on construction. It is parsed
/// on demand, so an ill-formed document only fails when a field is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonValue {
    text: String,
}

impl JsonValue {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Converts any serializable value to its JSON text.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self {
            text: serde_json::to_string(value)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn parse(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Reads the numeric field `field` of a top level JSON object as an `i64`.
    ///
    /// Any JSON number is accepted, and so is a string holding one. Fractions
    /// are truncated toward zero and out of range values saturate, so `30.9`
    /// reads as `30`.
    pub fn integer_field(&self, field: &str) -> Result<i64> {
        let document = self.parse()?;
        let object = document.as_object().ok_or(DocumentError::NotAnObject)?;

        let value = object.get(field).ok_or_else(|| Error::MissingField {
            field: field.to_string(),
        })?;

        let number = match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(text) => parse_number(text.trim()),
            _ => None,
        };

        number.ok_or_else(|| {
            DocumentError::NotANumber {
                field: field.to_string(),
            }
            .into()
        })
    }
}

fn parse_number(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}

impl From<String> for JsonValue {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for JsonValue {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl Display for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::JsonValue;
    use crate::error::{DocumentError, Error};

    #[derive(Serialize)]
    struct Student {
        student_id: i64,
        age: i64,
    }

    #[test]
    fn keeps_text_unaltered() {
        let text = r#"{ "age" :  30 }"#;
        let value = JsonValue::new(text);
        assert_eq!(value.as_str(), text);
        assert_eq!(value.to_string(), text);
    }

    #[test]
    fn from_serializable() -> anyhow::Result<()> {
        let value = JsonValue::from_serializable(&Student {
            student_id: 7,
            age: 19,
        })?;
        assert_eq!(value.as_str(), r#"{"student_id":7,"age":19}"#);
        assert_eq!(value.integer_field("age")?, 19);
        Ok(())
    }

    #[test]
    fn integer_field_errors() {
        let missing = JsonValue::new(r#"{"name": "a"}"#);
        assert!(matches!(
            missing.integer_field("age"),
            Err(Error::MissingField { field }) if field == "age"
        ));

        let malformed = JsonValue::new("{age: ");
        assert!(matches!(
            malformed.integer_field("age"),
            Err(Error::MalformedDocument(DocumentError::Parse(_)))
        ));

        let text = JsonValue::new(r#"{"age": "thirty"}"#);
        assert!(matches!(
            text.integer_field("age"),
            Err(Error::MalformedDocument(DocumentError::NotANumber { .. }))
        ));

        let flag = JsonValue::new(r#"{"age": true}"#);
        assert!(matches!(
            flag.integer_field("age"),
            Err(Error::MalformedDocument(DocumentError::NotANumber { .. }))
        ));

        let array = JsonValue::new("[1, 2]");
        assert!(matches!(
            array.integer_field("age"),
            Err(Error::MalformedDocument(DocumentError::NotAnObject))
        ));
    }

    #[test]
    fn any_number_is_accepted() -> anyhow::Result<()> {
        assert_eq!(JsonValue::new(r#"{"age": 30.0}"#).integer_field("age")?, 30);
        assert_eq!(JsonValue::new(r#"{"age": 30.9}"#).integer_field("age")?, 30);
        assert_eq!(JsonValue::new(r#"{"age": -2.5}"#).integer_field("age")?, -2);
        assert_eq!(JsonValue::new(r#"{"age": 4e1}"#).integer_field("age")?, 40);
        assert_eq!(JsonValue::new(r#"{"age": "25"}"#).integer_field("age")?, 25);
        assert_eq!(JsonValue::new(r#"{"age": " 7.5 "}"#).integer_field("age")?, 7);
        assert_eq!(
            JsonValue::new(r#"{"age": 18446744073709551615}"#).integer_field("age")?,
            i64::MAX
        );
        Ok(())
    }

    #[test]
    fn negative_and_large_values() -> anyhow::Result<()> {
        assert_eq!(JsonValue::new(r#"{"age": -3}"#).integer_field("age")?, -3);
        assert_eq!(
            JsonValue::new(format!(r#"{{"age": {}}}"#, i64::MAX)).integer_field("age")?,
            i64::MAX
        );
        Ok(())
    }
}
