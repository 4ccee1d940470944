//! JSON text value objects.
//!
//! `JsonDocument` guarantees syntactic validity; `JsonSchemaDocument` adds
//! structural validity as judged by an injected [`JsonSchemaValidator`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::ports::JsonSchemaValidator;

/// Syntactically valid JSON text (object, array or scalar).
///
/// Keeps the original text for write-back and the parsed value for
/// comparison. Two documents are equal when their parsed content is equal,
/// regardless of whitespace or key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonDocument {
    text: String,
    value: Value,
}

impl JsonDocument {
    /// Parse JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedJson` with the parser's message.
    pub fn parse(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let value = serde_json::from_str(&text)
            .map_err(|e| DomainError::malformed_json(e.to_string()))?;
        Ok(Self { text, value })
    }

    /// Build a document from an already-parsed value.
    pub fn from_value(value: Value) -> Self {
        Self {
            text: value.to_string(),
            value,
        }
    }

    /// The text the document was created from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for JsonDocument {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for JsonDocument {}

impl fmt::Display for JsonDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<String> for JsonDocument {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<JsonDocument> for String {
    fn from(doc: JsonDocument) -> String {
        doc.text
    }
}

/// A JSON document accepted as a structurally valid JSON Schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSchemaDocument(JsonDocument);

impl JsonSchemaDocument {
    /// Validate `document` as a schema.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchema` carrying the validator's message.
    pub fn new(
        document: JsonDocument,
        validator: &dyn JsonSchemaValidator,
    ) -> Result<Self, DomainError> {
        validator
            .validate_schema(&document)
            .map_err(DomainError::invalid_schema)?;
        Ok(Self(document))
    }

    pub fn document(&self) -> &JsonDocument {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_document(self) -> JsonDocument {
        self.0
    }
}

impl fmt::Display for JsonSchemaDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
