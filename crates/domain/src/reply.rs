use serde_json::{Map, Value};

/// Reply shape shared by the backend and the gateway: `{success, error?, raw?, ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendReply {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure text, if any.
    pub error: Option<String>,
    /// Raw response excerpt kept for diagnostics.
    pub raw: Option<String>,
    fields: Map<String, Value>,
}

impl BackendReply {
    /// Local success for calls whose reply is never read.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Failure reply carrying an optional raw excerpt.
    #[must_use]
    pub fn failure(error: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            raw,
            fields: Map::new(),
        }
    }

    /// Interprets parsed JSON loosely: `success` counts when truthy, and any
    /// non-object value is an unexplained failure.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        let success = fields.remove("success").is_some_and(|value| is_truthy(&value));
        let error = fields.remove("error").and_then(text_of);
        let raw = fields.remove("raw").and_then(text_of);

        Self {
            success,
            error,
            raw,
            fields,
        }
    }

    /// Returns any other reply field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the request identifier assigned by the backend, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.field("requestId")
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the backend status text, if any.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.field("status").cloned().and_then(text_of)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
