use serde_json as json;
use thiserror::Error;

pub const BODY_FIELD: &str = "body";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("event is not a mapping, got {0}")]
    NotAMapping(&'static str),
    #[error("event has no `body` field")]
    MissingBody,
    #[error("event `body` is not a byte sequence: {0}")]
    InvalidBody(String),
    #[error("event is not valid json: {0}")]
    Json(#[from] json::Error),
}

/// An incoming event. Only the body is ever looked at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub body: Vec<u8>,
}

impl Event {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the loose mapping a bot host hands over.
    ///
    /// `body` is either a string, taken as its UTF-8 bytes, or an array of
    /// integers in `0..=255`. Any other key is ignored.
    pub fn from_value(value: &json::Value) -> Result<Self, InputError> {
        let map = value
            .as_object()
            .ok_or_else(|| InputError::NotAMapping(type_name(value)))?;

        let body = map.get(BODY_FIELD).ok_or(InputError::MissingBody)?;

        let body = match body {
            json::Value::String(text) => text.as_bytes().to_vec(),
            json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_u64()
                        .and_then(|byte| u8::try_from(byte).ok())
                        .ok_or_else(|| {
                            InputError::InvalidBody(format!(
                                "element {index} is {item}, expected an integer in 0..=255"
                            ))
                        })
                })
                .collect::<Result<Vec<u8>, _>>()?,
            other => {
                return Err(InputError::InvalidBody(format!(
                    "got {}",
                    type_name(other)
                )))
            }
        };

        Ok(Self { body })
    }

    pub fn from_json(input: impl AsRef<str>) -> Result<Self, InputError> {
        let value: json::Value = json::from_str(input.as_ref())?;
        Self::from_value(&value)
    }
}

fn type_name(value: &json::Value) -> &'static str {
    match value {
        json::Value::Null => "null",
        json::Value::Bool(_) => "a boolean",
        json::Value::Number(_) => "a number",
        json::Value::String(_) => "a string",
        json::Value::Array(_) => "an array",
        json::Value::Object(_) => "an object",
    }
}
