//! The backend's reply envelope.
//!
//! Every mutating endpoint answers `{ succeeded, errors, data }`. A reply
//! with `succeeded == false` carries human-readable messages in `errors`.

use serde::{Deserialize, Deserializer, Serialize};

/// Reply envelope returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub succeeded: bool,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,

    pub data: Option<T>,
}

/// `"errors": null` reads as no errors.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            succeeded: true,
            errors: Vec::new(),
            data: Some(data),
        }
    }

    /// A rejected envelope carrying the backend's messages.
    pub fn rejected(errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            succeeded: false,
            errors: errors.into_iter().map(Into::into).collect(),
            data: None,
        }
    }

    /// Split into the payload or the rejection messages.
    pub fn into_result(self) -> std::result::Result<Option<T>, Vec<String>> {
        if self.succeeded {
            Ok(self.data)
        } else {
            Err(self.errors)
        }
    }
}

/// Acknowledgement with no payload.
pub type Ack = Envelope<serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reply() {
        let raw = r#"{"succeeded": false, "errors": ["Role not found"]}"#;
        let reply: Ack = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.into_result(), Err(vec!["Role not found".to_string()]));
    }

    #[test]
    fn test_accepted_reply_without_data() {
        let raw = r#"{"succeeded": true}"#;
        let reply: Ack = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.into_result(), Ok(None));
    }

    #[test]
    fn test_data_payload() {
        let raw = r#"{"succeeded": true, "errors": [], "data": [1, 2]}"#;
        let reply: Envelope<Vec<i64>> = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.into_result(), Ok(Some(vec![1, 2])));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Token {
        access_token: String,
    }

    #[test]
    fn test_payload_without_default() {
        let raw = r#"{"succeeded": true, "data": {"accessToken": "abc"}}"#;
        let reply: Envelope<Token> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            reply.into_result(),
            Ok(Some(Token {
                access_token: "abc".into()
            }))
        );

        let raw = r#"{"succeeded": false, "errors": ["locked"]}"#;
        let reply: Envelope<Token> = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.into_result(), Err(vec!["locked".to_string()]));
    }

    #[test]
    fn test_null_errors() {
        let raw = r#"{"succeeded": true, "errors": null, "data": null}"#;
        let reply: Ack = serde_json::from_str(raw).unwrap();
        assert!(reply.errors.is_empty());
        assert_eq!(reply.into_result(), Ok(None));
    }
}
