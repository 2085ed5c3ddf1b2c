//! User record as exposed over the API.

use serde::{Deserialize, Serialize};

/// A single user as returned by `GET /bo` and `GET /bo/{user_id}`.
///
/// Optional fields are omitted from the JSON entirely when unset; they are
/// never encoded as `null` or `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-generated identifier, hex encoded.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier assigned by the upstream system; the lookup key.
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl UserRecord {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = non_empty(Some(id.into()));
        self
    }

    pub fn with_external_user_id(mut self, external_user_id: impl Into<String>) -> Self {
        self.external_user_id = non_empty(Some(external_user_id.into()));
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = non_empty(Some(nickname.into()));
        self
    }
}

/// Collapse empty strings to `None` so they are omitted on the wire.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
