use serde::{Deserialize, Serialize};

/// A single published story as the backend serves it. The client never
/// edits one of these, it only creates and deletes whole records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub author_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Backend-formatted "%Y-%m-%d %H:%M:%S" timestamp, may be absent
    /// for legacy rows.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Username/password pair proving admin authorization. Sent as request
/// headers on every delete, never exchanged for a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}
