use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::ids;

/// A comment attached to a quizz. Append-only; the backend assigns the order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(
        default,
        deserialize_with = "ids::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub text: String,
    #[serde(deserialize_with = "ids::id")]
    pub author_id: String,
    #[serde(deserialize_with = "ids::id")]
    pub quizz_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
