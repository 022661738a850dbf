use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{ids, Comment};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quizz {
    #[serde(deserialize_with = "ids::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "ids::id")]
    pub owner_id: String,
    /// `true` while the current user can still like this quizz.
    #[serde(default)]
    pub like: bool,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub like_id: Option<String>,
    /// `true` while the current user can still mark this quizz as done.
    #[serde(default)]
    pub realise: bool,
    #[serde(default, deserialize_with = "ids::optional_id")]
    pub realise_id: Option<String>,
    #[serde(rename = "cache", default)]
    pub hidden: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The `{unset, active(id)}` view of a like or completion record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkState {
    Unset,
    Active(String),
}

/// Transitions applied to a link flag once the backend confirmed the request.
///
/// `Removed` flips the flag back but leaves the record id in place, so a
/// quizz that was liked then unliked still carries the old `like_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTransition {
    Created(String),
    Removed,
}

impl LinkTransition {
    fn apply(self, available: &mut bool, record_id: &mut Option<String>) {
        match self {
            LinkTransition::Created(id) => {
                *available = false;
                *record_id = Some(id);
            }
            LinkTransition::Removed => {
                *available = true;
            }
        }
    }
}

impl Quizz {
    pub fn new(id: &str, name: &str, description: &str, owner_id: &str) -> Self {
        Quizz {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            owner_id: owner_id.to_string(),
            like: true,
            like_id: None,
            realise: true,
            realise_id: None,
            hidden: false,
            comments: Vec::new(),
            like_count: None,
            created_at: None,
        }
    }

    /// Builds the entry the comment operation prepends to the collection after
    /// appending the comment to its quizz. A comment is not a quizz; this only
    /// carries the comment's id, text and author over.
    ///
    /// Echo ids are not unique: a comment without an id yields `""`, and a
    /// comment id may equal the id of a real quizz in the same collection.
    /// Later patches by id hit the first match.
    pub fn from_comment_echo(comment: &Comment) -> Self {
        let mut echo = Quizz::new(
            comment.id.as_deref().unwrap_or_default(),
            "",
            &comment.text,
            &comment.author_id,
        );
        echo.created_at = comment.created_at;
        echo
    }

    pub fn like_state(&self) -> LinkState {
        link_state(self.like, &self.like_id)
    }

    pub fn realise_state(&self) -> LinkState {
        link_state(self.realise, &self.realise_id)
    }

    pub fn apply_like(&mut self, transition: LinkTransition) {
        transition.apply(&mut self.like, &mut self.like_id);
    }

    pub fn apply_realise(&mut self, transition: LinkTransition) {
        transition.apply(&mut self.realise, &mut self.realise_id);
    }
}

fn link_state(available: bool, record_id: &Option<String>) -> LinkState {
    match (available, record_id) {
        (false, Some(id)) => LinkState::Active(id.clone()),
        _ => LinkState::Unset,
    }
}
