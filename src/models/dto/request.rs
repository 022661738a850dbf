use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizzRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 10000))]
    pub description: String,

    pub owner_id: String,
}

/// Body of both the like and the completion routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub quizz_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HideRequest {
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,

    pub quizz_id: String,

    pub user_id: String,
}
