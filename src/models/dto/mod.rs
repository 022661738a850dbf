pub mod request;
pub mod response;

pub use request::{CreateCommentRequest, CreateQuizzRequest, HideRequest, LinkRequest};
pub use response::{RecordId, SortOrder};
