pub mod comment;
pub mod ids;
pub mod quizz;
pub mod user;
pub use comment::Comment;
pub use quizz::{LinkState, LinkTransition, Quizz};
pub use user::User;
