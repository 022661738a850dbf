pub mod http_helpers;
pub mod identity;
pub mod quizz_cache;
pub mod quizz_session;
pub mod quizz_store;

pub use identity::{CurrentUserProvider, IdentityBinding};
pub use quizz_cache::{QuizzCache, QuizzList, QuizzSubscription};
pub use quizz_session::QuizzSession;
pub use quizz_store::QuizzStore;
