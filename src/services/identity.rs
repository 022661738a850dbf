use tokio::sync::watch;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
};

/// Source of the acting user, read synchronously at call time.
pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn require_user(&self) -> AppResult<User> {
        self.current_user().ok_or_else(|| {
            AppError::Unauthenticated("no authenticated user is available yet".to_string())
        })
    }
}

/// A fixed identity, for callers that already hold the user.
impl CurrentUserProvider for User {
    fn current_user(&self) -> Option<User> {
        Some(self.clone())
    }
}

/// Holds the latest value of the session's identity stream.
#[derive(Clone)]
pub struct IdentityBinding {
    receiver: watch::Receiver<Option<User>>,
}

impl IdentityBinding {
    pub fn new(receiver: watch::Receiver<Option<User>>) -> Self {
        Self { receiver }
    }

    /// Creates the identity stream. The session layer keeps the sender and
    /// publishes on sign-in, sign-out and account switches.
    pub fn channel(initial: Option<User>) -> (watch::Sender<Option<User>>, Self) {
        let (sender, receiver) = watch::channel(initial);
        (sender, Self::new(receiver))
    }

    /// Waits until a user is available.
    pub async fn wait_for_user(&mut self) -> AppResult<User> {
        let user = self
            .receiver
            .wait_for(|user| user.is_some())
            .await
            .map_err(|_| AppError::Unauthenticated("identity stream closed".to_string()))?
            .clone();
        user.ok_or_else(|| AppError::InternalError("identity vanished while reading".to_string()))
    }
}

impl CurrentUserProvider for IdentityBinding {
    fn current_user(&self) -> Option<User> {
        self.receiver.borrow().clone()
    }
}
