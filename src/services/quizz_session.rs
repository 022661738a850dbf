use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{Comment, Quizz},
        dto::SortOrder,
    },
    services::{
        identity::CurrentUserProvider,
        quizz_cache::{QuizzList, QuizzSubscription},
        quizz_store::QuizzStore,
    },
};

/// Binds a `QuizzStore` to the session's identity. Operations that act as a
/// user read it when called and fail with `Unauthenticated` when none is set.
#[derive(Clone)]
pub struct QuizzSession {
    store: Arc<QuizzStore>,
    identity: Arc<dyn CurrentUserProvider>,
}

impl QuizzSession {
    pub fn new(store: Arc<QuizzStore>, identity: Arc<dyn CurrentUserProvider>) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &Arc<QuizzStore> {
        &self.store
    }

    fn acting_user_id(&self) -> AppResult<String> {
        Ok(self.identity.require_user()?.id)
    }

    pub async fn subscribe(&self) -> QuizzSubscription {
        self.store.subscribe().await
    }

    pub async fn fetch_all(&self) -> AppResult<Option<QuizzList>> {
        self.store.fetch_all().await
    }

    pub async fn fetch_completed(&self) -> AppResult<Option<QuizzList>> {
        let user_id = self.acting_user_id()?;
        self.store.fetch_completed(&user_id).await
    }

    pub async fn fetch_by_popularity(&self, order: SortOrder) -> AppResult<Option<QuizzList>> {
        let user_id = self.acting_user_id()?;
        self.store.fetch_by_popularity(&user_id, order).await
    }

    pub async fn create(&self, name: &str, description: &str) -> AppResult<Option<Quizz>> {
        let user_id = self.acting_user_id()?;
        self.store.create(&user_id, name, description).await
    }

    pub async fn like(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let user_id = self.acting_user_id()?;
        self.store.like(&user_id, quizz).await
    }

    pub async fn unlike(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        self.store.unlike(quizz).await
    }

    pub async fn mark_done(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let user_id = self.acting_user_id()?;
        self.store.mark_done(&user_id, quizz).await
    }

    pub async fn undo_done(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        self.store.undo_done(quizz).await
    }

    pub async fn set_hidden(&self, quizz: &Quizz, hidden: bool) -> AppResult<Option<QuizzList>> {
        let user_id = self.acting_user_id()?;
        self.store.set_hidden(&user_id, quizz, hidden).await
    }

    pub async fn add_comment(&self, text: &str, quizz_id: &str) -> AppResult<Option<Comment>> {
        let user_id = self.acting_user_id()?;
        self.store.add_comment(&user_id, text, quizz_id).await
    }

    pub async fn delete(&self, quizz: &Quizz) -> AppResult<bool> {
        self.store.delete(quizz).await
    }
}
