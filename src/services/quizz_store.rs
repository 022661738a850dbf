use std::fmt;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Comment, LinkTransition, Quizz},
        dto::{CreateCommentRequest, CreateQuizzRequest, HideRequest, LinkRequest, SortOrder},
    },
    repositories::QuizzRepository,
    services::quizz_cache::{PatchOutcome, QuizzCache, QuizzList, QuizzSubscription},
};

/// Lifecycle of a single mutation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    SnapshotTaken,
    RequestInFlight,
    Applied,
    Ignored,
    Failed,
}

impl fmt::Display for OperationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationPhase::SnapshotTaken => "snapshot taken",
            OperationPhase::RequestInFlight => "request in flight",
            OperationPhase::Applied => "applied",
            OperationPhase::Ignored => "ignored (falsy response)",
            OperationPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct Trace {
    op: Uuid,
    name: &'static str,
}

impl Trace {
    fn start(name: &'static str) -> Self {
        Self {
            op: Uuid::new_v4(),
            name,
        }
    }

    fn phase(&self, phase: OperationPhase) {
        log::debug!("[{}] {}: {}", self.op, self.name, phase);
    }

    fn settle<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if let Err(err) = &result {
            self.phase(OperationPhase::Failed);
            log::warn!("[{}] {} failed: {}", self.op, self.name, err);
        }
        result
    }

    fn patched(&self, quizz_id: &str, outcome: PatchOutcome) -> QuizzList {
        match &outcome {
            PatchOutcome::Applied(_) => self.phase(OperationPhase::Applied),
            PatchOutcome::Missing(_) => log::warn!(
                "[{}] {}: quizz '{}' is not in the cache, nothing to patch",
                self.op,
                self.name,
                quizz_id
            ),
            PatchOutcome::Unset => log::warn!(
                "[{}] {}: cache is unset, nothing to patch",
                self.op,
                self.name
            ),
        }
        outcome.into_list()
    }
}

/// Client-side cache of quizzes kept in step with the backend.
///
/// Every operation is one request/response round trip. Concurrent calls are
/// not serialised: fetches replace the collection, patches are applied to
/// whatever collection is current when the response arrives, and `create` /
/// `delete` rebuild from the snapshot taken before their request.
pub struct QuizzStore {
    repository: Arc<dyn QuizzRepository>,
    cache: QuizzCache,
}

impl QuizzStore {
    pub fn new(repository: Arc<dyn QuizzRepository>, channel_capacity: usize) -> Self {
        Self {
            repository,
            cache: QuizzCache::new(channel_capacity),
        }
    }

    pub async fn subscribe(&self) -> QuizzSubscription {
        self.cache.subscribe().await
    }

    /// The last published collection, if any.
    pub async fn current(&self) -> Option<QuizzList> {
        self.cache.snapshot().await
    }

    /// Replaces the cache with the whole collection.
    ///
    /// Returns the published collection, or `None` when the backend answered
    /// with an empty or falsy body, in which case the cache is left as is.
    pub async fn fetch_all(&self) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("fetch_all");
        trace.phase(OperationPhase::RequestInFlight);
        let response = trace.settle(self.repository.list_all().await)?;
        Ok(self.replace(&trace, response, |quizzs| quizzs).await)
    }

    /// Replaces the cache with the user's completed quizzes, newest first.
    ///
    /// Emptiness is judged on the backend's answer, before filtering: a
    /// non-empty answer with nothing completed publishes an empty collection.
    pub async fn fetch_completed(&self, user_id: &str) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("fetch_completed");
        trace.phase(OperationPhase::RequestInFlight);
        let response = trace.settle(self.repository.list_recent_by_owner(user_id).await)?;
        Ok(self
            .replace(&trace, response, |quizzs| {
                quizzs.into_iter().filter(|q| q.realise).collect()
            })
            .await)
    }

    /// Replaces the cache with the user's quizzes ordered by like count.
    pub async fn fetch_by_popularity(
        &self,
        user_id: &str,
        order: SortOrder,
    ) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("fetch_by_popularity");
        trace.phase(OperationPhase::RequestInFlight);
        let response = trace.settle(self.repository.list_by_popularity(user_id, order).await)?;
        Ok(self.replace(&trace, response, |quizzs| quizzs).await)
    }

    /// Publishes `select(response)` when the response is truthy. `select` runs
    /// after the emptiness check, so its result is published even when empty.
    async fn replace<F>(
        &self,
        trace: &Trace,
        response: Option<Vec<Quizz>>,
        select: F,
    ) -> Option<QuizzList>
    where
        F: FnOnce(Vec<Quizz>) -> Vec<Quizz>,
    {
        match response {
            Some(quizzs) if !quizzs.is_empty() => {
                trace.phase(OperationPhase::Applied);
                Some(self.cache.publish(select(quizzs)).await)
            }
            _ => {
                trace.phase(OperationPhase::Ignored);
                None
            }
        }
    }

    /// Creates a quizz owned by `user_id` and prepends it to the collection
    /// as it was when the request was issued.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> AppResult<Option<Quizz>> {
        let trace = Trace::start("create");
        let request = CreateQuizzRequest {
            name: name.to_string(),
            description: description.to_string(),
            owner_id: user_id.to_string(),
        };
        request.validate()?;

        let snapshot = self.cache.snapshot().await;
        trace.phase(OperationPhase::SnapshotTaken);

        trace.phase(OperationPhase::RequestInFlight);
        let Some(created) = trace.settle(self.repository.create_quizz(&request).await)? else {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        };

        let mut next = Vec::with_capacity(snapshot.as_ref().map_or(0, |s| s.len()) + 1);
        next.push(created.clone());
        if let Some(snapshot) = snapshot {
            next.extend(snapshot.iter().cloned());
        }
        self.cache.publish(next).await;
        trace.phase(OperationPhase::Applied);

        log::info!("Created quizz '{}' for user '{}'", created.id, user_id);
        Ok(Some(created))
    }

    /// Likes `quizz`. Sets `like = false` and stores the new like id.
    pub async fn like(&self, user_id: &str, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("like");
        let request = LinkRequest {
            quizz_id: quizz.id.clone(),
            user_id: user_id.to_string(),
        };

        trace.phase(OperationPhase::RequestInFlight);
        let Some(record) = trace.settle(self.repository.create_like(&request).await)? else {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        };

        let outcome = self
            .cache
            .patch(&quizz.id, |q| q.apply_like(LinkTransition::Created(record.id)))
            .await;
        Ok(Some(trace.patched(&quizz.id, outcome)))
    }

    /// Removes the like record of `quizz`. Sets `like = true`; `like_id` keeps
    /// the id of the removed record.
    pub async fn unlike(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("unlike");
        let like_id = quizz.like_id.as_deref().ok_or_else(|| {
            AppError::ValidationError(format!("Quizz '{}' has no like to remove", quizz.id))
        })?;

        trace.phase(OperationPhase::RequestInFlight);
        if !trace.settle(self.repository.delete_like(like_id).await)? {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        }

        let outcome = self
            .cache
            .patch(&quizz.id, |q| q.apply_like(LinkTransition::Removed))
            .await;
        Ok(Some(trace.patched(&quizz.id, outcome)))
    }

    /// Marks `quizz` as done. Sets `realise = false` and stores the record id.
    pub async fn mark_done(&self, user_id: &str, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("mark_done");
        let request = LinkRequest {
            quizz_id: quizz.id.clone(),
            user_id: user_id.to_string(),
        };

        trace.phase(OperationPhase::RequestInFlight);
        let Some(record) = trace.settle(self.repository.create_completion(&request).await)? else {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        };

        let outcome = self
            .cache
            .patch(&quizz.id, |q| q.apply_realise(LinkTransition::Created(record.id)))
            .await;
        Ok(Some(trace.patched(&quizz.id, outcome)))
    }

    /// Removes the completion record of `quizz`. Sets `realise = true`;
    /// `realise_id` keeps the id of the removed record.
    pub async fn undo_done(&self, quizz: &Quizz) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("undo_done");
        let realise_id = quizz.realise_id.as_deref().ok_or_else(|| {
            AppError::ValidationError(format!("Quizz '{}' is not marked as done", quizz.id))
        })?;

        trace.phase(OperationPhase::RequestInFlight);
        if !trace.settle(self.repository.delete_completion(realise_id).await)? {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        }

        let outcome = self
            .cache
            .patch(&quizz.id, |q| q.apply_realise(LinkTransition::Removed))
            .await;
        Ok(Some(trace.patched(&quizz.id, outcome)))
    }

    /// Sends the hidden flag for `quizz`. `hidden` only shapes the request:
    /// once acknowledged the cached entry is always marked hidden.
    pub async fn set_hidden(
        &self,
        user_id: &str,
        quizz: &Quizz,
        hidden: bool,
    ) -> AppResult<Option<QuizzList>> {
        let trace = Trace::start("set_hidden");
        let request = HideRequest { hidden };

        trace.phase(OperationPhase::RequestInFlight);
        let acknowledged = trace.settle(
            self.repository
                .set_hidden(&quizz.id, user_id, &request)
                .await,
        )?;
        if !acknowledged {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        }

        let outcome = self.cache.patch(&quizz.id, |q| q.hidden = true).await;
        Ok(Some(trace.patched(&quizz.id, outcome)))
    }

    /// Posts a comment on `quizz_id` and publishes twice: first the collection
    /// with the comment appended to its quizz, then that collection with the
    /// comment echoed as a new leading entry (see `Quizz::from_comment_echo`).
    pub async fn add_comment(
        &self,
        user_id: &str,
        text: &str,
        quizz_id: &str,
    ) -> AppResult<Option<Comment>> {
        let trace = Trace::start("add_comment");
        let request = CreateCommentRequest {
            text: text.to_string(),
            quizz_id: quizz_id.to_string(),
            user_id: user_id.to_string(),
        };
        request.validate()?;

        trace.phase(OperationPhase::RequestInFlight);
        let Some(comment) = trace.settle(self.repository.create_comment(&request).await)? else {
            trace.phase(OperationPhase::Ignored);
            return Ok(None);
        };

        let appended = comment.clone();
        let outcome = self
            .cache
            .patch(quizz_id, move |q| q.comments.push(appended))
            .await;
        let first = trace.patched(quizz_id, outcome);

        let mut second = Vec::with_capacity(first.len() + 1);
        second.push(Quizz::from_comment_echo(&comment));
        second.extend(first.iter().cloned());
        self.cache.publish(second).await;

        Ok(Some(comment))
    }

    /// Deletes `quizz` and removes it from the snapshot taken before the
    /// request. Returns the backend's confirmation as is; the entry is removed
    /// whenever the request itself succeeded.
    pub async fn delete(&self, quizz: &Quizz) -> AppResult<bool> {
        let trace = Trace::start("delete");
        let snapshot = self.cache.snapshot().await;
        trace.phase(OperationPhase::SnapshotTaken);

        trace.phase(OperationPhase::RequestInFlight);
        let deleted = trace.settle(self.repository.delete_quizz(&quizz.id).await)?;

        let Some(snapshot) = snapshot else {
            log::warn!("[{}] delete: cache is unset, nothing to remove", trace.op);
            return Ok(deleted);
        };

        let mut next: Vec<Quizz> = snapshot.as_ref().clone();
        match next.iter().position(|q| q.id == quizz.id) {
            Some(index) => {
                next.remove(index);
            }
            None => log::warn!(
                "[{}] delete: quizz '{}' is not in the snapshot",
                trace.op,
                quizz.id
            ),
        }
        self.cache.publish(next).await;
        trace.phase(OperationPhase::Applied);

        log::info!("Deleted quizz '{}' (confirmed: {})", quizz.id, deleted);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dto::RecordId;
    use crate::repositories::MockQuizzRepository;
    use crate::test_utils::fixtures::{comment, completed_quizz, liked_quizz, quizz};
    use mockall::predicate::eq;

    fn store(mock: MockQuizzRepository) -> QuizzStore {
        QuizzStore::new(Arc::new(mock), 8)
    }

    async fn seeded(mock: MockQuizzRepository, quizzs: Vec<Quizz>) -> QuizzStore {
        let store = store(mock);
        store.cache.publish(quizzs).await;
        store
    }

    fn ids(list: &QuizzList) -> Vec<&str> {
        list.iter().map(|q| q.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_replaces_cache_in_response_order() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_all()
            .times(1)
            .returning(|| Ok(Some(vec![quizz("c"), quizz("a"), quizz("b")])));
        let store = seeded(mock, vec![quizz("old")]).await;

        let published = store.fetch_all().await.unwrap().expect("should publish");
        assert_eq!(ids(&published), vec!["c", "a", "b"]);
        assert_eq!(store.current().await.unwrap(), published);
    }

    #[tokio::test]
    async fn test_fetch_all_falsy_response_keeps_cache() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_all().times(1).returning(|| Ok(None));
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store.fetch_all().await.unwrap().is_none());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a"]);
    }

    #[tokio::test]
    async fn test_fetch_by_popularity_empty_response_keeps_cache() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_by_popularity()
            .with(eq("user-1"), eq(SortOrder::Desc))
            .times(1)
            .returning(|_, _| Ok(Some(Vec::new())));
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store
            .fetch_by_popularity("user-1", SortOrder::default())
            .await
            .unwrap()
            .is_none());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a"]);
    }

    #[tokio::test]
    async fn test_fetch_completed_keeps_only_realised() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_recent_by_owner()
            .with(eq("user-1"))
            .times(1)
            .returning(|_| {
                let mut y = quizz("y");
                y.realise = false;
                Ok(Some(vec![quizz("x"), y]))
            });
        let store = store(mock);

        let published = store.fetch_completed("user-1").await.unwrap().unwrap();
        assert_eq!(ids(&published), vec!["x"]);
        assert!(published[0].realise);
    }

    #[tokio::test]
    async fn test_fetch_completed_nothing_realised_publishes_empty() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_recent_by_owner()
            .with(eq("user-1"))
            .times(1)
            .returning(|_| {
                let mut y = quizz("y");
                y.realise = false;
                Ok(Some(vec![y]))
            });
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;
        let mut subscription = store.subscribe().await;
        subscription.try_next();

        let published = store.fetch_completed("user-1").await.unwrap().expect("should publish");
        assert!(published.is_empty());
        assert!(store.current().await.unwrap().is_empty());
        assert!(subscription.try_next().expect("one publication").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_completed_falsy_response_keeps_cache() {
        let mut mock = MockQuizzRepository::new();
        let mut answers = vec![Ok(Some(Vec::new())), Ok(None)];
        mock.expect_list_recent_by_owner()
            .times(2)
            .returning(move |_| answers.pop().unwrap_or(Ok(None)));
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;
        let mut subscription = store.subscribe().await;
        subscription.try_next();

        assert!(store.fetch_completed("user-1").await.unwrap().is_none());
        assert!(store.fetch_completed("user-1").await.unwrap().is_none());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a", "b"]);
        assert!(subscription.try_next().is_none());
    }

    #[tokio::test]
    async fn test_fetch_transport_error_propagates() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_list_all()
            .returning(|| Err(AppError::Transport("connection refused".into())));
        let store = seeded(mock, vec![quizz("a")]).await;

        let err = store.fetch_all().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a"]);
    }

    #[tokio::test]
    async fn test_create_prepends_and_returns_created() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_quizz()
            .withf(|r| r.name == "Rivers" && r.owner_id == "user-1")
            .times(1)
            .returning(|r| Ok(Some(Quizz::new("new", &r.name, &r.description, &r.owner_id))));
        let store = seeded(mock, vec![quizz("a")]).await;

        let created = store.create("user-1", "Rivers", "desc").await.unwrap().unwrap();
        assert_eq!(created.id, "new");
        assert_eq!(ids(&store.current().await.unwrap()), vec!["new", "a"]);
    }

    #[tokio::test]
    async fn test_create_falsy_response_leaves_cache() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_quizz().returning(|_| Ok(None));
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store.create("user-1", "Rivers", "").await.unwrap().is_none());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a"]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_without_request() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_quizz().never();
        let store = store(mock);

        let err = store.create("user-1", "", "desc").await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_like_sets_flag_and_record_id() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_like()
            .withf(|r| r.quizz_id == "a" && r.user_id == "user-1")
            .times(1)
            .returning(|_| Ok(Some(RecordId { id: "L1".to_string() })));
        let store = seeded(mock, vec![quizz("a")]).await;

        let list = store.like("user-1", &quizz("a")).await.unwrap().unwrap();
        assert!(!list[0].like);
        assert_eq!(list[0].like_id.as_deref(), Some("L1"));
    }

    #[tokio::test]
    async fn test_like_falsy_response_returns_none() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_like().returning(|_| Ok(None));
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store.like("user-1", &quizz("a")).await.unwrap().is_none());
        assert!(store.current().await.unwrap()[0].like);
    }

    #[tokio::test]
    async fn test_unlike_keeps_residual_like_id() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_like()
            .with(eq("L1"))
            .times(1)
            .returning(|_| Ok(true));
        let store = seeded(mock, vec![liked_quizz("a", "L1")]).await;

        let list = store.unlike(&liked_quizz("a", "L1")).await.unwrap().unwrap();
        assert!(list[0].like);
        assert_eq!(list[0].like_id.as_deref(), Some("L1"));
    }

    #[tokio::test]
    async fn test_unlike_without_like_id_is_rejected() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_like().never();
        let store = seeded(mock, vec![quizz("a")]).await;

        let err = store.unlike(&quizz("a")).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_mark_done_and_undo() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_completion()
            .times(1)
            .returning(|_| Ok(Some(RecordId { id: "R1".to_string() })));
        mock.expect_delete_completion()
            .with(eq("R1"))
            .times(1)
            .returning(|_| Ok(true));
        let store = seeded(mock, vec![quizz("a")]).await;

        let list = store.mark_done("user-1", &quizz("a")).await.unwrap().unwrap();
        assert!(!list[0].realise);
        assert_eq!(list[0].realise_id.as_deref(), Some("R1"));

        let list = store.undo_done(&completed_quizz("a", "R1")).await.unwrap().unwrap();
        assert!(list[0].realise);
        assert_eq!(list[0].realise_id.as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_set_hidden_false_still_marks_hidden() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_set_hidden()
            .withf(|quizz_id, user_id, request| {
                quizz_id == "a" && user_id == "user-1" && !request.hidden
            })
            .times(1)
            .returning(|_, _, _| Ok(true));
        let store = seeded(mock, vec![quizz("a")]).await;

        let list = store.set_hidden("user-1", &quizz("a"), false).await.unwrap().unwrap();
        assert!(list[0].hidden);
    }

    #[tokio::test]
    async fn test_set_hidden_unacknowledged_is_noop() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_set_hidden().returning(|_, _, _| Ok(false));
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store.set_hidden("user-1", &quizz("a"), true).await.unwrap().is_none());
        assert!(!store.current().await.unwrap()[0].hidden);
    }

    #[tokio::test]
    async fn test_add_comment_publishes_twice() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_create_comment()
            .withf(|r| r.text == "nice" && r.quizz_id == "a" && r.user_id == "user-1")
            .times(1)
            .returning(|_| Ok(Some(comment("c-1", "a", "nice"))));
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;
        let mut subscription = store.subscribe().await;
        subscription.try_next();

        let created = store.add_comment("user-1", "nice", "a").await.unwrap().unwrap();
        assert_eq!(created.id.as_deref(), Some("c-1"));

        let first = subscription.try_next().expect("first publication");
        assert_eq!(ids(&first), vec!["a", "b"]);
        assert_eq!(first[0].comments, vec![comment("c-1", "a", "nice")]);

        let second = subscription.try_next().expect("second publication");
        assert_eq!(ids(&second), vec!["c-1", "a", "b"]);
        assert_eq!(second[0].description, "nice");
        assert!(subscription.try_next().is_none());
    }

    #[tokio::test]
    async fn test_add_comment_echo_ids_are_not_unique() {
        let mut mock = MockQuizzRepository::new();
        let mut answers = vec![
            comment("b", "a", "same id as quizz b"),
            Comment { id: None, ..comment("", "a", "second") },
            Comment { id: None, ..comment("", "a", "first") },
        ];
        mock.expect_create_comment()
            .times(3)
            .returning(move |_| Ok(answers.pop()));
        mock.expect_set_hidden().times(1).returning(|_, _, _| Ok(true));
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;

        store.add_comment("user-1", "first", "a").await.unwrap();
        store.add_comment("user-1", "second", "a").await.unwrap();
        let current = store.current().await.unwrap();
        assert_eq!(ids(&current), vec!["", "", "a", "b"]);

        store.add_comment("user-1", "same id as quizz b", "a").await.unwrap();
        let current = store.current().await.unwrap();
        assert_eq!(ids(&current), vec!["b", "", "", "a", "b"]);
        assert_eq!(current[0].description, "same id as quizz b");
        assert_eq!(current[4].description, quizz("b").description);

        let hidden = store.set_hidden("user-1", &quizz("b"), true).await.unwrap().unwrap();
        assert!(hidden[0].hidden);
        assert!(!hidden[4].hidden);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_quizz()
            .with(eq("b"))
            .times(1)
            .returning(|_| Ok(true));
        let store = seeded(mock, vec![quizz("a"), quizz("b"), quizz("c")]).await;

        assert!(store.delete(&quizz("b")).await.unwrap());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_removes_even_when_not_confirmed() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_quizz().returning(|_| Ok(false));
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;

        assert!(!store.delete(&quizz("a")).await.unwrap());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["b"]);
    }

    #[tokio::test]
    async fn test_delete_absent_target_removes_nothing() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_quizz().returning(|_| Ok(true));
        let store = seeded(mock, vec![quizz("a"), quizz("b")]).await;

        store.delete(&quizz("zzz")).await.unwrap();
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_delete_transport_error_leaves_cache() {
        let mut mock = MockQuizzRepository::new();
        mock.expect_delete_quizz().returning(|_| {
            Err(AppError::HttpStatus {
                status: 500,
                message: "boom".into(),
            })
        });
        let store = seeded(mock, vec![quizz("a")]).await;

        assert!(store.delete(&quizz("a")).await.is_err());
        assert_eq!(ids(&store.current().await.unwrap()), vec!["a"]);
    }

    #[test]
    fn test_operation_phase_display() {
        assert_eq!(OperationPhase::RequestInFlight.to_string(), "request in flight");
        assert_eq!(OperationPhase::Failed.to_string(), "failed");
    }
}
