use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::{Config, Routes},
    errors::AppResult,
    models::{
        domain::{Comment, Quizz},
        dto::{
            CreateCommentRequest, CreateQuizzRequest, HideRequest, LinkRequest, RecordId,
            SortOrder,
        },
    },
    services::http_helpers::{acknowledged, parse_optional, read_body},
};

/// The backend as seen by the store: one call per route, no caching.
///
/// `Ok(None)` / `Ok(false)` mean the backend answered with an empty or falsy
/// body; errors are reserved for transport, status and decode failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizzRepository: Send + Sync {
    async fn list_all(&self) -> AppResult<Option<Vec<Quizz>>>;
    /// The owner's quizzes, newest first.
    async fn list_recent_by_owner(&self, owner_id: &str) -> AppResult<Option<Vec<Quizz>>>;
    async fn list_by_popularity(
        &self,
        owner_id: &str,
        order: SortOrder,
    ) -> AppResult<Option<Vec<Quizz>>>;
    async fn create_quizz(&self, request: &CreateQuizzRequest) -> AppResult<Option<Quizz>>;
    async fn create_like(&self, request: &LinkRequest) -> AppResult<Option<RecordId>>;
    async fn delete_like(&self, like_id: &str) -> AppResult<bool>;
    async fn create_completion(&self, request: &LinkRequest) -> AppResult<Option<RecordId>>;
    async fn delete_completion(&self, completion_id: &str) -> AppResult<bool>;
    async fn set_hidden(
        &self,
        quizz_id: &str,
        user_id: &str,
        request: &HideRequest,
    ) -> AppResult<bool>;
    async fn create_comment(&self, request: &CreateCommentRequest) -> AppResult<Option<Comment>>;
    async fn delete_quizz(&self, quizz_id: &str) -> AppResult<bool>;
}

pub struct HttpQuizzRepository {
    client: Client,
    base_url: String,
    routes: Routes,
    api_token: Option<SecretString>,
}

impl HttpQuizzRepository {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            routes: config.routes.clone(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn build_client(config: &Config) -> AppResult<Client> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(client)
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header("accept", "application/json");
        match &self.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send_for<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> AppResult<Option<T>> {
        let response = builder.send().await?;
        let body = read_body(response).await?;
        parse_optional(&body)
    }

    async fn send_for_ack(&self, builder: RequestBuilder) -> AppResult<bool> {
        let response = builder.send().await?;
        let body = read_body(response).await?;
        Ok(acknowledged(&body))
    }
}

#[async_trait]
impl QuizzRepository for HttpQuizzRepository {
    async fn list_all(&self) -> AppResult<Option<Vec<Quizz>>> {
        let url = self.url(&[self.routes.quizzes.as_str()]);
        self.send_for(self.request(Method::GET, url)).await
    }

    async fn list_recent_by_owner(&self, owner_id: &str) -> AppResult<Option<Vec<Quizz>>> {
        let url = self.url(&[self.routes.quizzes.as_str()]);
        let builder = self
            .request(Method::GET, url)
            .query(&[("owner", owner_id), ("order", "created_desc")]);
        self.send_for(builder).await
    }

    async fn list_by_popularity(
        &self,
        owner_id: &str,
        order: SortOrder,
    ) -> AppResult<Option<Vec<Quizz>>> {
        let url = self.url(&[self.routes.quizzes.as_str()]);
        let builder = self
            .request(Method::GET, url)
            .query(&[("owner", owner_id), ("sort", "likes"), ("order", order.as_str())]);
        self.send_for(builder).await
    }

    async fn create_quizz(&self, request: &CreateQuizzRequest) -> AppResult<Option<Quizz>> {
        let url = self.url(&[self.routes.quizzes.as_str()]);
        self.send_for(self.request(Method::POST, url).json(request)).await
    }

    async fn create_like(&self, request: &LinkRequest) -> AppResult<Option<RecordId>> {
        let url = self.url(&[self.routes.likes.as_str()]);
        self.send_for(self.request(Method::POST, url).json(request)).await
    }

    async fn delete_like(&self, like_id: &str) -> AppResult<bool> {
        let url = self.url(&[self.routes.likes.as_str(), like_id]);
        self.send_for_ack(self.request(Method::DELETE, url)).await
    }

    async fn create_completion(&self, request: &LinkRequest) -> AppResult<Option<RecordId>> {
        let url = self.url(&[self.routes.completions.as_str()]);
        self.send_for(self.request(Method::POST, url).json(request)).await
    }

    async fn delete_completion(&self, completion_id: &str) -> AppResult<bool> {
        let url = self.url(&[self.routes.completions.as_str(), completion_id]);
        self.send_for_ack(self.request(Method::DELETE, url)).await
    }

    async fn set_hidden(
        &self,
        quizz_id: &str,
        user_id: &str,
        request: &HideRequest,
    ) -> AppResult<bool> {
        let url = self.url(&[
            self.routes.quizzes.as_str(),
            quizz_id,
            self.routes.users.as_str(),
            user_id,
        ]);
        self.send_for_ack(self.request(Method::PUT, url).json(request)).await
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> AppResult<Option<Comment>> {
        let url = self.url(&[self.routes.comments.as_str()]);
        self.send_for(self.request(Method::POST, url).json(request)).await
    }

    async fn delete_quizz(&self, quizz_id: &str) -> AppResult<bool> {
        let url = self.url(&[self.routes.quizzes.as_str(), quizz_id]);
        self.send_for_ack(self.request(Method::DELETE, url)).await
    }
}
