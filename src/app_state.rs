use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{HttpQuizzRepository, QuizzRepository},
    services::{CurrentUserProvider, QuizzSession, QuizzStore},
};

#[derive(Clone)]
pub struct AppState {
    pub quizz_store: Arc<QuizzStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let client = HttpQuizzRepository::build_client(&config)?;
        let repository: Arc<dyn QuizzRepository> =
            Arc::new(HttpQuizzRepository::new(client, &config));

        Ok(Self::with_repository(config, repository))
    }

    pub fn with_repository(config: Config, repository: Arc<dyn QuizzRepository>) -> Self {
        log::info!("Quizz store backed by {}", config.backend_url);
        let quizz_store = Arc::new(QuizzStore::new(repository, config.channel_capacity));

        Self {
            quizz_store,
            config: Arc::new(config),
        }
    }

    pub fn session(&self, identity: Arc<dyn CurrentUserProvider>) -> QuizzSession {
        QuizzSession::new(self.quizz_store.clone(), identity)
    }
}
