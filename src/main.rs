use std::sync::Arc;

use quizz_store::{
    app_state::AppState,
    config::Config,
    errors::{AppResult, ErrorResponse},
    models::domain::User,
    services::IdentityBinding,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        let body = ErrorResponse::from(&err);
        log::error!("{}", serde_json::to_string(&body).unwrap_or_else(|_| err.to_string()));
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let state = AppState::new(Config::from_env())?;

    let initial_user = std::env::var("QUIZZ_USER_ID").ok().map(|id| User::new(&id));
    let (_identity_sender, identity) = IdentityBinding::channel(initial_user);
    let session = state.session(Arc::new(identity));

    let mut subscription = session.subscribe().await;
    let watcher = tokio::spawn(async move {
        while let Some(quizzs) = subscription.next().await {
            log::info!("Cache now holds {} quizz(s)", quizzs.len());
        }
    });

    match session.fetch_all().await? {
        Some(quizzs) => {
            for quizz in quizzs.iter() {
                log::info!(
                    "{} | {} | liked: {} | done: {} | hidden: {} | {} comment(s)",
                    quizz.id,
                    quizz.name,
                    !quizz.like,
                    !quizz.realise,
                    quizz.hidden,
                    quizz.comments.len()
                );
            }
        }
        None => log::info!("Backend returned no quizzes"),
    }

    drop(session);
    drop(state);
    watcher.await.ok();
    Ok(())
}
