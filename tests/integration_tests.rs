use quizz_store::{
    app_state::AppState,
    config::{Config, Routes},
    models::domain::{LinkState, Quizz},
    services::IdentityBinding,
};

#[test]
fn test_quizz_backend_payload_round_trip() {
    let json = r#"[
        {
            "id": "a",
            "name": "Capitals",
            "description": "Europe",
            "ownerId": "user-1",
            "like": true,
            "likeId": null,
            "realise": false,
            "realiseId": 14,
            "cache": false,
            "comments": [
                { "id": 1, "text": "fun", "authorId": "user-2", "quizzId": "a" }
            ]
        },
        { "id": 2, "ownerId": 3 }
    ]"#;

    let quizzs: Vec<Quizz> = serde_json::from_str(json).expect("payload should deserialize");
    assert_eq!(quizzs.len(), 2);
    assert_eq!(quizzs[0].realise_state(), LinkState::Active("14".to_string()));
    assert_eq!(quizzs[0].comments[0].author_id, "user-2");
    assert_eq!(quizzs[1].id, "2");
    assert_eq!(quizzs[1].owner_id, "3");
    assert!(quizzs[1].comments.is_empty());

    let json_str = serde_json::to_string(&quizzs[0]).unwrap();
    let reparsed: Quizz = serde_json::from_str(&json_str).unwrap();
    assert_eq!(reparsed, quizzs[0]);
}

#[tokio::test]
async fn test_session_without_identity_is_unauthenticated() {
    let config = Config {
        backend_url: "http://localhost:8080/api/".to_string(),
        api_token: None,
        request_timeout_secs: 5,
        channel_capacity: 8,
        routes: Routes::default(),
    };
    let state = AppState::new(config).expect("explicit config should be valid");
    let (_sender, identity) = IdentityBinding::channel(None);
    let session = state.session(std::sync::Arc::new(identity));

    let err = session
        .create("Rivers", "")
        .await
        .expect_err("no user is signed in");
    assert_eq!(err.error_code(), "UNAUTHENTICATED");
    assert!(session.store().current().await.is_none());
}
