//! NetworkReasoner against a local stand-in for the Claude API.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use panel_core::config::ReasoningConfig;
use panel_core::persona::{Persona, PersonaStore};
use panel_core::reasoner::Reasoner;
use panel_core::survey::{Question, Verdict};
use panel_infrastructure::JsonPersonaStore;
use panel_interaction::{
    NetworkReasoner, ReasoningError, SIMULATED_CHOICE_REASONING, SIMULATED_SCALE_REASONING,
    SimulatedReasoner,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
struct FakeClaude {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

async fn messages(
    State(fake): State<FakeClaude>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.seen.lock().await.push((headers, body));
    (fake.status, Json(fake.reply.clone())).into_response()
}

fn text_reply(text: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}

/// Starts the fake server and returns its endpoint plus the request log.
async fn spawn_fake(
    status: StatusCode,
    reply: Value,
) -> (String, Arc<Mutex<Vec<(HeaderMap, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/messages", post(messages))
        .with_state(FakeClaude {
            status,
            reply,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1/messages"), seen)
}

fn reasoner_for(base_url: String) -> NetworkReasoner {
    let config = ReasoningConfig {
        api_key: Some("sk-test".to_string()),
        base_url,
        timeout_secs: 5,
        ..Default::default()
    };
    NetworkReasoner::from_config(&config, SimulatedReasoner::new(Some(11))).unwrap()
}

fn first_persona() -> Persona {
    JsonPersonaStore::bundled().unwrap().all()[0].clone()
}

#[tokio::test]
async fn test_scale_answer_comes_from_service() {
    let (url, seen) = spawn_fake(
        StatusCode::OK,
        text_reply("{\"score\": 8, \"reasoning\": \"Зручно для мене\"}"),
    )
    .await;
    let reasoner = reasoner_for(url);
    let persona = first_persona();

    let answer = reasoner
        .ask(&persona, &Question::scale("Підписка на олію"))
        .await;

    assert_eq!(answer.persona_id, persona.id);
    assert_eq!(
        answer.verdict,
        Verdict::Scale {
            score: 8,
            reasoning: "Зручно для мене".to_string()
        }
    );

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (headers, body) = &seen[0];
    assert_eq!(headers["x-api-key"], "sk-test");
    assert_eq!(headers["anthropic-version"], "2023-06-01");
    assert_eq!(body["max_tokens"], 150);
    assert_eq!(body["model"], "claude-sonnet-4-20250514");
    assert!(
        body["system"]
            .as_str()
            .unwrap()
            .contains(&format!("Ти — {}", persona.name))
    );
    assert!(
        body["messages"][0]["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Питання: Підписка на олію")
    );
}

#[tokio::test]
async fn test_choice_answer_with_surrounding_prose() {
    let (url, _) = spawn_fake(
        StatusCode::OK,
        text_reply("Я б обрала так: {\"choice\": 2, \"reasoning\": \"Дешевше\"}."),
    )
    .await;
    let reasoner = reasoner_for(url);
    let question = Question::choice(
        "Який формат?",
        vec!["Олія".to_string(), "Жуйки".to_string()],
    );

    let answer = reasoner.ask(&first_persona(), &question).await;
    assert_eq!(
        answer.verdict,
        Verdict::Choice {
            choice: 2,
            choice_text: Some("Жуйки".to_string()),
            reasoning: "Дешевше".to_string()
        }
    );
}

#[tokio::test]
async fn test_out_of_range_score_falls_back() {
    let (url, _) = spawn_fake(StatusCode::OK, text_reply("{\"score\": 42}")).await;
    let reasoner = reasoner_for(url);

    let answer = reasoner
        .ask(&first_persona(), &Question::scale("Олія"))
        .await;
    assert_eq!(answer.reasoning(), SIMULATED_SCALE_REASONING);
    assert!((1..=10).contains(&answer.score().unwrap()));
}

#[tokio::test]
async fn test_service_error_falls_back() {
    let (url, _) = spawn_fake(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"type": "error", "error": {"type": "api_error", "message": "overloaded"}}),
    )
    .await;
    let reasoner = reasoner_for(url);
    let persona = first_persona();
    let question = Question::choice("?", vec!["A".to_string(), "B".to_string()]);

    match reasoner.try_ask(&persona, &question).await {
        Err(ReasoningError::Service { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected result {other:?}"),
    }

    let answer = reasoner.ask(&persona, &question).await;
    assert_eq!(answer.reasoning(), SIMULATED_CHOICE_REASONING);
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let reasoner = reasoner_for(format!("http://{addr}/v1/messages"));
    let persona = first_persona();

    let answer = reasoner.ask(&persona, &Question::scale("Олія")).await;
    assert_eq!(answer.persona_id, persona.id);
    assert_eq!(answer.reasoning(), SIMULATED_SCALE_REASONING);
}
