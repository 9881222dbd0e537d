//! HTTP store against an in-process axum backend speaking the panel's wire
//! format: legacy mention field names, `type`-tagged questions, `{"message"}`
//! error envelopes.

mod common;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use panel_sync::{
    ChannelName, HttpSettingsStore, MentionGuardSettings, QuestionKind, ResponseKind,
    SettingsStore, SpecialUserReplies, SyncConfig, SyncError, TriviaQuestion,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Backend {
    mention: Mutex<Option<Value>>,
    responses: Mutex<HashMap<String, Value>>,
    questions: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    channels: Mutex<Vec<String>>,
    special: Mutex<Vec<(String, Vec<String>)>>,
}

async fn get_mention(State(state): State<Arc<Backend>>) -> Result<Json<Value>, StatusCode> {
    state
        .mention
        .lock()
        .clone()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn put_mention(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> StatusCode {
    *state.mention.lock() = Some(body);
    StatusCode::NO_CONTENT
}

async fn get_responses(
    State(state): State<Arc<Backend>>,
    Path(kind): Path<String>,
) -> Json<Value> {
    Json(
        state
            .responses
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| json!([])),
    )
}

async fn put_responses(
    State(state): State<Arc<Backend>>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.responses.lock().insert(kind, body);
    StatusCode::NO_CONTENT
}

async fn get_questions(State(state): State<Arc<Backend>>) -> Json<Value> {
    Json(Value::Array(state.questions.lock().clone()))
}

async fn post_question(
    State(state): State<Arc<Backend>>,
    Json(mut body): Json<Value>,
) -> Json<Value> {
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    state.questions.lock().push(body.clone());
    Json(body)
}

async fn put_question(
    State(state): State<Arc<Backend>>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    body["id"] = json!(id);
    let mut questions = state.questions.lock();
    match questions.iter_mut().find(|q| q["id"] == json!(id)) {
        Some(slot) => {
            *slot = body.clone();
            Ok(Json(body))
        }
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("question {id} not found")})),
        )),
    }
}

async fn delete_question(
    State(state): State<Arc<Backend>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut questions = state.questions.lock();
    let before = questions.len();
    questions.retain(|q| q["id"] != json!(id));
    if questions.len() == before {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("question {id} not found")})),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn import_questions(
    State(state): State<Arc<Backend>>,
    Json(body): Json<Vec<Value>>,
) -> StatusCode {
    let numbered = body
        .into_iter()
        .map(|mut q| {
            q["id"] = json!(state.next_id.fetch_add(1, Ordering::SeqCst));
            q
        })
        .collect();
    *state.questions.lock() = numbered;
    StatusCode::NO_CONTENT
}

async fn get_channels(State(state): State<Arc<Backend>>) -> Json<Value> {
    Json(json!(state.channels.lock().clone()))
}

async fn post_channel(
    State(state): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let mut channels = state.channels.lock();
    if channels.contains(&name) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({"message": format!("channel '{name}' already exists")})),
        ));
    }
    channels.push(name);
    Ok(StatusCode::CREATED)
}

async fn delete_channel(
    State(state): State<Arc<Backend>>,
    Path(name): Path<String>,
) -> StatusCode {
    let mut channels = state.channels.lock();
    let before = channels.len();
    channels.retain(|channel| *channel != name);
    if channels.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn get_special(State(state): State<Arc<Backend>>) -> Json<Value> {
    let entries: Vec<Value> = state
        .special
        .lock()
        .iter()
        .map(|(username, replies)| json!({"username": username, "replies": replies}))
        .collect();
    Json(Value::Array(entries))
}

async fn put_special(
    State(state): State<Arc<Backend>>,
    Path(user): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    let replies: Vec<String> = body["replies"]
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    let mut entries = state.special.lock();
    match entries.iter_mut().find(|(username, _)| *username == user) {
        Some((_, existing)) => *existing = replies,
        None => entries.push((user, replies)),
    }
    StatusCode::NO_CONTENT
}

async fn delete_special(State(state): State<Arc<Backend>>, Path(user): Path<String>) -> StatusCode {
    let mut entries = state.special.lock();
    let before = entries.len();
    entries.retain(|(username, _)| *username != user);
    if entries.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn cleanup_special(State(state): State<Arc<Backend>>) -> Json<Value> {
    let mut entries = state.special.lock();
    let before = entries.len();
    entries.retain(|(_, replies)| replies.iter().any(|reply| !reply.trim().is_empty()));
    Json(json!({"removed": before - entries.len()}))
}

async fn start_backend() -> (SocketAddr, Arc<Backend>) {
    common::init_tracing();
    let state = Arc::new(Backend {
        next_id: AtomicI64::new(1),
        ..Backend::default()
    });
    let app = Router::new()
        .route("/api/settings/mention", get(get_mention).put(put_mention))
        .route("/api/responses/{kind}", get(get_responses).put(put_responses))
        .route("/api/questions", get(get_questions).post(post_question))
        .route("/api/questions/{id}", put(put_question).delete(delete_question))
        .route("/api/questions/import", post(import_questions))
        .route("/api/channels", get(get_channels).post(post_channel))
        .route("/api/channels/{name}", delete(delete_channel))
        .route("/api/special", get(get_special))
        .route("/api/special/cleanup", post(cleanup_special))
        .route("/api/special/{user}", put(put_special).delete(delete_special))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

async fn start_store() -> (HttpSettingsStore, Arc<Backend>) {
    let (addr, state) = start_backend().await;
    let config = SyncConfig {
        base_url: format!("http://{addr}"),
        ..SyncConfig::default()
    };
    (HttpSettingsStore::new(&config).unwrap(), state)
}

#[tokio::test]
async fn mention_missing_on_remote_reads_as_none() {
    let (store, _) = start_store().await;

    assert_eq!(store.fetch_mention().await.unwrap(), None);
}

#[tokio::test]
async fn mention_round_trips_through_legacy_field_names() {
    let (store, state) = start_store().await;
    let settings = MentionGuardSettings {
        limit: 4,
        warn_message: "توقف".into(),
        timeout_message: "تم الإيقاف".into(),
        timeout_duration_seconds: 90,
        cooldown_seconds: 45,
        daily_cooldown_enabled: false,
    };

    store.replace_mention(&settings).await.unwrap();

    let wire = state.mention.lock().clone().unwrap();
    assert_eq!(wire["warn_msg"], json!("توقف"));
    assert_eq!(wire["timeout_msg"], json!("تم الإيقاف"));
    assert_eq!(wire["duration"], json!(90));
    assert_eq!(wire["cooldown"], json!(45));
    assert_eq!(wire["daily_cooldown"], json!(false));

    let fetched = store.fetch_mention().await.unwrap();
    assert_eq!(fetched, Some(settings));
}

#[tokio::test]
async fn responses_round_trip() {
    let (store, _) = start_store().await;
    let kind = ResponseKind::new("team_win_responses").unwrap();
    let lines = vec!["برافو يا فريق".to_string(), "عاش".to_string()];

    store.replace_responses(&kind, &lines).await.unwrap();

    assert_eq!(store.fetch_responses(&kind).await.unwrap(), lines);
}

#[tokio::test]
async fn malformed_response_body_is_a_decode_error() {
    let (store, state) = start_store().await;
    let kind = ResponseKind::new("broken_kind").unwrap();
    state
        .responses
        .lock()
        .insert("broken_kind".into(), json!({"oops": true}));

    let err = store.fetch_responses(&kind).await.unwrap_err();

    assert!(matches!(err, SyncError::Decode { .. }));
}

#[tokio::test]
async fn question_crud_round_trips_with_type_tag() {
    let (store, state) = start_store().await;
    let question = TriviaQuestion {
        id: None,
        text: "ما عاصمة مصر؟".into(),
        correct_answer: "القاهرة".into(),
        alternative_answers: vec!["Cairo".into()],
        category: "جغرافيا".into(),
        kind: QuestionKind::TestOfFate,
    };

    let created = store.create_question(&question).await.unwrap();
    let id = created.id.unwrap();
    assert_eq!(created.kind, QuestionKind::TestOfFate);
    // The wire carries the legacy `type` tag with its display label.
    let wire = state.questions.lock()[0].clone();
    assert_eq!(wire["type"], json!("The Test of Fate"));
    assert!(wire.get("kind").is_none());

    let mut edited = created.clone();
    edited.kind = QuestionKind::Doom;
    let updated = store.update_question(id, &edited).await.unwrap();
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.kind, QuestionKind::Doom);

    store.delete_question(id).await.unwrap();
    assert!(store.fetch_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn question_delete_of_unknown_id_is_a_status_error() {
    let (store, _) = start_store().await;

    let err = store.delete_question(42).await.unwrap_err();

    match err {
        SyncError::Status { status, detail } => {
            assert_eq!(status, 404);
            assert!(detail.contains("42"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn question_import_replaces_the_bank() {
    let (store, _) = start_store().await;
    store
        .create_question(&TriviaQuestion {
            id: None,
            text: "old".into(),
            correct_answer: "old".into(),
            alternative_answers: vec![],
            category: "General".into(),
            kind: QuestionKind::Normal,
        })
        .await
        .unwrap();

    let bank = vec![
        TriviaQuestion {
            id: None,
            text: "ما عاصمة مصر؟".into(),
            correct_answer: "القاهرة".into(),
            alternative_answers: vec![],
            category: "جغرافيا".into(),
            kind: QuestionKind::Normal,
        },
        TriviaQuestion {
            id: None,
            text: "2 + 2 = ?".into(),
            correct_answer: "4".into(),
            alternative_answers: vec![],
            category: "General".into(),
            kind: QuestionKind::Golden,
        },
    ];
    store.replace_questions(&bank).await.unwrap();

    let fetched = store.fetch_questions().await.unwrap();
    assert_eq!(fetched.len(), 2);
    assert!(fetched.iter().all(|q| q.id.is_some()));
    assert!(fetched.iter().all(|q| q.text != "old"));
}

#[tokio::test]
async fn duplicate_channel_create_surfaces_the_conflict_message() {
    let (store, _) = start_store().await;
    let name = ChannelName::new("channel_a").unwrap();
    store.create_channel(&name).await.unwrap();

    let err = store.create_channel(&name).await.unwrap_err();

    match err {
        SyncError::Status { status, detail } => {
            assert_eq!(status, 409);
            assert!(detail.contains("channel_a"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn channel_delete_of_absent_name_is_ok() {
    let (store, _) = start_store().await;
    let name = ChannelName::new("never_added").unwrap();

    store.delete_channel(&name).await.unwrap();
}

#[tokio::test]
async fn special_round_trips_with_encoded_usernames() {
    let (store, state) = start_store().await;
    let entry = SpecialUserReplies {
        username: "مستخدم خاص".into(),
        replies: vec!["أهلاً".into()],
    };

    store.upsert_special(&entry).await.unwrap();
    // The path segment was percent-encoded; the backend saw the raw name.
    assert_eq!(state.special.lock()[0].0, "مستخدم خاص");

    let fetched = store.fetch_special().await.unwrap();
    assert_eq!(fetched, vec![entry.clone()]);

    store.delete_special(&entry.username).await.unwrap();
    assert!(store.fetch_special().await.unwrap().is_empty());
    // Idempotent second delete.
    store.delete_special(&entry.username).await.unwrap();
}

#[tokio::test]
async fn special_cleanup_returns_the_removed_count() {
    let (store, state) = start_store().await;
    state.special.lock().extend([
        ("keeps".to_string(), vec!["hi".to_string()]),
        ("empty".to_string(), vec![String::new()]),
    ]);

    let report = store.cleanup_special().await.unwrap();

    assert_eq!(report.removed, 1);
    assert_eq!(store.fetch_special().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Reserved port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = SyncConfig {
        base_url: format!("http://{addr}"),
        ..SyncConfig::default()
    };
    let store = HttpSettingsStore::new(&config).unwrap();

    let err = store.fetch_questions().await.unwrap_err();

    assert!(matches!(err, SyncError::Transport { .. }));
}
