//! Integration tests for the Telegram channel.
//!
//! Each test spins up a fake Bot API with Axum on a random port and points a
//! `TelegramChannel` at it, then checks the JSON the channel sends and the
//! messages it produces from `getUpdates`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use warmup_bot::channels::{Channel, Keyboard, LinkButton, OutgoingMessage, Reply, TelegramChannel};
use warmup_bot::config::BotConfig;
use warmup_bot::error::{ChannelError, ConfigError, Error};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const TOKEN: &str = "test-token";

/// Recorded traffic and knobs for the fake API.
#[derive(Default)]
struct FakeApi {
    sent: Mutex<Vec<Value>>,
    offsets: Mutex<Vec<i64>>,
    updates: Mutex<Option<Vec<Value>>>,
    reject_markdown: AtomicBool,
    reject_all: AtomicBool,
    rate_limited: AtomicBool,
    reject_token: AtomicBool,
}

impl FakeApi {
    fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

async fn send_message(
    State(api): State<Arc<FakeApi>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let has_parse_mode = body.get("parse_mode").is_some();
    api.sent.lock().unwrap().push(body);

    if api.rate_limited.load(Ordering::SeqCst) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "ok": false, "description": "Too Many Requests: retry after 3" })),
        );
    }
    let rejected = api.reject_all.load(Ordering::SeqCst)
        || (has_parse_mode && api.reject_markdown.load(Ordering::SeqCst));
    if rejected {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "description": "Bad Request: can't parse entities" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "ok": true, "result": {} })))
    }
}

async fn get_updates(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Json<Value> {
    if let Some(offset) = body.get("offset").and_then(Value::as_i64) {
        api.offsets.lock().unwrap().push(offset);
    }
    let batch = api.updates.lock().unwrap().take();
    match batch {
        Some(updates) => Json(json!({ "ok": true, "result": updates })),
        None => {
            // Stand in for a long poll that times out empty.
            tokio::time::sleep(Duration::from_millis(50)).await;
            Json(json!({ "ok": true, "result": [] }))
        }
    }
}

async fn get_me(State(api): State<Arc<FakeApi>>) -> (StatusCode, Json<Value>) {
    if api.reject_token.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error_code": 401, "description": "Unauthorized" })),
        );
    }
    let me = json!({ "id": 1, "is_bot": true, "username": "warmup_bot" });
    (StatusCode::OK, Json(json!({ "ok": true, "result": me })))
}

/// Start the fake API on a random port, return (channel, recorded state).
async fn start_fake_api() -> (TelegramChannel, Arc<FakeApi>) {
    let (base, api) = serve_fake_api().await;
    let channel = TelegramChannel::new(
        SecretString::from(TOKEN.to_string()),
        base,
        Duration::from_secs(1),
    );
    (channel, api)
}

/// Start the fake API on a random port, return (base URL, recorded state).
async fn serve_fake_api() -> (String, Arc<FakeApi>) {
    let api = Arc::new(FakeApi::default());
    let app = Router::new()
        .route(&format!("/bot{TOKEN}/sendMessage"), post(send_message))
        .route(&format!("/bot{TOKEN}/getUpdates"), post(get_updates))
        .route(&format!("/bot{TOKEN}/getMe"), get(get_me))
        .with_state(Arc::clone(&api));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{port}"), api)
}

fn config_for(base: &str) -> BotConfig {
    BotConfig::from_lookup(|key| match key {
        "TELEGRAM_TOKEN" => Some(TOKEN.to_string()),
        "ADMIN_CHAT_ID" => Some("1".to_string()),
        "TELEGRAM_API_URL" => Some(base.to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn reply_keyboard_is_sent_as_reply_markup() {
    let (channel, api) = start_fake_api().await;

    let reply = Reply::text("Выбирай 👇").with_keyboard(Keyboard::new([vec!["a", "b"], vec!["c"]]));
    channel.send(OutgoingMessage::new(77, reply)).await.unwrap();

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], 77);
    assert_eq!(sent[0]["text"], "Выбирай 👇");
    assert!(sent[0].get("parse_mode").is_none());
    assert_eq!(
        sent[0]["reply_markup"],
        json!({
            "keyboard": [[{ "text": "a" }, { "text": "b" }], [{ "text": "c" }]],
            "resize_keyboard": true,
        })
    );
}

#[tokio::test]
async fn links_are_sent_as_inline_buttons() {
    let (channel, api) = start_fake_api().await;

    let reply = Reply::markdown("*ответ*").with_links(vec![
        LinkButton::new("▶️ Видео 1", "https://t.me/x/1"),
        LinkButton::new("▶️ Видео 2", "https://t.me/x/2"),
    ]);
    channel.send(OutgoingMessage::new(5, reply)).await.unwrap();

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["parse_mode"], "Markdown");
    assert_eq!(
        sent[0]["reply_markup"]["inline_keyboard"],
        json!([
            [{ "text": "▶️ Видео 1", "url": "https://t.me/x/1" }],
            [{ "text": "▶️ Видео 2", "url": "https://t.me/x/2" }],
        ])
    );
}

#[tokio::test]
async fn rejected_markdown_is_resent_as_plain_text() {
    let (channel, api) = start_fake_api().await;
    api.reject_markdown.store(true, Ordering::SeqCst);

    let reply =
        Reply::markdown("*broken_markdown").with_links(vec![LinkButton::new("go", "https://x")]);
    channel.send(OutgoingMessage::new(5, reply)).await.unwrap();

    let sent = api.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0]["parse_mode"], "Markdown");
    assert!(sent[1].get("parse_mode").is_none());
    assert_eq!(sent[1]["text"], "*broken_markdown");
    assert_eq!(sent[1]["reply_markup"], sent[0]["reply_markup"]);
}

#[tokio::test]
async fn rejected_plain_text_is_an_error() {
    let (channel, api) = start_fake_api().await;
    api.reject_all.store(true, Ordering::SeqCst);

    let result = channel.send(OutgoingMessage::new(5, Reply::text("hi"))).await;
    assert!(result.is_err());
    assert_eq!(api.sent().len(), 1);
}

#[tokio::test]
async fn rate_limited_markdown_is_not_resent() {
    let (channel, api) = start_fake_api().await;
    api.rate_limited.store(true, Ordering::SeqCst);

    let result = channel.send(OutgoingMessage::new(5, Reply::markdown("*ok*"))).await;
    assert!(matches!(result, Err(ChannelError::SendFailed { .. })));
    assert_eq!(api.sent().len(), 1);
}

#[tokio::test]
async fn operator_message_goes_to_given_chat_as_plain_text() {
    let (channel, api) = start_fake_api().await;

    channel.send_to_chat(-100_123, "✅ Нажатие: «Я оплатила»").await.unwrap();

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], -100_123);
    assert!(sent[0].get("parse_mode").is_none());
    assert!(sent[0].get("reply_markup").is_none());
}

#[tokio::test]
async fn updates_are_streamed_and_acknowledged() {
    let (channel, api) = start_fake_api().await;
    *api.updates.lock().unwrap() = Some(vec![
        json!({
            "update_id": 10,
            "message": {
                "text": "/start",
                "from": { "id": 501, "username": "alice" },
                "chat": { "id": 501 },
            }
        }),
        // Stickers and other non-text updates are skipped.
        json!({
            "update_id": 11,
            "message": { "sticker": {}, "from": { "id": 501 }, "chat": { "id": 501 } }
        }),
        json!({
            "update_id": 12,
            "message": {
                "text": "  🎥 Вопросы (FAQ) ",
                "from": { "id": 502 },
                "chat": { "id": 9002 },
            }
        }),
    ]);

    let mut stream = channel.start().await.unwrap();

    let first = timeout(TEST_TIMEOUT, stream.next()).await.unwrap().unwrap();
    assert_eq!(first.user_id, 501);
    assert_eq!(first.chat_id, 501);
    assert_eq!(first.username.as_deref(), Some("alice"));
    assert_eq!(first.text, "/start");

    let second = timeout(TEST_TIMEOUT, stream.next()).await.unwrap().unwrap();
    assert_eq!(second.user_id, 502);
    assert_eq!(second.chat_id, 9002);
    assert_eq!(second.username, None);
    assert_eq!(second.text, "  🎥 Вопросы (FAQ) ");

    // The next poll must confirm everything up to the last update seen.
    timeout(TEST_TIMEOUT, async {
        while !api.offsets.lock().unwrap().contains(&13) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("offset was never advanced");
    assert_eq!(api.offsets.lock().unwrap()[0], 0);
}

#[tokio::test]
async fn health_check_calls_get_me() {
    let (channel, _api) = start_fake_api().await;
    channel.health_check().await.unwrap();
}

#[tokio::test]
async fn health_check_reports_rejected_token() {
    let (channel, api) = start_fake_api().await;
    api.reject_token.store(true, Ordering::SeqCst);

    let err = channel.health_check().await.unwrap_err();
    assert!(matches!(err, ChannelError::Unauthorized { status: 401, .. }));
}

#[tokio::test]
async fn connect_fails_on_rejected_token() {
    let (base, api) = serve_fake_api().await;
    api.reject_token.store(true, Ordering::SeqCst);

    let result = TelegramChannel::connect(&config_for(&base)).await;
    match result {
        Err(Error::Config(ConfigError::InvalidValue { key, .. })) => {
            assert_eq!(key, "TELEGRAM_TOKEN");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("connect accepted a rejected token"),
    }
}

#[tokio::test]
async fn connect_tolerates_unreachable_api() {
    // Nothing listens on the discard port.
    let config = config_for("http://127.0.0.1:9");
    let result = timeout(TEST_TIMEOUT, TelegramChannel::connect(&config)).await.unwrap();
    assert!(result.is_ok());
}
