//! In-process stand-in for the Telegram Bot API.
//!
//! Serves `POST /bot{token}/{method}` on an ephemeral localhost port, records
//! every call and answers from a small script: a fixed token, chats that
//! have blocked the bot, and one batch of updates handed out to the first
//! `getUpdates` call without an offset.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

pub const TOKEN: &str = "123456:test-token";

/// One recorded Bot API call.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub body: Value,
}

#[derive(Default)]
struct Script {
    blocked_chats: BTreeSet<i64>,
    pending_updates: Vec<Value>,
    calls: Vec<Call>,
}

pub struct FakeBotApi {
    base: Url,
    handle: ServerHandle,
    script: Arc<Mutex<Script>>,
}

impl FakeBotApi {
    pub async fn start() -> Self {
        let script = Arc::new(Mutex::new(Script::default()));
        let data = web::Data::from(Arc::clone(&script));
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/bot{token}/{method}", web::post().to(dispatch))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake Bot API");
        let addr = *server.addrs().first().expect("bound address");
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base: Url::parse(&format!("http://{addr}")).expect("fake base url"),
            handle,
            script,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base.clone()
    }

    pub fn block_chat(&self, chat_id: i64) {
        self.lock().blocked_chats.insert(chat_id);
    }

    pub fn queue_updates(&self, updates: Vec<Value>) {
        self.lock().pending_updates.extend(updates);
    }

    pub fn calls(&self, method: &str) -> Vec<Call> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method)
            .cloned()
            .collect()
    }

    /// Wait until at least `count` calls to `method` were recorded.
    pub async fn wait_for_calls(&self, method: &str, count: usize) -> Vec<Call> {
        for _ in 0..200 {
            let calls = self.calls(method);
            if calls.len() >= count {
                return calls;
            }
            actix_web::rt::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} {method} calls");
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script mutex")
    }
}

async fn dispatch(
    script: web::Data<Mutex<Script>>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (token, method) = path.into_inner();
    let (response, idle) = respond(
        &mut script.lock().expect("script mutex"),
        &token,
        &method,
        body.into_inner(),
    );
    if idle {
        // Stand in for a long poll that found nothing.
        actix_web::rt::time::sleep(Duration::from_millis(20)).await;
    }
    response
}

fn respond(script: &mut Script, token: &str, method: &str, body: Value) -> (HttpResponse, bool) {
    script.calls.push(Call {
        method: method.to_owned(),
        body: body.clone(),
    });

    if token != TOKEN {
        let response = HttpResponse::Unauthorized()
            .json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"}));
        return (response, false);
    }

    let response = match method {
        "getMe" => HttpResponse::Ok().json(json!({
            "ok": true,
            "result": {"id": 777, "is_bot": true, "first_name": "Пар", "username": "par_orders_bot"}
        })),
        "sendMessage" => {
            let chat_id = body["chat_id"].as_i64().unwrap_or_default();
            if script.blocked_chats.contains(&chat_id) {
                HttpResponse::Forbidden().json(json!({
                    "ok": false,
                    "error_code": 403,
                    "description": "Forbidden: bot was blocked by the user"
                }))
            } else {
                HttpResponse::Ok().json(json!({
                    "ok": true,
                    "result": {"message_id": script.calls.len(), "chat": {"id": chat_id}}
                }))
            }
        }
        "getUpdates" => {
            let updates = if body.get("offset").is_none() {
                std::mem::take(&mut script.pending_updates)
            } else {
                Vec::new()
            };
            let idle = updates.is_empty();
            return (
                HttpResponse::Ok().json(json!({"ok": true, "result": updates})),
                idle,
            );
        }
        _ => HttpResponse::NotFound()
            .json(json!({"ok": false, "error_code": 404, "description": "Not Found"})),
    };
    (response, false)
}
