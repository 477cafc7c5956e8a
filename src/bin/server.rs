use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use maze_pursuit::config::EngineConfig;
use maze_pursuit::engine::GameEngine;
use maze_pursuit::server_protocol::{parse_client_message, ParsedClientMessage};
use maze_pursuit::types::FrameEvent;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

type SharedState = Arc<Mutex<ServerState>>;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON file overriding the engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone)]
struct ClientContext {
    tx: mpsc::Sender<OutboundMessage>,
    name: Option<String>,
}

#[derive(Clone, Debug)]
enum OutboundMessage {
    Text(String),
    Close { code: u16, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueuePolicy {
    DropOnFull,
    DisconnectOnFull,
}

/// The one client allowed to steer. The token survives a disconnect so the
/// same browser can reclaim the seat.
#[derive(Clone, Debug)]
struct Pilot {
    client_id: Option<String>,
    token: String,
}

struct ServerState {
    clients: HashMap<String, ClientContext>,
    pilot: Option<Pilot>,
    game: GameEngine,
    caught: bool,
}

impl ServerState {
    fn new(config: EngineConfig) -> Self {
        let mut game = GameEngine::new(config);
        game.reset_round();
        game.start_round();
        Self {
            clients: HashMap::new(),
            pilot: None,
            game,
            caught: false,
        }
    }

    fn is_pilot(&self, client_id: &str) -> bool {
        self.pilot
            .as_ref()
            .and_then(|pilot| pilot.client_id.as_deref())
            == Some(client_id)
    }

    fn restart_round(&mut self) {
        self.game.reset_round();
        self.game.restore_pellets();
        self.game.start_round();
        self.caught = false;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let frame_rate = config.frame_rate;
    let state = Arc::new(Mutex::new(ServerState::new(config)));
    start_tick_loop(state.clone(), frame_rate);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/snapshot", get(snapshot_handler))
        .route("/ws", get(ws_handler))
        .with_state(state);

    let app = if let Some(static_dir) = resolve_static_dir() {
        let index_file = static_dir.join("index.html");
        info!(root = %static_dir.display(), "serving static files");
        app.fallback_service(
            ServeDir::new(static_dir).not_found_service(ServeFile::new(index_file)),
        )
    } else {
        warn!("static file root not found; only the API is served");
        app
    };

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    info!(port, frame_rate, "listening");
    axum::serve(listener, app)
        .await
        .context("server runtime failed")?;
    Ok(())
}

fn resolve_static_dir() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var("STATIC_DIR") {
        let path = PathBuf::from(raw);
        if path.join("index.html").is_file() {
            return Some(path);
        }
    }

    [PathBuf::from("static"), PathBuf::from("public")]
        .into_iter()
        .find(|path| path.join("index.html").is_file())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn snapshot_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let guard = state.lock().await;
    Json(guard.game.snapshot())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: SharedState, socket: WebSocket) {
    let client_id = make_id("client");
    let (tx, mut rx) = mpsc::channel::<OutboundMessage>(256);

    {
        let mut guard = state.lock().await;
        guard.clients.insert(
            client_id.clone(),
            ClientContext {
                tx: tx.clone(),
                name: None,
            },
        );
    }

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let writer = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            let should_close = matches!(outbound, OutboundMessage::Close { .. });
            let result = match outbound {
                OutboundMessage::Text(payload) => {
                    ws_sender.send(Message::Text(payload.into())).await
                }
                OutboundMessage::Close { code, reason } => {
                    let frame = CloseFrame {
                        code,
                        reason: reason.into(),
                    };
                    ws_sender.send(Message::Close(Some(frame))).await
                }
            };
            if result.is_err() || should_close {
                break;
            }
        }
    });

    while let Some(received) = ws_receiver.next().await {
        let Ok(message) = received else {
            break;
        };

        match message {
            Message::Text(raw) => {
                handle_client_message(&state, &client_id, raw.as_str()).await;
            }
            Message::Binary(raw) => {
                if let Ok(text) = std::str::from_utf8(&raw) {
                    handle_client_message(&state, &client_id, text).await;
                } else {
                    let mut guard = state.lock().await;
                    send_error(&mut guard, &client_id, "invalid utf8 message");
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    {
        let mut guard = state.lock().await;
        disconnect_client(&mut guard, &client_id);
    }
    drop(tx);
    let _ = writer.await;
}

async fn handle_client_message(state: &SharedState, client_id: &str, raw: &str) {
    let mut guard = state.lock().await;
    let Some(message) = parse_client_message(raw) else {
        send_error(&mut guard, client_id, "invalid message");
        return;
    };

    match message {
        ParsedClientMessage::Hello { name, pilot_token } => {
            handle_hello(&mut guard, client_id, name, pilot_token);
        }
        ParsedClientMessage::Input { heading } => {
            if !guard.is_pilot(client_id) {
                send_error(&mut guard, client_id, "only the pilot can steer");
                return;
            }
            guard.game.set_player_heading(heading);
        }
        ParsedClientMessage::Restart => {
            if !guard.is_pilot(client_id) {
                send_error(&mut guard, client_id, "only the pilot can restart");
                return;
            }
            guard.restart_round();
            info!(client_id, "round restarted by pilot");
        }
        ParsedClientMessage::Ping { t } => {
            send_to_client(
                &mut guard,
                client_id,
                &json!({
                    "type": "pong",
                    "t": t,
                }),
                QueuePolicy::DisconnectOnFull,
            );
        }
    }
}

fn handle_hello(
    state: &mut ServerState,
    client_id: &str,
    name: String,
    pilot_token: Option<String>,
) {
    if let Some(client) = state.clients.get_mut(client_id) {
        client.name = Some(name.clone());
    }

    let claimed = match state.pilot.as_mut() {
        None => {
            state.pilot = Some(Pilot {
                client_id: Some(client_id.to_string()),
                token: make_pilot_token(),
            });
            true
        }
        Some(pilot) => {
            let token_matches = pilot_token.as_deref() == Some(pilot.token.as_str());
            if token_matches {
                pilot.client_id = Some(client_id.to_string());
            }
            token_matches
        }
    };
    let token = if claimed {
        state.pilot.as_ref().map(|pilot| pilot.token.clone())
    } else {
        None
    };
    info!(client_id, name = name.as_str(), pilot = claimed, "client joined");

    send_to_client(
        state,
        client_id,
        &json!({
            "type": "welcome",
            "clientId": client_id,
            "pilot": claimed,
            "pilotToken": token,
        }),
        QueuePolicy::DisconnectOnFull,
    );
    let snapshot = state.game.snapshot();
    send_to_client(
        state,
        client_id,
        &json!({
            "type": "state",
            "snapshot": snapshot,
        }),
        QueuePolicy::DisconnectOnFull,
    );
}

fn disconnect_client(state: &mut ServerState, client_id: &str) {
    if state.clients.remove(client_id).is_none() {
        return;
    }
    if state.is_pilot(client_id) {
        if let Some(pilot) = state.pilot.as_mut() {
            pilot.client_id = None;
        }
        state.game.set_player_heading(None);
        info!(client_id, "pilot disconnected");
    }
}

fn start_tick_loop(state: SharedState, frame_rate: u32) {
    tokio::spawn(async move {
        let period = Duration::from_micros(1_000_000 / u64::from(frame_rate.max(1)));
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let mut guard = state.lock().await;
            tick_game(&mut guard);
        }
    });
}

fn tick_game(state: &mut ServerState) {
    if state.caught {
        return;
    }
    let report = match state.game.step() {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, frame = state.game.frame(), "engine step failed; halting round");
            state.game.halt();
            state.caught = true;
            return;
        }
    };

    let snapshot = state.game.snapshot();
    broadcast(
        state,
        &json!({
            "type": "state",
            "snapshot": snapshot,
            "events": report.events,
        }),
        QueuePolicy::DropOnFull,
    );

    if report.collision {
        state.game.halt();
        state.caught = true;
        let ghost = report.events.iter().find_map(|event| match event {
            FrameEvent::Collision { ghost } => Some(*ghost),
            _ => None,
        });
        broadcast(
            state,
            &json!({
                "type": "caught",
                "frame": report.frame,
                "ghost": ghost,
            }),
            QueuePolicy::DisconnectOnFull,
        );
    }
}

fn send_to_client(state: &mut ServerState, client_id: &str, message: &Value, policy: QueuePolicy) {
    let send_failed = if let Some(client) = state.clients.get(client_id) {
        client
            .tx
            .try_send(OutboundMessage::Text(message.to_string()))
            .is_err()
    } else {
        false
    };
    if send_failed && policy == QueuePolicy::DisconnectOnFull {
        close_client(state, client_id, "send queue full");
    }
}

fn broadcast(state: &mut ServerState, message: &Value, policy: QueuePolicy) {
    let payload = message.to_string();
    let mut failed_clients = Vec::new();
    for (client_id, client) in &state.clients {
        if client.name.is_none() {
            continue;
        }
        if client
            .tx
            .try_send(OutboundMessage::Text(payload.clone()))
            .is_err()
            && policy == QueuePolicy::DisconnectOnFull
        {
            failed_clients.push(client_id.clone());
        }
    }
    for client_id in failed_clients {
        close_client(state, &client_id, "send queue full");
    }
}

fn close_client(state: &mut ServerState, client_id: &str, reason: &str) {
    if let Some(client) = state.clients.get(client_id) {
        let _ = client.tx.try_send(OutboundMessage::Close {
            code: 1008,
            reason: reason.to_string(),
        });
    }
    disconnect_client(state, client_id);
}

fn send_error(state: &mut ServerState, client_id: &str, message: &str) {
    send_to_client(
        state,
        client_id,
        &json!({
            "type": "error",
            "message": message,
        }),
        QueuePolicy::DisconnectOnFull,
    );
}

fn make_id(prefix: &str) -> String {
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{seq}")
}

fn make_pilot_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
