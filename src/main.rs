//! CLI for pairchat
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `history`: print the recorded conversation of two participants
//! - `client`: send one message and print the echo (useful for smoke tests)

use std::sync::Arc;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use pairchat::broker::Bus;
use pairchat::chat::ChatRouter;
use pairchat::config::{Settings, load_config};
use pairchat::pair::PairKey;
use pairchat::persistence;
use pairchat::registry::Registry;
use pairchat::transport::{PrivateRoute, start_websocket_server};
use pairchat::utils::{ChatError, logging};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pairchat")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Print every recorded message between two participants
    History { user1: String, user2: String },
    /// Connect as SENDER, send TEXT to PEER and print what comes back
    Client {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
        sender: String,
        peer: String,
        text: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&settings.logging.level);

    let result = match cmd {
        Command::Server => run_server(&settings).await,
        Command::History { user1, user2 } => run_history(&settings, &user1, &user2).await,
        Command::Client {
            url,
            sender,
            peer,
            text,
        } => run_client(&url, sender, peer, &text).await,
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_server(settings: &Settings) -> Result<(), ChatError> {
    let recorder = persistence::open(&settings.storage)?;
    let router = Arc::new(ChatRouter::new(
        Arc::new(Bus::new()),
        Arc::new(Registry::new()),
        recorder,
    ));

    let addr = settings.server.addr();
    tokio::select! {
        result = start_websocket_server(&addr, router) => {
            result?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_history(settings: &Settings, user1: &str, user2: &str) -> Result<(), ChatError> {
    let recorder = persistence::open(&settings.storage)?;
    let pair = PairKey::new(user1, user2);
    let lines = recorder.history(&pair).await?;

    if lines.is_empty() {
        info!("No messages recorded for {pair}");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

async fn run_client(url: &str, sender: String, peer: String, text: &str) -> Result<(), ChatError> {
    let route = PrivateRoute { sender, peer };
    let endpoint = format!("{}{}", url.trim_end_matches('/'), route.path());
    let (mut ws_stream, _response) = connect_async(endpoint.as_str()).await?;
    info!("Connected to {endpoint}");

    ws_stream.send(WsMessage::text(text)).await?;

    // The server echoes every message to all connections of the pair,
    // including this one.
    while let Some(frame) = ws_stream.next().await {
        if let WsMessage::Text(incoming) = frame? {
            println!("{}", incoming.as_str());
            break;
        }
    }

    Ok(())
}
