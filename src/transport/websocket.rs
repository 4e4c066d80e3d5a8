//! WebSocket transport
//!
//! This file implements the WebSocket server in front of `ChatRouter`:
//! - Accept TCP connections and upgrade them, rejecting unknown paths with
//!   `404` during the HTTP handshake
//! - Give each connection an outbound channel drained by its own writer task
//! - Feed every inbound text frame to `ChatRouter::relay`
//! - Deregister the connection when the client closes, errors or goes away
//!
//! The server never closes a socket itself. Dropping the last handle of a
//! connection ends its writer task, which releases the socket.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tracing::{debug, info, warn};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;

use crate::chat::ChatRouter;
use crate::client::Connection;
use crate::transport::route::PrivateRoute;
use crate::utils::ChatError;

/// Bind `addr` and serve until the process stops.
pub async fn start_websocket_server(addr: &str, router: Arc<ChatRouter>) -> Result<(), ChatError> {
    let listener = TcpListener::bind(addr).await?;
    info!("WebSocket server listening on ws://{}", listener.local_addr()?);
    serve(listener, router).await;
    Ok(())
}

/// Accept connections from an already bound listener, one task each.
pub async fn serve(listener: TcpListener, router: Arc<ChatRouter>) {
    loop {
        match listener.accept().await {
            Ok((stream, remote)) => {
                let router = router.clone();
                tokio::spawn(handle_connection(stream, remote, router));
            }
            Err(e) => warn!("Failed to accept connection: {e}"),
        }
    }
}

async fn handle_connection(stream: TcpStream, remote: SocketAddr, router: Arc<ChatRouter>) {
    let mut route = None;
    let upgraded = accept_hdr_async(stream, |req: &Request, resp: Response| {
        match PrivateRoute::parse(req.uri().path()) {
            Some(parsed) => {
                route = Some(parsed);
                Ok(resp)
            }
            None => Err(not_found(req.uri().path())),
        }
    })
    .await;

    let ws_stream = match upgraded {
        Ok(ws) => ws,
        Err(e) => {
            warn!(%remote, "WebSocket handshake error: {e}");
            return;
        }
    };
    let Some(PrivateRoute { sender, peer }) = route else {
        return;
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    // The connection goes live once its handshake response is on the wire
    // and its writer task is running.
    let handshake = async move {
        ws_sender.flush().await?;
        let connection = Connection::new(tx);
        let connection_id = connection.id();

        spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    warn!("Failed to send message to {connection_id}: {e}");
                    break;
                }
            }
            debug!("Send loop closed for {connection_id}");
        });

        Ok::<_, ChatError>(connection)
    };

    let connection = match router.join(&sender, &peer, handshake).await {
        Ok(connection) => connection,
        Err(e) => {
            warn!(%remote, %sender, %peer, "Failed to establish connection: {e}");
            return;
        }
    };

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => {
                router.relay(&sender, &peer, text.as_str()).await;
            }
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(connection = %connection.id(), "Receive failed: {e}");
                break;
            }
        }
    }

    router.leave(&sender, &peer, &connection);
}

fn not_found(path: &str) -> ErrorResponse {
    let mut response = ErrorResponse::new(Some(format!("no route for {path}")));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
