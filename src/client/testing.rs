//! Test Support
//!
//! In-process WebSocket servers that stand in for the driver.

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

use crate::connection::Endpoint;

pub(crate) type ServerStream = WebSocketStream<TcpStream>;

/// Bind a fake driver on an ephemeral local port
pub(crate) async fn bind() -> (Endpoint, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    (Endpoint::new("127.0.0.1", port), listener)
}

/// Accept one client connection
pub(crate) async fn accept(listener: &TcpListener) -> ServerStream {
    let (stream, _) = listener.accept().await.expect("accept");
    accept_async(stream).await.expect("handshake")
}

/// Read frames until the next request and decode it
pub(crate) async fn next_request(ws: &mut ServerStream) -> Value {
    loop {
        match ws.next().await.expect("request frame").expect("ws error") {
            Message::Text(text) => return serde_json::from_str(text.as_str()).expect("json"),
            Message::Close(_) => panic!("peer closed while waiting for a request"),
            _ => {}
        }
    }
}

/// Send a raw text frame
pub(crate) async fn send_text(ws: &mut ServerStream, raw: &str) {
    ws.send(Message::Text(raw.to_owned().into()))
        .await
        .expect("send");
}

/// Send a response envelope for `id` with the given payload
pub(crate) async fn send_response(ws: &mut ServerStream, id: &Value, data: Value) {
    let frame = json!({ "id": id, "data": data });
    send_text(ws, &frame.to_string()).await;
}

/// Serve requests with `reply` until the peer goes away. `reply` maps a full
/// request frame to the response payload, or `None` to stay silent.
pub(crate) async fn serve(mut ws: ServerStream, reply: impl Fn(&Value) -> Option<Value>) {
    while let Some(Ok(frame)) = ws.next().await {
        let Message::Text(text) = frame else { continue };
        let Ok(request) = serde_json::from_str::<Value>(text.as_str()) else {
            continue;
        };
        if let Some(data) = reply(&request) {
            let response = json!({ "id": request["id"], "data": data });
            if ws
                .send(Message::Text(response.to_string().into()))
                .await
                .is_err()
            {
                break;
            }
        }
    }
}

/// The command name inside a request frame
pub(crate) fn request_type(request: &Value) -> &str {
    request["data"]["type"].as_str().unwrap_or_default()
}
