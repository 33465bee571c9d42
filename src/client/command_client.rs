//! Command Client
//!
//! Turns the driver's raw bidirectional WebSocket into a request/response
//! API. Each outgoing command gets a connection-scoped correlation id and a
//! pending entry; the single reader task routes every inbound frame to the
//! registered event sender and resolves the matching pending caller, if any.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use snafu::Snafu;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::client::ClientEvent;
use crate::connection::Endpoint;
use crate::constants::COMMAND_TIMEOUT_MS;
use crate::protocol::envelope::{self, CommandParams, ResponseEnvelope};

/// Errors from [`CommandClient::connect`]
#[derive(Debug, Snafu)]
pub enum ConnectError {
    /// A connection is already live or being established
    #[snafu(display("Client already connected"))]
    AlreadyConnected,

    /// The channel failed or closed before becoming ready
    #[snafu(display("Channel error: {source}"))]
    ChannelError {
        source: tokio_tungstenite::tungstenite::Error,
    },
}

/// Errors from [`CommandClient::disconnect`]
#[derive(Debug, Snafu)]
pub enum DisconnectError {
    /// No live connection to close
    #[snafu(display("Client is not connected"))]
    NotConnected,
}

/// Errors from [`CommandClient::send_command`]
#[derive(Debug, Snafu)]
pub enum CommandError {
    /// No live connection to send on
    #[snafu(display("Client is not connected"))]
    NotConnected,

    /// No matching response arrived within the timeout window
    #[snafu(display("Command {id} timed out"))]
    Timeout { id: u64 },

    /// The connection went away while the command was pending
    #[snafu(display("Disconnected while command {id} was pending"))]
    Disconnected { id: u64 },

    /// The request could not be encoded
    #[snafu(display("Could not encode request: {source}"))]
    Encode { source: serde_json::Error },
}

/// Lifecycle state of the control channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected, not trying to connect
    Disconnected,
    /// Attempting to connect
    Connecting,
    /// Successfully connected
    Connected,
}

const DISCONNECTED: u8 = 0;
const CONNECTING: u8 = 1;
const CONNECTED: u8 = 2;

/// Tunables for the command client
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// How long to wait for a matching response
    pub command_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_millis(COMMAND_TIMEOUT_MS),
        }
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type PendingMap = Mutex<HashMap<u64, oneshot::Sender<ResponseEnvelope>>>;

/// One live channel to the driver. Recreated on every connect, which also
/// restarts the command id sequence at zero.
struct Connection {
    next_id: AtomicU64,
    pending: PendingMap,
    outbound: mpsc::UnboundedSender<Message>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    state: AtomicU8,
    conn: Mutex<Option<Arc<Connection>>>,
    event_tx: Mutex<Option<crossbeam_channel::Sender<ClientEvent>>>,
}

impl Shared {
    fn state(&self) -> ConnectionState {
        match self.state.load(Ordering::SeqCst) {
            DISCONNECTED => ConnectionState::Disconnected,
            CONNECTING => ConnectionState::Connecting,
            _ => ConnectionState::Connected,
        }
    }

    fn emit(&self, event: ClientEvent) {
        if let Some(tx) = self.event_tx.lock().as_ref() {
            let _ = tx.send(event);
        }
    }
}

/// Request/response client for the driver control channel.
///
/// Owns at most one live connection at a time. Commands are correlated to
/// responses by a per-connection id; every decoded inbound frame is also
/// forwarded to the registered event sender, so pushes with no pending
/// command still reach the caller.
pub struct CommandClient {
    endpoint: Endpoint,
    options: ClientOptions,
    shared: Arc<Shared>,
}

impl CommandClient {
    /// Create a client with default options
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_options(endpoint, ClientOptions::default())
    }

    /// Create a client with explicit options
    pub fn with_options(endpoint: Endpoint, options: ClientOptions) -> Self {
        Self {
            endpoint,
            options,
            shared: Arc::new(Shared {
                state: AtomicU8::new(DISCONNECTED),
                conn: Mutex::new(None),
                event_tx: Mutex::new(None),
            }),
        }
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Current channel state
    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Whether a live connection exists
    pub fn connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Register the sink for pushed events.
    ///
    /// Every decoded inbound frame is forwarded here in addition to
    /// resolving a pending command, along with malformed-frame diagnostics
    /// and teardown notifications.
    pub fn set_event_sender(&self, tx: crossbeam_channel::Sender<ClientEvent>) {
        *self.shared.event_tx.lock() = Some(tx);
    }

    /// Open the channel to the configured endpoint.
    ///
    /// On success the command id sequence and the pending table start fresh
    /// and the client transitions to [`ConnectionState::Connected`].
    pub async fn connect(&self) -> Result<(), ConnectError> {
        if self
            .shared
            .state
            .compare_exchange(DISCONNECTED, CONNECTING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ConnectError::AlreadyConnected);
        }

        let url = self.endpoint.ws_url();
        let (stream, _) = match connect_async(url.as_str()).await {
            Ok(ready) => ready,
            Err(source) => {
                self.shared.state.store(DISCONNECTED, Ordering::SeqCst);
                return Err(ConnectError::ChannelError { source });
            }
        };
        tracing::info!("Connected to driver at {url}");

        let (mut sink, mut source) = stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

        let conn = Arc::new(Connection {
            next_id: AtomicU64::new(0),
            pending: Mutex::new(HashMap::new()),
            outbound,
            reader: Mutex::new(None),
        });

        *self.shared.conn.lock() = Some(Arc::clone(&conn));
        self.shared.state.store(CONNECTED, Ordering::SeqCst);

        tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                if sink.send(frame).await.is_err() {
                    break;
                }
            }
        });

        let shared = Arc::clone(&self.shared);
        let reader_conn = Arc::clone(&conn);
        let reader = tokio::spawn(async move {
            let reason = read_loop(&mut source, &shared, &reader_conn).await;
            teardown(&shared, &reader_conn, &reason);
        });
        *conn.reader.lock() = Some(reader);

        Ok(())
    }

    /// Close the channel.
    ///
    /// Outstanding commands fail immediately with
    /// [`CommandError::Disconnected`] instead of waiting out their timeouts.
    pub fn disconnect(&self) -> Result<(), DisconnectError> {
        let Some(conn) = self.shared.conn.lock().take() else {
            return Err(DisconnectError::NotConnected);
        };
        self.shared.state.store(DISCONNECTED, Ordering::SeqCst);

        // Best-effort close frame; the writer drains its queue before exiting.
        let _ = conn.outbound.send(Message::Close(None));
        if let Some(reader) = conn.reader.lock().take() {
            reader.abort();
        }
        fail_pending(&conn);
        self.shared.emit(ClientEvent::Disconnected {
            reason: "disconnected by client".into(),
        });
        tracing::info!("Disconnected from driver");
        Ok(())
    }

    /// Send a command and wait for the matching response.
    ///
    /// Fails fast with [`CommandError::NotConnected`] outside the connected
    /// state; nothing is written in that case. Exactly one of the matching
    /// response, the timeout, or connection teardown resolves the call.
    pub async fn send_command(
        &self,
        name: &str,
        params: CommandParams,
    ) -> Result<ResponseEnvelope, CommandError> {
        if self.state() != ConnectionState::Connected {
            return Err(CommandError::NotConnected);
        }
        let Some(conn) = self.shared.conn.lock().clone() else {
            return Err(CommandError::NotConnected);
        };

        let id = conn.next_id.fetch_add(1, Ordering::SeqCst);
        let frame = envelope::request_frame(id, name, params)
            .map_err(|source| CommandError::Encode { source })?;

        // Register before writing so the response cannot arrive unmatched.
        let (tx, mut rx) = oneshot::channel();
        conn.pending.lock().insert(id, tx);

        if conn.outbound.send(Message::Text(frame.into())).is_err() {
            conn.pending.lock().remove(&id);
            return Err(CommandError::Disconnected { id });
        }
        tracing::debug!("Sent command {name} (id {id})");

        match tokio::time::timeout(self.options.command_timeout, &mut rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(CommandError::Disconnected { id }),
            Err(_) => {
                // The timeout only wins if the entry is still ours to remove;
                // otherwise the response is already on its way.
                if conn.pending.lock().remove(&id).is_some() {
                    Err(CommandError::Timeout { id })
                } else {
                    rx.await.map_err(|_| CommandError::Disconnected { id })
                }
            }
        }
    }
}

impl std::fmt::Debug for CommandClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandClient")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .finish()
    }
}

/// Pump inbound frames until the channel goes away. Returns the reason.
async fn read_loop(source: &mut SplitStream<WsStream>, shared: &Shared, conn: &Connection) -> String {
    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_frame(shared, conn, text.as_str()),
            Ok(Message::Ping(payload)) => {
                let _ = conn.outbound.send(Message::Pong(payload));
            }
            Ok(Message::Close(_)) => return "closed by driver".to_owned(),
            Ok(_) => {}
            Err(err) => return err.to_string(),
        }
    }
    "channel ended".to_owned()
}

/// Process one inbound text frame: decode, dispatch, then resolve any
/// matching pending command.
fn handle_frame(shared: &Shared, conn: &Connection, raw: &str) {
    let envelope = match envelope::parse_frame(raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!("Dropping malformed frame ({err}): {raw}");
            shared.emit(ClientEvent::Malformed {
                raw: raw.into(),
                reason: err.to_string().into(),
            });
            return;
        }
    };

    // Push dispatch happens for every decoded frame, matched or not.
    shared.emit(ClientEvent::Message(envelope.clone()));

    let resolver = conn.pending.lock().remove(&envelope.id);
    match resolver {
        Some(tx) => {
            let _ = tx.send(envelope);
        }
        None => tracing::debug!("No pending command for id {}", envelope.id),
    }
}

/// Tear the connection down after a channel-side close or error. A stale
/// reader whose connection was already replaced must not touch the new one.
fn teardown(shared: &Shared, conn: &Arc<Connection>, reason: &str) {
    {
        let mut slot = shared.conn.lock();
        match slot.as_ref() {
            Some(current) if Arc::ptr_eq(current, conn) => *slot = None,
            _ => return,
        }
    }
    shared.state.store(DISCONNECTED, Ordering::SeqCst);
    fail_pending(conn);
    shared.emit(ClientEvent::Disconnected {
        reason: reason.into(),
    });
    tracing::info!("Driver channel closed: {reason}");
}

/// Fail every outstanding command. Dropping the resolver wakes the caller
/// with a disconnect error.
fn fail_pending(conn: &Connection) {
    let outstanding: Vec<u64> = conn.pending.lock().drain().map(|(id, _)| id).collect();
    if !outstanding.is_empty() {
        tracing::debug!("Failing {} outstanding command(s)", outstanding.len());
    }
}
