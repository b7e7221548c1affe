use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::{SinkExt, StreamExt};
use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ClientError;
use crate::session::dto::UserIdentity;

use super::dto::{PortfolioSnapshot, PortfolioSnapshotWire};

/// Lifecycle of the push channel. Transitions only move forward;
/// `Closed` is terminal and there is no reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Connecting,
    Open,
    Closed,
}

/// What subscribers receive, in strict arrival order.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A complete replacement snapshot, already normalized.
    Snapshot(Arc<PortfolioSnapshot>),
    /// A frame that failed to parse. Dropped; the published snapshot is
    /// untouched and the channel stays up.
    Malformed(String),
    /// The channel is gone and will not come back; the view decides how
    /// to prompt for a refresh.
    Closed,
}

/// One push-channel connection per mounted view. `start` opens the
/// channel exactly once and sends the session identity with the open
/// handshake; inbound snapshots replace the published model wholesale.
pub struct PortfolioStream {
    url: String,
    state: Arc<Mutex<StreamState>>,
    current: Arc<Mutex<Option<Arc<PortfolioSnapshot>>>>,
    events: UnboundedSender<StreamEvent>,
    task: Option<JoinHandle<()>>,
}

impl PortfolioStream {
    pub fn new(url: impl Into<String>) -> (Self, UnboundedReceiver<StreamEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let stream = Self {
            url: url.into(),
            state: Arc::new(Mutex::new(StreamState::Idle)),
            current: Arc::new(Mutex::new(None)),
            events,
            task: None,
        };
        (stream, receiver)
    }

    pub fn state(&self) -> StreamState {
        *lock(&self.state)
    }

    /// The latest published snapshot, if any message has arrived.
    pub fn current(&self) -> Option<Arc<PortfolioSnapshot>> {
        lock(&self.current).clone()
    }

    /// Opens the channel. Idempotent while the channel is connecting or
    /// open, so a re-rendering view cannot spawn a duplicate; once the
    /// channel has closed this fails with [`ClientError::ChannelClosed`]
    /// rather than silently reconnecting.
    pub fn start(&mut self, identity: &UserIdentity) -> Result<(), ClientError> {
        {
            let mut state = lock(&self.state);
            match *state {
                StreamState::Connecting | StreamState::Open => return Ok(()),
                StreamState::Closed => return Err(ClientError::ChannelClosed),
                StreamState::Idle => *state = StreamState::Connecting,
            }
        }

        let hello = serde_json::to_string(identity).map_err(ClientError::MalformedMessage)?;
        self.task = Some(tokio::spawn(run_channel(
            self.url.clone(),
            hello,
            Arc::clone(&self.state),
            Arc::clone(&self.current),
            self.events.clone(),
        )));
        Ok(())
    }

    /// Tears the channel down, even mid-message. Safe to call any
    /// number of times.
    pub fn stop(&mut self) {
        *lock(&self.state) = StreamState::Closed;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PortfolioStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_channel(
    url: String,
    hello: String,
    state: Arc<Mutex<StreamState>>,
    current: Arc<Mutex<Option<Arc<PortfolioSnapshot>>>>,
    events: UnboundedSender<StreamEvent>,
) {
    let (socket, _) = match connect_async(url.as_str()).await {
        Ok(pair) => pair,
        Err(err) => {
            warn!("portfolio channel connect failed: {}", err);
            close(&state, &events);
            return;
        }
    };

    let (mut sink, mut source) = socket.split();

    // Open acknowledged. The identity payload goes out exactly once,
    // before any inbound message is looked at.
    if sink.send(Message::Text(hello)).await.is_err() {
        warn!("portfolio channel dropped during identity send");
        close(&state, &events);
        return;
    }
    *lock(&state) = StreamState::Open;
    debug!("portfolio channel open: {}", url);

    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => publish(&text, &current, &events),
            Ok(Message::Close(_)) => break,
            Ok(_) => {} // ping/pong/binary frames carry no snapshots
            Err(err) => {
                warn!("portfolio channel transport error: {}", err);
                break;
            }
        }
    }

    close(&state, &events);
}

fn publish(
    text: &str,
    current: &Arc<Mutex<Option<Arc<PortfolioSnapshot>>>>,
    events: &UnboundedSender<StreamEvent>,
) {
    match serde_json::from_str::<PortfolioSnapshotWire>(text) {
        Ok(wire) => {
            let snapshot = Arc::new(PortfolioSnapshot::from(wire));
            *lock(current) = Some(Arc::clone(&snapshot));
            let _ = events.send(StreamEvent::Snapshot(snapshot));
        }
        Err(err) => {
            // A single bad frame must not disturb a long-lived view.
            warn!("dropping malformed portfolio frame: {}", err);
            let _ = events.send(StreamEvent::Malformed(err.to_string()));
        }
    }
}

fn close(state: &Arc<Mutex<StreamState>>, events: &UnboundedSender<StreamEvent>) {
    let mut state = lock(state);
    if *state != StreamState::Closed {
        *state = StreamState::Closed;
        let _ = events.send(StreamEvent::Closed);
    }
}
