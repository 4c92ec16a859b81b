//! Output event sink
//!
//! [`EventSink`] is the only way use cases hand events to the client
//! connection. It forwards events in order over a bounded channel and
//! guarantees the stream is closed by exactly one terminal event.

use ragcast_domain::OutputEvent;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

/// The client side of the channel is gone.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Client disconnected")]
pub struct ClientDisconnected;

/// Counts of events handed to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub text_chunks: usize,
    pub audio_chunks: usize,
    pub terminated: bool,
}

/// Ordered, terminal-guarded event sink for one session.
pub struct EventSink {
    sender: mpsc::Sender<OutputEvent>,
    stats: EmitStats,
}

impl EventSink {
    pub fn new(sender: mpsc::Sender<OutputEvent>) -> Self {
        Self {
            sender,
            stats: EmitStats::default(),
        }
    }

    /// Create a sink with its receiving end.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<OutputEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Forward one event.
    ///
    /// Terminal events go through [`finish`](Self::finish); once the sink is
    /// finished further events are dropped.
    pub async fn emit(&mut self, event: OutputEvent) -> Result<(), ClientDisconnected> {
        if event.is_terminal() {
            return self.finish().await;
        }
        if self.stats.terminated {
            warn!("Dropping event emitted after the terminal event");
            return Ok(());
        }
        let is_text = event.text_content().is_some();
        let is_audio = event.is_audio();
        self.sender
            .send(event)
            .await
            .map_err(|_| ClientDisconnected)?;
        if is_text {
            self.stats.text_chunks += 1;
        } else if is_audio {
            self.stats.audio_chunks += 1;
        }
        Ok(())
    }

    /// Send the terminal event. Idempotent.
    pub async fn finish(&mut self) -> Result<(), ClientDisconnected> {
        if self.stats.terminated {
            return Ok(());
        }
        self.stats.terminated = true;
        self.sender
            .send(OutputEvent::Terminal)
            .await
            .map_err(|_| ClientDisconnected)
    }

    /// Resolves once the client side has gone away.
    pub async fn closed(&self) {
        self.sender.closed().await
    }

    pub fn stats(&self) -> EmitStats {
        self.stats
    }
}
