use crate::error::RoomError;
use crate::transport::{SignalingTransport, TransportEvent};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use pairdesk_core::{ClientSignal, ServerSignal};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

enum Outbound {
    Signal(ClientSignal),
    Shutdown,
}

/// WebSocket signaling client.
///
/// `connect` opens the socket once and spawns a writer task (outbound
/// channel to socket) and a reader task (socket to [`TransportEvent`]s).
/// The socket is torn down exactly once: either by `close()` or by the
/// server going away, and the reader reports `TransportEvent::Closed`
/// when its side ends.
pub struct WsTransport {
    out_tx: mpsc::UnboundedSender<Outbound>,
}

impl WsTransport {
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<TransportEvent>), RoomError> {
        let (stream, _) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| RoomError::Transport(e.to_string()))?;
        info!("Signaling connection established: {}", url);

        let (mut writer, mut reader) = stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Outbound>();
        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>(256);

        tokio::spawn(async move {
            while let Some(out) = out_rx.recv().await {
                match out {
                    Outbound::Signal(signal) => {
                        let json = match serde_json::to_string(&signal) {
                            Ok(json) => json,
                            Err(e) => {
                                warn!("Failed to serialize signal: {}", e);
                                continue;
                            }
                        };
                        if writer.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Outbound::Shutdown => {
                        let _ = writer.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        });

        tokio::spawn(async move {
            while let Some(msg) = reader.next().await {
                match msg {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerSignal>(
                        text.as_str(),
                    ) {
                        Ok(signal) => {
                            if event_tx.send(TransportEvent::Signal(signal)).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => warn!("Dropping unparseable signal: {}", e),
                    },
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }

            info!("Signaling connection closed");
            let _ = event_tx.send(TransportEvent::Closed).await;
        });

        Ok((Self { out_tx }, event_rx))
    }
}

#[async_trait]
impl SignalingTransport for WsTransport {
    async fn send(&self, signal: ClientSignal) -> Result<(), RoomError> {
        self.out_tx
            .send(Outbound::Signal(signal))
            .map_err(|_| RoomError::Closed)
    }

    async fn close(&self) {
        // The writer task exits after the first Shutdown; later ones are
        // send errors on a closed channel and ignored.
        let _ = self.out_tx.send(Outbound::Shutdown);
    }
}
