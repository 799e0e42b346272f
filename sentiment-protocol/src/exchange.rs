//! Server-side handling of one inbound stream.

use crate::wire::{self, QueryResponse};
use sentiment_types::error::TransportError;
use sentiment_types::source::FractionSource;
use sentiment_types::stream::PeerStream;

/// Where an exchange is in its single request/response cycle.
///
/// ```text
/// Reading ──> Processing ──> Writing ──> Closing ──> Closed
///    │             │            ▲           │
///    └──────> Erroring ─────────┘           └──────> ClosedAfterError
/// ```
///
/// An exchange on a stream the remote aborted skips `Writing` and goes
/// straight to `Closing`. Every path ends with the stream closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeState {
    /// Collecting the request until the remote half-closes.
    Reading,
    /// Decoding the request and consulting the source.
    Processing,
    /// Sending the response and half-closing.
    Writing,
    /// Turning a failure into an error response.
    Erroring,
    /// Releasing the stream.
    Closing,
    /// Finished after a normal response.
    Closed,
    /// Finished after an error response, an abort or a failed write.
    ClosedAfterError,
}

impl ExchangeState {
    /// Whether the exchange is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, ExchangeState::Closed | ExchangeState::ClosedAfterError)
    }
}

struct Fault {
    message: String,
    record_id: Option<String>,
}

impl Fault {
    fn new(message: impl Into<String>, record_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            record_id,
        }
    }
}

/// Drive `stream` through one exchange and return the terminal state.
pub(crate) async fn run(
    source: &dyn FractionSource,
    max_payload_bytes: usize,
    mut stream: PeerStream,
) -> ExchangeState {
    let mut state = ExchangeState::Reading;
    let mut payload = Vec::new();
    let mut response: Option<QueryResponse> = None;
    let mut fault: Option<Fault> = None;
    let mut failed = false;

    loop {
        state = match state {
            ExchangeState::Reading => match stream.read_to_end(max_payload_bytes).await {
                Ok(bytes) => {
                    payload = bytes;
                    ExchangeState::Processing
                }
                Err(TransportError::Aborted) => {
                    failed = true;
                    ExchangeState::Closing
                }
                Err(e) => {
                    fault = Some(Fault::new(format!("failed to read request: {e}"), None));
                    ExchangeState::Erroring
                }
            },
            ExchangeState::Processing => match process(source, &payload).await {
                Ok(answer) => {
                    response = Some(answer);
                    ExchangeState::Writing
                }
                Err(f) => {
                    fault = Some(f);
                    ExchangeState::Erroring
                }
            },
            ExchangeState::Erroring => {
                failed = true;
                let Fault { message, record_id } = fault
                    .take()
                    .unwrap_or_else(|| Fault::new("internal error", None));
                tracing::debug!(
                    peer = %stream.remote_peer(),
                    message = %message,
                    "sentiment.server.error_response"
                );
                response = Some(QueryResponse::Error { message, record_id });
                ExchangeState::Writing
            }
            ExchangeState::Writing => {
                if stream.is_aborted() {
                    failed = true;
                } else if let Some(answer) = response.as_ref() {
                    if !write_response(&mut stream, answer).await {
                        failed = true;
                    }
                }
                ExchangeState::Closing
            }
            ExchangeState::Closing => {
                stream.close().await;
                if failed {
                    ExchangeState::ClosedAfterError
                } else {
                    ExchangeState::Closed
                }
            }
            ExchangeState::Closed | ExchangeState::ClosedAfterError => break,
        };
    }

    tracing::debug!(
        peer = %stream.remote_peer(),
        status = response.as_ref().map(QueryResponse::status).unwrap_or("none"),
        outcome = ?state,
        "sentiment.server.exchange"
    );
    state
}

async fn process(source: &dyn FractionSource, payload: &[u8]) -> Result<QueryResponse, Fault> {
    let request = wire::decode_request(payload)
        .map_err(|e| Fault::new(format!("invalid request: {e}"), None))?;
    let record_id = request.record_id;
    match source.fraction_for(&record_id).await {
        Ok(Some(fraction)) => Ok(QueryResponse::Ok {
            record_id,
            fraction,
        }),
        Ok(None) => Ok(QueryResponse::NotFound { record_id }),
        Err(e) => Err(Fault::new(e.to_string(), Some(record_id))),
    }
}

/// Write the response and half-close. A failed write is reported; a failed
/// half-close is only logged.
async fn write_response(stream: &mut PeerStream, response: &QueryResponse) -> bool {
    let bytes = match wire::encode_response(response) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "sentiment.server.encode_failed");
            return false;
        }
    };
    if let Err(e) = stream.write_all(&bytes).await {
        tracing::warn!(peer = %stream.remote_peer(), error = %e, "sentiment.server.write_failed");
        return false;
    }
    if let Err(e) = stream.close_write().await {
        tracing::warn!(
            peer = %stream.remote_peer(),
            error = %e,
            "sentiment.server.half_close_failed"
        );
    }
    true
}
