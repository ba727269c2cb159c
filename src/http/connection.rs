use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::{debug, warn};

use crate::http::parser::{ParseError, read_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::AppState;

/// Serves exactly one request on one accepted stream, then closes it.
pub struct Connection<S> {
    stream: BufReader<S>,
    peer: SocketAddr,
    app: Arc<AppState>,
    read_timeout: Option<Duration>,
}

enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, app: Arc<AppState>) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
            app,
            read_timeout: None,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Runs read → route → handle → write. A request that cannot be parsed
    /// closes the connection without a response and is not an error for the
    /// caller; a response that cannot be encoded or written is.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut state = ConnectionState::Reading;

        loop {
            state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(request) => ConnectionState::Processing(request),
                    Err(e) => {
                        warn!(peer = %self.peer, error = %e, "Failed to parse request");
                        ConnectionState::Closed
                    }
                },

                ConnectionState::Processing(request) => {
                    let response = self.dispatch(&request).await;
                    debug!(
                        peer = %self.peer,
                        method = %request.method,
                        path = %request.path,
                        status = response.status.as_u16(),
                        "Handled request"
                    );
                    ConnectionState::Writing(ResponseWriter::new(&response)?)
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, read_request(&mut self.stream))
                .await
                .map_err(|_| {
                    ParseError::ConnectionRead(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "timed out waiting for request",
                    ))
                })?,
            None => read_request(&mut self.stream).await,
        }
    }

    async fn dispatch(&self, request: &Request) -> Response {
        match self.app.router.find(&request.path) {
            Some((endpoint, params)) => endpoint.handle(request, &params, &self.app.store).await,
            None => Response::not_found(),
        }
    }
}
