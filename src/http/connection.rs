use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Upper bound on the single read taken from a connection.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Serves exactly one request over a stream, then closes it.
pub struct Connection<S> {
    stream: S,
    router: Arc<Router>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            router,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(req) => ConnectionState::Processing(req),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(req).await?;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request served"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("failed to write response")?;
                    // One request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        let _ = self.stream.shutdown().await;
        Ok(())
    }

    /// Takes one bounded read and parses it.
    ///
    /// Returns `None` when the peer sent nothing or the bytes do not form a
    /// request; the connection is then closed without a response.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let n = self
            .stream
            .read_buf(&mut self.buffer)
            .await
            .context("failed to read request")?;

        if n == 0 {
            // Client closed connection
            return Ok(None);
        }

        match parse_http_request(&self.buffer) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                warn!(error = %e, bytes = n, "Dropping malformed request");
                Ok(None)
            }
        }
    }
}
