//! Request dispatch.
//!
//! Routes are tried in table order and the first whose predicate holds wins.
//! `/echo/` and `/files/` are matched by containment anywhere in the path,
//! so the order matters: `/echo/files/x` is an echo, not a file read.

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, warn};

use crate::config::Config;
use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::{OCTET_STREAM, Response, ResponseBuilder, StatusCode, TEXT_PLAIN};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
    NotFound,
}

/// Matching order. `NotFound` is the fallback and is not listed.
const ROUTES: [Route; 5] = [
    Route::Root,
    Route::Echo,
    Route::UserAgent,
    Route::ReadFile,
    Route::WriteFile,
];

impl Route {
    fn matches(&self, req: &Request) -> bool {
        match self {
            Route::Root => req.path == "/",
            Route::Echo => req.path.contains(ECHO_PREFIX),
            Route::UserAgent => req.path == "/user-agent",
            Route::ReadFile => req.path.contains(FILES_PREFIX) && req.method == Method::GET,
            Route::WriteFile => req.path.contains(FILES_PREFIX) && req.method == Method::POST,
            Route::NotFound => true,
        }
    }

    /// Selects the route for a request.
    pub fn select(req: &Request) -> Route {
        ROUTES
            .iter()
            .copied()
            .find(|route| route.matches(req))
            .unwrap_or(Route::NotFound)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Root => "root",
            Route::Echo => "echo",
            Route::UserAgent => "user-agent",
            Route::ReadFile => "read-file",
            Route::WriteFile => "write-file",
            Route::NotFound => "not-found",
        }
    }
}

/// Strips `prefix` from the start of the path. A path that only contains the
/// prefix further in is returned whole.
fn path_suffix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

pub struct Router {
    files: FileStore,
}

impl Router {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            files: FileStore::new(directory),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.directory.clone())
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Produces the response for a request.
    ///
    /// When the client accepts gzip, every response is labelled
    /// `Content-Encoding: gzip`, but only the echo body is compressed.
    /// Fails only if compression fails.
    pub async fn dispatch(&self, req: &Request) -> anyhow::Result<Response> {
        let route = Route::select(req);
        debug!(route = route.name(), path = %req.path, "Route selected");

        let response = match route {
            Route::Root => Response::ok(),
            Route::Echo => self.echo(req)?,
            Route::UserAgent => ResponseBuilder::new(StatusCode::Ok)
                .content_type(TEXT_PLAIN)
                .body(req.user_agent())
                .build(),
            Route::ReadFile => self.read_file(req).await,
            Route::WriteFile => self.write_file(req).await,
            Route::NotFound => Response::not_found(),
        };

        Ok(response.with_encoding(req.accepted_encoding()))
    }

    fn echo(&self, req: &Request) -> anyhow::Result<Response> {
        let value = path_suffix(&req.path, ECHO_PREFIX).as_bytes();

        let body = match req.accepted_encoding() {
            Some(encoding) => encoding
                .compress(value)
                .with_context(|| format!("failed to {encoding}-encode echo body"))?,
            None => value.to_vec(),
        };

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .content_type(TEXT_PLAIN)
            .body(body)
            .build())
    }

    async fn read_file(&self, req: &Request) -> Response {
        let name = path_suffix(&req.path, FILES_PREFIX);

        match self.files.read(name).await {
            Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
                .content_type(OCTET_STREAM)
                .body(contents)
                .build(),
            Err(e) => {
                warn!(file = name, error = %e, "Failed to read file");
                Response::not_found()
            }
        }
    }

    async fn write_file(&self, req: &Request) -> Response {
        let name = path_suffix(&req.path, FILES_PREFIX);

        match self.files.write(name, req.trimmed_body()).await {
            Ok(()) => Response::created(),
            Err(e) => {
                warn!(file = name, error = %e, "Failed to write file");
                Response::not_found()
            }
        }
    }
}
