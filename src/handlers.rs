//! The server's endpoints.
//!
//! Each route in the table maps to one [`Endpoint`] variant, and every variant
//! turns a request plus its path parameters into a [`Response`].

use tracing::{debug, error};

use crate::http::encoding::ContentEncoding;
use crate::http::request::{Method, Request};
use crate::http::response::{ContentType, Response, ResponseBuilder, StatusCode};
use crate::router::{Params, Router};
use crate::store::FileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/` - always an empty 200
    Index,
    /// `/echo/:message` - the raw `message` segment, gzip when accepted
    Echo,
    /// `/user-agent` - the `User-Agent` header
    UserAgent,
    /// `/files/:filename` - read (GET) or write (POST) a file
    Files,
}

/// The route table this server runs with.
pub fn routes() -> Router<Endpoint> {
    Router::new()
        .route("/", Endpoint::Index)
        .route("/echo/:message", Endpoint::Echo)
        .route("/user-agent", Endpoint::UserAgent)
        .route("/files/:filename", Endpoint::Files)
}

impl Endpoint {
    pub async fn handle(&self, request: &Request, params: &Params, store: &FileStore) -> Response {
        match self {
            Endpoint::Index => Response::empty(StatusCode::Ok),
            Endpoint::Echo => echo(request, params),
            Endpoint::UserAgent => Response::ok(request.user_agent().unwrap_or_default()),
            Endpoint::Files => files(request, params, store).await,
        }
    }
}

fn echo(request: &Request, params: &Params) -> Response {
    let message = params.get("message").map(String::as_str).unwrap_or_default();

    ResponseBuilder::new(StatusCode::Ok)
        .body(message)
        .encoding(ContentEncoding::negotiate(request.accept_encoding()))
        .build()
}

async fn files(request: &Request, params: &Params, store: &FileStore) -> Response {
    let filename = params.get("filename").map(String::as_str).unwrap_or_default();

    if !is_safe_filename(filename) {
        debug!(filename, "Rejected file name");
        return Response::empty(StatusCode::BadRequest);
    }

    match request.method {
        Method::GET => read_file(store, filename).await,
        Method::POST => write_file(store, filename, &request.body).await,
        _ => Response::empty(StatusCode::MethodNotAllowed),
    }
}

async fn read_file(store: &FileStore, filename: &str) -> Response {
    debug!(path = %store.path_for(filename).display(), "Reading file");

    match store.read(filename).await {
        Ok(Some(contents)) => octet_stream(StatusCode::Ok, contents),
        Ok(None) => Response::not_found(),
        Err(e) => {
            error!(filename, error = %e, "Failed to read file");
            Response::internal_error()
        }
    }
}

async fn write_file(store: &FileStore, filename: &str, body: &[u8]) -> Response {
    debug!(path = %store.path_for(filename).display(), bytes = body.len(), "Writing file");

    if let Err(e) = store.write(filename, body).await {
        error!(filename, error = %e, "Failed to write file");
        return Response::internal_error();
    }

    match store.read(filename).await {
        Ok(Some(written)) => octet_stream(StatusCode::Created, written),
        Ok(None) => {
            error!(filename, "Written file vanished before read-back");
            Response::internal_error()
        }
        Err(e) => {
            error!(filename, error = %e, "Failed to read back written file");
            Response::internal_error()
        }
    }
}

fn octet_stream(status: StatusCode, body: Vec<u8>) -> Response {
    ResponseBuilder::new(status)
        .content_type(ContentType::OctetStream)
        .body(body)
        .build()
}

/// A file name must stay inside the store directory: no parent or self
/// references, no separators, no NUL.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
