//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 server side: one request per connection, no
//! keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Drives one accepted stream through the state machine below
//! - **`parser`**: Reads a request line, headers and a fixed-length body off a stream
//! - **`request`**: HTTP request representation
//! - **`response`**: Status codes, content types and the response builder
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip compression
//! - **`writer`**: Serializes a response and writes it to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse one request
//!        └──────┬──────┘
//!               │ Request parsed        (parse error → Closed, nothing sent)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the endpoint
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Headers, then body
//!        └──────┬───────────┘
//!               │
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
