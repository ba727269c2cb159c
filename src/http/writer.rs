use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::encoding::{ContentEncoding, gzip_compress};
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to compress response body: {0}")]
    CompressionFailure(#[source] std::io::Error),
    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the header block for a body of `body_len` bytes as sent.
fn serialize_head(resp: &Response, body_len: usize) -> Vec<u8> {
    let mut head = format!(
        "{} {} {}\r\nContent-Type: {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase(),
        resp.content_type.as_str()
    );

    if let Some(encoding) = resp.encoding.header_value() {
        head.push_str("Content-Encoding: ");
        head.push_str(encoding);
        head.push_str("\r\n");
    }

    head.push_str(&format!("Content-Length: {}\r\n\r\n", body_len));
    head.into_bytes()
}

fn encode_body(resp: &Response) -> Result<Vec<u8>, WriteError> {
    match resp.encoding {
        ContentEncoding::Identity => Ok(resp.body.clone()),
        ContentEncoding::Gzip => gzip_compress(&resp.body).map_err(WriteError::CompressionFailure),
    }
}

/// Serializes a whole response into one buffer.
pub fn serialize_response(resp: &Response) -> Result<Vec<u8>, WriteError> {
    let writer = ResponseWriter::new(resp)?;
    let mut buf = writer.head;
    buf.extend_from_slice(&writer.body);
    Ok(buf)
}

/// A response already encoded and ready to be written.
///
/// Compression happens in [`ResponseWriter::new`], so a compressor failure
/// surfaces before a single byte reaches the connection.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Result<Self, WriteError> {
        let body = encode_body(response)?;
        let head = serialize_head(response, body.len());
        Ok(Self { head, body })
    }

    pub fn head(&self) -> &[u8] {
        &self.head
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Writes the header block, then the body. Either stage failing fails
    /// the whole response.
    pub async fn write_to_stream<W>(&self, stream: &mut W) -> Result<(), WriteError>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head).await?;
        stream.write_all(&self.body).await?;
        stream.flush().await?;
        Ok(())
    }
}
