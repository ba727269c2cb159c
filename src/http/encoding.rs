//! Content negotiation and gzip body encoding.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Body encodings the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    #[default]
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Picks an encoding from an `Accept-Encoding` header value.
    ///
    /// Gzip is chosen only when one of the comma-separated tokens, trimmed of
    /// surrounding whitespace, is exactly `gzip`. Quality values are not
    /// interpreted, so `gzip;q=0` does not count.
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        let accepts_gzip = accept_encoding
            .map(|value| value.split(',').any(|token| token.trim() == "gzip"))
            .unwrap_or(false);

        if accepts_gzip {
            ContentEncoding::Gzip
        } else {
            ContentEncoding::Identity
        }
    }

    /// The `Content-Encoding` header value, or `None` for identity.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some("gzip"),
        }
    }
}

/// Gzip-compresses `data` at the default level.
pub fn gzip_compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
