//! Response content encodings.

use std::io::{self, Read};

use flate2::Compression;
use flate2::read::GzEncoder;

const ENCODING_GZIP: &str = "gzip";

/// Content codings the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// Picks an encoding from an `Accept-Encoding` value.
    ///
    /// The value is not tokenized: `gzip` anywhere in it selects gzip, so
    /// `deflate, gzip`, `gzip;q=0.5` and `x-gzip` all match.
    pub fn negotiate(accept_encoding: &str) -> Option<Self> {
        if accept_encoding.contains(ENCODING_GZIP) {
            Some(Encoding::Gzip)
        } else {
            None
        }
    }

    /// Token used in the `Content-Encoding` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => ENCODING_GZIP,
        }
    }

    /// Encodes `payload` with standard gzip framing.
    pub fn compress(&self, payload: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoded = Vec::new();
        match self {
            Encoding::Gzip => {
                GzEncoder::new(payload, Compression::default()).read_to_end(&mut encoded)?
            }
        };
        Ok(encoded)
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;

    #[test]
    fn gzip_output_decodes_to_input() {
        let encoded = Encoding::Gzip.compress(b"abc").unwrap();
        assert_eq!(&encoded[..2], &[0x1f, 0x8b]);

        let mut decoded = String::new();
        GzDecoder::new(&encoded[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn negotiate_matches_substring() {
        assert_eq!(Encoding::negotiate("deflate, gzip, br"), Some(Encoding::Gzip));
        assert_eq!(Encoding::negotiate("invalid-encoding"), None);
        assert_eq!(Encoding::negotiate(""), None);
    }
}
