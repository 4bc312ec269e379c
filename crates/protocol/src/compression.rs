//! Payload-level compression
//!
//! Transport compression is handled by the framing layer. Two older
//! encodings compress data inside an otherwise plain message: 1.7 column
//! payloads are zlib streams and 1.7 item NBT is gzip.

use blockwire_core::{Result, WireError};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// Compression method embedded in a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCompression {
    Zlib,
    Gzip,
}

/// Decompress data, refusing to inflate past `max_size` bytes
pub fn decompress(data: &[u8], method: PayloadCompression, max_size: usize) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    let read = match method {
        PayloadCompression::Zlib => ZlibDecoder::new(data)
            .take(max_size as u64 + 1)
            .read_to_end(&mut decompressed),
        PayloadCompression::Gzip => GzDecoder::new(data)
            .take(max_size as u64 + 1)
            .read_to_end(&mut decompressed),
    };
    read.map_err(|e| WireError::Compression(format!("{:?} stream: {}", method, e)))?;
    if decompressed.len() > max_size {
        return Err(WireError::Compression(format!(
            "{:?} stream inflates past {} bytes",
            method, max_size
        )));
    }
    Ok(decompressed)
}

/// Test payload builder
#[cfg(test)]
pub(crate) fn compress(data: &[u8], method: PayloadCompression) -> Vec<u8> {
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    match method {
        PayloadCompression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        PayloadCompression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_roundtrip() {
        let original = b"Hello, World! This is a test of the compression system.";

        let compressed = compress(original, PayloadCompression::Zlib);
        let decompressed = decompress(&compressed, PayloadCompression::Zlib, 1024).unwrap();

        assert_eq!(original, &decompressed[..]);
    }

    #[test]
    fn test_gzip_roundtrip() {
        let original = b"\x0a\x00\x00\x00";

        let compressed = compress(original, PayloadCompression::Gzip);
        let decompressed = decompress(&compressed, PayloadCompression::Gzip, 16).unwrap();

        assert_eq!(original, &decompressed[..]);
    }

    #[test]
    fn test_inflate_limit() {
        let original = vec![0u8; 4096];
        let compressed = compress(&original, PayloadCompression::Zlib);
        assert!(decompress(&compressed, PayloadCompression::Zlib, 4095).is_err());
        assert_eq!(
            decompress(&compressed, PayloadCompression::Zlib, 4096).unwrap().len(),
            4096
        );
    }

    #[test]
    fn test_garbage_is_compression_error() {
        let err = decompress(b"not zlib", PayloadCompression::Zlib, 64).unwrap_err();
        assert!(matches!(err, WireError::Compression(_)));
        assert!(err.is_recoverable());
    }
}
