//! Image payloads that pass data-URI validation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// PNG signature followed by an IHDR chunk header.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

/// `data:image/png;base64,...` over [`PNG_BYTES`].
pub fn png_data_uri() -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(PNG_BYTES))
}
