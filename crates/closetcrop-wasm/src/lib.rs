//! Closetcrop WASM - WebAssembly bindings for the crop engine
//!
//! This crate exposes closetcrop-core to a JavaScript UI layer. The UI owns
//! gesture recognition and drawing; everything else happens here.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for bitmaps and source images
//! - `decode` - Photo decoding with EXIF orientation
//! - `session` - The interactive crop session and its result
//! - `encode` - JPEG encoding for the storage handoff
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_source, JsCropSession, set_log_level } from '@closetcrop/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const source = decode_source(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsCropSession(source, 390, 600, undefined);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod error;
mod logger;
mod session;
mod types;

pub use decode::{decode_source, read_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use session::{JsCropResult, JsCropSession};
pub use types::{JsDecodedImage, JsSourceImage};

/// Initialize the WASM module (called automatically on load).
///
/// Routes `log` output from the engine to the browser console at `warn`.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Change the console log level ("off", "error", "warn", "info", "debug",
/// "trace").
///
/// # Errors
///
/// Throws on an unknown level name.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| error::to_js_error(format!("Unknown log level: {}", level)))?;
    logger::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_log_level() {
        assert!(set_log_level("debug").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(set_log_level("chatty").is_err());
    }
}
