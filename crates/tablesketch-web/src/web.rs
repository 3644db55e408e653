//! WebAssembly entry point.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // A host that loads the module twice keeps its first logger.
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("tablesketch {} loaded", env!("CARGO_PKG_VERSION"));
    }
}
