mod builder;
mod download;
mod input;

pub use builder::WebBuilder;

use wasm_bindgen::prelude::*;

/// WASM entry point. Sets the panic hook and initializes logging.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("voxelsand builder starting...");
}

/// Show a user-visible error, not just a console line.
pub(crate) fn show_error_to_user(msg: &str) {
    log::error!("{msg}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(msg);
    }
}
