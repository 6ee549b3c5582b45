#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

use crate::state::tuning::{SwipeTuning, TUNING_STORAGE_KEY};

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{msg}");
}

/// Debug-build only logging for the per-gesture chatter.
pub fn dlog(msg: &str) {
    if cfg!(debug_assertions) {
        clog(msg);
    }
}

/// Tuning from localStorage, falling back to defaults when absent or invalid.
pub fn load_tuning() -> SwipeTuning {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(TUNING_STORAGE_KEY).ok().flatten());
    let Some(raw) = raw else {
        return SwipeTuning::default();
    };
    match SwipeTuning::from_json(&raw) {
        Ok(t) => {
            clog(&format!("using tuning override from `{}`", TUNING_STORAGE_KEY));
            t
        }
        Err(e) => {
            clog(&format!("ignoring `{}`: {}", TUNING_STORAGE_KEY, e));
            SwipeTuning::default()
        }
    }
}
