//! Local click count persistence.
//!
//! One integer under [`STORAGE_KEY`](crate::config::STORAGE_KEY), written as
//! JSON after every click. Read failures count as "no save"; an unparsable
//! value is deleted so the next mount starts clean. Writes are best-effort.

/// Decode a stored value. Anything but a non-negative integer is `None`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn decode(text: &str) -> Option<u64> {
    serde_json::from_str::<u64>(text.trim()).ok()
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn encode(count: u64) -> String {
    // A bare u64 always serializes.
    serde_json::to_string(&count).unwrap_or_else(|_| count.to_string())
}

/// Browser localStorage; `None` when unavailable (private mode, no window).
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Last persisted local count, if any.
#[cfg(target_arch = "wasm32")]
pub fn load_clicks() -> Option<u64> {
    use crate::config::STORAGE_KEY;

    let storage = get_storage()?;
    let text = match storage.get_item(STORAGE_KEY) {
        Ok(Some(t)) => t,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("localStorage read failed: {e:?}");
            return None;
        }
    };

    match decode(&text) {
        Some(count) => Some(count),
        None => {
            log::warn!("discarding unreadable saved click count {text:?}");
            // Drop it so the next mount starts from zero.
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

/// Persist the local count. Failures are logged and otherwise ignored.
#[cfg(target_arch = "wasm32")]
pub fn save_clicks(count: u64) {
    use crate::config::STORAGE_KEY;

    let Some(storage) = get_storage() else {
        return;
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, &encode(count)) {
        log::warn!("localStorage write failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_clicks() -> Option<u64> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_clicks(_count: u64) {}
