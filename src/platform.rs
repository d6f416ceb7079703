//! Browser side effects of a click: sound and vibration.
//!
//! Both are optional: failures are logged, missing APIs are ignored.

use crate::config::sound_path;
#[cfg(target_arch = "wasm32")]
use crate::config::VIBRATE_MS;
use crate::engine::SoundId;

#[cfg(target_arch = "wasm32")]
pub fn play(sound: SoundId) {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    let path = sound_path(sound);
    let audio = match HtmlAudioElement::new_with_src(path) {
        Ok(a) => a,
        Err(e) => {
            log::error!("audio init failed for {path}: {e:?}");
            return;
        }
    };
    match audio.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            // Autoplay policies reject the promise instead of throwing.
            if let Err(e) = JsFuture::from(promise).await {
                log::error!("audio playback failed for {path}: {e:?}");
            }
        }),
        Err(e) => log::error!("audio playback failed for {path}: {e:?}"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn vibrate() {
    if let Some(window) = web_sys::window() {
        // Browsers without the Vibration API return false.
        let _ = window.navigator().vibrate_with_duration(VIBRATE_MS);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn play(sound: SoundId) {
    log::info!("play {}", sound_path(sound));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn vibrate() {}
