//! Widget configuration.
//!
//! Remote endpoint and key are baked in at build time:
//!
//! ```text
//! SUPABASE_URL=https://xyz.supabase.co SUPABASE_ANON_KEY=... trunk build
//! ```
//!
//! Without `SUPABASE_URL` the remote counter is disabled and the global
//! count stays on its loading placeholder.

use crate::engine::{NormalSoundPolicy, SoundId};

/// localStorage key for the local click count.
pub const STORAGE_KEY: &str = "lizard_clicks";

/// Click sounds. `NormalSoundPolicy::Fixed` always plays the first.
pub const CLICK_SOUNDS: &[&str] = &["/sounds/lizard1.mp3"];
pub const GOLDEN_SOUND: &str = "/sounds/golden.mp3";

/// Vibration pulse on click, if the device supports it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const VIBRATE_MS: u32 = 100;

/// Milestone notification stays up this long.
pub const MILESTONE_NOTICE_MS: u32 = 2500;

/// Clock resolution: 20 ticks/sec = 50ms per tick.
pub const TICKS_PER_SEC: u32 = 20;

/// Table and RPC names on the remote datastore.
pub const GLOBAL_TABLE: &str = "global_clicks";
pub const INCREMENT_RPC: &str = "increment_clicks";

/// Convert a display duration to clock ticks, rounding up.
pub fn ms_to_ticks(ms: u32) -> u32 {
    let ms_per_tick = 1000 / TICKS_PER_SEC;
    ms.div_ceil(ms_per_tick)
}

/// Rotate through the click sounds when more than one is configured.
pub fn sound_policy() -> NormalSoundPolicy {
    match CLICK_SOUNDS.len() {
        0 | 1 => NormalSoundPolicy::Fixed,
        n => NormalSoundPolicy::RandomPick(n),
    }
}

/// Asset path for a sound.
pub fn sound_path(sound: SoundId) -> &'static str {
    match sound {
        SoundId::Golden => GOLDEN_SOUND,
        SoundId::Click(i) => CLICK_SOUNDS.get(i).copied().unwrap_or(CLICK_SOUNDS[0]),
    }
}

/// Connection settings for the remote counter.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    /// Read from the build environment.
    pub fn from_build_env() -> Self {
        Self {
            url: option_env!("SUPABASE_URL").unwrap_or_default().to_string(),
            anon_key: option_env!("SUPABASE_ANON_KEY").unwrap_or_default().to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_round_up() {
        assert_eq!(ms_to_ticks(1000), 20);
        assert_eq!(ms_to_ticks(1500), 30);
        assert_eq!(ms_to_ticks(2500), 50);
        assert_eq!(ms_to_ticks(1), 1);
        assert_eq!(ms_to_ticks(0), 0);
    }

    #[test]
    fn sound_paths() {
        assert_eq!(sound_path(SoundId::Golden), GOLDEN_SOUND);
        assert_eq!(sound_path(SoundId::Click(0)), "/sounds/lizard1.mp3");
        // Out-of-range picks fall back to the first sound.
        assert_eq!(sound_path(SoundId::Click(99)), "/sounds/lizard1.mp3");
    }

    #[test]
    fn single_click_sound_is_fixed() {
        assert_eq!(CLICK_SOUNDS.len(), 1);
        assert_eq!(sound_policy(), NormalSoundPolicy::Fixed);
    }

    #[test]
    fn remote_urls() {
        let cfg = RemoteConfig {
            url: "https://abc.supabase.co/".into(),
            anon_key: "k".into(),
        };
        assert!(cfg.is_enabled());
        assert_eq!(
            cfg.rest_url("rpc/increment_clicks"),
            "https://abc.supabase.co/rest/v1/rpc/increment_clicks"
        );
    }

    #[test]
    fn empty_url_disables_remote() {
        let cfg = RemoteConfig {
            url: "  ".into(),
            anon_key: String::new(),
        };
        assert!(!cfg.is_enabled());
    }
}
