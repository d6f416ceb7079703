//! Click engine state definitions.

/// Shake intensity gained per local click.
pub const SHAKE_PER_CLICK: f64 = 0.2;
/// Upper bound for [`ClickState::shake_intensity`].
pub const MAX_SHAKE: f64 = 20.0;

/// Milestone tiers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Milestone {
    None,
    WarmingUp,
    Chill,
    SeekHelp,
    Fingers,
    Royalty,
    Lizard,
}

impl Milestone {
    /// All tiers, highest threshold first (lookup order).
    pub fn all() -> &'static [Milestone] {
        &[
            Milestone::Lizard,
            Milestone::Royalty,
            Milestone::Fingers,
            Milestone::SeekHelp,
            Milestone::Chill,
            Milestone::WarmingUp,
            Milestone::None,
        ]
    }

    /// Minimum local clicks for this tier.
    pub fn threshold(&self) -> u64 {
        match self {
            Milestone::Lizard => 1000,
            Milestone::Royalty => 500,
            Milestone::Fingers => 250,
            Milestone::SeekHelp => 100,
            Milestone::Chill => 50,
            Milestone::WarmingUp => 10,
            Milestone::None => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Milestone::Lizard => "You have become the Lizard.",
            Milestone::Royalty => "You are now Lizard Royalty.",
            Milestone::Fingers => "Are your fingers okay?",
            Milestone::SeekHelp => "Seek help.",
            Milestone::Chill => "Okay chill. It's just a lizard.",
            Milestone::WarmingUp => "You're getting warmed up...",
            Milestone::None => "",
        }
    }

    /// First tier (top-down) whose threshold `clicks` reaches.
    pub fn for_clicks(clicks: u64) -> Milestone {
        Milestone::all()
            .iter()
            .copied()
            .find(|m| clicks >= m.threshold())
            .unwrap_or(Milestone::None)
    }
}

/// Full state of the widget's click counter.
///
/// Only [`super::logic::register_click`] and
/// [`super::logic::apply_global_count`] produce new values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickState {
    local_clicks: u64,
    /// Last value returned by the remote counter; `None` until the first fetch.
    global_clicks: Option<u64>,
    milestone: Milestone,
}

impl ClickState {
    /// State seeded from a persisted local count (or zero).
    pub fn new(local_clicks: u64) -> Self {
        Self {
            local_clicks,
            global_clicks: None,
            milestone: Milestone::for_clicks(local_clicks),
        }
    }

    pub fn local_clicks(&self) -> u64 {
        self.local_clicks
    }

    pub fn global_clicks(&self) -> Option<u64> {
        self.global_clicks
    }

    pub fn milestone(&self) -> Milestone {
        self.milestone
    }

    pub fn milestone_message(&self) -> &'static str {
        self.milestone().message()
    }

    /// Rendering hint in `[0, 20]`.
    pub fn shake_intensity(&self) -> f64 {
        (self.local_clicks as f64 * SHAKE_PER_CLICK).min(MAX_SHAKE)
    }

    pub(super) fn with_local_clicks(self, local_clicks: u64) -> Self {
        Self {
            local_clicks,
            global_clicks: self.global_clicks,
            milestone: Milestone::for_clicks(local_clicks),
        }
    }

    pub(super) fn with_global_clicks(self, global_clicks: u64) -> Self {
        Self {
            global_clicks: Some(global_clicks),
            ..self
        }
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_table_boundaries() {
        assert_eq!(Milestone::for_clicks(0), Milestone::None);
        assert_eq!(Milestone::for_clicks(9), Milestone::None);
        assert_eq!(Milestone::for_clicks(10), Milestone::WarmingUp);
        assert_eq!(Milestone::for_clicks(49), Milestone::WarmingUp);
        assert_eq!(Milestone::for_clicks(50), Milestone::Chill);
        assert_eq!(Milestone::for_clicks(99), Milestone::Chill);
        assert_eq!(Milestone::for_clicks(100), Milestone::SeekHelp);
        assert_eq!(Milestone::for_clicks(250), Milestone::Fingers);
        assert_eq!(Milestone::for_clicks(499), Milestone::Fingers);
        assert_eq!(Milestone::for_clicks(500), Milestone::Royalty);
        assert_eq!(Milestone::for_clicks(999), Milestone::Royalty);
        assert_eq!(Milestone::for_clicks(1000), Milestone::Lizard);
        assert_eq!(Milestone::for_clicks(u64::MAX), Milestone::Lizard);
    }

    #[test]
    fn milestone_messages() {
        assert_eq!(Milestone::None.message(), "");
        assert_eq!(Milestone::WarmingUp.message(), "You're getting warmed up...");
        assert_eq!(Milestone::Chill.message(), "Okay chill. It's just a lizard.");
        assert_eq!(Milestone::SeekHelp.message(), "Seek help.");
        assert_eq!(Milestone::Fingers.message(), "Are your fingers okay?");
        assert_eq!(Milestone::Royalty.message(), "You are now Lizard Royalty.");
        assert_eq!(Milestone::Lizard.message(), "You have become the Lizard.");
    }

    #[test]
    fn lookup_order_is_descending() {
        let thresholds: Vec<u64> = Milestone::all().iter().map(|m| m.threshold()).collect();
        let mut sorted = thresholds.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(thresholds, sorted);
    }

    #[test]
    fn new_state_derives_milestone() {
        let state = ClickState::new(120);
        assert_eq!(state.local_clicks(), 120);
        assert_eq!(state.global_clicks(), None);
        assert_eq!(state.milestone_message(), "Seek help.");
    }

    #[test]
    fn shake_scales_then_caps() {
        assert!((ClickState::new(0).shake_intensity() - 0.0).abs() < f64::EPSILON);
        assert!((ClickState::new(10).shake_intensity() - 2.0).abs() < 1e-9);
        assert!((ClickState::new(100).shake_intensity() - 20.0).abs() < 1e-9);
        assert!((ClickState::new(5000).shake_intensity() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn default_is_fresh_mount() {
        let state = ClickState::default();
        assert_eq!(state.local_clicks(), 0);
        assert_eq!(state.milestone(), Milestone::None);
    }
}
