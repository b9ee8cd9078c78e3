//! Sfx catalog: every tone and melody the experience plays.
//!
//! Volumes are 0.0..=1.0 and validated by tests; synthesis lives in
//! `engine::audio`, playback in the headful shell.

use std::time::Duration;

use engine::audio::{Melody, Tone};

pub const UI_SFX_VOLUME: f32 = 0.35;
pub const SNAP_SFX_VOLUME: f32 = 0.45;
pub const COUNTDOWN_SFX_VOLUME: f32 = 0.4;
pub const MELODY_SFX_VOLUME: f32 = 0.5;

/// Generic UI click (sound toggle, hint).
pub fn click_tone() -> Tone {
    Tone::sine(200.0, Duration::from_millis(100))
}

/// Stage advance / selection confirmation.
pub fn success_tone() -> Tone {
    Tone::sine(400.0, Duration::from_millis(200))
}

/// A tile snapping into its slot.
pub fn snap_tone() -> Tone {
    Tone::sine(300.0, Duration::from_millis(150))
}

/// Rising three-note figure when the puzzle completes.
pub fn complete_melody() -> Melody {
    Melody::from_frequencies(&[400.0, 500.0, 600.0], Duration::from_millis(300))
}

/// Four-note fanfare when the reveal content appears.
pub fn reveal_melody() -> Melody {
    Melody::from_frequencies(&[500.0, 600.0, 700.0, 800.0], Duration::from_millis(400))
}

/// Countdown blip; pitch climbs with the displayed digit.
pub fn countdown_tone(digit: u8) -> Tone {
    Tone::sine(400.0 + digit as f32 * 100.0, Duration::from_millis(300))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_are_normalized() {
        for v in [
            UI_SFX_VOLUME,
            SNAP_SFX_VOLUME,
            COUNTDOWN_SFX_VOLUME,
            MELODY_SFX_VOLUME,
        ] {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn countdown_pitch_climbs_with_digit() {
        assert_eq!(countdown_tone(0).freq_hz, 400.0);
        assert_eq!(countdown_tone(3).freq_hz, 700.0);
    }

    #[test]
    fn melodies_have_expected_shapes() {
        assert_eq!(complete_melody().notes.len(), 3);
        assert_eq!(reveal_melody().notes.len(), 4);
        assert_eq!(reveal_melody().notes[3].freq_hz, 800.0);
    }
}
