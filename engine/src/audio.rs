//! Oscillator-based sfx synthesis.
//!
//! Tones are rendered offline into sample buffers; playback (and whether
//! playback is possible at all) is the caller's concern.

use std::f32::consts::TAU;
use std::time::Duration;

/// Gain at the start of a tone.
pub const TONE_PEAK_GAIN: f32 = 0.3;
/// Gain the envelope decays to by the end of a tone.
pub const TONE_FLOOR_GAIN: f32 = 0.01;
/// Stagger between successive melody notes.
pub const MELODY_NOTE_SPACING: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Saw,
}

fn waveform_sample(wave: Waveform, phase: f32) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Triangle => (2.0 / std::f32::consts::PI) * phase.sin().asin(),
        Waveform::Square => {
            if phase.sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Saw => 2.0 * (phase / TAU) - 1.0,
    }
}

/// Exponential decay envelope from `TONE_PEAK_GAIN` to `TONE_FLOOR_GAIN`
/// over the life of a tone. `progress` is in [0, 1].
pub fn tone_gain(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    TONE_PEAK_GAIN * (TONE_FLOOR_GAIN / TONE_PEAK_GAIN).powf(p)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration: Duration,
    pub waveform: Waveform,
}

impl Tone {
    pub fn sine(freq_hz: f32, duration: Duration) -> Self {
        Self {
            freq_hz,
            duration,
            waveform: Waveform::Sine,
        }
    }
}

/// Renders one tone as mono f32 samples.
pub fn render_tone(tone: Tone, sample_rate: u32) -> Vec<f32> {
    let sample_rate = sample_rate.max(1);
    let total = (tone.duration.as_secs_f32() * sample_rate as f32).round() as usize;
    let mut samples = Vec::with_capacity(total);
    let phase_delta = TAU * tone.freq_hz / sample_rate as f32;
    let mut phase = 0.0f32;
    for i in 0..total {
        let progress = if total > 1 {
            i as f32 / (total - 1) as f32
        } else {
            1.0
        };
        samples.push(waveform_sample(tone.waveform, phase) * tone_gain(progress));
        phase = (phase + phase_delta) % TAU;
    }
    samples
}

/// A short sequence of tones, each starting `note_spacing` after the last.
/// Notes overlap when the spacing is shorter than the note duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Melody {
    pub notes: Vec<Tone>,
    pub note_spacing: Duration,
}

impl Melody {
    pub fn from_frequencies(freqs_hz: &[f32], note_duration: Duration) -> Self {
        Self {
            notes: freqs_hz
                .iter()
                .map(|&f| Tone::sine(f, note_duration))
                .collect(),
            note_spacing: MELODY_NOTE_SPACING,
        }
    }

    pub fn total_duration(&self) -> Duration {
        let Some(last) = self.notes.last() else {
            return Duration::ZERO;
        };
        self.note_spacing * (self.notes.len() as u32 - 1) + last.duration
    }
}

/// Renders a melody as one mixed mono buffer.
pub fn render_melody(melody: &Melody, sample_rate: u32) -> Vec<f32> {
    let sample_rate = sample_rate.max(1);
    let total = (melody.total_duration().as_secs_f32() * sample_rate as f32).round() as usize;
    let mut mixed = vec![0.0f32; total];
    let spacing_samples =
        (melody.note_spacing.as_secs_f32() * sample_rate as f32).round() as usize;

    for (i, &note) in melody.notes.iter().enumerate() {
        let offset = i * spacing_samples;
        for (j, sample) in render_tone(note, sample_rate).into_iter().enumerate() {
            if let Some(slot) = mixed.get_mut(offset + j) {
                *slot = (*slot + sample).clamp(-1.0, 1.0);
            }
        }
    }
    mixed
}
