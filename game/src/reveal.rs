use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const COUNTDOWN_START: u8 = 3;
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
/// The celebration runs as long as the fireworks session.
pub const CELEBRATION_DURATION: Duration = Duration::from_secs(30);

/// A tiny "time boxed" phase timer with overshoot carry, so one large `dt`
/// can cross several phase boundaries without losing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimer {
    #[serde(with = "crate::serde_duration")]
    elapsed: Duration,
    #[serde(with = "crate::serde_duration")]
    limit: Duration,
}

impl PhaseTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            limit,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn is_up(&self) -> bool {
        self.elapsed >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.limit)
    }

    /// Starts the next phase, carrying `carry` of already-elapsed time.
    pub fn restart(&mut self, limit: Duration, carry: Duration) {
        self.limit = limit;
        self.elapsed = carry;
    }
}

/// Phases of the final screen, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Big digits 3..0, one tick per second; `current` is the digit shown.
    Countdown { current: u8 },
    /// Message + confetti + melody + fireworks, all at once.
    Celebrate,
    Done,
}

/// One-shot things the shell must do as phases change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealCue {
    CountdownTick(u8),
    ShowMessage,
    SpawnConfetti,
    PlayRevealMelody,
    StartFireworks,
    FireworksEnded,
}

/// Explicit phase table for countdown -> celebration -> done.
///
/// Replaces the original's nest of chained timers: each phase has a fixed
/// duration, and transitions surface their side-effects as `RevealCue`
/// values, so the whole sequence is pure and steppable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSequence {
    phase: RevealPhase,
    timer: PhaseTimer,
}

impl RevealSequence {
    /// Enters the countdown. The first tick cue (the visible "3") fires
    /// immediately via `begin`.
    pub fn new() -> Self {
        Self {
            phase: RevealPhase::Countdown {
                current: COUNTDOWN_START,
            },
            timer: PhaseTimer::new(COUNTDOWN_TICK),
        }
    }

    /// Cues for entering the sequence.
    pub fn begin(&self) -> Vec<RevealCue> {
        vec![RevealCue::CountdownTick(COUNTDOWN_START)]
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == RevealPhase::Done
    }

    /// Time already spent inside the current phase. When one `tick` crosses
    /// a boundary this is the overshoot past it, which is all that things
    /// created by the transition cues have lived through.
    pub fn phase_elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Advances wall-clock time, returning every cue crossed, in order.
    pub fn tick(&mut self, dt: Duration) -> Vec<RevealCue> {
        let mut cues = Vec::new();
        if self.phase == RevealPhase::Done {
            return cues;
        }
        self.timer.tick(dt);

        while self.timer.is_up() && self.phase != RevealPhase::Done {
            let carry = self.timer.overshoot();
            match self.phase {
                RevealPhase::Countdown { current } => {
                    if current > 0 {
                        let next = current - 1;
                        self.phase = RevealPhase::Countdown { current: next };
                        self.timer.restart(COUNTDOWN_TICK, carry);
                        cues.push(RevealCue::CountdownTick(next));
                    } else {
                        // The held "0" second is over; everything starts at
                        // once, 4 s after the reveal stage was entered.
                        self.phase = RevealPhase::Celebrate;
                        self.timer.restart(CELEBRATION_DURATION, carry);
                        cues.push(RevealCue::ShowMessage);
                        cues.push(RevealCue::SpawnConfetti);
                        cues.push(RevealCue::PlayRevealMelody);
                        cues.push(RevealCue::StartFireworks);
                    }
                }
                RevealPhase::Celebrate => {
                    self.phase = RevealPhase::Done;
                    cues.push(RevealCue::FireworksEnded);
                }
                RevealPhase::Done => {}
            }
        }
        cues
    }
}

impl Default for RevealSequence {
    fn default() -> Self {
        Self::new()
    }
}
