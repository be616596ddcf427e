//! Staged entrance choreography on a deterministic clock.
//!
//! Activating the field kicks off a two-stage reveal: the expansion plays
//! for a beat, the portfolio view is revealed, and shortly after the
//! entrance overlay fades out. The stages are entries on a [`Timeline`]
//! so hosts and tests drive the clock explicitly instead of waiting on
//! real timers.

use fx_engine_core::Timeline;

/// Expansion plays this long before the reveal fires.
pub const REVEAL_DELAY_MS: f64 = 1500.0;
/// Gap between the reveal and the overlay fade.
pub const FADE_DELAY_MS: f64 = 100.0;

/// Events a host reacts to (swap views, toggle the overlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceEvent {
    /// Bring the revealed view in behind the animation.
    Reveal,
    /// Fade the entrance overlay out.
    Fade,
}

/// Where the choreography currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceState {
    /// Nothing scheduled; activation has not happened.
    Idle,
    /// Activated; waiting out the expansion beat.
    Engaged,
    /// Reveal fired; waiting for the fade.
    Revealed,
    /// Fade fired; the sequence is over.
    Complete,
}

/// The activate → reveal → fade sequence as a small state machine.
///
/// Drive it with [`tick`](EntranceSequence::tick) using the same clock the
/// field's `advance` uses. Each stage schedules the next relative to the
/// tick that processed it, the way chained UI timers fire.
#[derive(Debug, Clone)]
pub struct EntranceSequence {
    timeline: Timeline<EntranceEvent>,
    state: EntranceState,
}

impl Default for EntranceSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl EntranceSequence {
    /// Creates an idle sequence.
    pub fn new() -> Self {
        Self {
            timeline: Timeline::new(),
            state: EntranceState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> EntranceState {
        self.state
    }

    /// Starts the sequence at `now_ms`. Returns false (and does nothing) if
    /// it already ran or is running.
    pub fn activate(&mut self, now_ms: f64) -> bool {
        if self.state != EntranceState::Idle {
            return false;
        }
        self.timeline.advance_to(now_ms);
        self.timeline.schedule(REVEAL_DELAY_MS, EntranceEvent::Reveal);
        self.state = EntranceState::Engaged;
        true
    }

    /// Abandons a sequence that has not revealed yet, returning to idle.
    /// Returns false once the reveal has fired (the transition is one-way
    /// from there).
    pub fn cancel(&mut self) -> bool {
        if self.state != EntranceState::Engaged {
            return false;
        }
        self.timeline.clear();
        self.state = EntranceState::Idle;
        true
    }

    /// Advances the clock and returns the events that fired, in order.
    ///
    /// A stage's follow-up is scheduled relative to the tick that processed
    /// it, so a coarse clock fires at most one stage per tick.
    pub fn tick(&mut self, now_ms: f64) -> Vec<EntranceEvent> {
        let fired = self.timeline.advance_to(now_ms);
        for event in &fired {
            match event {
                EntranceEvent::Reveal => {
                    self.state = EntranceState::Revealed;
                    self.timeline.schedule(FADE_DELAY_MS, EntranceEvent::Fade);
                }
                EntranceEvent::Fade => {
                    self.state = EntranceState::Complete;
                }
            }
        }
        fired
    }
}
