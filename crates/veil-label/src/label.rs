#![forbid(unsafe_code)]

//! The reveal/hide label driver.
//!
//! [`Label`] owns the styled buffer, both timing plans, and the animation
//! state machine. The host drives it with monotonic timestamps:
//!
//! ```ignore
//! let mut label = Label::new();
//! label.set_granularity(Granularity::PerCharacter);
//! label.set_text("hello world");
//! label.show_up_with(|outcome| { /* settled */ });
//! // every frame, while label.is_animating():
//! label.tick(clock.now());
//! render(label.styled());
//! ```
//!
//! # State machine
//!
//! `Idle -> Revealing -> Visible -> Hiding -> Hidden -> Revealing -> ...`
//!
//! A start request while a session is in flight is a silent no-op (the new
//! callback is dropped). Reconfiguring text, color, granularity, or either
//! window supersedes any in-flight session: its callback is dropped
//! uninvoked and the buffer and plans are rebuilt atomically before the
//! setter returns.
//!
//! # Invariants
//!
//! 1. The completion callback of a session that runs to the end fires
//!    exactly once, from inside the final `tick`.
//! 2. The buffer is mutated only inside `tick` and the setters, so the host
//!    always reads a full-buffer snapshot.
//! 3. Whitespace is never animated: per-character units skip it, and units
//!    of other granularities only cover tokenizer output.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};
use veil_core::{
    Direction, Granularity, RandomSource, Rgba, TimingPlan, Tokenizer, UnicodeTokenizer,
    UnitRange, XorShift64, opacity_at, units_for,
};

use crate::buffer::StyledBuffer;

/// Default reveal and hide window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(2);

/// Smallest accepted window; shorter settings are clamped up to this.
const MIN_WINDOW: Duration = veil_core::timing::MIN_WINDOW;

/// How an animation session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The window elapsed and the label settled.
    Completed,
    /// [`Label::cancel`] tore the session down early.
    Cancelled,
}

/// Completion callback stored for the in-flight session.
pub type CompletionFn = Box<dyn FnOnce(Outcome)>;

/// Where the label is in its reveal/hide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Fresh or reconfigured; reveal-ready.
    #[default]
    Idle,
    /// A reveal window is in flight.
    Revealing,
    /// Settled fully visible.
    Visible,
    /// A hide window is in flight.
    Hiding,
    /// Settled fully hidden.
    Hidden,
}

/// Live run state for one animation window.
struct Session {
    /// Snapshotted from the first tick's timestamp.
    begin: Option<Duration>,
    window: Duration,
    direction: Direction,
    /// Settled phase to restore if the session is cancelled.
    resume_phase: Phase,
    on_complete: Option<CompletionFn>,
}

/// A text label whose units fade in and out under a frame clock.
pub struct Label {
    text: String,
    text_color: Rgba,
    granularity: Granularity,
    reveal_duration: Duration,
    hide_duration: Duration,
    auto_start: bool,
    tokenizer: Box<dyn Tokenizer>,
    rng: Box<dyn RandomSource>,
    units: Vec<UnitRange>,
    reveal_plan: TimingPlan,
    hide_plan: TimingPlan,
    buffer: StyledBuffer,
    phase: Phase,
    session: Option<Session>,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("granularity", &self.granularity)
            .field("phase", &self.phase)
            .field("units", &self.units.len())
            .field("animating", &self.session.is_some())
            .finish()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl Label {
    /// Create an empty label: no text, white color, granularity disabled,
    /// 2-second windows.
    #[must_use]
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos();
        Self {
            text: String::new(),
            text_color: Rgba::WHITE,
            granularity: Granularity::Disabled,
            reveal_duration: DEFAULT_WINDOW,
            hide_duration: DEFAULT_WINDOW,
            auto_start: false,
            tokenizer: Box::new(UnicodeTokenizer),
            rng: Box::new(XorShift64::new(u64::from(seed))),
            units: Vec::new(),
            reveal_plan: TimingPlan::empty(),
            hide_plan: TimingPlan::empty(),
            buffer: StyledBuffer::new("", Rgba::WHITE),
            phase: Phase::Idle,
            session: None,
        }
    }

    /// Replace the random source (builder). Tests inject a seeded source to
    /// assert exact timing tables.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self.replan();
        self
    }

    /// Replace the word/line tokenizer (builder).
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self.reconfigure();
        self
    }

    // -----------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------

    /// Set the text content. Supersedes any in-flight session, rebuilds the
    /// styled buffer, and recomputes both timing plans.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.reconfigure();
    }

    /// Set the text color (hue for every written attribute).
    pub fn set_text_color(&mut self, color: Rgba) {
        self.text_color = color;
        self.reconfigure();
    }

    /// Set the unit granularity.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
        self.reconfigure();
    }

    /// Set the reveal window. Zero durations are clamped to a minimum
    /// positive window. Supersedes any in-flight session and recomputes the
    /// plans; a live session must never read timings planned for a
    /// different window.
    pub fn set_reveal_duration(&mut self, duration: Duration) {
        self.reveal_duration = duration.max(MIN_WINDOW);
        self.reconfigure();
    }

    /// Set the hide window. Zero durations are clamped. Supersedes any
    /// in-flight session and recomputes the plans.
    pub fn set_hide_duration(&mut self, duration: Duration) {
        self.hide_duration = duration.max(MIN_WINDOW);
        self.reconfigure();
    }

    /// When enabled, configuring text with an animating granularity arms a
    /// reveal immediately (without a callback).
    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }

    // -----------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------

    /// The text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The configured text color.
    #[must_use]
    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    /// The configured granularity.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The reveal window.
    #[must_use]
    pub fn reveal_duration(&self) -> Duration {
        self.reveal_duration
    }

    /// The hide window.
    #[must_use]
    pub fn hide_duration(&self) -> Duration {
        self.hide_duration
    }

    /// Current phase in the reveal/hide cycle.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a session is in flight (the label wants frames).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Snapshot of the styled buffer the host renders from.
    #[must_use]
    pub fn styled(&self) -> &StyledBuffer {
        &self.buffer
    }

    /// Animation units over the current text.
    #[must_use]
    pub fn units(&self) -> &[UnitRange] {
        &self.units
    }

    /// Timing plan for the given direction.
    #[must_use]
    pub fn plan(&self, direction: Direction) -> &TimingPlan {
        match direction {
            Direction::Reveal => &self.reveal_plan,
            Direction::Hide => &self.hide_plan,
        }
    }

    // -----------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------

    /// Start revealing. No-op unless the phase is reveal-ready
    /// (`Idle`/`Hidden`) and nothing is animating.
    pub fn show_up(&mut self) {
        self.request(Direction::Reveal, None);
    }

    /// [`show_up`](Self::show_up) with a completion callback. With
    /// granularity disabled the callback runs synchronously and the label
    /// never animates.
    pub fn show_up_with(&mut self, on_complete: impl FnOnce(Outcome) + 'static) {
        self.request(Direction::Reveal, Some(Box::new(on_complete)));
    }

    /// Start hiding. No-op unless the label is settled `Visible`.
    pub fn fade_out(&mut self) {
        self.request(Direction::Hide, None);
    }

    /// [`fade_out`](Self::fade_out) with a completion callback.
    pub fn fade_out_with(&mut self, on_complete: impl FnOnce(Outcome) + 'static) {
        self.request(Direction::Hide, Some(Box::new(on_complete)));
    }

    /// Tear down an in-flight session early: the buffer freezes as-is, the
    /// phase returns to the settled phase the run started from, and the
    /// stored callback fires with [`Outcome::Cancelled`].
    pub fn cancel(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.phase = session.resume_phase;
        debug!(phase = ?self.phase, "animation session cancelled");
        if let Some(on_complete) = session.on_complete.take() {
            on_complete(Outcome::Cancelled);
        }
    }

    /// Advance the animation to `now` (a monotonic host timestamp). The
    /// first tick of a session snapshots its begin time; the tick that
    /// passes the window end settles the phase and fires the callback.
    pub fn tick(&mut self, now: Duration) {
        let (begin, window, direction) = match self.session.as_mut() {
            None => return,
            Some(session) => {
                let begin = *session.begin.get_or_insert(now);
                (begin, session.window, session.direction)
            }
        };
        let elapsed = now.saturating_sub(begin);
        self.apply_opacities(elapsed, direction);

        if now > begin + window {
            let mut session = match self.session.take() {
                Some(session) => session,
                None => return,
            };
            self.phase = match direction {
                Direction::Reveal => Phase::Visible,
                Direction::Hide => Phase::Hidden,
            };
            debug!(phase = ?self.phase, "animation window elapsed");
            if let Some(on_complete) = session.on_complete.take() {
                on_complete(Outcome::Completed);
            }
        }
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn request(&mut self, direction: Direction, on_complete: Option<CompletionFn>) {
        if self.is_animating() {
            // New request and callback are dropped, not queued.
            debug!(?direction, "start request ignored: already animating");
            return;
        }
        let facing_ok = match direction {
            Direction::Reveal => matches!(self.phase, Phase::Idle | Phase::Hidden),
            Direction::Hide => matches!(self.phase, Phase::Visible),
        };
        if !facing_ok {
            debug!(?direction, phase = ?self.phase, "start request ignored: wrong phase");
            return;
        }
        if !self.granularity.is_animated() {
            // Driver bypassed entirely; a reveal still reports completion.
            if let Some(on_complete) = on_complete {
                on_complete(Outcome::Completed);
            }
            return;
        }
        if self.units.is_empty() {
            // Nothing to animate; settle immediately.
            self.phase = match direction {
                Direction::Reveal => Phase::Visible,
                Direction::Hide => Phase::Hidden,
            };
            if let Some(on_complete) = on_complete {
                on_complete(Outcome::Completed);
            }
            return;
        }

        let (window, next_phase) = match direction {
            Direction::Reveal => (self.reveal_duration, Phase::Revealing),
            Direction::Hide => (self.hide_duration, Phase::Hiding),
        };
        debug!(?direction, window_ms = window.as_millis() as u64, "animation session armed");
        self.session = Some(Session {
            begin: None,
            window,
            direction,
            resume_phase: self.phase,
            on_complete,
        });
        self.phase = next_phase;
    }

    fn apply_opacities(&mut self, elapsed: Duration, direction: Direction) {
        let plan = match direction {
            Direction::Reveal => &self.reveal_plan,
            Direction::Hide => &self.hide_plan,
        };
        for (unit, timing) in self.units.iter().zip(plan.iter()) {
            let Some(current) = self.buffer.color_at(unit.start) else {
                continue;
            };
            // Idempotence guard: stop touching a unit once it has reached
            // the direction's target alpha.
            let should_update = match direction {
                Direction::Reveal => current.a() < u8::MAX,
                Direction::Hide => current.a() > 0,
            };
            if !should_update {
                continue;
            }
            let opacity = opacity_at(elapsed, *timing, direction);
            self.buffer
                .set_range(*unit, self.text_color.with_opacity(opacity));
        }
    }

    /// Drop an in-flight session without invoking its callback.
    fn supersede(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(direction = ?session.direction, "in-flight session superseded");
            drop(session.on_complete);
        }
    }

    fn plan_for(&mut self, window: Duration) -> TimingPlan {
        match self.granularity {
            Granularity::Disabled => TimingPlan::empty(),
            Granularity::PerCharacter => {
                TimingPlan::randomized(window, self.units.len(), self.rng.as_mut())
            }
            Granularity::PerWord | Granularity::PerLine => {
                TimingPlan::sweep(window, self.units.len())
            }
        }
    }

    fn replan(&mut self) {
        self.reveal_plan = self.plan_for(self.reveal_duration);
        self.hide_plan = self.plan_for(self.hide_duration);
        trace!(units = self.units.len(), "timing plans recomputed");
    }

    /// Rebuild units, buffer, and plans after any text/color/granularity
    /// change. Runs synchronously; the session (if any) is superseded first
    /// so no stale callback can observe the new buffer.
    fn reconfigure(&mut self) {
        self.supersede();
        self.units = units_for(&self.text, self.granularity, self.tokenizer.as_ref());
        self.buffer = StyledBuffer::new(&self.text, self.text_color);
        if self.granularity.is_animated() {
            let hidden = self.text_color.with_alpha(0);
            for unit in &self.units {
                self.buffer.set_range(*unit, hidden);
            }
        }
        self.replan();
        self.phase = Phase::Idle;
        if self.auto_start && self.granularity.is_animated() && !self.units.is_empty() {
            self.request(Direction::Reveal, None);
        }
    }
}
