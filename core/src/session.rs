use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running,
    Ended,
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PickOutcome {
    /// Odd tile found, score advanced and a new round is up.
    Hit,
    /// Wrong tile, nothing changed.
    Miss,
}

impl PickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Hit => true,
            Self::Miss => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    TimeUp(SessionSummary),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            NoChange => false,
            Ticked => true,
            TimeUp(_) => true,
        }
    }
}

/// Result of a finished session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: Score,
    pub best: Score,
    pub new_best: bool,
    pub rank: Rank,
}

/// Timed session: owns score, countdown and the current round.
///
/// Time is never read from a clock here, callers pass `now` in. The countdown
/// is derived from a fixed deadline, so a late or skipped tick never adds
/// time back.
#[derive(Debug)]
pub struct Session<G, S> {
    config: SessionConfig,
    generator: G,
    store: S,
    state: SessionState,
    ends_at: Option<Instant>,
    seconds_left: u32,
    score: Score,
    best: Score,
    round: Option<Round>,
}

impl<G: RoundGenerator, S: ScoreStore> Session<G, S> {
    pub fn new(config: SessionConfig, generator: G, store: S) -> Self {
        let best = store.load_best();
        log::debug!("loaded best score {}", best);
        Self {
            config,
            generator,
            store,
            state: SessionState::Idle,
            ends_at: None,
            seconds_left: config.duration_secs,
            score: 0,
            best,
            round: None,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn best(&self) -> Score {
        self.best
    }

    pub fn level(&self) -> Level {
        level_for_score(self.score)
    }

    pub fn rank(&self) -> Rank {
        Rank::from_score(self.score)
    }

    pub fn best_rank(&self) -> Rank {
        Rank::from_score(self.best)
    }

    /// The round in play, or the last one played once the session ended.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Difficulty the current level is played at, even before the first round.
    pub fn difficulty(&self) -> Difficulty {
        self.round
            .as_ref()
            .map(|round| Difficulty {
                size: round.size(),
                delta_l: round.delta_l(),
            })
            .unwrap_or_else(|| self.generator.curve().compute(self.level()))
    }

    pub fn share_card(&self) -> ShareCard {
        ShareCard::new(self.score, self.best, self.round.as_ref())
    }

    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(GameError::AlreadyStarted);
        }

        let duration = Duration::from_secs(u64::from(self.config.duration_secs));
        self.ends_at = Some(now + duration);
        self.seconds_left = self.config.duration_secs;
        self.score = 0;
        let level = self.level();
        self.round = Some(self.generator.generate(level));
        self.state = SessionState::Running;
        log::debug!("session started, {}s on the clock", self.seconds_left);
        Ok(())
    }

    /// Recomputes the countdown from the deadline and ends the session once
    /// it runs out.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let (true, Some(ends_at)) = (self.state.is_running(), self.ends_at) else {
            return TickOutcome::NoChange;
        };

        let remaining = ends_at.saturating_duration_since(now);
        let seconds_left = Self::whole_seconds_ceil(remaining);

        if seconds_left == 0 {
            self.seconds_left = 0;
            log::debug!("time up with score {}", self.score);
            return TickOutcome::TimeUp(self.finish());
        }

        if seconds_left != self.seconds_left {
            log::trace!("{}s left", seconds_left);
            self.seconds_left = seconds_left;
            TickOutcome::Ticked
        } else {
            TickOutcome::NoChange
        }
    }

    pub fn pick(&mut self, index: TileIndex, now: Instant) -> Result<PickOutcome> {
        self.tick(now);
        self.check_running()?;

        let round = self.round.as_ref().ok_or(GameError::NotRunning)?;
        let index = round.validate_index(index)?;

        if !round.is_target(index) {
            log::trace!("miss at tile {}", index);
            return Ok(PickOutcome::Miss);
        }

        self.score = self.score.saturating_add(1);
        let level = self.level();
        self.round = Some(self.generator.generate(level));
        log::debug!("hit at tile {}, score {}", index, self.score);
        Ok(PickOutcome::Hit)
    }

    /// Ends a running session before the timer does.
    pub fn end(&mut self) -> Result<SessionSummary> {
        self.check_running()?;
        Ok(self.finish())
    }

    /// Back to idle. From a running session this abandons it without
    /// recording the score.
    pub fn reset(&mut self) {
        if self.state.is_running() {
            log::debug!("session abandoned with score {}", self.score);
        }
        self.state = SessionState::Idle;
        self.ends_at = None;
        self.seconds_left = self.config.duration_secs;
        self.score = 0;
        self.round = None;
    }

    pub fn play_again(&mut self, now: Instant) -> Result<()> {
        if !self.state.is_ended() {
            return Err(GameError::NotEnded);
        }
        self.reset();
        self.start(now)
    }

    fn finish(&mut self) -> SessionSummary {
        self.state = SessionState::Ended;
        self.ends_at = None;

        let new_best = self.score > self.best;
        if new_best {
            self.best = self.score;
            self.store.save_best(self.best);
        }
        log::debug!(
            "session ended: score {}, best {}, new best: {}",
            self.score,
            self.best,
            new_best
        );

        SessionSummary {
            score: self.score,
            best: self.best,
            new_best,
            rank: self.rank(),
        }
    }

    fn check_running(&self) -> Result<()> {
        if self.state.is_running() {
            Ok(())
        } else {
            Err(GameError::NotRunning)
        }
    }

    fn whole_seconds_ceil(duration: Duration) -> u32 {
        let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
        secs.try_into().unwrap_or(u32::MAX)
    }
}
