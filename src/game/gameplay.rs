//! Turn and season state machine.
//!
//! A [`GamePlay`] owns the events of a scenario and decides which one is
//! played next. Two event sources exist:
//!
//! - **Scenario**: each season holds a queue of authored events, consumed in
//!   order. When the queue of the current season is empty the scenario is
//!   over.
//! - **Sandbox**: each season holds a pool; events are drawn at random and
//!   never consumed, so the game only ends when the player stops.
//!
//! Sandbox draws are a pure function of the game seed and the number of
//! draws so far, which lets a saved game replay the same sequence.
//!
//! A saved game keeps the event cursor as [`SavedEvents`]: event names,
//! resolved against the scenario's events when the game is restored.

use std::collections::{HashMap, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::game::economy::simple_hash;
use crate::game::{Event, GameMode, Season};

/// Events of each season, indexed by [`Season::index`].
pub type SeasonEvents = [Vec<Event>; 4];

/// Where the next event comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// Authored sequence, consumed front to back.
    Scenario {
        /// Unplayed events of each season.
        queues: [VecDeque<Event>; 4],
    },
    /// Random draws from fixed pools.
    Sandbox {
        /// Events that can be drawn in each season.
        pools: SeasonEvents,
        /// Related events waiting to be played before the next draw.
        pending: [VecDeque<Event>; 4],
        /// Seed of every draw.
        seed: u64,
        /// Number of draws done so far.
        draws: u64,
    },
}

/// Event cursor of a saved game, by event name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEvents {
    /// Event of the next turn.
    pub current: Option<String>,
    /// Scenario: events left in each season, in play order, related events
    /// included. Sandbox: related events waiting before the next draw.
    pub queues: [Vec<String>; 4],
    /// Sandbox draws done so far.
    #[serde(default)]
    pub draws: u64,
}

/// Season, year and event cursor of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePlay {
    /// Scenario title.
    name: String,
    /// Scenario introduction.
    story: String,
    /// Season of the first turn.
    first_season: Season,
    /// Season of the turn being played.
    season: Season,
    /// Years completed.
    year: u32,
    /// Event of the turn being played.
    current: Option<Event>,
    /// Number of events each season held when the game was built.
    loaded: [usize; 4],
    /// Event supply.
    source: EventSource,
}

impl GamePlay {
    /// Game that plays the authored events in order.
    #[must_use]
    pub fn scenario(name: impl Into<String>, story: impl Into<String>, first_season: Season, seasons: SeasonEvents) -> Self {
        let queues = seasons.map(VecDeque::from);
        Self::with_source(name.into(), story.into(), first_season, EventSource::Scenario { queues })
    }

    /// Game that draws events at random from each season's pool.
    #[must_use]
    pub fn sandbox(
        name: impl Into<String>,
        story: impl Into<String>,
        first_season: Season,
        seasons: SeasonEvents,
        seed: u64,
    ) -> Self {
        let source = EventSource::Sandbox {
            pools: seasons,
            pending: Default::default(),
            seed,
            draws: 0,
        };
        Self::with_source(name.into(), story.into(), first_season, source)
    }

    /// Build a game of the given mode.
    #[must_use]
    pub fn new(
        mode: GameMode,
        name: impl Into<String>,
        story: impl Into<String>,
        first_season: Season,
        seasons: SeasonEvents,
        seed: u64,
    ) -> Self {
        match mode {
            GameMode::Scenario => Self::scenario(name, story, first_season, seasons),
            GameMode::Sandbox => Self::sandbox(name, story, first_season, seasons, seed),
        }
    }

    fn with_source(name: String, story: String, first_season: Season, source: EventSource) -> Self {
        let loaded = Season::ALL.map(|season| match &source {
            EventSource::Scenario { queues } => queues[season.index()].len(),
            EventSource::Sandbox { pools, .. } => pools[season.index()].len(),
        });
        Self {
            name,
            story,
            first_season,
            season: first_season,
            year: 0,
            current: None,
            loaded,
            source,
        }
    }

    /// Scenario title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scenario introduction.
    #[must_use]
    pub fn story(&self) -> &str {
        &self.story
    }

    /// Season of the first turn.
    #[must_use]
    pub const fn first_season(&self) -> Season {
        self.first_season
    }

    /// Season of the turn being played.
    #[must_use]
    pub const fn current_season(&self) -> Season {
        self.season
    }

    /// Years completed.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Event of the turn being played, if any.
    #[must_use]
    pub const fn current_event(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    /// Scenario or sandbox.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        match self.source {
            EventSource::Scenario { .. } => GameMode::Scenario,
            EventSource::Sandbox { .. } => GameMode::Sandbox,
        }
    }

    /// Number of events still available in a season.
    #[must_use]
    pub fn events_in(&self, season: Season) -> usize {
        match &self.source {
            EventSource::Scenario { queues } => queues[season.index()].len(),
            EventSource::Sandbox { pools, pending, .. } => pools[season.index()].len() + pending[season.index()].len(),
        }
    }

    /// First season that held no event when the game was built, in
    /// calendar order.
    #[must_use]
    pub fn first_empty_season(&self) -> Option<Season> {
        Season::ALL.into_iter().find(|season| self.loaded[season.index()] == 0)
    }

    /// Whether every season had at least one event when the game was built.
    #[must_use]
    pub fn can_play_events(&self) -> bool {
        self.first_empty_season().is_none()
    }

    /// Move the cursor to the next event of the current season.
    ///
    /// In scenario mode, an empty season leaves no current event: the
    /// scenario is over.
    pub fn next_event(&mut self) {
        let season = self.season.index();
        self.current = match &mut self.source {
            EventSource::Scenario { queues } => queues[season].pop_front(),
            EventSource::Sandbox {
                pools,
                pending,
                seed,
                draws,
            } => pending[season].pop_front().or_else(|| {
                let pool = &pools[season];
                if pool.is_empty() {
                    return None;
                }
                let mut rng = ChaCha8Rng::seed_from_u64(simple_hash(*seed, *draws));
                *draws += 1;
                pool.get(rng.gen_range(0..pool.len())).cloned()
            }),
        };
    }

    /// Advance to the next season. The year is left alone.
    pub fn next_season(&mut self) {
        self.season = self.season.next();
    }

    /// Count one more completed year.
    pub fn next_year(&mut self) {
        self.year += 1;
    }

    /// Queue events that follow from a choice so they are played next in
    /// the current season, in the given order.
    pub fn place_related_events(&mut self, events: Vec<Event>) {
        let season = self.season.index();
        match &mut self.source {
            EventSource::Scenario { queues } => {
                let queue = &mut queues[season];
                for event in events.into_iter().rev() {
                    queue.push_front(event);
                }
            }
            EventSource::Sandbox { pending, .. } => pending[season].extend(events),
        }
    }

    /// Whether the scenario ran out of events for the current turn.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// The event cursor, to be saved.
    #[must_use]
    pub fn saved_events(&self) -> SavedEvents {
        let names =
            |queue: &VecDeque<Event>| -> Vec<String> { queue.iter().map(|event| event.name().to_string()).collect() };
        let (queues, draws) = match &self.source {
            EventSource::Scenario { queues } => (queues.each_ref().map(names), 0),
            EventSource::Sandbox { pending, draws, .. } => (pending.each_ref().map(names), *draws),
        };
        SavedEvents {
            current: self.current.as_ref().map(|event| event.name().to_string()),
            queues,
            draws,
        }
    }

    /// Every event of the game by name, related events included. The first
    /// event of a name wins, in calendar order.
    fn catalogue(&self) -> HashMap<String, Event> {
        fn collect(event: &Event, catalogue: &mut HashMap<String, Event>) {
            catalogue
                .entry(event.name().to_string())
                .or_insert_with(|| event.clone());
            for choice in event.choices() {
                for related in &choice.related_events {
                    collect(related, catalogue);
                }
            }
        }

        let authored: Vec<&Event> = match &self.source {
            EventSource::Scenario { queues } => queues.iter().flatten().collect(),
            EventSource::Sandbox { pools, pending, .. } => {
                pools.iter().flatten().chain(pending.iter().flatten()).collect()
            }
        };
        let mut catalogue = HashMap::new();
        for event in authored.into_iter().chain(self.current.as_ref()) {
            collect(event, &mut catalogue);
        }
        catalogue
    }

    /// Put a freshly built state machine where a saved game left it.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::UnknownEvent`] if a saved name matches no event
    /// of the scenario. Nothing changes in that case.
    pub fn restore(&mut self, season: Season, year: u32, seed: u64, saved: &SavedEvents) -> Result<(), SaveError> {
        let catalogue = self.catalogue();
        let lookup = |name: &String| {
            catalogue
                .get(name)
                .cloned()
                .ok_or_else(|| SaveError::UnknownEvent(name.clone()))
        };
        let current = saved.current.as_ref().map(lookup).transpose()?;
        let mut queues: [VecDeque<Event>; 4] = Default::default();
        for (queue, names) in queues.iter_mut().zip(&saved.queues) {
            *queue = names.iter().map(lookup).collect::<Result<_, _>>()?;
        }

        match &mut self.source {
            EventSource::Scenario { queues: left } => *left = queues,
            EventSource::Sandbox {
                pending,
                seed: draw_seed,
                draws,
                ..
            } => {
                *pending = queues;
                *draw_seed = seed;
                *draws = saved.draws;
            }
        }
        self.season = season;
        self.year = year;
        self.current = current;
        Ok(())
    }

    /// Put the state machine where a save without an event cursor left it.
    ///
    /// `turns_played` turns are fast-forwarded from the first season: in
    /// scenario mode their events are consumed, in sandbox mode their draws
    /// are counted. Events brought by choices are not replayed.
    pub fn resume(&mut self, season: Season, year: u32, turns_played: u32) {
        match &mut self.source {
            EventSource::Scenario { queues } => {
                for turn in 0..turns_played {
                    let played = self.first_season.advanced_by(turn);
                    queues[played.index()].pop_front();
                }
            }
            EventSource::Sandbox { draws, .. } => *draws = u64::from(turns_played),
        }
        self.season = season;
        self.year = year;
        self.current = None;
    }
}
