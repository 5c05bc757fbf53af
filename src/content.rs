//! Scenario files: parsing, validation and difficulty scaling.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "name": "Isla Bonita",
//!   "story": "...",
//!   "firstSeason": "SPRING",
//!   "gameStartParameters": {
//!     "NORMAL": {
//!       "factions": { "CAPITALISTS": { "satisfactionRate": 50, "nbSupporters": 15 }, ... },
//!       "farmRate": 40, "industryRate": 30, "money": 500, "foodUnits": 1000
//!     }
//!   },
//!   "scenario": { "SPRING": [ { "name": "...", "choices": [ ... ] } ], ... }
//! }
//! ```
//!
//! Every effect delta is multiplied by the difficulty coefficient and
//! rounded half up when the file is loaded, so the engine never sees
//! unscaled numbers.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ContentError;
use crate::game::{Choice, Difficulty, Event, Game, GameConfig, GamePlay, Season, SeasonEvents};
use crate::republic::{Effect, Factor, Faction, FactionDelta, FactionKind, Population, Republic, Resources};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScenario {
    name: String,
    story: String,
    #[serde(default)]
    first_season: Option<String>,
    game_start_parameters: BTreeMap<String, RawStartParameters>,
    scenario: RawSeasons,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawSeasons {
    spring: Vec<RawEvent>,
    summer: Vec<RawEvent>,
    autumn: Vec<RawEvent>,
    winter: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStartParameters {
    factions: BTreeMap<String, RawFactionSeed>,
    farm_rate: i64,
    industry_rate: i64,
    money: i64,
    food_units: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFactionSeed {
    satisfaction_rate: i64,
    nb_supporters: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    irreversible: Option<RawEffects>,
    choices: Vec<RawChoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChoice {
    name: String,
    description: String,
    effects: RawEffects,
    #[serde(default)]
    related_events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEffects {
    #[serde(default)]
    factions: Vec<RawFactionEffect>,
    industry_rate: Option<i64>,
    farm_rate: Option<i64>,
    food_units: Option<i64>,
    money: Option<i64>,
    population: Option<i64>,
    satisfaction_rate: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFactionEffect {
    name: String,
    satisfaction_rate: Option<i64>,
    nb_supporters: Option<i64>,
}

/// A loaded scenario, scaled to one difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Title.
    pub name: String,
    /// Introduction shown before the first turn.
    pub story: String,
    /// Season of the first turn.
    pub first_season: Season,
    /// Difficulty the effects were scaled for.
    pub difficulty: Difficulty,
    /// Difficulty whose start parameters were used. Differs from
    /// `difficulty` when the file has no start parameters for it.
    pub start_difficulty: Difficulty,
    /// Starting republic.
    pub republic: Republic,
    /// Events of each season.
    pub seasons: SeasonEvents,
}

impl Scenario {
    /// Number of top-level events in each season, in calendar order.
    #[must_use]
    pub fn event_counts(&self) -> [usize; 4] {
        self.seasons.each_ref().map(Vec::len)
    }

    /// Build a fresh game of this scenario.
    ///
    /// The config's difficulty should match the one the scenario was
    /// loaded with, since effects are already scaled.
    #[must_use]
    pub fn new_game(&self, config: GameConfig) -> Game {
        let gameplay = GamePlay::new(
            config.mode,
            self.name.clone(),
            self.story.clone(),
            self.first_season,
            self.seasons.clone(),
            config.seed,
        );
        Game::new(config, self.republic.clone(), gameplay)
    }
}

/// Read and parse a scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid scenario.
pub fn load(path: &Path, difficulty: Difficulty) -> Result<Scenario, ContentError> {
    let json = fs::read_to_string(path)?;
    let scenario = parse(&json, difficulty)?;
    tracing::info!(path = %path.display(), scenario = %scenario.name, "scenario loaded");
    Ok(scenario)
}

/// Parse a scenario from JSON text.
///
/// # Errors
///
/// Returns an error if a key is missing, an event has a wrong number of
/// choices, a start value is out of range, or a name is unknown.
pub fn parse(json: &str, difficulty: Difficulty) -> Result<Scenario, ContentError> {
    let raw: RawScenario = serde_json::from_str(json)?;
    let coefficient = difficulty.coefficient();

    let first_season = raw
        .first_season
        .as_deref()
        .map(str::parse)
        .transpose()?
        .unwrap_or(Season::Spring);

    let (start_difficulty, start) = start_parameters(&raw.game_start_parameters, difficulty)?;
    let republic = build_republic(start)?;

    let RawSeasons {
        spring,
        summer,
        autumn,
        winter,
    } = raw.scenario;
    let seasons = [
        build_events(spring, coefficient)?,
        build_events(summer, coefficient)?,
        build_events(autumn, coefficient)?,
        build_events(winter, coefficient)?,
    ];

    Ok(Scenario {
        name: raw.name,
        story: raw.story,
        first_season,
        difficulty,
        start_difficulty,
        republic,
        seasons,
    })
}

/// Start parameters for `difficulty`, falling back to NORMAL.
fn start_parameters(
    parameters: &BTreeMap<String, RawStartParameters>,
    difficulty: Difficulty,
) -> Result<(Difficulty, &RawStartParameters), ContentError> {
    if let Some(start) = parameters.get(difficulty.key()) {
        return Ok((difficulty, start));
    }
    if let Some(start) = parameters.get(Difficulty::Normal.key()) {
        tracing::warn!(
            requested = %difficulty,
            "no start parameters for this difficulty, using normal ones; events keep the requested difficulty"
        );
        return Ok((Difficulty::Normal, start));
    }
    Err(ContentError::MissingStartParameters {
        requested: difficulty.key().to_string(),
    })
}

fn non_negative(field: &'static str, value: i64) -> Result<i64, ContentError> {
    if value < 0 {
        return Err(ContentError::NegativeValue { field, value });
    }
    Ok(value)
}

fn build_republic(start: &RawStartParameters) -> Result<Republic, ContentError> {
    let mut factions = Vec::with_capacity(FactionKind::ALL.len());
    for (name, seed) in &start.factions {
        let kind: FactionKind = name.parse()?;
        let supporters = u32::try_from(seed.nb_supporters).map_err(|_| ContentError::NegativeValue {
            field: "nbSupporters",
            value: seed.nb_supporters,
        })?;
        let satisfaction = u32::try_from(seed.satisfaction_rate).map_err(|_| ContentError::InvalidSatisfactionRate {
            faction: kind,
            rate: seed.satisfaction_rate,
        })?;
        factions.push(Faction::new(kind, supporters, satisfaction)?);
    }
    let population = Population::new(factions)?;

    let rate_error = || ContentError::InvalidRateConfiguration {
        farm_rate: start.farm_rate,
        industry_rate: start.industry_rate,
    };
    let farm_rate = u32::try_from(start.farm_rate).map_err(|_| rate_error())?;
    let industry_rate = u32::try_from(start.industry_rate).map_err(|_| rate_error())?;
    let food_units = non_negative("foodUnits", start.food_units)?;
    let money = non_negative("money", start.money)?;
    let resources = Resources::new(food_units, money, farm_rate, industry_rate)?;

    Ok(Republic::new(population, resources))
}

fn build_events(raw: Vec<RawEvent>, coefficient: f64) -> Result<Vec<Event>, ContentError> {
    raw.into_iter().map(|event| build_event(event, coefficient)).collect()
}

fn build_event(raw: RawEvent, coefficient: f64) -> Result<Event, ContentError> {
    let irreversible = raw
        .irreversible
        .map(|effects| build_effect(effects, coefficient))
        .transpose()?;
    let choices = raw
        .choices
        .into_iter()
        .map(|choice| {
            let effect = build_effect(choice.effects, coefficient)?;
            let related = build_events(choice.related_events, coefficient)?;
            Ok(Choice::new(choice.name, choice.description, effect).with_related_events(related))
        })
        .collect::<Result<Vec<_>, ContentError>>()?;
    Event::new(raw.name, raw.description, irreversible, choices)
}

fn build_effect(raw: RawEffects, coefficient: f64) -> Result<Effect, ContentError> {
    let mut effect = Effect::new();
    for faction in raw.factions {
        let kind: FactionKind = faction.name.parse()?;
        effect.set_faction(
            kind,
            FactionDelta {
                satisfaction_rate: faction.satisfaction_rate.map(|v| scale(v, coefficient)),
                supporters: faction.nb_supporters.map(|v| scale(v, coefficient)),
            },
        );
    }
    let factors = [
        (Factor::IndustryRate, raw.industry_rate),
        (Factor::FarmRate, raw.farm_rate),
        (Factor::FoodUnits, raw.food_units),
        (Factor::Money, raw.money),
        (Factor::Population, raw.population),
        (Factor::SatisfactionRate, raw.satisfaction_rate),
    ];
    for (factor, value) in factors {
        if let Some(value) = value {
            effect.set_factor(factor, scale(value, coefficient));
        }
    }
    Ok(effect)
}

/// Scale a delta by the difficulty coefficient, rounding half up.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn scale(value: i64, coefficient: f64) -> i32 {
    (value as f64 * coefficient + 0.5).floor() as i32
}
