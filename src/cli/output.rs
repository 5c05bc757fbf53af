//! Output formatting utilities for CLI.

use republica::autoplay::AutoplayResult;
use republica::game::rules::FOOD_PRICE;
use republica::game::{FoodOutcome, OptionOutcome, TurnContext, YearEndSummary};
use republica::republic::BribeOutcome;
use republica::{Event, GameOutcome, Republic};
use serde::Serialize;

/// Format an event and its choices.
pub(super) fn format_event(event: &Event, context: &TurnContext) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n== {} of year {} (turn {}) ==\n",
        context.season.capitalized(),
        context.year + 1,
        context.event_count
    ));
    output.push_str(&format!("{}\n", event.name()));
    if !event.description().is_empty() {
        output.push_str(&format!("{}\n", event.description()));
    }
    output.push('\n');
    for (i, choice) in event.choices().iter().enumerate() {
        output.push_str(&format!("  {}. {}", i + 1, choice.name));
        if !choice.description.is_empty() {
            output.push_str(&format!(" - {}", choice.description));
        }
        output.push('\n');
    }

    output
}

/// Format the state of the republic: factions and economy.
pub(super) fn format_republic(republic: &Republic) -> String {
    let mut output = String::new();
    let population = republic.population();
    let resources = republic.resources();

    output.push_str("Factions:\n");
    for faction in population.factions() {
        output.push_str(&format!(
            "  {:<13} {:>5} supporters  {:>3}% satisfied\n",
            faction.kind().to_string(),
            faction.supporters(),
            faction.satisfaction_rate()
        ));
    }
    output.push_str(&format!(
        "  Total: {} citizens, {:.1}% global satisfaction\n",
        population.total_supporters(),
        population.global_satisfaction_rate()
    ));
    output.push_str(&format!(
        "Economy: {} money, {} food units, farm {}%, industry {}%\n",
        resources.money(),
        resources.food_units(),
        resources.farm_rate(),
        resources.industry_rate()
    ));

    output
}

/// Format the year-end option menu, with bribe prices.
pub(super) fn format_year_end_menu(republic: &Republic) -> String {
    let mut output = String::new();

    output.push_str("\nYear-end options:\n");
    output.push_str("  0. Done\n");
    output.push_str("  1. Bribe a faction\n");
    output.push_str(&format!(
        "  2. Buy food ({FOOD_PRICE} per unit, up to {} units)\n",
        republic.resources().affordable_food_units()
    ));

    output
}

/// Format the list of bribable factions with their prices.
pub(super) fn format_bribe_menu(republic: &Republic) -> String {
    let mut output = String::new();

    for (i, faction) in republic
        .population()
        .factions()
        .filter(|faction| faction.kind().is_bribable())
        .enumerate()
    {
        output.push_str(&format!(
            "  {}. {} ({} money)\n",
            i + 1,
            faction.kind(),
            faction.bribe_price()
        ));
    }

    output
}

/// Format the result of a year-end option.
pub(super) fn format_option_outcome(outcome: &OptionOutcome) -> String {
    match outcome {
        OptionOutcome::Done => String::new(),
        OptionOutcome::Bribe(BribeOutcome::Bribed { bribery, shift }) => format!(
            "{} accepted {} money. Global satisfaction {:.1}% -> {:.1}%\n",
            bribery.briber, bribery.price, shift.before, shift.after
        ),
        OptionOutcome::Bribe(BribeOutcome::NotBribable) => "This faction cannot be bribed.\n".to_string(),
        OptionOutcome::Bribe(BribeOutcome::InsufficientFunds { price, money }) => {
            format!("Not enough money: the bribe costs {price}, the treasury holds {money}.\n")
        }
        OptionOutcome::FoodBought { food_units, price } => {
            format!("Bought {food_units} food units for {price} money.\n")
        }
    }
}

/// Format a year-end summary.
pub(super) fn format_year_end(summary: &YearEndSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\nHarvest: {} food units. Industry: {} money.\n",
        summary.incomes.food, summary.incomes.money
    ));
    match summary.food {
        FoodOutcome::Starvation { eliminated } => {
            output.push_str(&format!("Famine! {eliminated} citizens died.\n"));
        }
        FoodOutcome::Growth { newcomers } => {
            output.push_str(&format!("Everyone ate. {newcomers} new citizens joined.\n"));
        }
    }

    output
}

/// Describe how a game ended.
pub(super) const fn outcome_label(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Victory => "Victory: the republic made it through.",
        GameOutcome::Defeat => "Defeat: the people overthrew you.",
        GameOutcome::Quit => "You left office.",
        GameOutcome::SavedAndQuit => "Game saved.",
    }
}

/// Autoplay statistics for aggregated results.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct AutoplayStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that ran out of events with the player winning.
    pub(super) victories: u64,
    /// Games the player lost.
    pub(super) defeats: u64,
    /// Games stopped after the year limit.
    pub(super) quits: u64,
    /// Games that could not be played.
    pub(super) errors: u64,
    /// Total score.
    total_score: f64,
    /// Score sum of squares for std dev calculation.
    score_sq_sum: f64,
    /// Lowest score seen.
    min_score: Option<f64>,
    /// Highest score seen.
    max_score: Option<f64>,
    /// Total years across all games.
    total_years: u64,
    /// Total turns across all games.
    total_turns: u64,
    /// Total final citizens across all games.
    total_population: u64,
}

impl AutoplayStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &AutoplayResult) {
        self.games_played += 1;
        match result.outcome {
            GameOutcome::Victory => self.victories += 1,
            GameOutcome::Defeat => self.defeats += 1,
            GameOutcome::Quit | GameOutcome::SavedAndQuit => self.quits += 1,
        }
        self.total_score += result.score;
        self.score_sq_sum += result.score * result.score;
        self.min_score = Some(self.min_score.map_or(result.score, |min| min.min(result.score)));
        self.max_score = Some(self.max_score.map_or(result.score, |max| max.max(result.score)));
        self.total_years += u64::from(result.years);
        self.total_turns += u64::from(result.turns);
        self.total_population += result.population;
    }

    /// Count a game that failed.
    pub(super) fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Merge stats accumulated on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.victories += other.victories;
        self.defeats += other.defeats;
        self.quits += other.quits;
        self.errors += other.errors;
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.min_score = match (self.min_score, other.min_score) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_score = match (self.max_score, other.max_score) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.total_years += other.total_years;
        self.total_turns += other.total_turns;
        self.total_population += other.total_population;
    }

    /// Share of games with the given count (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    fn rate(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 / self.games_played as f64
    }

    /// Share of games the player survived to the end (0.0-1.0).
    pub(super) fn victory_rate(&self) -> f64 {
        self.rate(self.victories)
    }

    /// Share of games the player lost (0.0-1.0).
    pub(super) fn defeat_rate(&self) -> f64 {
        self.rate(self.defeats)
    }

    /// Average value of a per-game total.
    #[allow(clippy::cast_precision_loss)]
    fn average(&self, total: f64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total / self.games_played as f64
    }

    /// Average final score.
    pub(super) fn avg_score(&self) -> f64 {
        self.average(self.total_score)
    }

    /// Final score standard deviation.
    pub(super) fn score_std_dev(&self) -> f64 {
        let mean = self.avg_score();
        let variance = self.average(self.score_sq_sum) - mean * mean;
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average years played.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_years(&self) -> f64 {
        self.average(self.total_years as f64)
    }

    /// Average turns played.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_turns(&self) -> f64 {
        self.average(self.total_turns as f64)
    }

    /// Average final population.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_population(&self) -> f64 {
        self.average(self.total_population as f64)
    }
}

/// JSON-serializable autoplay result.
#[derive(Debug, Serialize)]
pub(super) struct JsonAutoplayResult {
    /// Scenario title.
    scenario: String,
    /// Total games played.
    games_played: u64,
    /// Games that could not be played.
    errors: u64,
    /// Victory count.
    victories: u64,
    /// Defeat count.
    defeats: u64,
    /// Games stopped after the year limit.
    quits: u64,
    /// Victory rate (0.0-1.0).
    victory_rate: f64,
    /// Defeat rate (0.0-1.0).
    defeat_rate: f64,
    /// Average score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
    /// Lowest score.
    min_score: Option<f64>,
    /// Highest score.
    max_score: Option<f64>,
    /// Average years played.
    avg_years: f64,
    /// Average turns played.
    avg_turns: f64,
    /// Average final population.
    avg_population: f64,
}

impl JsonAutoplayResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &AutoplayStats, scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            games_played: stats.games_played,
            errors: stats.errors,
            victories: stats.victories,
            defeats: stats.defeats,
            quits: stats.quits,
            victory_rate: stats.victory_rate(),
            defeat_rate: stats.defeat_rate(),
            avg_score: stats.avg_score(),
            score_std_dev: stats.score_std_dev(),
            min_score: stats.min_score,
            max_score: stats.max_score,
            avg_years: stats.avg_years(),
            avg_turns: stats.avg_turns(),
            avg_population: stats.avg_population(),
        }
    }
}

/// Format autoplay stats as human-readable text.
pub(super) fn format_autoplay_text(stats: &AutoplayStats, scenario: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Autoplay Results: {scenario} ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Outcomes:\n");
    output.push_str(&format!(
        "  Victories: {} ({:.1}%)\n",
        stats.victories,
        stats.victory_rate() * 100.0
    ));
    output.push_str(&format!(
        "  Defeats:   {} ({:.1}%)\n",
        stats.defeats,
        stats.defeat_rate() * 100.0
    ));
    output.push_str(&format!("  Stopped:   {}\n", stats.quits));
    if stats.errors > 0 {
        output.push_str(&format!("  Errors:    {}\n", stats.errors));
    }

    output.push_str(&format!(
        "\nScore: {:.1} (+/- {:.1})",
        stats.avg_score(),
        stats.score_std_dev()
    ));
    if let (Some(min), Some(max)) = (stats.min_score, stats.max_score) {
        output.push_str(&format!(" [min {min:.1}, max {max:.1}]"));
    }
    output.push('\n');

    output.push_str(&format!(
        "Average Game Length: {:.1} years ({:.0} turns)\n",
        stats.avg_years(),
        stats.avg_turns()
    ));
    output.push_str(&format!("Average Final Population: {:.0}\n", stats.avg_population()));

    output
}
