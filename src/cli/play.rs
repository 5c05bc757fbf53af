//! Play command implementation: an interactive game on stdin/stdout.

use super::output::{
    format_bribe_menu, format_event, format_option_outcome, format_republic, format_year_end, format_year_end_menu,
    outcome_label,
};
use super::{seed_or_clock, CliError};
use republica::error::ChoiceError;
use republica::game::{OptionOutcome, SaveFile, TurnContext, YearEndSummary};
use republica::{content, Difficulty, Event, FactionKind, GameConfig, GameMode, GameOutcome, PlayerInput, Republic};
use republica::{YearEndDecision, YearEndOption};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// A player typing answers on a terminal.
///
/// Invalid or missing input never aborts the game: it becomes an
/// out-of-range choice, which the engine asks again, or the safest
/// year-end answer.
#[derive(Debug)]
pub(crate) struct TerminalInput<R, W> {
    /// Where answers are read.
    reader: R,
    /// Where prompts are written.
    writer: W,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    /// Create a terminal player.
    pub(crate) const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write text. A closed terminal is not an error worth stopping for.
    fn say(&mut self, text: &str) {
        if self.writer.write_all(text.as_bytes()).and_then(|()| self.writer.flush()).is_err() {
            tracing::debug!("terminal output closed");
        }
    }

    /// Show a prompt and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.say(prompt);
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Ask for a number.
    fn ask_number(&mut self, prompt: &str) -> Option<u64> {
        self.ask(prompt).and_then(|answer| answer.parse().ok())
    }

    /// Ask a yes/no question. Anything but yes is no.
    pub(crate) fn confirm(&mut self, question: &str) -> bool {
        self.ask(&format!("{question} [y/N] "))
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    /// Ask which faction to bribe.
    fn ask_bribe(&mut self, republic: &Republic) -> Option<FactionKind> {
        let menu = format_bribe_menu(republic);
        self.say(&menu);
        let index = usize::try_from(self.ask_number("Faction: ")?).ok()?;
        FactionKind::ALL
            .into_iter()
            .filter(|kind| kind.is_bribable())
            .nth(index.checked_sub(1)?)
    }
}

impl<R: BufRead, W: Write> PlayerInput for TerminalInput<R, W> {
    fn choose_event_choice(&mut self, event: &Event, _context: &TurnContext) -> usize {
        let prompt = format!("Your choice [1-{}]: ", event.nb_choices());
        self.ask_number(&prompt)
            .and_then(|choice| usize::try_from(choice).ok())
            .unwrap_or(0)
    }

    fn choose_year_end_option(&mut self, republic: &Republic) -> YearEndOption {
        let status = format_republic(republic);
        let menu = format_year_end_menu(republic);
        self.say(&format!("\n{status}{menu}"));
        loop {
            match self.ask_number("Option: ") {
                None | Some(0) => return YearEndOption::DoNothing,
                Some(1) => {
                    if let Some(kind) = self.ask_bribe(republic) {
                        return YearEndOption::Bribe(kind);
                    }
                    self.say("Unknown faction.\n");
                }
                Some(2) => {
                    if let Some(units) = self.ask_number("Food units to buy: ") {
                        return YearEndOption::BuyFood(units);
                    }
                    self.say("Not a number.\n");
                }
                Some(_) => self.say("Pick 0, 1 or 2.\n"),
            }
        }
    }

    fn year_end_decision(&mut self, republic: &Republic, score: f64) -> YearEndDecision {
        let status = format_republic(republic);
        self.say(&format!("\n{status}Score: {score:.1}\n"));
        loop {
            let Some(answer) = self.ask("(c)ontinue, (s)ave and quit, (q)uit? ") else {
                return YearEndDecision::SaveAndQuit;
            };
            match answer.to_ascii_lowercase().as_str() {
                "" | "c" | "continue" => return YearEndDecision::Continue,
                "s" | "save" => return YearEndDecision::SaveAndQuit,
                "q" | "quit" => return YearEndDecision::Quit,
                _ => {}
            }
        }
    }

    fn show_event(&mut self, event: &Event, context: &TurnContext) {
        let text = format_event(event, context);
        self.say(&text);
    }

    fn reject_choice(&mut self, error: &ChoiceError) {
        self.say(&format!("{error}\n"));
    }

    fn show_option_outcome(&mut self, outcome: &OptionOutcome, _republic: &Republic) {
        let text = format_option_outcome(outcome);
        self.say(&text);
    }

    fn show_year_end(&mut self, summary: &YearEndSummary, _republic: &Republic) {
        let text = format_year_end(summary);
        self.say(&text);
    }
}

/// Default save file next to the scenario: `island.json` -> `island.save.json`.
fn default_save_path(scenario: &Path) -> PathBuf {
    scenario.with_extension("save.json")
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or launched, or the
/// save file cannot be read or written.
pub(crate) fn execute(
    scenario_path: &Path,
    difficulty: Difficulty,
    mode: GameMode,
    seed: Option<u64>,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = TerminalInput::new(stdin.lock(), stdout.lock());
    let save_path = save.unwrap_or_else(|| default_save_path(scenario_path));
    play(scenario_path, difficulty, mode, seed_or_clock(seed), &save_path, &mut input)
}

/// Load, optionally resume, play and save one game.
fn play<R: BufRead, W: Write>(
    scenario_path: &Path,
    difficulty: Difficulty,
    mode: GameMode,
    seed: u64,
    save_path: &Path,
    input: &mut TerminalInput<R, W>,
) -> Result<(), CliError> {
    let scenario = content::load(scenario_path, difficulty)?;
    let config = GameConfig {
        difficulty,
        mode,
        seed,
        ..GameConfig::default()
    };
    let mut game = scenario.new_game(config);

    let mut save_file = SaveFile::load(save_path)?;
    let resumed = match save_file.get(difficulty) {
        Some(saved) if input.confirm(&format!("Resume the saved {difficulty} game?")) => {
            if saved.mode != mode {
                input.say(&format!("The saved game is a {} game, resuming it as one.\n", saved.mode));
            }
            // Draws only repeat with the saved mode and seed
            game = scenario.new_game(GameConfig {
                mode: saved.mode,
                seed: saved.seed.unwrap_or(seed),
                ..config
            });
            game.resume(saved)?;
            true
        }
        _ => false,
    };

    if !resumed {
        input.say(&format!("{}\n\n{}\n", scenario.name, scenario.story));
    }

    let outcome = game.play(input)?;

    if outcome == GameOutcome::SavedAndQuit {
        save_file.insert(game.save_state());
        save_file.save(save_path)?;
        input.say(&format!("Game saved to {}.\n", save_path.display()));
        return Ok(());
    }

    if resumed && save_file.remove_entry(difficulty).is_some() {
        save_file.save(save_path)?;
    }
    input.say(&format!(
        "\n{}\nFinal score: {:.1} after {} years.\n",
        outcome_label(outcome),
        game.score(),
        game.year()
    ));

    Ok(())
}
