//! Events and the choices they offer.

use crate::error::{ChoiceError, ContentError};
use crate::game::rules::{MAX_CHOICE_PER_EVENT, MIN_CHOICE_PER_EVENT};
use crate::republic::Effect;

/// One answer the player can give to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Short label.
    pub name: String,
    /// What the choice means.
    pub description: String,
    /// Consequences of picking it.
    pub effect: Effect,
    /// Events that follow from this choice, played next in the season.
    pub related_events: Vec<Event>,
}

impl Choice {
    /// Create a choice without follow-up events.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, effect: Effect) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            effect,
            related_events: Vec::new(),
        }
    }

    /// Attach follow-up events.
    #[must_use]
    pub fn with_related_events(mut self, events: Vec<Event>) -> Self {
        self.related_events = events;
        self
    }

    /// Whether picking this choice brings new events.
    #[must_use]
    pub fn has_related_events(&self) -> bool {
        !self.related_events.is_empty()
    }
}

/// A narrative situation the player must answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Title.
    name: String,
    /// Narrative text.
    description: String,
    /// Applied as soon as the event is shown, whatever the player picks.
    irreversible: Option<Effect>,
    /// Between 1 and 4 answers.
    choices: Vec<Choice>,
}

impl Event {
    /// Create an event.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidChoiceCount`] unless the event has 1 to
    /// 4 choices.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        irreversible: Option<Effect>,
        choices: Vec<Choice>,
    ) -> Result<Self, ContentError> {
        let name = name.into();
        if !(MIN_CHOICE_PER_EVENT..=MAX_CHOICE_PER_EVENT).contains(&choices.len()) {
            return Err(ContentError::InvalidChoiceCount {
                event: name,
                count: choices.len(),
                min: MIN_CHOICE_PER_EVENT,
                max: MAX_CHOICE_PER_EVENT,
            });
        }
        Ok(Self {
            name,
            description: description.into(),
            irreversible,
            choices,
        })
    }

    /// Title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Narrative text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Effect applied before the player chooses.
    #[must_use]
    pub const fn irreversible(&self) -> Option<&Effect> {
        self.irreversible.as_ref()
    }

    /// All choices, in display order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Number of choices.
    #[must_use]
    pub fn nb_choices(&self) -> usize {
        self.choices.len()
    }

    /// Get a choice by its 1-based number, as the player types it.
    ///
    /// # Errors
    ///
    /// Returns [`ChoiceError::OutOfRange`] outside `1..=nb_choices`.
    pub fn choice(&self, choice: usize) -> Result<&Choice, ChoiceError> {
        choice
            .checked_sub(1)
            .and_then(|index| self.choices.get(index))
            .ok_or(ChoiceError::OutOfRange {
                choice,
                available: self.choices.len(),
            })
    }
}
