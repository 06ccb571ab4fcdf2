//! Idle clicker economy: upgrade catalog, player state, rules and saves.

pub mod achievements;
pub mod catalog;
pub mod logic;
pub mod save;
mod simulator;
pub mod state;

use crate::error::EconomyError;
use crate::sci::Sci;

use catalog::Catalog;
use logic::Purchase;
use state::PlayerEconomyState;

/// A command from the host (button press, timer, bot).
#[derive(Clone, Debug, PartialEq)]
pub enum Action<'k> {
    Click,
    Buy(&'k str),
    Prestige,
}

/// What an accepted [`Action`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Clicked(Sci),
    Bought(Purchase),
    /// Prestige points earned.
    Prestiged(u64),
}

/// One player's session: the shared catalog plus the state it owns.
pub struct IdleGame<'c> {
    catalog: &'c Catalog,
    pub state: PlayerEconomyState,
}

impl<'c> IdleGame<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            state: PlayerEconomyState::new(catalog),
        }
    }

    /// Resume from a restored state.
    pub fn with_state(catalog: &'c Catalog, state: PlayerEconomyState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Apply one action. Rejected actions leave the state untouched.
    pub fn handle(&mut self, action: Action<'_>) -> Result<Outcome, EconomyError> {
        match action {
            Action::Click => Ok(Outcome::Clicked(logic::click(self.catalog, &mut self.state))),
            Action::Buy(key) => {
                logic::apply_purchase(self.catalog, &mut self.state, key).map(Outcome::Bought)
            }
            Action::Prestige => {
                logic::apply_prestige(self.catalog, &mut self.state).map(Outcome::Prestiged)
            }
        }
    }

    /// Run `delta_ticks` fixed steps of `tick_secs` each. Returns the total gained.
    pub fn tick(&mut self, delta_ticks: u32, tick_secs: f64) -> Sci {
        let mut gained = Sci::ZERO;
        for _ in 0..delta_ticks {
            gained += logic::tick(&mut self.state, tick_secs);
        }
        gained
    }
}
