//! Economy core of an idle clicker game.
//!
//! Amounts are [`Sci`] values (`mantissa × 10^exponent`) so balances keep
//! growing far past the `f64` range. The [`game`] module holds the upgrade
//! catalog and the rules; persistence, rendering and networking live in the
//! host and only exchange [`game::save::EconomyRecord`]s and actions with it.

pub mod config;
pub mod error;
pub mod format;
pub mod game;
pub mod sci;
pub mod time;

pub use format::format_sci;
pub use sci::Sci;
