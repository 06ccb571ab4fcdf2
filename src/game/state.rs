//! Player economy state definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::logic;
use crate::sci::Sci;

/// Longest display name kept after sanitizing.
pub const DISPLAY_NAME_MAX_CHARS: usize = 16;

/// Per-player, per-upgrade progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeState {
    pub level: u32,
}

/// Full economy state of one player session.
///
/// Only the operations in [`logic`] mutate it, so `rate_per_sec` always
/// matches the current upgrades and prestige level.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerEconomyState {
    pub(crate) score: Sci,
    pub(crate) total_earned: Sci,
    pub(crate) total_clicks: u64,
    /// Cached; recomputed after every change to upgrades or prestige level.
    pub(crate) rate_per_sec: Sci,
    pub(crate) prestige_level: u32,
    pub(crate) prestige_points: u64,
    pub(crate) upgrades: BTreeMap<String, UpgradeState>,
    pub(crate) display_name: Option<String>,
}

impl PlayerEconomyState {
    /// Fresh state with every catalog upgrade at level 0.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            score: Sci::ZERO,
            total_earned: Sci::ZERO,
            total_clicks: 0,
            rate_per_sec: Sci::ZERO,
            prestige_level: 0,
            prestige_points: 0,
            upgrades: catalog
                .keys()
                .map(|k| (k.to_string(), UpgradeState::default()))
                .collect(),
            display_name: None,
        }
    }

    pub fn score(&self) -> Sci {
        self.score
    }

    pub fn total_earned(&self) -> Sci {
        self.total_earned
    }

    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    pub fn rate_per_sec(&self) -> Sci {
        self.rate_per_sec
    }

    pub fn prestige_level(&self) -> u32 {
        self.prestige_level
    }

    pub fn prestige_points(&self) -> u64 {
        self.prestige_points
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Current level of an upgrade; unknown keys count as level 0.
    pub fn level(&self, key: &str) -> u32 {
        self.upgrades.get(key).map_or(0, |u| u.level)
    }

    pub fn upgrades(&self) -> &BTreeMap<String, UpgradeState> {
        &self.upgrades
    }

    /// Store a sanitized display name; empty after sanitizing clears it.
    pub fn set_display_name(&mut self, raw: &str) {
        let name = sanitize_name(raw);
        self.display_name = if name.is_empty() { None } else { Some(name) };
    }

    /// Back to a fresh state. The display name survives.
    pub fn reset(&mut self, catalog: &Catalog) {
        let display_name = self.display_name.take();
        *self = Self::new(catalog);
        self.display_name = display_name;
    }

    pub(crate) fn refresh_rate(&mut self, catalog: &Catalog) {
        self.rate_per_sec = logic::compute_rate_per_sec(catalog, self);
    }
}

/// Keep letters, digits, `_`, `-` and spaces, trim, cap the length.
pub fn sanitize_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    kept.trim().chars().take(DISPLAY_NAME_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_every_catalog_key() {
        let catalog = Catalog::standard();
        let state = PlayerEconomyState::new(catalog);
        assert_eq!(state.upgrades.len(), catalog.len());
        assert!(catalog.keys().all(|k| state.level(k) == 0));
        assert_eq!(state.score(), Sci::ZERO);
        assert_eq!(state.rate_per_sec(), Sci::ZERO);
    }

    #[test]
    fn unknown_key_level_is_zero() {
        let state = PlayerEconomyState::new(Catalog::standard());
        assert_eq!(state.level("does-not-exist"), 0);
    }

    #[test]
    fn sanitize_strips_symbols() {
        assert_eq!(sanitize_name("  <b>Zoé_42</b> "), "bZoé_42b");
        assert_eq!(sanitize_name("a-b c"), "a-b c");
        assert_eq!(sanitize_name("!!!"), "");
    }

    #[test]
    fn sanitize_caps_length() {
        let name = sanitize_name("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(name.chars().count(), DISPLAY_NAME_MAX_CHARS);
        assert_eq!(name, "abcdefghijklmnop");
    }

    #[test]
    fn empty_display_name_clears() {
        let mut state = PlayerEconomyState::new(Catalog::standard());
        state.set_display_name("Ada");
        assert_eq!(state.display_name(), Some("Ada"));
        state.set_display_name("%%%");
        assert_eq!(state.display_name(), None);
    }

    #[test]
    fn reset_keeps_display_name() {
        let catalog = Catalog::standard();
        let mut state = PlayerEconomyState::new(catalog);
        state.set_display_name("Ada");
        state.score = Sci::from(1e6);
        state.prestige_level = 3;
        state.upgrades.get_mut("generator").unwrap().level = 7;
        state.reset(catalog);
        assert_eq!(state.score(), Sci::ZERO);
        assert_eq!(state.prestige_level(), 0);
        assert_eq!(state.level("generator"), 0);
        assert_eq!(state.display_name(), Some("Ada"));
    }
}
