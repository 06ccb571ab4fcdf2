//! Achievement table and evaluation.
//!
//! Only decides which achievements a state has reached. Storing unlocks and
//! notifying the player is the host's job.

use super::catalog::UnlockCondition;
use super::logic::condition_met;
use super::state::PlayerEconomyState;

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    pub key: &'static str,
    pub title: &'static str,
    pub condition: UnlockCondition,
}

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        key: "first_click",
        title: "First click",
        // Any positive score.
        condition: UnlockCondition::ScoreAtLeast {
            threshold: f64::MIN_POSITIVE,
        },
    },
    Achievement {
        key: "score_100",
        title: "Hundred",
        condition: UnlockCondition::ScoreAtLeast { threshold: 100.0 },
    },
    Achievement {
        key: "score_1k",
        title: "Thousand",
        condition: UnlockCondition::ScoreAtLeast { threshold: 1e3 },
    },
    Achievement {
        key: "score_1m",
        title: "Millionaire",
        condition: UnlockCondition::ScoreAtLeast { threshold: 1e6 },
    },
    Achievement {
        key: "score_1b",
        title: "Billionaire",
        condition: UnlockCondition::ScoreAtLeast { threshold: 1e9 },
    },
    Achievement {
        key: "generator_10",
        title: "Power plant",
        condition: UnlockCondition::UpgradeLevelAtLeast {
            upgrade_key: "generator",
            level: 10,
        },
    },
    Achievement {
        key: "boost_10",
        title: "Overdrive",
        condition: UnlockCondition::UpgradeLevelAtLeast {
            upgrade_key: "autoMultiplier",
            level: 10,
        },
    },
    Achievement {
        key: "first_prestige",
        title: "Born again",
        condition: UnlockCondition::PrestigeAtLeast { level: 1 },
    },
    Achievement {
        key: "prestige_10",
        title: "Reincarnated",
        condition: UnlockCondition::PrestigeAtLeast { level: 10 },
    },
];

/// Achievements reached by `state` that are not in `unlocked` yet.
pub fn newly_reached<S: AsRef<str>>(
    state: &PlayerEconomyState,
    unlocked: &[S],
) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.iter().any(|u| u.as_ref() == a.key))
        .filter(|a| condition_met(&a.condition, state))
        .collect()
}
