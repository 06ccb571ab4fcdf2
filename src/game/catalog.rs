//! Upgrade catalog: static definitions shared by every player.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::CatalogError;

/// What a multiplier-category upgrade multiplies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiplierTarget {
    /// Passive production only.
    Auto,
    /// Manual click gain only.
    Click,
    /// Both production and click gain.
    Both,
}

impl MultiplierTarget {
    pub fn boosts_auto(self) -> bool {
        matches!(self, MultiplierTarget::Auto | MultiplierTarget::Both)
    }

    pub fn boosts_click(self) -> bool {
        matches!(self, MultiplierTarget::Click | MultiplierTarget::Both)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeCategory {
    /// Adds `level × base_value` to each click.
    Click,
    /// Adds `level × base_value` to production per second.
    Auto,
    /// Multiplies by `base_value^level`.
    Multiplier(MultiplierTarget),
}

/// When an upgrade becomes visible and purchasable.
#[derive(Clone, Debug, PartialEq)]
pub enum UnlockCondition {
    Start,
    ScoreAtLeast { threshold: f64 },
    UpgradeLevelAtLeast { upgrade_key: &'static str, level: u32 },
    PrestigeAtLeast { level: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeDefinition {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    /// Growth factor per level already owned.
    pub cost_multiplier: f64,
    pub base_value: f64,
    pub category: UpgradeCategory,
    pub unlock: UnlockCondition,
}

/// Immutable, validated set of upgrade definitions, in display order.
#[derive(Debug)]
pub struct Catalog {
    upgrades: Vec<UpgradeDefinition>,
}

impl Catalog {
    pub fn new(upgrades: Vec<UpgradeDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for def in &upgrades {
            if !seen.insert(def.key) {
                return Err(CatalogError::DuplicateKey(def.key.to_string()));
            }
            if !(def.cost_multiplier >= 1.0) {
                return Err(CatalogError::InvalidCostMultiplier {
                    key: def.key.to_string(),
                    multiplier: def.cost_multiplier,
                });
            }
            if !(def.base_cost > 0.0) {
                return Err(CatalogError::InvalidBaseCost {
                    key: def.key.to_string(),
                    cost: def.base_cost,
                });
            }
        }
        for def in &upgrades {
            if let UnlockCondition::UpgradeLevelAtLeast { upgrade_key, .. } = def.unlock {
                if !seen.contains(upgrade_key) {
                    return Err(CatalogError::UnknownReference {
                        key: def.key.to_string(),
                        reference: upgrade_key.to_string(),
                    });
                }
            }
        }
        Ok(Self { upgrades })
    }

    /// The built-in catalog, constructed on first use.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| Catalog {
            upgrades: standard_upgrades(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&UpgradeDefinition> {
        self.upgrades.iter().find(|u| u.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeDefinition> {
        self.upgrades.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.upgrades.iter().map(|u| u.key)
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}

fn standard_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        UpgradeDefinition {
            key: "click",
            title: "Click+",
            description: "+1 per click.",
            base_cost: 20.0,
            cost_multiplier: 1.18,
            base_value: 1.0,
            category: UpgradeCategory::Click,
            unlock: UnlockCondition::Start,
        },
        UpgradeDefinition {
            key: "generator",
            title: "Generator",
            description: "Produces 0.2 per second.",
            base_cost: 10.0,
            cost_multiplier: 1.15,
            base_value: 0.2,
            category: UpgradeCategory::Auto,
            unlock: UnlockCondition::Start,
        },
        UpgradeDefinition {
            key: "autoMultiplier",
            title: "Boost",
            description: "x1.5 production per level.",
            base_cost: 100.0,
            cost_multiplier: 2.5,
            base_value: 1.5,
            category: UpgradeCategory::Multiplier(MultiplierTarget::Auto),
            unlock: UnlockCondition::UpgradeLevelAtLeast {
                upgrade_key: "generator",
                level: 5,
            },
        },
        UpgradeDefinition {
            key: "clickMultiplier",
            title: "Power Click",
            description: "x1.5 click gain per level.",
            base_cost: 150.0,
            cost_multiplier: 2.5,
            base_value: 1.5,
            category: UpgradeCategory::Multiplier(MultiplierTarget::Click),
            unlock: UnlockCondition::UpgradeLevelAtLeast {
                upgrade_key: "click",
                level: 5,
            },
        },
        UpgradeDefinition {
            key: "factory",
            title: "Factory",
            description: "Produces 5 per second.",
            base_cost: 500.0,
            cost_multiplier: 1.15,
            base_value: 5.0,
            category: UpgradeCategory::Auto,
            unlock: UnlockCondition::ScoreAtLeast { threshold: 250.0 },
        },
        UpgradeDefinition {
            key: "reactor",
            title: "Reactor",
            description: "Produces 60 per second.",
            base_cost: 12_000.0,
            cost_multiplier: 1.15,
            base_value: 60.0,
            category: UpgradeCategory::Auto,
            unlock: UnlockCondition::ScoreAtLeast { threshold: 5_000.0 },
        },
        UpgradeDefinition {
            key: "globalMultiplier",
            title: "Overclock",
            description: "x1.25 production and click gain per level.",
            base_cost: 5_000.0,
            cost_multiplier: 2.2,
            base_value: 1.25,
            category: UpgradeCategory::Multiplier(MultiplierTarget::Both),
            unlock: UnlockCondition::UpgradeLevelAtLeast {
                upgrade_key: "factory",
                level: 10,
            },
        },
        UpgradeDefinition {
            key: "supercharger",
            title: "Supercharger",
            description: "x2 production and click gain per level.",
            base_cost: 1_000_000.0,
            cost_multiplier: 4.0,
            base_value: 2.0,
            category: UpgradeCategory::Multiplier(MultiplierTarget::Both),
            unlock: UnlockCondition::PrestigeAtLeast { level: 1 },
        },
    ]
}
