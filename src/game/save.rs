//! 経済状態のスナップショット/復元。
//!
//! ## 方針
//!
//! - 保存先 (localStorage, クラウド DB 等) は外部の責務。ここでは
//!   `EconomyRecord` との相互変換と JSON 化だけを行う。
//! - フィールド名が契約。`mantisse`/`exposant` の旧フィールド名も読み込める。
//! - カタログに存在するのにレコードに無いアップグレードはレベル 0 で補完する
//!   (カタログ拡張に対する前方互換)。カタログに無いキーは捨てる。
//! - `ratePerSec` は保存されていても信用せず、読み込み時に再計算する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::Catalog;
use super::state::{sanitize_name, PlayerEconomyState, UpgradeState};
use crate::error::SaveError;
use crate::sci::Sci;

/// 保存・送信用のレコード。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EconomyRecord {
    pub score: Sci,
    pub total_earned: Sci,
    pub total_clicks: u64,
    pub rate_per_sec: Sci,
    pub prestige_level: u32,
    pub prestige_points: u64,
    pub upgrades: BTreeMap<String, UpgradeState>,
    pub display_name: Option<String>,
}

/// 現在の状態からレコードを作る。
pub fn snapshot(state: &PlayerEconomyState) -> EconomyRecord {
    EconomyRecord {
        score: state.score,
        total_earned: state.total_earned,
        total_clicks: state.total_clicks,
        rate_per_sec: state.rate_per_sec,
        prestige_level: state.prestige_level,
        prestige_points: state.prestige_points,
        upgrades: state.upgrades.clone(),
        display_name: state.display_name.clone(),
    }
}

/// レコードから状態を復元する。
/// 数値は正規化し直し、`ratePerSec` はカタログから再計算する。
pub fn restore(catalog: &Catalog, record: &EconomyRecord) -> PlayerEconomyState {
    let mut state = PlayerEconomyState::new(catalog);
    state.score = record.score.normalize();
    state.total_earned = record.total_earned.normalize();
    state.total_clicks = record.total_clicks;
    state.prestige_level = record.prestige_level;
    state.prestige_points = record.prestige_points;

    for (key, saved) in &record.upgrades {
        match state.upgrades.get_mut(key) {
            Some(upgrade) => upgrade.level = saved.level,
            None => warn!(key = %key, level = saved.level, "Dropping upgrade missing from catalog"),
        }
    }

    state.display_name = record
        .display_name
        .as_deref()
        .map(sanitize_name)
        .filter(|n| !n.is_empty());
    state.refresh_rate(catalog);

    info!(
        score = %state.score,
        rate = %state.rate_per_sec,
        prestige_level = state.prestige_level,
        "Economy state restored"
    );
    state
}

pub fn to_json(state: &PlayerEconomyState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&snapshot(state))?)
}

pub fn from_json(catalog: &Catalog, json: &str) -> Result<PlayerEconomyState, SaveError> {
    let record: EconomyRecord = serde_json::from_str(json)?;
    Ok(restore(catalog, &record))
}

/// 外部の保存層がスナップショットを取るタイミングを決める。
///
/// 最後の変更から `debounce_secs` 経過したら保存。変更が続いていても
/// 最初の未保存の変更から `fallback_secs` 経過したら保存する。時刻は単調な秒数。
#[derive(Clone, Debug)]
pub struct SnapshotSchedule {
    debounce_secs: f64,
    fallback_secs: f64,
    /// 未保存の最初の変更時刻と最後の変更時刻。
    dirty: Option<(f64, f64)>,
}

impl SnapshotSchedule {
    pub fn new(debounce_secs: f64, fallback_secs: f64) -> Self {
        Self {
            debounce_secs,
            fallback_secs,
            dirty: None,
        }
    }

    /// 状態が変わったことを記録する。
    pub fn mark_dirty(&mut self, now: f64) {
        self.dirty = Some(match self.dirty {
            Some((first, _)) => (first, now),
            None => (now, now),
        });
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// 保存すべきなら true を返し、未保存フラグを落とす。
    pub fn poll(&mut self, now: f64) -> bool {
        let Some((first, last)) = self.dirty else {
            return false;
        };
        let settled = now - last >= self.debounce_secs;
        let overdue = now - first >= self.fallback_secs;
        if settled || overdue {
            self.dirty = None;
            true
        } else {
            false
        }
    }
}
