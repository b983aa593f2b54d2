use super::gap::GapEntry;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Ambitious,
    Target,
    Safe,
}

impl Tier {
    pub const fn ordered() -> [Tier; 3] {
        [Self::Ambitious, Self::Target, Self::Safe]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ambitious => "Ambitious",
            Self::Target => "Target",
            Self::Safe => "Safe",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Ambitious => "Universities that will stretch your profile",
            Self::Target => "Best-fit options",
            Self::Safe => "Safer admits consistent with your profile",
        }
    }
}

/// Nominal band widths. The target width counts the anchor itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWindows {
    pub ambitious: usize,
    pub target: usize,
    pub safe: usize,
}

impl Default for TierWindows {
    fn default() -> Self {
        Self {
            ambitious: 6,
            target: 6,
            safe: 6,
        }
    }
}

/// Index ranges into a gap-descending list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBands {
    pub anchor: usize,
    pub ambitious: Range<usize>,
    pub target: Range<usize>,
    pub safe: Range<usize>,
}

impl TierBands {
    pub fn range(&self, tier: Tier) -> Range<usize> {
        match tier {
            Tier::Ambitious => self.ambitious.clone(),
            Tier::Target => self.target.clone(),
            Tier::Safe => self.safe.clone(),
        }
    }

    pub fn tier_of(&self, index: usize) -> Option<Tier> {
        Tier::ordered()
            .into_iter()
            .find(|tier| self.range(*tier).contains(&index))
    }
}

/// Picks the entry with the smallest positive gap; when every gap is at or
/// below zero, the entry closest to zero. Ties go to the lowest index.
pub fn select_anchor(entries: &[GapEntry]) -> Option<usize> {
    let smallest_positive = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.gap > 0.0)
        .fold(None::<(usize, f64)>, |best, (index, entry)| match best {
            Some((_, gap)) if gap <= entry.gap => best,
            _ => Some((index, entry.gap)),
        });
    if let Some((index, _)) = smallest_positive {
        return Some(index);
    }

    entries
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (index, entry)| match best {
            Some((_, distance)) if distance <= entry.gap.abs() => best,
            _ => Some((index, entry.gap.abs())),
        })
        .map(|(index, _)| index)
}

/// Splits `len` positions around `anchor` into non-overlapping bands, clamped to the list.
pub fn partition(len: usize, anchor: usize, windows: &TierWindows) -> TierBands {
    let anchor = anchor.min(len.saturating_sub(1));
    let target_start = anchor.saturating_sub(windows.target.saturating_sub(1));
    let target_end = (anchor + 1).min(len);

    let ambitious_start = target_start.saturating_sub(windows.ambitious);

    let safe_start = target_end;
    let safe_end = safe_start.saturating_add(windows.safe).min(len);

    TierBands {
        anchor,
        ambitious: ambitious_start..target_start,
        target: target_start..target_end,
        safe: safe_start..safe_end,
    }
}
