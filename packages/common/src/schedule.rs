//! Date-budget allocation.
//!
//! Apportions the time left until a deadline across siblings (Key Results of an
//! Objective, items of a Roadmap) and turns the per-sibling day counts into
//! calendar dates. Everything here is pure: callers fetch deadlines and sibling
//! counts, this module does the arithmetic.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between `now` and `deadline`, rounded toward negative infinity.
///
/// The result is not clamped: zero or negative means the deadline cannot fund
/// any work and must be handled as "no usable budget", not as a short one.
pub fn days_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// A calendar deadline expires at midnight UTC of that date.
pub fn deadline_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Days given to the sibling at `index` when `total_days` are shared among
/// `sibling_count` siblings. The first `total_days % sibling_count` siblings
/// get one extra day. Returns 0 when there are no siblings.
pub fn share_of(total_days: u32, sibling_count: usize, index: usize) -> u32 {
    if sibling_count == 0 {
        return 0;
    }
    let count = u32::try_from(sibling_count).unwrap_or(u32::MAX);
    let base = total_days / count;
    let remainder = (total_days % count) as usize;
    if index < remainder { base + 1 } else { base }
}

/// Per-sibling day counts summing to exactly `total_days`.
///
/// With fewer days than siblings the tail receives zero days; callers that
/// cannot accept a zero clamp afterwards. An empty sibling list yields an empty
/// allocation.
pub fn split_days(total_days: u32, sibling_count: usize) -> Vec<u32> {
    (0..sibling_count)
        .map(|index| share_of(total_days, sibling_count, index))
        .collect()
}

/// Inclusive lower and upper bound applied to a single allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn clamp(self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Running totals of `counts`; entry `i` includes `counts[i]` itself.
pub fn cumulative_offsets(counts: &[u32]) -> Vec<u64> {
    counts
        .iter()
        .scan(0u64, |acc, &days| {
            *acc += u64::from(days);
            Some(*acc)
        })
        .collect()
}

/// Calendar dates reached by walking `counts` forward from `start`.
///
/// Sibling 0 lands on `start + counts[0]`, never on `start` itself.
pub fn schedule_dates(counts: &[u32], start: DateTime<Utc>) -> Vec<NaiveDate> {
    let origin = start.date_naive();
    cumulative_offsets(counts)
        .into_iter()
        .map(|offset| {
            origin
                .checked_add_days(Days::new(offset))
                .unwrap_or(NaiveDate::MAX)
        })
        .collect()
}

/// Per-stage constants for budget resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePolicy {
    /// Minimum budget when the entity carries its own date.
    pub floor: i64,
    /// Clamp applied to budgets derived from an ancestor deadline.
    pub range: Bounds,
    /// Budget used when no deadline in the chain is usable.
    pub fallback_days: i64,
}

/// Roadmap generation for a Key Result.
pub const ROADMAP: StagePolicy = StagePolicy {
    floor: 3,
    range: Bounds::new(3, 30),
    fallback_days: 30,
};

/// Trail generated for a bare topic, outside any roadmap.
pub const STANDALONE_TRAIL: StagePolicy = StagePolicy {
    floor: 3,
    range: Bounds::new(3, 30),
    fallback_days: 14,
};

/// Trail generated for a roadmap item.
pub const ROADMAP_ITEM_TRAIL: StagePolicy = StagePolicy {
    floor: 3,
    range: Bounds::new(3, 30),
    fallback_days: 3,
};

/// One division step: the budget is shared among `count` siblings and the
/// entity keeps the share at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub count: usize,
    pub index: usize,
}

impl Level {
    pub const fn new(count: usize, index: usize) -> Self {
        Self { count, index }
    }
}

/// A deadline plus the division chain that narrows it down to one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineBasis {
    pub deadline: DateTime<Utc>,
    pub levels: Vec<Level>,
}

impl DeadlineBasis {
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            deadline,
            levels: Vec::new(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(deadline_instant(date))
    }

    pub fn divided_by(mut self, level: Level) -> Self {
        self.levels.push(level);
        self
    }
}

/// Which branch of the resolution produced a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSource {
    Explicit,
    Ancestor,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub days: i64,
    pub source: BudgetSource,
}

// Levels with no siblings are skipped rather than divided by.
fn divide_through(days: u32, levels: &[Level]) -> u32 {
    levels.iter().fold(days, |acc, level| {
        if level.count == 0 {
            acc
        } else {
            share_of(acc, level.count, level.index.min(level.count - 1))
        }
    })
}

/// Resolve the day budget for one entity.
///
/// 1. `explicit` (the entity's own date): remaining days, divided through its
///    levels when positive, then raised to `policy.floor`. No ceiling.
/// 2. `ancestor`: only when its remaining days are positive; divided through
///    its levels and clamped to `policy.range`.
/// 3. Otherwise `policy.fallback_days`.
///
/// Never fails.
pub fn resolve_budget(
    policy: &StagePolicy,
    explicit: Option<&DeadlineBasis>,
    ancestor: Option<&DeadlineBasis>,
    now: DateTime<Utc>,
) -> Budget {
    if let Some(basis) = explicit {
        let remaining = days_remaining(basis.deadline, now);
        let days = match u32::try_from(remaining) {
            Ok(days) if days > 0 => i64::from(divide_through(days, &basis.levels)),
            _ => remaining,
        };
        return Budget {
            days: days.max(policy.floor),
            source: BudgetSource::Explicit,
        };
    }

    if let Some(basis) = ancestor {
        let remaining = days_remaining(basis.deadline, now);
        if remaining > 0 {
            let days = u32::try_from(remaining).unwrap_or(u32::MAX);
            let share = i64::from(divide_through(days, &basis.levels));
            return Budget {
                days: policy.range.clamp(share),
                source: BudgetSource::Ancestor,
            };
        }
    }

    Budget {
        days: policy.fallback_days,
        source: BudgetSource::Fallback,
    }
}

/// A Key Result date as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDate {
    pub date: Option<NaiveDate>,
    /// True when the date was computed rather than stored.
    pub estimated: bool,
}

/// Spread an Objective's deadline over its undated Key Results.
///
/// `explicit` lists the stored dates in creation order. Dated entries are kept
/// and excluded from the split; the undated ones share the remaining days in
/// order and get cumulative dates from `now`. A past deadline is reported as-is
/// on every undated entry; without a deadline nothing changes.
pub fn spread_deadlines(
    deadline: Option<NaiveDate>,
    explicit: &[Option<NaiveDate>],
    now: DateTime<Utc>,
) -> Vec<ScheduledDate> {
    let mut scheduled: Vec<ScheduledDate> = explicit
        .iter()
        .map(|&date| ScheduledDate {
            date,
            estimated: false,
        })
        .collect();

    let Some(deadline) = deadline else {
        return scheduled;
    };

    let pending: Vec<usize> = explicit
        .iter()
        .enumerate()
        .filter_map(|(slot, date)| date.is_none().then_some(slot))
        .collect();
    if pending.is_empty() {
        return scheduled;
    }

    let remaining = days_remaining(deadline_instant(deadline), now);
    if remaining > 0 {
        let total = u32::try_from(remaining).unwrap_or(u32::MAX);
        let counts = split_days(total, pending.len());
        for (slot, date) in pending.into_iter().zip(schedule_dates(&counts, now)) {
            scheduled[slot] = ScheduledDate {
                date: Some(date),
                estimated: true,
            };
        }
    } else {
        for slot in pending {
            scheduled[slot] = ScheduledDate {
                date: Some(deadline),
                estimated: true,
            };
        }
    }

    scheduled
}

/// Bounds on the number of roadmap items requested from the generator.
pub const ROADMAP_ITEM_COUNT: Bounds = Bounds::new(3, 20);

/// Minimum days one item's trail should get, tiered on the roadmap budget.
pub fn min_days_per_trail(available_days: i64) -> i64 {
    match available_days {
        i64::MIN..=13 => 3,
        14..=30 => 5,
        31..=60 => 6,
        _ => 7,
    }
}

/// Day budget and item-count hint sent along with a roadmap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapPlan {
    pub available_days: i64,
    pub min_days_per_trail: i64,
    pub exact_item_count: i64,
}

pub fn plan_roadmap(available_days: i64) -> RoadmapPlan {
    let tier = min_days_per_trail(available_days);
    RoadmapPlan {
        available_days,
        min_days_per_trail: tier,
        exact_item_count: ROADMAP_ITEM_COUNT.clamp(available_days / tier),
    }
}
