//! Groups operation records into per-day and per-(weekday, hour) summaries.

use crate::domain::operation::OperationRecord;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TRADING_WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
pub const FIRST_SLOT_HOUR: u32 = 9;
pub const LAST_SLOT_HOUR: u32 = 17;
pub const HOURS_PER_DAY: usize = (LAST_SLOT_HOUR - FIRST_SLOT_HOUR + 1) as usize;
pub const SLOT_COUNT: usize = TRADING_WEEKDAYS.len() * HOURS_PER_DAY;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub net_result: f64,
    pub ops_count: usize,
    pub wins: usize,
    pub losses: usize,
    pub best_trade: f64,
    pub worst_trade: f64,
}

impl DailyAggregate {
    fn open(record: &OperationRecord) -> Self {
        Self {
            date: record.date,
            net_result: 0.0,
            ops_count: 0,
            wins: 0,
            losses: 0,
            best_trade: record.result,
            worst_trade: record.result,
        }
    }

    fn add(&mut self, record: &OperationRecord) {
        self.net_result += record.result;
        self.ops_count += 1;
        if record.is_win() {
            self.wins += 1;
        } else if record.is_loss() {
            self.losses += 1;
        }
        self.best_trade = self.best_trade.max(record.result);
        self.worst_trade = self.worst_trade.min(record.result);
    }
}

/// Per-day aggregates sorted ascending by date.
pub fn aggregate_daily(records: &[OperationRecord]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();
    for record in records {
        by_date
            .entry(record.date)
            .or_insert_with(|| DailyAggregate::open(record))
            .add(record);
    }
    by_date.into_values().collect()
}

/// Net result of each day, in date order.
pub fn daily_results(daily: &[DailyAggregate]) -> Vec<f64> {
    daily.iter().map(|d| d.net_result).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAggregate {
    pub weekday: Weekday,
    pub hour: u32,
    pub net_result: f64,
    pub ops_count: usize,
}

/// Dense weekday × hour grid, Monday 09h first, Friday 17h last.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    slots: Vec<SlotAggregate>,
}

impl SlotGrid {
    pub fn empty() -> Self {
        let slots = TRADING_WEEKDAYS
            .iter()
            .flat_map(|&weekday| {
                (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).map(move |hour| SlotAggregate {
                    weekday,
                    hour,
                    net_result: 0.0,
                    ops_count: 0,
                })
            })
            .collect();
        Self { slots }
    }

    /// Position of a (weekday, hour) pair in the grid, `None` for weekends and
    /// hours outside the trading window.
    pub fn index_of(weekday: Weekday, hour: u32) -> Option<usize> {
        if !(FIRST_SLOT_HOUR..=LAST_SLOT_HOUR).contains(&hour) {
            return None;
        }
        let day = TRADING_WEEKDAYS.iter().position(|&d| d == weekday)?;
        Some(day * HOURS_PER_DAY + (hour - FIRST_SLOT_HOUR) as usize)
    }

    pub fn get(&self, weekday: Weekday, hour: u32) -> Option<&SlotAggregate> {
        Self::index_of(weekday, hour).map(|i| &self.slots[i])
    }

    pub fn slots(&self) -> &[SlotAggregate] {
        &self.slots
    }

    /// Adds a record to its slot. Returns `false` when the record falls
    /// outside the grid and was dropped.
    fn add(&mut self, record: &OperationRecord) -> bool {
        match Self::index_of(record.weekday(), record.hour()) {
            Some(i) => {
                let slot = &mut self.slots[i];
                slot.net_result += record.result;
                slot.ops_count += 1;
                true
            }
            None => false,
        }
    }
}

/// Aggregates records into the weekday × hour grid. Weekend records and
/// records outside 09h–17h are dropped, not zero-filled.
pub fn aggregate_slots<'a, I>(records: I) -> SlotGrid
where
    I: IntoIterator<Item = &'a OperationRecord>,
{
    let mut grid = SlotGrid::empty();
    for record in records {
        grid.add(record);
    }
    grid
}
