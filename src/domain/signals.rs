//! Historical vs current-month comparison over the weekday × hour grid.
//!
//! Records dated in the reference month form the current partition; all
//! other records form the historical one. Each slot is classified by the
//! sign agreement of the two partitions.

use crate::domain::aggregator::{SlotAggregate, aggregate_slots};
use crate::domain::operation::OperationRecord;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotSignal {
    /// Both periods positive.
    Ligar,
    /// Periods disagree in sign.
    Alerta,
    /// Both periods flat or negative.
    NaoLigar,
    /// One of the periods has no operations in the slot.
    SemDados,
}

impl SlotSignal {
    pub fn classify(historical: &SlotAggregate, current: &SlotAggregate) -> Self {
        if historical.ops_count == 0 || current.ops_count == 0 {
            SlotSignal::SemDados
        } else if historical.net_result > 0.0 && current.net_result > 0.0 {
            SlotSignal::Ligar
        } else if historical.net_result <= 0.0 && current.net_result <= 0.0 {
            SlotSignal::NaoLigar
        } else {
            SlotSignal::Alerta
        }
    }
}

impl fmt::Display for SlotSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotSignal::Ligar => "LIGAR",
            SlotSignal::Alerta => "ALERTA",
            SlotSignal::NaoLigar => "NAO_LIGAR",
            SlotSignal::SemDados => "SEM_DADOS",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalCell {
    pub weekday: Weekday,
    pub hour: u32,
    pub historical_result: f64,
    pub historical_ops: usize,
    pub current_result: f64,
    pub current_ops: usize,
    pub signal: SlotSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub ligar: usize,
    pub alerta: usize,
    pub nao_ligar: usize,
    pub sem_dados: usize,
    /// LIGAR share of the slots that have data in both periods, 0..=100.
    pub score: f64,
}

impl SignalSummary {
    fn from_cells(cells: &[SignalCell]) -> Self {
        let mut summary = SignalSummary::default();
        for cell in cells {
            match cell.signal {
                SlotSignal::Ligar => summary.ligar += 1,
                SlotSignal::Alerta => summary.alerta += 1,
                SlotSignal::NaoLigar => summary.nao_ligar += 1,
                SlotSignal::SemDados => summary.sem_dados += 1,
            }
        }
        let classified = summary.ligar + summary.alerta + summary.nao_ligar;
        summary.score = if classified > 0 {
            summary.ligar as f64 / classified as f64 * 100.0
        } else {
            0.0
        };
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalGrid {
    pub reference_month: String,
    pub cells: Vec<SignalCell>,
    pub summary: SignalSummary,
}

impl SignalGrid {
    pub fn cell(&self, weekday: Weekday, hour: u32) -> Option<&SignalCell> {
        self.cells
            .iter()
            .find(|c| c.weekday == weekday && c.hour == hour)
    }
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Builds the 45-cell grid. `reference_date` selects the current month.
pub fn classify_slots(records: &[OperationRecord], reference_date: NaiveDate) -> SignalGrid {
    let (current, historical): (Vec<&OperationRecord>, Vec<&OperationRecord>) = records
        .iter()
        .partition(|r| same_month(r.date, reference_date));

    let historical_grid = aggregate_slots(historical.iter().copied());
    let current_grid = aggregate_slots(current.iter().copied());

    let cells: Vec<SignalCell> = historical_grid
        .slots()
        .iter()
        .zip(current_grid.slots())
        .map(|(h, c)| SignalCell {
            weekday: h.weekday,
            hour: h.hour,
            historical_result: h.net_result,
            historical_ops: h.ops_count,
            current_result: c.net_result,
            current_ops: c.ops_count,
            signal: SlotSignal::classify(h, c),
        })
        .collect();

    let summary = SignalSummary::from_cells(&cells);
    let reference_month = reference_date.format("%Y-%m").to_string();

    tracing::debug!(
        month = %reference_month,
        current = current.len(),
        historical = historical.len(),
        score = summary.score,
        "classified slots"
    );

    SignalGrid {
        reference_month,
        cells,
        summary,
    }
}
