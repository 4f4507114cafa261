//! Spending Report

use std::{fmt, io};

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// JSON serialisation failed.
    #[error("failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Amount spent from one payment method over a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingEntry {
    /// Payment method identifier
    pub method: String,

    /// Spending limit the batch started with
    pub limit: Decimal,

    /// Amount consumed by the batch
    pub spent: Decimal,
}

impl SpendingEntry {
    /// Balance left after the batch.
    pub fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }
}

/// Amount spent per payment method, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendingReport {
    entries: Vec<SpendingEntry>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    method: &'a str,
    spent: String,
}

impl SpendingReport {
    /// Create a report from entries already in load order.
    pub fn new(entries: Vec<SpendingEntry>) -> Self {
        Self { entries }
    }

    /// Iterate entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &SpendingEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Amount spent from the named payment method.
    pub fn spent(&self, method: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|entry| entry.method == method)
            .map(|entry| entry.spent)
    }

    /// Total spent across every payment method.
    pub fn total_spent(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.spent).sum()
    }

    /// Write one `ID: amount` line per payment method.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_plain(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        writeln!(out, "{self}")?;

        Ok(())
    }

    /// Write the report as a table.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_table(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Method", "Limit", "Spent", "Remaining"]);

        for entry in &self.entries {
            builder.push_record([
                entry.method.clone(),
                plain_amount(entry.limit),
                plain_amount(entry.spent),
                plain_amount(entry.remaining()),
            ]);
        }

        builder.push_record([
            "Total".to_string(),
            String::new(),
            plain_amount(self.total_spent()),
            String::new(),
        ]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }

    /// Write the report as a JSON array of `{ "method", "spent" }` objects.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if serialisation or writing fails.
    pub fn write_json(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let entries: Vec<JsonEntry<'_>> = self
            .entries
            .iter()
            .map(|entry| JsonEntry {
                method: &entry.method,
                spent: plain_amount(entry.spent),
            })
            .collect();

        serde_json::to_writer_pretty(&mut out, &entries)?;
        writeln!(out)?;

        Ok(())
    }
}

impl FromIterator<SpendingEntry> for SpendingReport {
    fn from_iter<I: IntoIterator<Item = SpendingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SpendingReport {
    type Item = &'a SpendingEntry;
    type IntoIter = std::slice::Iter<'a, SpendingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for SpendingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }

            write!(f, "{}: {}", entry.method, plain_amount(entry.spent))?;
        }

        Ok(())
    }
}

/// Format an amount without exponent notation and with at least two decimal places.
pub fn plain_amount(amount: Decimal) -> String {
    let mut amount = amount.normalize();

    if amount.scale() < 2 {
        amount.rescale(2);
    }

    amount.to_string()
}
