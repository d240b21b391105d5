use chrono::{Datelike, NaiveDate};

use super::error::StockError;

/// Gapless document number sequence.
///
/// Yearly sequences generate `{prefix}{year}-{sequential}` (e.g. "BILL/2024-001");
/// sequences without a year generate `{prefix}{sequential}` (e.g. "WH/IN/00001").
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DocumentSequence {
    prefix: String,
    year: Option<i32>,
    next_number: u64,
    zero_pad: usize,
}

impl DocumentSequence {
    /// Create a yearly sequence starting at 1.
    pub fn yearly(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year: Some(year),
            next_number: 1,
            zero_pad: 3,
        }
    }

    /// Create a sequence without year component, padded to 5 digits.
    pub fn plain(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            year: None,
            next_number: 1,
            zero_pad: 5,
        }
    }

    /// Continue from a given number.
    pub fn starting_at(mut self, next_number: u64) -> Self {
        self.next_number = next_number;
        self
    }

    /// Set zero-padding width.
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next number.
    pub fn next_number(&mut self) -> String {
        let formatted = self.format(self.next_number);
        self.next_number += 1;
        formatted
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Advance a yearly sequence to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), StockError> {
        match self.year {
            Some(year) if new_year > year => {
                self.year = Some(new_year);
                self.next_number = 1;
                Ok(())
            }
            Some(year) => Err(StockError::State(format!(
                "new year {new_year} must be greater than current year {year}"
            ))),
            None => Err(StockError::State(format!(
                "sequence '{}' has no year component",
                self.prefix
            ))),
        }
    }

    /// Auto-advance a yearly sequence if `date` lies in a later year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        match self.year {
            Some(year) if date.year() > year => {
                self.year = Some(date.year());
                self.next_number = 1;
                true
            }
            _ => false,
        }
    }

    fn format(&self, num: u64) -> String {
        match self.year {
            Some(year) => format!(
                "{}{}-{:0>width$}",
                self.prefix,
                year,
                num,
                width = self.zero_pad
            ),
            None => format!("{}{:0>width$}", self.prefix, num, width = self.zero_pad),
        }
    }
}
