//! Sticker extraction heuristic.
//!
//! Stickers are short free-text labels printed in the first column of the
//! inspection tables. Everything else in that column (side/position headers,
//! part numbers, boilerplate) is removed by a fixed chain of string filters.

use std::collections::HashSet;
use std::fmt;

use crate::grid::CellGrid;

/// Keywords that mark a first-column cell as a header or boilerplate line.
pub const DEFAULT_EXCLUDED_KEYWORDS: &[&str] = &[
    "LEFT",
    "RIGHT",
    "REAR",
    "FRONT",
    "PLANT",
    "DATA",
    "SYSTEM",
    "CONFIDENTIAL",
    "BUY OFF",
];

/// Why a candidate line was not accepted as a sticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The cell was missing or contained only whitespace.
    Blank,
    /// The upper-cased line contains an excluded keyword.
    ExcludedKeyword(String),
    /// The line contains a numeric character.
    ContainsDigit,
    /// The line is shorter than the minimum character count.
    TooShort,
    /// The line has more whitespace-separated words than allowed.
    TooManyWords,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Blank => write!(f, "blank"),
            Rejection::ExcludedKeyword(k) => write!(f, "excluded keyword {k:?}"),
            Rejection::ContainsDigit => write!(f, "contains a digit"),
            Rejection::TooShort => write!(f, "too short"),
            Rejection::TooManyWords => write!(f, "too many words"),
        }
    }
}

/// Filter settings for sticker extraction.
///
/// The defaults reproduce the layout of the inspection sheets: the first
/// eight rows are the document header, stickers follow within the next
/// hundred rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickerFilter {
    /// Leading rows of the column to ignore. Default: `8`.
    pub skip_rows: usize,
    /// Maximum number of rows examined after the skipped ones. Default: `100`.
    pub max_rows: usize,
    /// Upper-case keywords; a line containing any of them is rejected.
    pub excluded_keywords: Vec<String>,
    /// Minimum number of characters in a sticker. Default: `5`.
    pub min_chars: usize,
    /// Maximum number of words in a sticker. Default: `6`.
    pub max_words: usize,
}

impl Default for StickerFilter {
    fn default() -> Self {
        Self {
            skip_rows: 8,
            max_rows: 100,
            excluded_keywords: DEFAULT_EXCLUDED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            min_chars: 5,
            max_words: 6,
        }
    }
}

impl StickerFilter {
    /// Reduce a raw cell text to the line a sticker is read from.
    ///
    /// Multi-line cells carry the label on their first line; continuation
    /// lines are translations or remarks.
    pub fn first_line(raw: &str) -> &str {
        let trimmed = raw.trim();
        trimmed.split('\n').next().unwrap_or("").trim()
    }

    /// Check a single (already reduced) line against the filter chain.
    ///
    /// Checks run in a fixed order and the first failure is reported.
    pub fn check(&self, line: &str) -> Result<(), Rejection> {
        if line.is_empty() {
            return Err(Rejection::Blank);
        }

        let upper = line.to_uppercase();
        if let Some(keyword) = self
            .excluded_keywords
            .iter()
            .find(|k| upper.contains(k.as_str()))
        {
            return Err(Rejection::ExcludedKeyword(keyword.clone()));
        }

        if line.chars().any(is_digit) {
            return Err(Rejection::ContainsDigit);
        }

        if line.chars().count() < self.min_chars {
            return Err(Rejection::TooShort);
        }

        if line.split_whitespace().count() > self.max_words {
            return Err(Rejection::TooManyWords);
        }

        Ok(())
    }

    /// Extract stickers from a column of cells, top to bottom.
    ///
    /// Returns the accepted lines de-duplicated in first-seen order.
    pub fn extract<'a, I>(&self, cells: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut seen = HashSet::new();
        let mut stickers = Vec::new();

        for cell in cells.into_iter().skip(self.skip_rows).take(self.max_rows) {
            let Some(raw) = cell else { continue };
            let line = Self::first_line(raw);
            if self.check(line).is_ok() && seen.insert(line) {
                stickers.push(line.to_string());
            }
        }

        stickers
    }

    /// Extract stickers from the first column of `grid`.
    pub fn extract_from_grid(&self, grid: &CellGrid) -> Vec<String> {
        self.extract(grid.column(0))
    }
}

/// Decimal digits plus digit-like forms such as superscripts and circled
/// digits. Fractions and letter-like numerals (`½`, `Ⅻ`, `〇`) do not count.
fn is_digit(c: char) -> bool {
    c.is_numeric()
        && !matches!(
            c,
            '\u{00BC}'..='\u{00BE}'
                | '\u{16EE}'..='\u{16F0}'
                | '\u{2150}'..='\u{218B}'
                | '\u{3007}'
                | '\u{3021}'..='\u{3029}'
                | '\u{3038}'..='\u{303A}'
        )
}
