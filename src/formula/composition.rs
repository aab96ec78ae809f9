//! Parsed atomic composition of a single compound.

use std::fmt;

/// Element symbol to atom count mapping for one compound.
///
/// Elements keep the order in which they were first seen in the formula
/// text, so iteration (and therefore matrix row order) is deterministic.
/// Every stored count is at least 1. Equality ignores ordering.
#[derive(Debug, Clone, Default, Eq)]
pub struct Formula {
    counts: Vec<(String, u64)>,
}

impl Formula {
    /// Create an empty composition.
    pub(crate) fn new() -> Self {
        Self { counts: Vec::new() }
    }

    /// Build a composition from `(symbol, count)` pairs, summing repeats.
    ///
    /// Pairs with a zero count are skipped. Repeated counts saturate at
    /// `u64::MAX`.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        let mut formula = Self::new();
        for (symbol, count) in pairs.into_iter().filter(|(_, c)| *c > 0) {
            match formula.counts.iter_mut().find(|(s, _)| s == symbol) {
                Some((_, existing)) => *existing = existing.saturating_add(count),
                None => formula.counts.push((symbol.to_string(), count)),
            }
        }
        formula
    }

    /// Add `count` atoms of `symbol`. Returns `None` on overflow.
    pub(crate) fn add(&mut self, symbol: &str, count: u64) -> Option<()> {
        match self.counts.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, existing)) => *existing = existing.checked_add(count)?,
            None => self.counts.push((symbol.to_string(), count)),
        }
        Some(())
    }

    /// Merge every count of `other`, multiplied by `factor`, into `self`.
    /// Returns `None` on overflow.
    pub(crate) fn merge_scaled(&mut self, other: &Formula, factor: u64) -> Option<()> {
        for (symbol, count) in &other.counts {
            self.add(symbol, count.checked_mul(factor)?)?;
        }
        Some(())
    }

    /// Multiply every count by `factor`. Returns `None` on overflow.
    pub(crate) fn scale(&mut self, factor: u64) -> Option<()> {
        for (_, count) in &mut self.counts {
            *count = count.checked_mul(factor)?;
        }
        Some(())
    }

    /// Atom count of `symbol` (0 when absent).
    pub fn get(&self, symbol: &str) -> u64 {
        self.counts
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Whether the element occurs in this compound.
    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.iter().any(|(s, _)| s == symbol)
    }

    /// Iterate `(symbol, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// Element symbols in first-seen order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(s, _)| s.as_str())
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(s, c)| other.get(s) == c)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            if count == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}{}", symbol, count)?;
            }
        }
        Ok(())
    }
}
