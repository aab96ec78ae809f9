//! Reactant/product split of an equation string.

use std::fmt;

use crate::error::{BalanceError, Result};

/// Recognized reaction arrows, longest first so that `<=>` wins over `=`.
pub const ARROWS: [&str; 10] = ["<=>", "<->", "-->", "->", "=>", "→", "⟶", "⇌", "⇄", "="];

/// Which side of the arrow a compound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reactants,
    Products,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reactants => write!(f, "reactants"),
            Side::Products => write!(f, "products"),
        }
    }
}

/// A chemical equation split into ordered compound lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The text the equation was parsed from
    text: String,
    /// Arrow token as written
    arrow: String,
    /// Reactant formulas in input order
    reactants: Vec<String>,
    /// Product formulas in input order
    products: Vec<String>,
}

impl Equation {
    /// Split `text` on its reaction arrow and `+` separators.
    pub fn parse(text: &str) -> Result<Self> {
        let (start, arrow) = find_arrow(text)?;
        let left = &text[..start];
        let right = &text[start + arrow.len()..];

        let reactants = split_side(left, Side::Reactants)?;
        let products = split_side(right, Side::Products)?;

        Ok(Self {
            text: text.to_string(),
            arrow: arrow.to_string(),
            reactants,
            products,
        })
    }

    /// The equation text as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The arrow token as written.
    pub fn arrow(&self) -> &str {
        &self.arrow
    }

    pub fn reactants(&self) -> &[String] {
        &self.reactants
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// All compounds in column order (reactants first) with their side.
    pub fn compounds(&self) -> impl Iterator<Item = (Side, &str)> {
        self.reactants
            .iter()
            .map(|c| (Side::Reactants, c.as_str()))
            .chain(self.products.iter().map(|c| (Side::Products, c.as_str())))
    }

    /// Total number of compounds.
    pub fn compound_count(&self) -> usize {
        self.reactants.len() + self.products.len()
    }
}

/// Locate the single reaction arrow. Returns its byte offset and token.
fn find_arrow(text: &str) -> Result<(usize, &'static str)> {
    let mut found: Vec<(usize, &'static str)> = Vec::new();
    let mut idx = 0;
    while idx < text.len() {
        let rest = &text[idx..];
        if let Some(arrow) = ARROWS.iter().find(|a| rest.starts_with(**a)) {
            found.push((idx, *arrow));
            idx += arrow.len();
        } else {
            // Step to the next char boundary.
            idx += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    match found.as_slice() {
        [] => Err(BalanceError::format(format!(
            "no reaction arrow found (expected one of {})",
            ARROWS.join(" ")
        ))),
        [single] => Ok(*single),
        many => Err(BalanceError::format(format!(
            "expected exactly one reaction arrow, found {}",
            many.len()
        ))),
    }
}

fn split_side(side_text: &str, side: Side) -> Result<Vec<String>> {
    if side_text.trim().is_empty() {
        return Err(BalanceError::format(format!("{} side is empty", side)));
    }

    side_text
        .split('+')
        .enumerate()
        .map(|(idx, compound)| {
            let compound = compound.trim();
            if compound.is_empty() {
                Err(BalanceError::format(format!(
                    "empty compound at position {} of the {}",
                    idx + 1,
                    side
                )))
            } else {
                Ok(compound.to_string())
            }
        })
        .collect()
}
