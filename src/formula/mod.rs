//! Chemical formula parser.
//!
//! Converts a compound such as `Fe2(SO4)3` into its atomic composition.
//!
//! # Grammar Overview
//!
//! ```text
//! formula     = segment { hydrate_sep segment } [ state ]
//! segment     = [ integer ] term { term }
//! term        = element [ integer ] | open segment_body close [ integer ]
//! element     = upper [ lower ]
//! open        = '(' | '[' | '{'
//! close       = ')' | ']' | '}'
//! hydrate_sep = '.' | '·' | '•' | '*'
//! state       = '(s)' | '(l)' | '(g)' | '(aq)'
//! integer     = digit { digit }          (at least 1)
//! ```
//!
//! Element symbols are case-sensitive. A two-letter symbol is preferred
//! when it names a real element; a lowercase letter is never accepted on
//! its own. Open and close symbols must be of the same kind.
//!
//! # Example
//!
//! ```
//! use reaction_balancer::formula;
//!
//! let f = formula::parse("Ca(OH)2").unwrap();
//! assert_eq!(f.get("Ca"), 1);
//! assert_eq!(f.get("O"), 2);
//! assert_eq!(f.get("H"), 2);
//! ```

mod composition;
pub mod elements;
mod lexer;
mod parser;

pub use composition::Formula;
pub use lexer::{GroupKind, Lexer, Token, TokenKind};
pub use parser::Parser;

use tracing::trace;

use crate::error::Result;

/// Physical state annotations stripped from the end of a formula.
const STATE_MARKS: [&str; 4] = ["(aq)", "(s)", "(l)", "(g)"];

/// Options controlling which formula notations are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept hydrate separators and leading whole-segment multipliers.
    pub allow_hydrates: bool,
    /// Check element symbols against the periodic table.
    pub strict_elements: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_hydrates: true,
            strict_elements: true,
        }
    }
}

impl ParseOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable hydrate notation (`CuSO4·5H2O`, `2H2O`).
    pub fn with_hydrates(mut self, allow: bool) -> Self {
        self.allow_hydrates = allow;
        self
    }

    /// Enable or disable periodic table validation of symbols.
    pub fn with_strict_elements(mut self, strict: bool) -> Self {
        self.strict_elements = strict;
        self
    }
}

/// Parse a formula with default options.
pub fn parse(input: &str) -> Result<Formula> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a formula with explicit options.
///
/// Parse errors name `input` as written, state annotation included.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Formula> {
    let body = strip_state_mark(input);
    let lexer = Lexer::new(body, options.strict_elements);
    let formula = Parser::new(lexer, options.allow_hydrates)
        .and_then(|mut parser| parser.parse())
        .map_err(|err| err.in_formula(input))?;
    trace!(input, %formula, "parsed formula");
    Ok(formula)
}

/// Remove one trailing physical state annotation, e.g. `NaCl(aq)` -> `NaCl`.
fn strip_state_mark(input: &str) -> &str {
    let trimmed = input.trim_end();
    STATE_MARKS
        .iter()
        .find_map(|mark| trimmed.strip_suffix(mark))
        .filter(|rest| !rest.trim().is_empty())
        .unwrap_or(trimmed)
}
