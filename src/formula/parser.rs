//! Parser for chemical formulas.
//!
//! Groups are resolved with an explicit stack of partial compositions rather
//! than recursion, so nesting depth is bounded only by memory.

use super::composition::Formula;
use super::lexer::{GroupKind, Lexer, Token, TokenKind};
use crate::error::{BalanceError, Result};

/// An open group on the parser stack.
struct OpenGroup {
    kind: GroupKind,
    position: usize,
    contents: Formula,
}

/// Parser for a single compound formula.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    allow_hydrates: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>, allow_hydrates: bool) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            allow_hydrates,
        })
    }

    /// Parse the entire formula.
    pub fn parse(&mut self) -> Result<Formula> {
        let mut total = Formula::new();

        loop {
            let segment = self.parse_segment()?;
            total
                .merge_scaled(&segment, 1)
                .ok_or_else(|| self.error(self.current.position, "atom count overflow"))?;

            match self.current.kind {
                TokenKind::HydrateSeparator => {
                    if !self.allow_hydrates {
                        return Err(self.error(
                            self.current.position,
                            "hydrate notation is disabled",
                        ));
                    }
                    self.advance()?;
                }
                TokenKind::Eof => break,
                _ => {
                    return Err(self.error(
                        self.current.position,
                        format!("unexpected token '{}'", self.current.text),
                    ));
                }
            }
        }

        Ok(total)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Parse one hydrate segment: `[multiplier] term { term }`.
    fn parse_segment(&mut self) -> Result<Formula> {
        let segment_start = self.current.position;

        let mut multiplier = 1;
        if self.current.kind == TokenKind::Number {
            if !self.allow_hydrates {
                return Err(self.error(
                    self.current.position,
                    "leading multiplier requires hydrate notation to be enabled",
                ));
            }
            multiplier = self.parse_multiplier()?;
        }

        let mut root = Formula::new();
        let mut stack: Vec<OpenGroup> = Vec::new();

        loop {
            match self.current.kind {
                TokenKind::Element => {
                    let symbol = self.current.text.clone();
                    let position = self.current.position;
                    self.advance()?;
                    let count = self.optional_multiplier()?;
                    let top = stack.last_mut().map_or(&mut root, |g| &mut g.contents);
                    top.add(&symbol, count)
                        .ok_or_else(|| self.error(position, "atom count overflow"))?;
                }
                TokenKind::Open(kind) => {
                    stack.push(OpenGroup {
                        kind,
                        position: self.current.position,
                        contents: Formula::new(),
                    });
                    self.advance()?;
                }
                TokenKind::Close(kind) => {
                    let position = self.current.position;
                    let group = stack.pop().ok_or_else(|| {
                        self.error(position, format!("unmatched '{}'", kind.close()))
                    })?;
                    if group.kind != kind {
                        return Err(self.error(
                            position,
                            format!(
                                "expected '{}' to close '{}' at position {}, found '{}'",
                                group.kind.close(),
                                group.kind.open(),
                                group.position,
                                kind.close()
                            ),
                        ));
                    }
                    if group.contents.is_empty() {
                        return Err(self.error(group.position, "empty group"));
                    }
                    self.advance()?;
                    let factor = self.optional_multiplier()?;
                    let top = stack.last_mut().map_or(&mut root, |g| &mut g.contents);
                    top.merge_scaled(&group.contents, factor)
                        .ok_or_else(|| self.error(position, "atom count overflow"))?;
                }
                TokenKind::Number => {
                    return Err(self.error(
                        self.current.position,
                        format!(
                            "unexpected number '{}'; multipliers follow an element or group",
                            self.current.text
                        ),
                    ));
                }
                TokenKind::HydrateSeparator | TokenKind::Eof => break,
            }
        }

        if let Some(group) = stack.last() {
            return Err(self.error(group.position, format!("unclosed '{}'", group.kind.open())));
        }

        if root.is_empty() {
            return Err(self.error(segment_start, "formula contains no elements"));
        }

        root.scale(multiplier)
            .ok_or_else(|| self.error(segment_start, "atom count overflow"))?;
        Ok(root)
    }

    /// Consume a multiplier if one follows; defaults to 1.
    fn optional_multiplier(&mut self) -> Result<u64> {
        if self.current.kind == TokenKind::Number {
            self.parse_multiplier()
        } else {
            Ok(1)
        }
    }

    fn parse_multiplier(&mut self) -> Result<u64> {
        let text = self.current.text.clone();
        let position = self.current.position;
        let value: u64 = text
            .parse()
            .map_err(|_| self.error(position, format!("multiplier '{}' is too large", text)))?;
        if value == 0 {
            return Err(self.error(position, "multiplier must be a positive integer"));
        }
        self.advance()?;
        Ok(value)
    }

    fn error(&self, position: usize, message: impl Into<String>) -> BalanceError {
        BalanceError::parse(self.lexer.input(), position, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Formula> {
        Parser::new(Lexer::new(input, true), true)?.parse()
    }

    #[test]
    fn test_parse_simple() {
        let f = parse("H2O").unwrap();
        assert_eq!(f, Formula::from_pairs([("H", 2), ("O", 1)]));
    }

    #[test]
    fn test_parse_nested_groups() {
        let f = parse("K4[Fe(CN)6]").unwrap();
        assert_eq!(
            f,
            Formula::from_pairs([("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
    }

    #[test]
    fn test_parse_brace_groups() {
        let f = parse("K3{Fe(CN)6}").unwrap();
        assert_eq!(
            f,
            Formula::from_pairs([("K", 3), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        let f = parse("{[(OH)2]3}2").unwrap();
        assert_eq!(f, Formula::from_pairs([("O", 12), ("H", 12)]));
    }

    #[test]
    fn test_mismatched_brace() {
        let err = parse("Ca(OH}2").unwrap_err();
        assert_eq!(
            err,
            BalanceError::parse(
                "Ca(OH}2",
                5,
                "expected ')' to close '(' at position 2, found '}'"
            )
        );
        let err = parse("K3{Fe(CN)6").unwrap_err();
        assert!(matches!(err, BalanceError::Parse { position: 2, .. }));
    }

    #[test]
    fn test_parse_group_without_multiplier() {
        let f = parse("(CH3)C(O)OH").unwrap();
        assert_eq!(f, Formula::from_pairs([("C", 2), ("H", 4), ("O", 2)]));
    }

    #[test]
    fn test_first_seen_order() {
        let f = parse("C2H5OH").unwrap();
        let order: Vec<&str> = f.elements().collect();
        assert_eq!(order, vec!["C", "H", "O"]);
        assert_eq!(f.get("H"), 6);
    }

    #[test]
    fn test_mismatched_group() {
        let err = parse("Ca(OH]2").unwrap_err();
        assert!(matches!(err, BalanceError::Parse { position: 5, .. }));
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse("Ca(OH2").unwrap_err();
        assert!(matches!(err, BalanceError::Parse { position: 2, .. }));
    }

    #[test]
    fn test_unmatched_close() {
        let err = parse("CaOH)2").unwrap_err();
        assert!(matches!(err, BalanceError::Parse { position: 4, .. }));
    }

    #[test]
    fn test_zero_multiplier() {
        assert!(parse("H0").is_err());
        assert!(parse("(OH)0").is_err());
    }

    #[test]
    fn test_multiplier_without_term() {
        let err = parse("H2 3O").unwrap_err();
        assert!(matches!(err, BalanceError::Parse { position: 3, .. }));
    }

    #[test]
    fn test_empty_group() {
        assert!(parse("Ca()2").is_err());
    }

    #[test]
    fn test_hydrate_segments() {
        let f = parse("CuSO4·5H2O").unwrap();
        assert_eq!(
            f,
            Formula::from_pairs([("Cu", 1), ("S", 1), ("O", 9), ("H", 10)])
        );
    }

    #[test]
    fn test_hydrates_disabled() {
        let mut parser = Parser::new(Lexer::new("CuSO4.5H2O", true), false).unwrap();
        assert!(parser.parse().is_err());
        let mut parser = Parser::new(Lexer::new("2H2O", true), false).unwrap();
        assert!(parser.parse().is_err());
    }

    #[test]
    fn test_trailing_separator() {
        assert!(parse("CuSO4.").is_err());
    }

    #[test]
    fn test_overflow() {
        let err = parse("H18446744073709551615(H2)9").unwrap_err();
        assert!(err.is_formula_error());
        assert!(parse("H99999999999999999999").is_err());
    }
}
