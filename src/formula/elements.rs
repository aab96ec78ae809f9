//! Periodic table lookup used to validate element tokens.

use mendeleev::ALL_ELEMENTS;

/// Check whether `symbol` is a known element symbol (case-sensitive).
pub fn is_element(symbol: &str) -> bool {
    ALL_ELEMENTS.iter().any(|e| e.symbol() == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        assert!(is_element("H"));
        assert!(is_element("Co"));
        assert!(is_element("Fe"));
        assert!(is_element("Og"));
        assert!(!is_element("CO"));
        assert!(!is_element("Q"));
        assert!(!is_element("o"));
        assert!(!is_element("Xx"));
    }
}
