//! End-to-end balancing tests through the public library API.

use num_integer::Integer;
use pretty_assertions::assert_eq;
use reaction_balancer::{
    balance, balance_with, equation, formula, BalanceError, BalanceOptions, Formula,
    ParseOptions,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EQUATIONS: [&str; 8] = [
    "H2 + O2 -> H2O",
    "C2H5OH + O2 -> CO2 + H2O",
    "Fe2O3 + CO -> Fe + CO2",
    "KMnO4 + HCl -> KCl + MnCl2 + H2O + Cl2",
    "Al + O2 -> Al2O3",
    "C3H8 + O2 -> CO2 + H2O",
    "Ca(OH)2 + H3PO4 -> Ca3(PO4)2 + H2O",
    "K4[Fe(CN)6] + KMnO4 + H2SO4 -> KHSO4 + Fe2(SO4)3 + MnSO4 + HNO3 + CO2 + H2O",
];

/// Sum of `coefficient * count` per element for one side.
fn side_totals(compounds: &[String], coefficients: &[u64]) -> Formula {
    let mut pairs: Vec<(String, u64)> = Vec::new();
    for (compound, &k) in compounds.iter().zip(coefficients) {
        for (symbol, count) in formula::parse(compound).unwrap().iter() {
            pairs.push((symbol.to_string(), count * k));
        }
    }
    Formula::from_pairs(pairs.iter().map(|(s, c)| (s.as_str(), *c)))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn coefficients_are_positive_and_coprime() {
    for text in EQUATIONS {
        let balanced = balance(text).unwrap();
        let coefficients = balanced.coefficients();
        assert!(coefficients.iter().all(|&c| c > 0), "{text}");
        let gcd = coefficients.iter().fold(0u64, |acc, &c| acc.gcd(&c));
        assert_eq!(gcd, 1, "{text}");
    }
}

#[test]
fn atoms_are_conserved() {
    for text in EQUATIONS {
        let balanced = balance(text).unwrap();
        let eq = balanced.equation();
        let split = eq.reactants().len();
        let left = side_totals(eq.reactants(), &balanced.coefficients()[..split]);
        let right = side_totals(eq.products(), &balanced.coefficients()[split..]);
        assert_eq!(left, right, "{text}");
    }
}

#[test]
fn balanced_equation_is_unchanged() {
    let balanced = balance("HCl + NaOH -> NaCl + H2O").unwrap();
    assert_eq!(balanced.coefficients(), &[1, 1, 1, 1]);
    assert_eq!(balanced.to_string(), "HCl + NaOH -> NaCl + H2O");
}

#[test]
fn rebalancing_rendered_output_gives_unit_coefficients() {
    for text in EQUATIONS {
        let rendered = balance(text).unwrap().to_string();
        let again = balance(&rendered).unwrap();
        assert!(again.coefficients().iter().all(|&c| c == 1), "{rendered}");
    }
}

#[test]
fn scaling_every_compound_gives_same_result() {
    let plain = balance("C2H5OH + O2 -> CO2 + H2O").unwrap();
    let scaled = balance("3C2H5OH + 3O2 -> 3CO2 + 3H2O").unwrap();
    assert_eq!(plain.coefficients(), scaled.coefficients());
}

#[test]
fn known_compositions() {
    assert_eq!(
        formula::parse("H2O").unwrap(),
        Formula::from_pairs([("H", 2), ("O", 1)])
    );
    assert_eq!(
        formula::parse("Ca(OH)2").unwrap(),
        Formula::from_pairs([("Ca", 1), ("O", 2), ("H", 2)])
    );
    assert_eq!(
        formula::parse("Fe2(SO4)3").unwrap(),
        Formula::from_pairs([("Fe", 2), ("S", 3), ("O", 12)])
    );
    assert_eq!(
        formula::parse("CuSO4·5H2O").unwrap(),
        Formula::from_pairs([("Cu", 1), ("S", 1), ("O", 9), ("H", 10)])
    );
}

#[test]
fn matrices_match_expected_layout() {
    let (_, m) = equation::build("H2 + O2 -> H2O").unwrap();
    assert_eq!(m.row(0), &[2, 0, -2]);
    assert_eq!(m.row(1), &[0, 2, -1]);

    let (_, m) = equation::build("C2H5OH + O2 -> CO2 + H2O").unwrap();
    assert_eq!(m.row(0), &[2, 0, -1, 0]);
    assert_eq!(m.row(1), &[6, 0, 0, -2]);
    assert_eq!(m.row(2), &[1, 2, -2, -1]);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_ethanol_combustion() {
    let balanced = balance("C2H5OH + O2 -> CO2 + H2O").unwrap();
    assert_eq!(balanced.coefficients(), &[1, 3, 2, 3]);
    assert_eq!(balanced.to_string(), "C2H5OH + 3O2 -> 2CO2 + 3H2O");
}

#[test]
fn scenario_water_synthesis() {
    let balanced = balance("H2 + O2 -> H2O").unwrap();
    assert_eq!(balanced.to_string(), "2H2 + O2 -> 2H2O");
}

#[test]
fn scenario_unbalanceable_element() {
    let err = balance("NaCl + H2O -> HCl + O2").unwrap_err();
    assert_eq!(
        err,
        BalanceError::infeasible("element 'Na' appears only in the reactants")
    );
}

#[test]
fn scenario_missing_arrow() {
    let err = balance("H2 + O2 + H2O").unwrap_err();
    assert!(matches!(err, BalanceError::EquationFormat { .. }));
}

#[test]
fn formula_errors_name_the_compound() {
    let err = balance("H2 + O2 -> H2O + Xq").unwrap_err();
    assert!(err.is_formula_error());
    match err {
        BalanceError::Parse { formula, .. } => assert_eq!(formula, "Xq"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn larger_equation() {
    let balanced = balance(EQUATIONS[7]).unwrap();
    assert_eq!(
        balanced.coefficients(),
        &[10, 122, 299, 162, 5, 122, 60, 60, 188]
    );
}

#[test]
fn extreme_atom_counts_are_errors() {
    let err = balance("H9223372036854775807O + H9223372036854775807 -> HO").unwrap_err();
    assert!(matches!(err, BalanceError::Infeasible { .. }));

    let err = balance("H18446744073709551615 -> H").unwrap_err();
    assert!(err.is_formula_error());
}

#[test]
fn annotated_compound_is_named_as_written() {
    match balance("H2 + O2 -> Xq(aq)").unwrap_err() {
        BalanceError::Parse { formula, .. } => assert_eq!(formula, "Xq(aq)"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn state_annotations_are_kept_in_output() {
    let balanced = balance("H2(g) + O2(g) -> H2O(l)").unwrap();
    assert_eq!(balanced.to_string(), "2H2(g) + O2(g) -> 2H2O(l)");
}

#[test]
fn hydrates_can_be_disabled() {
    let options = BalanceOptions::new()
        .with_parse_options(ParseOptions::new().with_hydrates(false));
    let err = balance_with("CuSO4·5H2O -> CuSO4 + H2O", &options).unwrap_err();
    assert!(err.is_formula_error());

    let balanced = balance("CuSO4·5H2O -> CuSO4 + H2O").unwrap();
    assert_eq!(balanced.coefficients(), &[1, 1, 5]);
}
