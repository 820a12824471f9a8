/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use finsight::render::format_inr;
use finsight::tax::calculate_tax;
use proptest::prelude::*;

// Property: tax is never negative and calculation never fails on
// finite non-negative inputs
proptest! {
    #[test]
    fn tax_is_never_negative(
        income in 0.0_f64..1e12,
        deductions in 0.0_f64..1e12
    ) {
        let computation = calculate_tax(income, deductions).unwrap();
        prop_assert!(computation.total_tax >= 0.0);
        prop_assert!(computation.taxable_income >= 0.0);
    }

    #[test]
    fn deductions_above_income_always_yield_zero(
        income in 0.0_f64..1e9,
        extra in 0.0_f64..1e9
    ) {
        let computation = calculate_tax(income, income + extra).unwrap();
        prop_assert_eq!(computation.total_tax, 0.0);
    }
}

// Property: tax is monotonically non-decreasing in taxable income
proptest! {
    #[test]
    fn tax_is_monotone_in_taxable_income(
        a in 0.0_f64..1e9,
        b in 0.0_f64..1e9
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let tax_lo = calculate_tax(lo, 0.0).unwrap().total_tax;
        let tax_hi = calculate_tax(hi, 0.0).unwrap().total_tax;
        prop_assert!(tax_lo <= tax_hi);
    }

    #[test]
    fn tax_never_exceeds_the_top_marginal_rate(income in 0.0_f64..1e9) {
        let computation = calculate_tax(income, 0.0).unwrap();
        // 30% is the highest slab rate
        prop_assert!(computation.total_tax <= computation.taxable_income * 0.30 + 1e-6);
    }
}

// Property: the slab breakdown always reconciles with the totals
proptest! {
    #[test]
    fn breakdown_reconciles_with_totals(
        income in 0.0_f64..1e9,
        deductions in 0.0_f64..1e9
    ) {
        let computation = calculate_tax(income, deductions).unwrap();
        let line_tax: f64 = computation.lines.iter().map(|l| l.tax).sum();
        let line_amount: f64 = computation.lines.iter().map(|l| l.taxed_amount).sum();
        prop_assert!((line_tax - computation.total_tax).abs() < 1e-6);
        prop_assert!((line_amount - computation.taxable_income).abs() < 1e-6);
    }
}

// Property: Indian-system currency grouping preserves the digits
proptest! {
    #[test]
    fn inr_grouping_preserves_digits(n in 0u64..1_000_000_000_000) {
        let formatted = format_inr(n as f64);
        let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits, n.to_string());
    }

    #[test]
    fn inr_groups_are_well_formed(n in 0u64..1_000_000_000_000) {
        let formatted = format_inr(n as f64);
        let body = formatted.trim_start_matches('₹');
        let groups: Vec<&str> = body.split(',').collect();
        // last group has up to three digits, the leading group one or two,
        // and everything between exactly two
        prop_assert!(!groups.last().unwrap().is_empty());
        prop_assert!(groups.last().unwrap().len() <= 3);
        if groups.len() > 1 {
            prop_assert!((1..=2).contains(&groups[0].len()));
            for group in &groups[1..groups.len() - 1] {
                prop_assert_eq!(group.len(), 2);
            }
        }
    }
}
