use crate::errors::AppError;

/// One income slab of the progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    /// Lower bound of the slab, exclusive of tax below it.
    pub floor: f64,
    /// Upper bound of the slab; `None` for the open-ended top slab.
    pub ceiling: Option<f64>,
    /// Marginal rate applied to income inside the slab.
    pub rate: f64,
}

/// The AY 2024-25 old-regime slab schedule.
pub const SLABS: [Slab; 4] = [
    Slab {
        floor: 0.0,
        ceiling: Some(250_000.0),
        rate: 0.0,
    },
    Slab {
        floor: 250_000.0,
        ceiling: Some(500_000.0),
        rate: 0.05,
    },
    Slab {
        floor: 500_000.0,
        ceiling: Some(1_000_000.0),
        rate: 0.20,
    },
    Slab {
        floor: 1_000_000.0,
        ceiling: None,
        rate: 0.30,
    },
];

/// Tax owed within one slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabLine {
    /// The slab this line covers.
    pub slab: Slab,
    /// Portion of the taxable income falling inside the slab.
    pub taxed_amount: f64,
    /// Tax owed on that portion.
    pub tax: f64,
}

/// Result of a tax calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxComputation {
    /// Annual income as entered.
    pub income: f64,
    /// Deductions as entered.
    pub deductions: f64,
    /// Taxable income, floored at zero.
    pub taxable_income: f64,
    /// Total tax owed. Never negative.
    pub total_tax: f64,
    /// Per-slab breakdown covering the taxable income.
    pub lines: Vec<SlabLine>,
}

/// Computes tax owed on `income` after `deductions` under the slab schedule.
///
/// Deductions larger than the income yield zero tax, not a negative taxable
/// income. Non-finite or negative inputs are rejected.
pub fn calculate_tax(income: f64, deductions: f64) -> Result<TaxComputation, AppError> {
    if !income.is_finite() || !deductions.is_finite() {
        return Err(AppError::BadRequest(
            "Income and deductions must be numbers".to_string(),
        ));
    }
    if income < 0.0 || deductions < 0.0 {
        return Err(AppError::BadRequest(
            "Income and deductions cannot be negative".to_string(),
        ));
    }

    let taxable_income = (income - deductions).max(0.0);

    let mut lines = Vec::new();
    let mut total_tax = 0.0;
    for slab in SLABS {
        if taxable_income <= slab.floor {
            break;
        }
        let upper = slab.ceiling.unwrap_or(f64::INFINITY);
        let taxed_amount = taxable_income.min(upper) - slab.floor;
        let tax = taxed_amount * slab.rate;
        total_tax += tax;
        lines.push(SlabLine {
            slab,
            taxed_amount,
            tax,
        });
    }

    Ok(TaxComputation {
        income,
        deductions,
        taxable_income,
        total_tax: total_tax.max(0.0),
        lines,
    })
}
