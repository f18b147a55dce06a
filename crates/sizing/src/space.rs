//! Used-space accumulation and flexible-share expressions.

use crate::{Size, SizeError, SizeUnit};

/// Per-unit totals of space already claimed by widths and gutters.
///
/// Amounts in different units are kept apart; rendering combines them into a
/// single CSS value or a `calc()` expression, never a unit coercion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsedSpace {
    px: f32,
    rem: f32,
    percent: f32,
}

impl UsedSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount in the given unit.
    ///
    /// # Errors
    /// Rejects non-finite and negative amounts; a measured width that fails
    /// here indicates a broken host measurement, not a recoverable state.
    pub fn add(&mut self, unit: SizeUnit, amount: f32) -> Result<(), SizeError> {
        if !amount.is_finite() {
            return Err(SizeError::NonFinite { amount });
        }
        if amount < 0.0 {
            return Err(SizeError::Negative { amount });
        }
        match unit {
            SizeUnit::Pixels => self.px += amount,
            SizeUnit::RootEms => self.rem += amount,
            SizeUnit::Percent => self.percent += amount,
        }
        Ok(())
    }

    /// Add a validated size value. Cannot fail: sizes are checked at
    /// construction.
    pub fn add_size(&mut self, size: Size) {
        match size.unit() {
            SizeUnit::Pixels => self.px += size.amount(),
            SizeUnit::RootEms => self.rem += size.amount(),
            SizeUnit::Percent => self.percent += size.amount(),
        }
    }

    /// Sum a sequence of sizes into one accumulator.
    pub fn sum<I: IntoIterator<Item = Size>>(sizes: I) -> Self {
        let mut total = Self::default();
        for size in sizes {
            total.add_size(size);
        }
        total
    }

    /// True when no unit has accumulated a non-zero amount.
    pub fn is_empty(&self) -> bool {
        self.px == 0.0 && self.rem == 0.0 && self.percent == 0.0
    }

    /// Total accumulated pixels (the unit natural measurements arrive in).
    pub fn px_total(&self) -> f32 {
        self.px
    }

    fn terms(&self) -> impl Iterator<Item = (f32, &'static str)> {
        [
            (self.px, SizeUnit::Pixels.suffix()),
            (self.rem, SizeUnit::RootEms.suffix()),
            (self.percent, SizeUnit::Percent.suffix()),
        ]
        .into_iter()
        .filter(|(amount, _)| *amount != 0.0)
    }

    /// Render as a CSS value: `0px` when empty, the single term when one
    /// unit is in use, and a `calc()` sum when several are.
    pub fn to_css(&self) -> String {
        let collected: Vec<(f32, &'static str)> = self.terms().collect();
        match collected.as_slice() {
            [] => String::from("0px"),
            [(amount, suffix)] => format!("{amount}{suffix}"),
            _ => {
                let mut expression = String::from("calc(");
                for (index, (amount, suffix)) in collected.iter().enumerate() {
                    if index > 0 {
                        expression.push_str(" + ");
                    }
                    expression.push_str(&format!("{amount}{suffix}"));
                }
                expression.push(')');
                expression
            }
        }
    }
}

/// Build the width expression for one flexible item:
/// `calc((100% - <used>) * <weight>/<total>)`.
///
/// The weight ratio is emitted symbolically, so exact fractional weights sum
/// exactly to `100% - used`. Shares are never re-normalized afterwards; with
/// inexact weights the resolved percentages may drift from the available
/// space by sub-pixel rounding, which is accepted behavior.
pub fn flex_share_calc(used: &UsedSpace, weight: f32, total_weight: f32) -> String {
    debug_assert!(weight > 0.0, "flex share requested for weight {weight}");
    debug_assert!(
        total_weight >= weight,
        "total flex weight {total_weight} below item weight {weight}"
    );
    let ratio = format!("{weight}/{total_weight}");
    if used.is_empty() {
        return format!("calc(100% * {ratio})");
    }
    let mut remaining = String::from("100%");
    for (amount, suffix) in used.terms() {
        remaining.push_str(&format!(" - {amount}{suffix}"));
    }
    format!("calc(({remaining}) * {ratio})")
}
