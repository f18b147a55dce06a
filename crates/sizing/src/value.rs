//! Validated CSS-like length values: px, rem, and percent.

use cssparser::{Parser, ParserInput, Token};
use std::fmt;

/// Supported units for declared sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Pixels,
    RootEms,
    Percent,
}

impl SizeUnit {
    /// CSS suffix for the unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::RootEms => "rem",
            Self::Percent => "%",
        }
    }
}

/// A non-negative, finite length value with unit.
///
/// Validated at construction: a size that exists is always usable, so layout
/// phases never have to re-check amounts mid-pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    amount: f32,
    unit: SizeUnit,
}

impl Size {
    /// Zero pixels.
    pub const ZERO: Self = Self {
        amount: 0.0,
        unit: SizeUnit::Pixels,
    };

    /// Create a size from an amount and unit.
    ///
    /// # Errors
    /// Returns [`SizeError::NonFinite`] for NaN or infinite amounts and
    /// [`SizeError::Negative`] where a non-negative length is required.
    pub fn new(amount: f32, unit: SizeUnit) -> Result<Self, SizeError> {
        if !amount.is_finite() {
            return Err(SizeError::NonFinite { amount });
        }
        if amount < 0.0 {
            return Err(SizeError::Negative { amount });
        }
        Ok(Self { amount, unit })
    }

    /// Create a pixel size.
    ///
    /// # Errors
    /// Same validation as [`Size::new`].
    pub fn px(amount: f32) -> Result<Self, SizeError> {
        Self::new(amount, SizeUnit::Pixels)
    }

    /// Create a rem size.
    ///
    /// # Errors
    /// Same validation as [`Size::new`].
    pub fn rem(amount: f32) -> Result<Self, SizeError> {
        Self::new(amount, SizeUnit::RootEms)
    }

    /// Create a percentage size (amount is the percentage, e.g. 50 for 50%).
    ///
    /// # Errors
    /// Same validation as [`Size::new`].
    pub fn percent(amount: f32) -> Result<Self, SizeError> {
        Self::new(amount, SizeUnit::Percent)
    }

    pub fn amount(self) -> f32 {
        self.amount
    }

    pub fn unit(self) -> SizeUnit {
        self.unit
    }

    pub fn is_zero(self) -> bool {
        self.amount == 0.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Rejection reasons for declared sizes.
#[derive(Clone, Debug, PartialEq)]
pub enum SizeError {
    /// The amount is NaN or infinite.
    NonFinite { amount: f32 },
    /// A negative amount where a non-negative length is required.
    Negative { amount: f32 },
    /// The input is not a supported length, percentage, or number.
    Unparseable { input: String },
}

impl fmt::Display for SizeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { amount } => {
                write!(formatter, "size amount is not finite: {amount}")
            }
            Self::Negative { amount } => {
                write!(formatter, "size amount is negative: {amount}")
            }
            Self::Unparseable { input } => {
                write!(formatter, "unsupported size value: '{input}'")
            }
        }
    }
}

impl std::error::Error for SizeError {}

/// Parse a declared size: `px`/`rem` dimensions, percentages, or bare
/// numbers (treated as px, the host convention for numeric widths).
///
/// # Errors
/// Returns [`SizeError::Unparseable`] for unsupported units or trailing
/// input, and the [`Size::new`] validation errors for bad amounts.
pub fn parse_size(input: &str) -> Result<Size, SizeError> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);
    let size = parse_size_token(&mut parser, input)?;
    if parser.is_exhausted() {
        Ok(size)
    } else {
        Err(SizeError::Unparseable {
            input: input.to_owned(),
        })
    }
}

fn parse_size_token(parser: &mut Parser, raw: &str) -> Result<Size, SizeError> {
    let unsupported = || SizeError::Unparseable {
        input: raw.to_owned(),
    };
    match parser.next() {
        Ok(token) => match token.clone() {
            Token::Dimension { value, unit, .. } => {
                let unit_kind = match unit.as_ref().to_ascii_lowercase().as_str() {
                    "px" => SizeUnit::Pixels,
                    "rem" => SizeUnit::RootEms,
                    _ => return Err(unsupported()),
                };
                Size::new(value, unit_kind)
            }
            Token::Percentage { unit_value, .. } => {
                Size::new(unit_value * 100.0, SizeUnit::Percent)
            }
            Token::Number { value, .. } => Size::new(value, SizeUnit::Pixels),
            _ => Err(unsupported()),
        },
        Err(_) => Err(unsupported()),
    }
}
