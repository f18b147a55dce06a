//! CSS-like size values and calc-expression math for row layout emulation.
//!
//! Declared sizes enter as validated [`Size`] values (px, rem, percent);
//! arithmetic that mixes units accumulates per unit in [`UsedSpace`] and is
//! rendered as a `calc()` expression, never a unit coercion.

#![forbid(unsafe_code)]

mod space;
mod value;

pub use space::{UsedSpace, flex_share_calc};
pub use value::{Size, SizeError, SizeUnit, parse_size};
