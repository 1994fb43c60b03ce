//! Currency selection and conversion.
//!
//! All monetary inputs are stored in the currently selected currency. When
//! the selection changes, [`CurrencyState::set_currency`] rescales every
//! monetary field through the fixed INR-anchored rate table.

mod rates;
mod state;

pub use rates::{ConversionRateTable, Currency, CurrencyParseError, convert};
pub use state::{CurrencyState, MonetaryFields};
