use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rates::{Currency, convert};

/// A set of monetary input fields that can be re-expressed in another
/// currency.
///
/// Implementors convert every field that holds a money amount and leave
/// percentages, counts and durations untouched.
pub trait MonetaryFields {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    );
}

impl MonetaryFields for [f64] {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        for value in self.iter_mut() {
            *value = convert(*value, from, to);
        }
    }
}

impl MonetaryFields for Vec<f64> {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.as_mut_slice().rescale(from, to);
    }
}

/// Tracks the selected display currency and the one the monetary inputs were
/// last expressed in.
///
/// Outside of [`CurrencyState::set_currency`] the two are always equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyState {
    current: Currency,
    previous: Currency,
}

impl Default for CurrencyState {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyState {
    /// Starts with both currencies set to INR.
    pub fn new() -> Self {
        Self::with_currency(Currency::Inr)
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self {
            current: currency,
            previous: currency,
        }
    }

    pub fn current(&self) -> Currency {
        self.current
    }

    pub fn previous(&self) -> Currency {
        self.previous
    }

    /// Selects `currency` and rescales `fields` from the previously selected
    /// currency into it in the same step.
    ///
    /// Selecting the current currency again leaves `fields` untouched.
    pub fn set_currency<F>(
        &mut self,
        currency: Currency,
        fields: &mut F,
    ) where
        F: MonetaryFields + ?Sized,
    {
        if currency == self.current {
            return;
        }

        self.previous = self.current;
        self.current = currency;

        debug!(
            from = %self.previous,
            to = %self.current,
            "rescaling monetary inputs"
        );
        fields.rescale(self.previous, self.current);

        self.previous = self.current;
    }
}
