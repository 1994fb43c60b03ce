//! The live state of every calculator.
//!
//! A [`Workbench`] owns one input set per calculator together with the
//! selected currency. Changing the currency rescales every monetary input in
//! the same call, so the inputs are always denominated in
//! [`Workbench::currency`].

use serde::{Deserialize, Serialize};

use crate::calculations::{
    BreakEvenInput, CacLtvInput, CapTableInput, EmiInput, NpvInput, PricingGstInput,
    RunwayInput, UnitEconomicsInput,
};
use crate::currency::{Currency, CurrencyState, MonetaryFields};

/// Input sets for all eight calculators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub runway: RunwayInput,
    pub break_even: BreakEvenInput,
    pub unit_economics: UnitEconomicsInput,
    pub cac_ltv: CacLtvInput,
    pub pricing_gst: PricingGstInput,
    pub emi: EmiInput,
    pub npv: NpvInput,
    pub cap_table: CapTableInput,
}

impl MonetaryFields for CalculatorInputs {
    fn rescale(
        &mut self,
        from: Currency,
        to: Currency,
    ) {
        self.runway.rescale(from, to);
        self.break_even.rescale(from, to);
        self.unit_economics.rescale(from, to);
        self.cac_ltv.rescale(from, to);
        self.pricing_gst.rescale(from, to);
        self.emi.rescale(from, to);
        self.npv.rescale(from, to);
        self.cap_table.rescale(from, to);
    }
}

/// A serializable copy of a workbench: the currency and every input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchSnapshot {
    pub currency: Currency,
    pub inputs: CalculatorInputs,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbench {
    currency: CurrencyState,
    inputs: CalculatorInputs,
}

impl Workbench {
    /// Sample inputs, denominated in INR.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample inputs, taken as already denominated in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            currency: CurrencyState::with_currency(currency),
            inputs: CalculatorInputs::default(),
        }
    }

    pub fn from_snapshot(snapshot: WorkbenchSnapshot) -> Self {
        Self {
            currency: CurrencyState::with_currency(snapshot.currency),
            inputs: snapshot.inputs,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency.current()
    }

    pub fn currency_state(&self) -> &CurrencyState {
        &self.currency
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    /// Mutable access for editing inputs. Values written here are taken to
    /// be in the current currency.
    pub fn inputs_mut(&mut self) -> &mut CalculatorInputs {
        &mut self.inputs
    }

    /// Switches the display currency and rescales every monetary input.
    pub fn set_currency(
        &mut self,
        currency: Currency,
    ) {
        self.currency.set_currency(currency, &mut self.inputs);
    }

    pub fn snapshot(&self) -> WorkbenchSnapshot {
        WorkbenchSnapshot {
            currency: self.currency(),
            inputs: self.inputs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::Calculator;

    #[test]
    fn new_workbench_holds_sample_inputs_in_inr() {
        let workbench = Workbench::new();

        assert_eq!(workbench.currency(), Currency::Inr);
        assert_eq!(workbench.inputs(), &CalculatorInputs::default());
    }

    #[test]
    fn set_currency_rescales_every_calculator() {
        let mut workbench = Workbench::new();

        workbench.set_currency(Currency::Usd);

        let inputs = workbench.inputs();
        assert_eq!(inputs.runway.cash, 12_048.19);
        assert_eq!(inputs.runway.monthly_burn, 1_204.82);
        assert_eq!(inputs.break_even.fixed_costs, 602.41);
        assert_eq!(inputs.unit_economics.cac, 0.6);
        assert_eq!(inputs.cac_ltv.arpu, 0.6);
        assert_eq!(inputs.pricing_gst.cost, 1.2);
        assert_eq!(inputs.emi.principal, 12_048.19);
        assert_eq!(inputs.npv.cashflows[0], -1_204.82);
        assert_eq!(inputs.cap_table.investment, 12_048.19);
    }

    #[test]
    fn set_currency_leaves_non_monetary_fields_alone() {
        let mut workbench = Workbench::new();

        workbench.set_currency(Currency::Eur);

        let inputs = workbench.inputs();
        let defaults = CalculatorInputs::default();
        assert_eq!(inputs.unit_economics.units_per_month, defaults.unit_economics.units_per_month);
        assert_eq!(inputs.cac_ltv.new_customers, defaults.cac_ltv.new_customers);
        assert_eq!(inputs.cac_ltv.gross_margin, defaults.cac_ltv.gross_margin);
        assert_eq!(inputs.cac_ltv.lifespan_months, defaults.cac_ltv.lifespan_months);
        assert_eq!(inputs.pricing_gst.target_margin, defaults.pricing_gst.target_margin);
        assert_eq!(inputs.pricing_gst.gst, defaults.pricing_gst.gst);
        assert_eq!(inputs.emi.annual_rate, defaults.emi.annual_rate);
        assert_eq!(inputs.emi.tenure_months, defaults.emi.tenure_months);
        assert_eq!(inputs.npv.discount_rate, defaults.npv.discount_rate);
    }

    #[test]
    fn set_currency_twice_to_same_currency_is_stable() {
        let mut workbench = Workbench::new();
        workbench.set_currency(Currency::Usd);
        let after_first = workbench.inputs().clone();

        workbench.set_currency(Currency::Usd);

        assert_eq!(workbench.inputs(), &after_first);
        assert_eq!(workbench.currency_state().previous(), Currency::Usd);
    }

    #[test]
    fn results_track_converted_inputs() {
        let mut workbench = Workbench::new();

        workbench.set_currency(Currency::Usd);

        // Cost is now 1.20 USD at a 60% margin.
        let result = workbench.inputs().pricing_gst.evaluate();
        assert!((result.price_before_gst - 3.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_restores_currency_and_inputs() {
        let mut workbench = Workbench::new();
        workbench.inputs_mut().npv.add_cashflow();
        workbench.set_currency(Currency::Eur);

        let restored = Workbench::from_snapshot(workbench.snapshot());

        assert_eq!(restored, workbench);
    }

    #[test]
    fn snapshot_serializes_with_currency_code() {
        let snapshot = Workbench::with_currency(Currency::Usd).snapshot();

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["currency"], "USD");
        assert_eq!(json["inputs"]["runway"]["cash"], 1_000_000.0);
    }
}
