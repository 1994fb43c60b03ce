//! Formula implementations, one module per calculator.

pub mod break_even;
pub mod cac_ltv;
pub mod cap_table;
pub mod emi;
pub mod npv;
pub mod pricing_gst;
pub mod runway;
pub mod unit_economics;

pub use break_even::{BreakEvenInput, BreakEvenResult, calculate_break_even};
pub use cac_ltv::{CacLtvInput, CacLtvResult, calculate_cac_ltv};
pub use cap_table::{CapTableInput, CapTableResult, calculate_cap_table};
pub use emi::{EmiInput, EmiResult, calculate_emi};
pub use npv::{NpvInput, NpvResult, calculate_npv};
pub use pricing_gst::{PricingGstInput, PricingGstResult, calculate_pricing_gst};
pub use runway::{DAYS_PER_MONTH, RunwayInput, RunwayResult, calculate_runway};
pub use unit_economics::{UnitEconomicsInput, UnitEconomicsResult, calculate_unit_economics};
