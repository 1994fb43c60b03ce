//! Core library for the startup finance calculator suite.
//!
//! * [`calculations`]: the eight calculators, chart series and signals.
//! * [`currency`]: display currency state and fixed-rate conversion.
//! * [`workbench`]: every live calculator input under one currency.
//! * [`models`] and [`db`]: saved scenarios and the storage abstraction.

pub mod calculations;
pub mod currency;
pub mod db;
pub mod models;
pub mod workbench;

pub use calculations::Calculator;
pub use currency::{Currency, CurrencyState, MonetaryFields, convert};
pub use db::repository::{RepositoryError, ScenarioRepository};
pub use models::*;
pub use workbench::{CalculatorInputs, Workbench, WorkbenchSnapshot};
