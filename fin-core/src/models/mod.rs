mod scenario;
mod tab;

pub use scenario::{NewScenario, Scenario, ScenarioError};
pub use tab::{CalculatorKind, CalculatorTab, TabParseError};
