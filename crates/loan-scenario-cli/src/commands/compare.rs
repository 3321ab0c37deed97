use clap::Args;
use serde_json::Value;

use loan_scenario_core::comparison::{self, ComparisonInput};
use loan_scenario_core::types::Scenario;

use crate::input;

/// Arguments for scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON or YAML file holding the scenario set
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: ComparisonInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for compare".into());
    };
    let result = comparison::compare_scenarios(&compare_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for single-scenario breakdown
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to a JSON or YAML file holding one scenario
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario: Scenario = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for scenario".into());
    };
    let result = comparison::analyze_scenario(&scenario)?;
    Ok(serde_json::to_value(result)?)
}
