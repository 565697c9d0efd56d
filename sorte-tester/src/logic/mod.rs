pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;
pub mod walker;

pub use scenarios::{SCENARIO_NAMES, get_scenario, list_scenarios};
pub use seeds::resolve_seed_inputs;
pub use tester::{LogicTester, ScenarioResult};
pub use walker::FunnelWalker;
