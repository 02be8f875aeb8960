//! Scripted rig scenarios
//!
//! A scenario builds a rig, places targets, runs a list of actions through
//! the fixed timestep and checks the result:
//! - `ScenarioDefinition`: RON-loadable description
//! - `ScenarioAction`: what happens to the targets and the clock
//! - `VerificationCondition`: checks run at the end
//! - `ScenarioExecutor` / `ExecutionReport`: running and reporting

pub mod actions;
pub mod definition;
pub mod executor;
pub mod results;
pub mod verification;

pub use actions::ScenarioAction;
pub use definition::{RigSetup, ScenarioDefinition};
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{ExecutionReport, PerformanceMetrics, TraceEntry};
pub use verification::{VerificationCondition, VerificationResult};
