//! # plan-advisor
//!
//! The planning layer of vgpuplan: turns loosely structured hardware
//! descriptions and workload requirements into validated, deterministic
//! deployment recommendations.
//!
//! Components, in control-flow order:
//!
//! - [`InventoryParser`]: free-text or structured input -> normalized
//!   GPU inventory
//! - [`ProfileValidator`]: guards against nonexistent or mismatched profile
//!   names before any capacity math
//! - [`CapacityCalculator`]: exact integer VM-capacity arithmetic, with
//!   best-effort aggregation over heterogeneous inventories
//! - [`DeploymentAdvisor`]: virtualized-vs-passthrough decision per model
//! - [`Planner`]: facade wiring the above into one end-to-end flow
//!
//! Everything here is synchronous and side-effect free; the catalog is
//! immutable, so concurrent invocations share it without locking.

pub mod advisor;
pub mod capacity;
pub mod parser;
pub mod planner;
pub mod sizing;
pub mod validator;

pub use advisor::{DeploymentAdvisor, ModeDecision};
pub use capacity::CapacityCalculator;
pub use parser::{InventoryParser, ParsedInventory};
pub use planner::Planner;
pub use validator::{ProfileValidator, ValidationResult};
