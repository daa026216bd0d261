//! Point-to-area RF propagation predictions.
//!
//! Wraps the area-mode [Irregular Terrain Model](itm) with scenario files
//! describing a link and the distances to sweep it over.

#![forbid(unsafe_code)]

pub use itm;

pub mod error;
pub mod scenario;

pub use error::{ScenarioError, ScenarioResult};
pub use scenario::{Ground, Report, Scenario, Station};
