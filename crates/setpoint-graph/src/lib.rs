//! Workflow graph loading.
//!
//! Parses a DOT-shaped attributed-graph document into a flat list of
//! [`NodeConfig`] entries, one per node in first-appearance order. Only the
//! gain attributes `kp`, `ki`, and `kd` are interpreted; absent gains fall
//! back to a pure proportional unit controller. Edges matter only insofar
//! as their endpoints declare nodes - execution order across nodes is not
//! this crate's concern.
//!
//! ```
//! use setpoint_graph::parse_graph;
//!
//! let nodes = parse_graph("digraph { controller [kp=2.0, ki=0.5] }").unwrap();
//! assert_eq!(nodes[0].kp, 2.0);
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod parse;

pub use config::NodeConfig;
pub use error::{Error, Result};
pub use parse::{load_graph, parse_graph};
