//! Workflow document to configured nodes to batch execution.
//!
//! A graph file on disk configures two nodes: a tuned controller and a
//! plant left entirely at defaults. Loading must preserve declaration
//! order, and the gains must flow into batch runs unchanged.

use std::fs;

use setpoint_control::{run_batch, PidGains, PidNode};
use setpoint_graph::load_graph;
use setpoint_integration_tests::init_tracing;
use tempfile::TempDir;

const WORKFLOW: &str = "\
# exported control workflow
digraph workflow {
    rankdir=LR;
    controller [kp=2.0, ki=0.5, kd=0.1];
    plant;
    controller -> plant [label=\"command\"];
    plant -> controller [label=\"feedback\"];
}
";

#[test]
fn graph_gains_drive_batch_runs() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workflow.dot");
    fs::write(&path, WORKFLOW).unwrap();

    let configs = load_graph(&path).unwrap();
    let ids: Vec<&str> = configs.iter().map(|config| config.id.as_str()).collect();
    assert_eq!(ids, vec!["controller", "plant"]);

    let mut nodes: Vec<PidNode> = configs
        .iter()
        .map(|config| PidNode::new(PidGains::new(config.kp, config.ki, config.kd)))
        .collect();

    let errors = [5.0, 4.0, 3.0, 2.0, 1.0];
    let controller_out = run_batch(&mut nodes[0], &errors).unwrap();
    let expected = [13.0, 12.4, 11.9, 10.9, 9.4];
    for (round, &output) in controller_out.iter().enumerate() {
        assert!(
            (output - expected[round]).abs() < 1e-9,
            "round {round}: expected {}, got {output}",
            expected[round]
        );
    }

    // the plant carried no attributes: a unit proportional pass-through
    let plant_out = run_batch(&mut nodes[1], &errors).unwrap();
    assert_eq!(plant_out, errors.to_vec());
}
