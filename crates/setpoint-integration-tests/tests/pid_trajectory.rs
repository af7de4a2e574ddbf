//! Reference PID trajectory over real mailbox channels.
//!
//! A scripted plant feeds the canonical error sequence through actual
//! channel files, one round at a time:
//!
//! 1. The plant publishes the next error sample into the controller's inbox
//! 2. The controller reads it, stepping its clock from the message header
//! 3. The PID node steps and the output is written back out
//!
//! Along the way the integral accumulator must match the known trajectory
//! exactly, and the published outputs must survive a wire round trip.

use std::fs;

use setpoint_codec::decode;
use setpoint_control::{PidGains, PidNode};
use setpoint_integration_tests::init_tracing;
use setpoint_mailbox::{ChannelAddress, RetryPolicy, Session};
use tempfile::TempDir;

const ERRORS: [f64; 5] = [5.0, 4.0, 3.0, 2.0, 1.0];
const INTEGRALS: [f64; 5] = [5.0, 9.0, 12.0, 14.0, 15.0];
const OUTPUTS: [f64; 5] = [13.0, 12.4, 11.9, 10.9, 9.4];

#[test]
fn reference_trajectory_through_channel_files() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("in");
    let outbox = dir.path().join("out");

    let mut session =
        Session::new(&inbox, &outbox).with_retry_policy(RetryPolicy::fast());
    let mut node = PidNode::new(PidGains::new(2.0, 0.5, 0.1));
    let input = ChannelAddress::new(1, "error");
    let output = ChannelAddress::new(2, "command");

    let mut last_output = 0.0;
    for (round, &error) in ERRORS.iter().enumerate() {
        let t = (round + 1) as f64;
        // the final round arrives in the foreign annotated dialect
        let payload = if round == ERRORS.len() - 1 {
            format!("np.array([{t}, np.float64({error})])")
        } else {
            format!("[{t}, {error}]")
        };
        fs::create_dir_all(input.dir_under(&inbox)).unwrap();
        fs::write(input.path_under(&inbox), payload).unwrap();

        let values = session.read(&input, "").unwrap();
        assert_eq!(values, vec![error], "round {round} must decode one error");
        assert_eq!(session.simtime(), t, "message headers drive the clock");

        last_output = node.step(error, 1.0).unwrap();
        assert_eq!(
            node.integral(),
            INTEGRALS[round],
            "integral accumulator must follow the reference trajectory"
        );
        assert!(
            (last_output - OUTPUTS[round]).abs() < 1e-9,
            "round {round}: expected {}, got {last_output}",
            OUTPUTS[round]
        );

        session.write(&output, &[last_output]).unwrap();
    }

    // the published message round-trips: header is the clock at write time
    let raw = fs::read_to_string(output.path_under(&outbox)).unwrap();
    assert_eq!(decode(&raw).unwrap(), vec![5.0, last_output]);
    assert_eq!(session.simtime(), 5.0, "zero-delta writes leave the clock");
    assert_eq!(session.retry_count(), 0, "every sample was ready when read");
}
