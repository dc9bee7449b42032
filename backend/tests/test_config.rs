//! Tests for the configuration boundary
//!
//! Configuration comes from an external collaborator (CLI, UI, test
//! harness); the engine validates at initialization and never clamps.

use emergency_simulator_core_rs::{
    SeverityMinutes, SimTime, SimulationConfig, SimulationError, Simulator,
};

#[test]
fn test_default_config_is_valid() {
    let simulator = Simulator::new(SimulationConfig::default());
    assert!(simulator.is_ok());
}

#[test]
fn test_config_serde_round_trip() {
    let config = SimulationConfig {
        num_rooms: 5,
        num_patients: 12,
        arrival_interval_minutes: 7,
        start_time: SimTime::from_hm(7, 30),
        end_time: SimTime::from_hm(19, 30),
        triage_minutes: 4,
        treatment_minutes: SeverityMinutes {
            white: 8,
            yellow: 12,
            red: 25,
        },
        timeout_minutes: SeverityMinutes {
            white: 90,
            yellow: 45,
            red: 70,
        },
        poll_interval_minutes: 3,
    };

    let json = serde_json::to_string(&config).unwrap();
    let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_validation_error_messages_name_the_field() {
    let broken = SimulationConfig {
        num_patients: 0,
        ..SimulationConfig::default()
    };

    match Simulator::new(broken) {
        Err(SimulationError::InvalidConfig(message)) => {
            assert!(message.contains("num_patients"));
        }
        other => panic!("expected InvalidConfig, got {:?}", other.err()),
    }
}

#[test]
fn test_validation_is_fail_fast_not_clamping() {
    // Every unusable duration is a hard error
    let cases = vec![
        SimulationConfig {
            arrival_interval_minutes: 0,
            ..SimulationConfig::default()
        },
        SimulationConfig {
            triage_minutes: 0,
            ..SimulationConfig::default()
        },
        SimulationConfig {
            treatment_minutes: SeverityMinutes {
                white: 0,
                yellow: 15,
                red: 30,
            },
            ..SimulationConfig::default()
        },
        SimulationConfig {
            timeout_minutes: SeverityMinutes {
                white: 120,
                yellow: 60,
                red: 0,
            },
            ..SimulationConfig::default()
        },
        SimulationConfig {
            poll_interval_minutes: 0,
            ..SimulationConfig::default()
        },
        SimulationConfig {
            end_time: SimTime::from_hm(8, 0),
            ..SimulationConfig::default()
        },
    ];

    for broken in cases {
        assert!(
            matches!(
                Simulator::new(broken.clone()),
                Err(SimulationError::InvalidConfig(_))
            ),
            "config should have been rejected: {:?}",
            broken
        );
    }
}

#[test]
fn test_error_display() {
    let error = SimulationError::InvalidConfig("num_patients must be > 0".to_string());
    assert_eq!(error.to_string(), "invalid config: num_patients must be > 0");

    let error = SimulationError::PatientNotFound(9);
    assert_eq!(error.to_string(), "patient not found: 9");
}

#[test]
fn test_zero_rooms_is_a_legal_closed_department() {
    let config = SimulationConfig {
        num_rooms: 0,
        num_patients: 2,
        ..SimulationConfig::default()
    };

    let mut simulator = Simulator::new(config).unwrap();
    let outcomes = simulator.run().unwrap();

    // Nobody is ever treated; the timeout machinery resolves everyone
    assert_eq!(outcomes.discharged, 0);
    assert_eq!(outcomes.total(), 2);
}
