use std::fs;
use std::path::PathBuf;
use wish_sim::config::{RadianceRule, SimulationConfig};
use wish_sim::error::SimError;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("wish_sim_{}_{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_yaml_config() {
    let path = temp_file(
        "banner.yaml",
        "\
wish_count: 240
target_count: 2
banner_pity: 90
simulation_count: 500
initial_pity_state:
  current_pity: 30
  is_guaranteed: false
  cr_score: 2
radiance_rule: sets_guarantee
seed: 99
parallel: true
threads: 2
",
    );
    let config = SimulationConfig::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.wish_count, 240);
    assert_eq!(config.initial_pity_state.current_pity, 30);
    assert_eq!(config.initial_pity_state.cr_score, 2);
    assert_eq!(config.radiance_rule, RadianceRule::SetsGuarantee);
    assert_eq!(config.seed, Some(99));
    assert!(config.parallel);
    assert_eq!(config.threads, Some(2));
}

#[test]
fn loads_json_config_and_round_trips() {
    let original = SimulationConfig::new(160, 1, 90).with_pity(70, true).with_seed(1);
    let path = temp_file("banner.json", &serde_json::to_string(&original).unwrap());
    let loaded = SimulationConfig::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded, original);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SimulationConfig::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_file("broken.json", "{ \"wish_count\": ");
    let err = SimulationConfig::from_file(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(err, SimError::Parse(_)));
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let path = temp_file("zero.yaml", "wish_count: 0\ntarget_count: 1\nbanner_pity: 90\n");
    let err = SimulationConfig::from_file(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(err, SimError::InvalidConfiguration(_)));
}
