use std::sync::Arc;

use herald_app::{AppConfig, build_pipeline};
use herald_events::FailurePolicy;
use herald_infra::{MemorySink, OutputFormat};
use herald_users::{ChangeEmail, RegisterUser, UserId};

fn config(output_format: OutputFormat) -> AppConfig {
    AppConfig {
        output_format,
        ..AppConfig::default()
    }
}

#[test]
fn default_registration_prints_two_lines_for_one_user() {
    let sink = Arc::new(MemorySink::new());
    let pipeline = build_pipeline(&config(OutputFormat::Text), sink.clone());

    pipeline
        .submit(RegisterUser::new("Ada Lovelace", "ada@example.com"))
        .unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("user.name_set relates=["));
    assert!(lines[0].ends_with("payload=\"Ada Lovelace\""));
    assert!(lines[1].starts_with("user.email_set relates=["));
    assert!(lines[1].ends_with("payload=\"ada@example.com\""));

    let id = |line: &str| line.split(['[', ']']).nth(1).map(str::to_owned);
    assert_eq!(id(&lines[0]), id(&lines[1]));
}

#[test]
fn two_registrations_get_distinct_ids() {
    let sink = Arc::new(MemorySink::new());
    let pipeline = build_pipeline(&config(OutputFormat::Json), sink.clone());

    pipeline.submit(RegisterUser::new("Ada", "ada@example.com")).unwrap();
    pipeline.submit(RegisterUser::new("Grace", "grace@example.com")).unwrap();

    let relates: Vec<serde_json::Value> = sink
        .lines()
        .iter()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["relates"].clone())
        .collect();
    assert_eq!(relates.len(), 4);
    assert_eq!(relates[0], relates[1]);
    assert_eq!(relates[2], relates[3]);
    assert_ne!(relates[0], relates[2]);
}

#[test]
fn email_change_prints_one_line() {
    let sink = Arc::new(MemorySink::new());
    let pipeline = build_pipeline(&config(OutputFormat::Text), sink.clone());
    let user_id: UserId = herald_core::AggregateId::create().into();

    pipeline.submit(ChangeEmail::new(user_id, "new@example.com")).unwrap();

    assert_eq!(
        sink.lines(),
        vec![format!("user.email_set relates=[{user_id}] payload=\"new@example.com\"")]
    );
}

#[test]
fn default_config_fails_fast() {
    let pipeline = build_pipeline(&AppConfig::default(), MemorySink::new());
    assert_eq!(pipeline.policy(), FailurePolicy::FailFast);
}

#[test]
fn configured_policy_and_wiring_are_applied() {
    let cfg = AppConfig {
        failure_policy: FailurePolicy::ContinueOnError,
        ..AppConfig::default()
    };
    let pipeline = build_pipeline(&cfg, MemorySink::new());

    assert_eq!(pipeline.policy(), FailurePolicy::ContinueOnError);
    assert_eq!(pipeline.command_handlers(), vec!["user_registration", "email_change"]);
    assert_eq!(pipeline.event_handlers(), vec!["print_events"]);
}
