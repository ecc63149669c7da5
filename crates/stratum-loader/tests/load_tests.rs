mod helpers;

use helpers::{config_source_name, environment_with, loaded_source_names, Harness};
use stratum_core::Environment;

#[test]
fn no_files_means_no_sources() {
    let harness = Harness::new();
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    assert!(environment.sources().is_empty());
    assert!(environment.active_profiles().is_empty());
}

#[test]
fn single_file_without_profiles() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=1\n");
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    assert_eq!(
        loaded_source_names(&environment),
        vec![config_source_name("classpath:/application.properties")]
    );
    assert_eq!(environment.property("a").as_deref(), Some("1"));
}

#[test]
fn profile_overlay_takes_precedence() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=1\nb=1\n");
    harness.write("classpath/application-dev.properties", "a=2\n");
    let mut environment = environment_with(&[("spring.profiles.active", "dev")]);

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("a").as_deref(), Some("2"));
    assert_eq!(environment.property("b").as_deref(), Some("1"));
    assert_eq!(environment.active_profiles(), &["dev".to_string()]);
    assert_eq!(
        loaded_source_names(&environment),
        vec![
            config_source_name("classpath:/application-dev.properties"),
            config_source_name("classpath:/application.properties"),
        ]
    );
}

#[test]
fn include_discovered_inside_profile_file() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "");
    harness.write(
        "classpath/application-dev.properties",
        "spring.profiles.include=db\n",
    );
    harness.write("classpath/application-db.properties", "x=1\n");
    let mut environment = environment_with(&[("spring.profiles.active", "dev")]);

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("x").as_deref(), Some("1"));
    assert_eq!(
        environment.active_profiles(),
        &["dev".to_string(), "db".to_string()]
    );
    // The included profile was processed after its includer, so its
    // sources take precedence.
    assert_eq!(
        loaded_source_names(&environment),
        vec![
            config_source_name("classpath:/application-db.properties"),
            config_source_name("classpath:/application-dev.properties"),
        ]
    );
}

#[test]
fn default_profile_files_load_without_activation() {
    let harness = Harness::new();
    harness.write("classpath/application-default.properties", "k=v\n");
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("k").as_deref(), Some("v"));
    // Default profiles are not promoted to active.
    assert!(environment.active_profiles().is_empty());
}

#[test]
fn more_specific_locations_win() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=inner\n");
    harness.write("config/application.properties", "a=outer\n");
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("a").as_deref(), Some("outer"));
    assert_eq!(
        loaded_source_names(&environment),
        vec![
            config_source_name("file:./config/application.properties"),
            config_source_name("classpath:/application.properties"),
        ]
    );
}

#[test]
fn multi_document_yaml_selects_profiled_document() {
    let harness = Harness::new();
    harness.write(
        "classpath/application.yml",
        "a: 1\n---\nspring:\n  profiles: dev\na: 2\n",
    );
    let mut environment = environment_with(&[("spring.profiles.active", "dev")]);

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("a").as_deref(), Some("2"));
    let names = loaded_source_names(&environment);
    assert_eq!(names.len(), 2);
    assert!(names[0].contains("(document #1)"));
    assert!(names[1].contains("(document #0)"));
}

#[test]
fn loading_is_deterministic() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=1\n");
    harness.write("classpath/application-dev.properties", "b=2\n");
    harness.write("config/application.yml", "c: 3\n");

    let mut first = environment_with(&[("spring.profiles.active", "dev")]);
    harness.load(&mut first).unwrap();

    let mut second = environment_with(&[("spring.profiles.active", "dev")]);
    harness.load(&mut second).unwrap();

    assert_eq!(
        loaded_source_names(&first),
        loaded_source_names(&second)
    );
}

#[test]
fn swapping_location_order_swaps_precedence() {
    let harness = Harness::new();
    harness.write("classpath/one/application.properties", "a=one\n");
    harness.write("classpath/two/application.properties", "a=two\n");

    // Later locations take precedence.
    let mut environment = environment_with(&[(
        "spring.config.location",
        "classpath:/one/,classpath:/two/",
    )]);
    harness.load(&mut environment).unwrap();
    assert_eq!(environment.property("a").as_deref(), Some("two"));

    let mut environment = environment_with(&[(
        "spring.config.location",
        "classpath:/two/,classpath:/one/",
    )]);
    harness.load(&mut environment).unwrap();
    assert_eq!(environment.property("a").as_deref(), Some("one"));
}

#[test]
fn concrete_file_location_loads_without_suffixing() {
    let harness = Harness::new();
    harness.write("settings.yml", "server:\n  port: 8080\n");
    let mut environment = environment_with(&[("spring.config.location", "file:./settings.yml")]);

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("server.port").as_deref(), Some("8080"));
    assert_eq!(
        loaded_source_names(&environment),
        vec![config_source_name("file:./settings.yml")]
    );
}

#[test]
fn concrete_file_with_unknown_extension_is_skipped() {
    let harness = Harness::new();
    harness.write("settings.conf", "a=1\n");
    let mut environment = environment_with(&[("spring.config.location", "file:./settings.conf")]);

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.property("a"), None);
    assert!(loaded_source_names(&environment).is_empty());
}

#[test]
fn deferred_logs_replay_once_a_subscriber_exists() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=1\n");
    let mut environment = Environment::new();

    let mut processor = stratum_loader::ConfigFileProcessor::new();
    processor
        .post_process_environment(&mut environment, &harness.resource_loader())
        .unwrap();

    // Probing the location cross-product always skips some candidates.
    assert!(processor.buffered_log_records() > 0);

    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    processor.replay_logs();
    assert_eq!(processor.buffered_log_records(), 0);
}

#[test]
fn unparseable_file_aborts_the_load() {
    let harness = Harness::new();
    harness.write("classpath/application.yml", "key: [unclosed\n");
    let mut environment = Environment::new();

    let err = harness.load(&mut environment).unwrap_err();

    assert!(err.is_property_source_error());
    assert!(err
        .to_string()
        .contains("classpath:/application.yml"));
}
