mod helpers;

use helpers::{config_source_name, environment_with, loaded_source_names, Harness};
use stratum_core::{Environment, PropertySource};
use stratum_loader::{move_default_properties_to_end, DEFAULT_PROPERTIES};

#[test]
fn file_discovered_profiles_activate_and_cancel_defaults() {
    let harness = Harness::new();
    harness.write(
        "classpath/application.properties",
        "spring.profiles.active=prod\n",
    );
    harness.write("classpath/application-prod.properties", "from.prod=yes\n");
    harness.write("classpath/application-default.properties", "from.default=yes\n");
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    assert_eq!(environment.active_profiles(), &["prod".to_string()]);
    assert_eq!(environment.property("from.prod").as_deref(), Some("yes"));
    // The pending default profile was dropped once prod activated.
    assert_eq!(environment.property("from.default"), None);
}

#[test]
fn profile_activation_latches_on_first_use() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "x=base\n");
    harness.write(
        "classpath/application-dev.properties",
        "spring.profiles.active=prod\n",
    );
    harness.write("classpath/application-prod.properties", "from.prod=yes\n");
    let mut environment = environment_with(&[("spring.profiles.active", "dev")]);

    harness.load(&mut environment).unwrap();

    // The property-driven activation already latched, so the document's
    // own spring.profiles.active is ignored.
    assert_eq!(environment.active_profiles(), &["dev".to_string()]);
    assert_eq!(environment.property("from.prod"), None);
}

#[test]
fn includes_already_processed_are_not_reprocessed() {
    let harness = Harness::new();
    harness.write(
        "classpath/application-db.properties",
        "spring.profiles.include=dev\n",
    );
    harness.write("classpath/application-dev.properties", "y=dev\n");
    let mut environment = environment_with(&[("spring.profiles.active", "dev,db")]);

    harness.load(&mut environment).unwrap();

    // dev was processed before db's include mentioned it again.
    assert_eq!(
        environment.active_profiles(),
        &["dev".to_string(), "db".to_string()]
    );
    assert_eq!(environment.property("y").as_deref(), Some("dev"));
}

#[test]
fn later_profile_picks_up_documents_from_earlier_profile_files() {
    let harness = Harness::new();
    harness.write(
        "classpath/application-dev.yml",
        "spring:\n  profiles: db\nx: from-dev-file\n",
    );
    let mut environment = environment_with(&[("spring.profiles.active", "dev,db")]);

    harness.load(&mut environment).unwrap();

    // The document lives in dev's file but belongs to db, which is
    // processed later and re-reads previously processed profile files.
    assert_eq!(environment.property("x").as_deref(), Some("from-dev-file"));
    assert_eq!(
        loaded_source_names(&environment),
        vec![config_source_name("classpath:/application-dev.yml")]
    );
}

#[test]
fn negated_profile_documents_load_at_lowest_precedence() {
    let harness = Harness::new();
    harness.write(
        "classpath/application.yml",
        "a: base\n---\nspring:\n  profiles: '!dev'\na: negated\nb: negated-only\n",
    );
    let mut environment = Environment::new();

    harness.load(&mut environment).unwrap();

    // No profile is active, so the '!dev' document applies. It was not
    // owned by any profile bucket and is pulled in by the trailing
    // pass, below nothing but its own file's base document.
    assert_eq!(environment.property("b").as_deref(), Some("negated-only"));
    let names = loaded_source_names(&environment);
    assert_eq!(names.len(), 2);
    assert!(names[0].contains("(document #1)"));
    assert!(names[1].contains("(document #0)"));

    // With dev active the same document must stay out.
    let mut environment = environment_with(&[("spring.profiles.active", "dev")]);
    harness.load(&mut environment).unwrap();
    assert_eq!(environment.property("b"), None);
}

#[test]
fn default_properties_source_stays_lowest() {
    let harness = Harness::new();
    harness.write("classpath/application.properties", "a=loaded\n");

    let mut environment = Environment::new();
    environment
        .sources_mut()
        .add_last(PropertySource::from_pairs(
            DEFAULT_PROPERTIES,
            [("a", "default"), ("only.default", "x")],
        ));

    harness.load(&mut environment).unwrap();

    // Loaded sources were inserted before the defaults.
    assert_eq!(environment.property("a").as_deref(), Some("loaded"));
    assert_eq!(environment.property("only.default").as_deref(), Some("x"));
    assert_eq!(
        environment.sources().names().last().copied(),
        Some(DEFAULT_PROPERTIES)
    );

    // The container-refresh hook keeps it last even after later
    // insertions at the end of the list.
    environment
        .sources_mut()
        .add_last(PropertySource::from_pairs("lateSource", [("z", "1")]));
    move_default_properties_to_end(&mut environment);
    assert_eq!(
        environment.sources().names().last().copied(),
        Some(DEFAULT_PROPERTIES)
    );
}

#[test]
fn included_profiles_from_environment_precede_active_ones() {
    let harness = Harness::new();
    harness.write("classpath/application-first.properties", "order=first\n");
    harness.write("classpath/application-second.properties", "order=second\n");
    let mut environment = environment_with(&[
        ("spring.profiles.include", "first"),
        ("spring.profiles.active", "second"),
    ]);

    harness.load(&mut environment).unwrap();

    // Include entries are queued before active entries, so the active
    // profile is processed later and wins.
    assert_eq!(
        environment.active_profiles(),
        &["first".to_string(), "second".to_string()]
    );
    assert_eq!(environment.property("order").as_deref(), Some("second"));
}
