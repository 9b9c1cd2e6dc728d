// session_tests.rs — session construction from configuration

use framelens_config::ConfigLoader;
use framelens_runtime::{FrameRecord, InspectSession};
use std::fs;
use tempfile::TempDir;

fn load_config(dir: &TempDir, content: &str) -> framelens_config::Config {
    fs::write(dir.path().join("framelens.toml"), content).unwrap();
    let mut loader = ConfigLoader::with_global_path(dir.path().join("no-global.toml"));
    loader.load_from_directory(dir.path()).unwrap()
}

fn push_stack(session: &mut InspectSession) {
    session.push_frame(FrameRecord::named("main"));
    session.push_frame(FrameRecord::named("helper").with_source("demo.c", 17));
    session.push_frame(FrameRecord::named("worker").with_source("demo.c", 41));
}

#[test]
fn test_with_config_applies_render_settings() {
    let dir = TempDir::new().unwrap();
    let config = load_config(
        &dir,
        r#"
            [render]
            max_frames = 2
            show_source = false
        "#,
    );

    let mut session = InspectSession::with_config(&config);
    push_stack(&mut session);

    let frames = session.frame_summaries().unwrap();
    assert_eq!(frames.len(), 2);

    let listing = session.backtrace().unwrap();
    assert!(!listing.contains("demo.c"));
}

#[test]
fn test_with_config_disables_named_filters() {
    let dir = TempDir::new().unwrap();
    let config = load_config(
        &dir,
        r#"
            [filters]
            disabled = ["Reverse"]
        "#,
    );

    let mut session = InspectSession::with_config(&config);
    push_stack(&mut session);

    // Reverse stays registered but does not run.
    assert!(session.registry().filter("Reverse").is_some());
    assert!(!session.registry().filter("Reverse").unwrap().enabled);
    let listing = session.backtrace().unwrap();
    assert!(listing.contains("worker"));
}

#[test]
fn test_with_config_unknown_disabled_filter_is_ignored() {
    let dir = TempDir::new().unwrap();
    let config = load_config(
        &dir,
        r#"
            [filters]
            disabled = ["NoSuchFilter"]
        "#,
    );

    let mut session = InspectSession::with_config(&config);
    push_stack(&mut session);
    assert!(session.backtrace().is_ok());
}

#[test]
fn test_default_config_keeps_reverse_enabled() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&dir, "");

    let mut session = InspectSession::with_config(&config);
    push_stack(&mut session);

    let listing = session.backtrace().unwrap();
    assert!(listing.contains("rekrow"));
}
