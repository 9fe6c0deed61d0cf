use clap::Parser;
use gather::cli::Args;
use gather::config::types::{Config, LogLevel};
use gather::fs_ops::PlaceMode;
use std::path::PathBuf;

#[test]
fn minimal_invocation_parses() {
    let args = Args::parse_from(["gather", "/tmp/out", "-E", ".txt"]);
    assert_eq!(args.target_dir, Some(PathBuf::from("/tmp/out")));
    assert_eq!(args.extension.as_deref(), Some(".txt"));
    assert!(!args.move_files);
    assert!(!args.case_sensitive);
    assert_eq!(args.prefix_length, None);
}

#[test]
fn extension_is_required_without_print_config() {
    assert!(Args::try_parse_from(["gather", "/tmp/out"]).is_err());
    assert!(Args::try_parse_from(["gather", "--print-config"]).is_ok());
}

#[test]
fn target_is_required_without_print_config() {
    assert!(Args::try_parse_from(["gather", "-E", ".txt"]).is_err());
}

#[test]
fn negative_prefix_length_is_accepted_and_abs_applied() {
    let args = Args::parse_from(["gather", "/tmp/out", "-E", ".txt", "-P", "-5"]);
    assert_eq!(args.prefix_length, Some(-5));
    assert_eq!(args.effective_prefix_length(), Some(5));
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["gather", "/tmp/out", "-E", ".txt", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["gather", "/tmp/out", "-E", ".txt", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "gather",
        "/cb",
        "-S",
        "/db",
        "-E",
        "iso",
        "-M",
        "-C",
        "-P",
        "8",
        "--log-level",
        "info",
        "--dry-run",
    ]);
    let mut cfg = Config::new("/old_src", "/old_tgt", ".bin");
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_dir, PathBuf::from("/db"));
    assert_eq!(cfg.target_dir, PathBuf::from("/cb"));
    assert_eq!(cfg.extension, "iso");
    assert_eq!(cfg.mode, PlaceMode::Move);
    assert!(cfg.case_sensitive);
    assert_eq!(cfg.prefix_length, 8);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_untouched() {
    let args = Args::parse_from(["gather", "/cb", "-E", ".txt"]);
    let mut cfg = Config::new("/src", "/old_tgt", ".bin");
    cfg.prefix_length = 3;
    args.apply_overrides(&mut cfg);
    // Positional/required flags always apply; the rest keep prior values.
    assert_eq!(cfg.source_dir, PathBuf::from("/src"));
    assert_eq!(cfg.prefix_length, 3);
    assert_eq!(cfg.mode, PlaceMode::Copy);
}
