use std::fs;
use std::path::Path;

use assert_fs::prelude::*;
use gather::config::Config;
use gather::fs_ops::PlaceMode;
use gather::{Algorithm, run_extract};

fn target_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn copy_run_places_matches_and_keeps_sources() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();

    source.child("a.txt").write_str("alpha").unwrap();
    source.child("sub/b.txt").write_str("beta").unwrap();
    source.child("sub/skip.bin").write_str("nope").unwrap();

    let cfg = Config::new(source.path(), target.path(), ".txt");
    target.create_dir_all().unwrap();
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(target_names(target.path()), vec!["a.txt", "b.txt"]);
    // Copy mode leaves the originals in place.
    source.child("a.txt").assert("alpha");
    source.child("sub/b.txt").assert("beta");
}

#[test]
fn move_run_removes_sources() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    source.child("one.iso").write_str("1").unwrap();
    source.child("deep/two.iso").write_str("2").unwrap();

    let mut cfg = Config::new(source.path(), target.path(), ".iso");
    cfg.mode = PlaceMode::Move;
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 2);
    assert!(!source.child("one.iso").path().exists());
    assert!(!source.child("deep/two.iso").path().exists());
    assert_eq!(target_names(target.path()), vec!["one.iso", "two.iso"]);
}

#[test]
fn colliding_names_without_hashing_get_numeric_suffixes() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    source.child("x/report.txt").write_str("from x").unwrap();
    source.child("y/report.txt").write_str("from y").unwrap();
    source.child("z/report.txt").write_str("from z").unwrap();

    let cfg = Config::new(source.path(), target.path(), "txt");
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 3);
    assert_eq!(
        target_names(target.path()),
        vec!["report.txt", "report_1.txt", "report_2.txt"]
    );
}

#[test]
fn hash_prefixing_disambiguates_same_named_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    source.child("x/data.txt").write_str("contents one").unwrap();
    source.child("y/data.txt").write_str("contents two").unwrap();

    let mut cfg = Config::new(source.path(), target.path(), ".txt");
    cfg.prefix_length = 6;
    cfg.algorithm = Algorithm::Sha256;
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 2);
    let names = target_names(target.path());
    assert_eq!(names.len(), 2);
    for name in &names {
        assert!(
            name.ends_with("_data.txt"),
            "prefixed name should keep the original filename: {name}"
        );
        let prefix = name.strip_suffix("_data.txt").unwrap();
        assert!(prefix.len() >= 6, "prefix shorter than requested: {name}");
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit()));
    }
    assert_ne!(names[0], names[1]);
}

#[test]
fn identical_files_processed_twice_never_overwrite() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    // Same name, same bytes, two locations.
    source.child("x/same.txt").write_str("dupe").unwrap();
    source.child("y/same.txt").write_str("dupe").unwrap();

    let mut cfg = Config::new(source.path(), target.path(), ".txt");
    cfg.prefix_length = 4;
    cfg.algorithm = Algorithm::Md5;
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 2);
    assert_eq!(target_names(target.path()).len(), 2);
}

#[test]
fn dry_run_counts_but_does_not_place() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    source.child("a.txt").write_str("alpha").unwrap();

    let mut cfg = Config::new(source.path(), target.path(), ".txt");
    cfg.dry_run = true;
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 1);
    assert!(target_names(target.path()).is_empty());
    source.child("a.txt").assert("alpha");
}

#[test]
fn unreadable_file_is_skipped_and_counted_as_failed() {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        // Mode bits do not stop root; nothing to observe in that case.
        if unsafe { libc::geteuid() } == 0 {
            return;
        }

        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("incoming");
        let target = temp.child("flat");
        source.create_dir_all().unwrap();
        target.create_dir_all().unwrap();

        source.child("ok.txt").write_str("fine").unwrap();
        let locked = source.child("locked.txt");
        locked.write_str("secret").unwrap();
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o000)).unwrap();

        let mut cfg = Config::new(source.path(), target.path(), ".txt");
        // Hashing forces a read, which fails on the unreadable file.
        cfg.prefix_length = 4;
        let stats = run_extract(&cfg).expect("run itself should not abort");

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.failed, 1);

        // Restore perms so TempDir cleanup can remove it.
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o644)).unwrap();
    }
}

#[test]
fn case_sensitive_extension_match_is_honored() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("incoming");
    let target = temp.child("flat");
    source.create_dir_all().unwrap();
    target.create_dir_all().unwrap();

    source.child("lower.txt").write_str("l").unwrap();
    source.child("upper.TXT").write_str("u").unwrap();

    let mut cfg = Config::new(source.path(), target.path(), ".txt");
    cfg.case_sensitive = true;
    let stats = run_extract(&cfg).expect("run should succeed");

    assert_eq!(stats.processed, 1);
    assert_eq!(target_names(target.path()), vec!["lower.txt"]);
}
