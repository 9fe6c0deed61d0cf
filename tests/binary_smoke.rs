use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn binary_print_config_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("gather");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(
        out.status.success(),
        "binary should succeed with --print-config"
    );
}

#[test]
fn binary_copies_matching_files() {
    let td = tempdir().unwrap();
    let source = td.path().join("src");
    let target = td.path().join("flat");
    fs::create_dir_all(source.join("sub")).unwrap();
    fs::write(source.join("a.txt"), b"alpha").unwrap();
    fs::write(source.join("sub/b.txt"), b"beta").unwrap();
    fs::write(source.join("sub/skip.bin"), b"nope").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("gather");
    let out = Command::new(me)
        // Point at a missing config so the user's real one is never touched.
        .env("GATHER_CONFIG", td.path().join("no_config.xml"))
        .arg(&target)
        .args(["-E", ".txt"])
        .arg("-S")
        .arg(&source)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Processed 2 file(s)"),
        "summary missing from stdout: {stdout}"
    );
    assert!(target.join("a.txt").exists());
    assert!(target.join("b.txt").exists());
    assert!(!target.join("skip.bin").exists());
}

#[test]
fn binary_fails_on_missing_source() {
    let td = tempdir().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("gather");
    let out = Command::new(me)
        .env("GATHER_CONFIG", td.path().join("no_config.xml"))
        .arg(td.path().join("flat"))
        .args(["-E", ".txt"])
        .arg("-S")
        .arg(td.path().join("absent"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success(), "missing source must be fatal");
}

#[test]
fn binary_rejects_unknown_algorithm() {
    let td = tempdir().unwrap();
    let source = td.path().join("src");
    fs::create_dir_all(&source).unwrap();

    let me = assert_cmd::cargo::cargo_bin!("gather");
    let out = Command::new(me)
        .env("GATHER_CONFIG", td.path().join("no_config.xml"))
        .arg(td.path().join("flat"))
        .args(["-E", ".txt", "-A", "sha1", "-P", "4"])
        .arg("-S")
        .arg(&source)
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Unsupported digest algorithm"),
        "stderr: {stderr}"
    );
}
