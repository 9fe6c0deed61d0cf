use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

use gather::fingerprint::{Algorithm, digest_file};

fn file_with(content: &[u8]) -> (TempDir, PathBuf) {
    let td = tempdir().unwrap();
    let p = td.path().join("input.bin");
    fs::write(&p, content).unwrap();
    (td, p)
}

#[test]
fn empty_file_vectors() {
    let (_td, p) = file_with(b"");
    assert_eq!(digest_file(&p, Algorithm::Crc32).unwrap(), "0");
    assert_eq!(
        digest_file(&p, Algorithm::Md2).unwrap(),
        "8350e5a3e24c153df2275c9f80692773"
    );
    assert_eq!(
        digest_file(&p, Algorithm::Md4).unwrap(),
        "31d6cfe0d16ae931b73c59d7e0c089c0"
    );
    assert_eq!(
        digest_file(&p, Algorithm::Md5).unwrap(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
    assert_eq!(
        digest_file(&p, Algorithm::Sha256).unwrap(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        digest_file(&p, Algorithm::Sha384).unwrap(),
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b"
    );
    assert_eq!(
        digest_file(&p, Algorithm::Sha512).unwrap(),
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    );
}

#[test]
fn crc32_check_value() {
    // Standard CRC-32 check input; rendered in decimal, not hex.
    let (_td, p) = file_with(b"123456789");
    assert_eq!(digest_file(&p, Algorithm::Crc32).unwrap(), "3421780262");
}

#[test]
fn md5_abc_vector() {
    let (_td, p) = file_with(b"abc");
    assert_eq!(
        digest_file(&p, Algorithm::Md5).unwrap(),
        "900150983cd24fb0d6963f7d28e17f72"
    );
}

#[test]
fn sha256_abc_vector() {
    let (_td, p) = file_with(b"abc");
    assert_eq!(
        digest_file(&p, Algorithm::Sha256).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn digests_are_lowercase_hex_of_expected_width() {
    // Content larger than one read block, so folding crosses boundaries.
    let (_td, p) = file_with(&vec![0xabu8; 10_000]);
    for (algo, width) in [
        (Algorithm::Md2, 32),
        (Algorithm::Md4, 32),
        (Algorithm::Md5, 32),
        (Algorithm::Sha256, 64),
        (Algorithm::Sha384, 96),
        (Algorithm::Sha512, 128),
    ] {
        let d = digest_file(&p, algo).unwrap();
        assert_eq!(d.len(), width, "width mismatch for {algo}");
        assert!(
            d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "non-lowercase-hex digest for {algo}: {d}"
        );
    }
}

#[test]
fn same_content_same_digest() {
    let (_td1, a) = file_with(b"identical bytes");
    let (_td2, b) = file_with(b"identical bytes");
    assert_eq!(
        digest_file(&a, Algorithm::Sha512).unwrap(),
        digest_file(&b, Algorithm::Sha512).unwrap()
    );
}
