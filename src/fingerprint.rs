//! File content fingerprinting.
//!
//! Digests are computed by folding fixed-size blocks into a running
//! accumulator, so memory use stays at one block regardless of file size.
//! CRC32 renders as the unsigned 32-bit value in decimal; the cryptographic
//! algorithms render as lowercase hex.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use md5::Digest;
use sha2::digest::Output;

use crate::errors::GatherError;

/// Block size used when streaming file contents into a hasher.
pub const BLOCK_SIZE: usize = 4096;

/// Digest algorithms accepted for filename prefixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    Crc32,
    Md2,
    Md4,
    Md5,
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

impl Algorithm {
    /// Parse an algorithm name (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, GatherError> {
        match s.to_ascii_uppercase().as_str() {
            "CRC32" => Ok(Algorithm::Crc32),
            "MD2" => Ok(Algorithm::Md2),
            "MD4" => Ok(Algorithm::Md4),
            "MD5" => Ok(Algorithm::Md5),
            "SHA256" => Ok(Algorithm::Sha256),
            "SHA384" => Ok(Algorithm::Sha384),
            "SHA512" => Ok(Algorithm::Sha512),
            _ => Err(GatherError::UnsupportedAlgorithm(s.to_string())),
        }
    }

    /// Canonical name, as accepted on the command line and in config.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Crc32 => "CRC32",
            Algorithm::Md2 => "MD2",
            Algorithm::Md4 => "MD4",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha384 => "SHA384",
            Algorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GatherError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Compute the digest string of a file's full contents under `algorithm`.
///
/// The file is read once, in [`BLOCK_SIZE`] chunks. I/O failures carry the
/// offending path; they are fatal to this file only, callers decide run
/// policy.
pub fn digest_file(path: &Path, algorithm: Algorithm) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("open '{}' for hashing", path.display()))?;

    match algorithm {
        Algorithm::Crc32 => {
            let mut hasher = crc32fast::Hasher::new();
            let mut buf = [0u8; BLOCK_SIZE];
            loop {
                let n = file
                    .read(&mut buf)
                    .with_context(|| format!("read '{}'", path.display()))?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
            // Decimal rendering of the unsigned checksum; an empty file is "0".
            Ok(hasher.finalize().to_string())
        }
        Algorithm::Md2 => hash_blocks::<md2::Md2>(&mut file, path),
        Algorithm::Md4 => hash_blocks::<md4::Md4>(&mut file, path),
        Algorithm::Md5 => hash_blocks::<md5::Md5>(&mut file, path),
        Algorithm::Sha256 => hash_blocks::<sha2::Sha256>(&mut file, path),
        Algorithm::Sha384 => hash_blocks::<sha2::Sha384>(&mut file, path),
        Algorithm::Sha512 => hash_blocks::<sha2::Sha512>(&mut file, path),
    }
}

/// Stream `file` into a fresh hasher of type `D` and render lowercase hex.
fn hash_blocks<D: Digest>(file: &mut File, path: &Path) -> Result<String>
where
    Output<D>: fmt::LowerHex,
{
    let mut hasher = D::new();
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("read '{}'", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
