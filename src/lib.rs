//! authorized-keys-fixtures
//!
//! this library generates randomized openssh `authorized_keys` test fixtures.
//! every fixture line is a real public key produced by `ssh-keygen`, with a
//! random comment and an optional random prefix of key options, so parsers
//! can be exercised against a large and varied corpus.
//!
//! ```no_run
//! use authorized_keys_fixtures::{generate_fixtures, GeneratorConfig};
//!
//! let lines = generate_fixtures(&GeneratorConfig::default()).unwrap();
//! println!("wrote {} fixture lines", lines.len());
//! ```
//!
//! the generated file can be read back with [`FixtureLine::parse`], which
//! splits the options from the key and decodes the key material into a
//! [`PublicKey`].

pub mod catalog;
pub mod config;
pub mod fixture;
pub mod generator;
pub mod key;
pub mod keygen;
mod reader;
pub mod sample;
mod writer;

pub mod errors {
    use std::path::PathBuf;
    use std::process::ExitStatus;
    use thiserror::Error;

    pub type Result<T> = std::result::Result<T, FixtureError>;

    #[derive(Error, Debug)]
    pub enum FixtureError {
        #[error("invalid generator configuration: {0}")]
        InvalidConfig(String),
        #[error("failed to remove stale key file '{}'", .path.display())]
        RemoveStale {
            path: PathBuf,
            source: std::io::Error,
        },
        #[error("failed to run key generator '{program}'")]
        KeygenSpawn {
            program: String,
            source: std::io::Error,
        },
        #[error("key generator '{program}' exited with {status}: {stderr}")]
        KeygenFailed {
            program: String,
            status: ExitStatus,
            stderr: String,
        },
        #[error("failed to read public key '{}'", .path.display())]
        ReadPublicKey {
            path: PathBuf,
            source: std::io::Error,
        },
        #[error("failed to write fixtures to '{}'", .path.display())]
        WriteOutput {
            path: PathBuf,
            source: std::io::Error,
        },
        #[error("invalid key format")]
        InvalidFormat,
        #[error("unsupported keytype: {0}")]
        UnsupportedKeytype(String),
        #[error("unsupported curve: {0}")]
        UnsupportedCurve(String),
        #[error(transparent)]
        Utf8Error(#[from] std::str::Utf8Error),
        #[error(transparent)]
        DecodeError(#[from] base64::DecodeError),
    }
}

pub use crate::catalog::KeyType;
pub use crate::config::{GeneratorConfig, KeySpec, OptionCount};
pub use crate::errors::{FixtureError, Result};
pub use crate::fixture::{FixtureLine, KeyOption};
pub use crate::generator::{
    generate_fixtures, generate_fixtures_with, render, write_fixtures, Generator,
};
pub use crate::key::{Curve, Data, PublicKey};
pub use crate::keygen::{KeyGenerator, KeyRequest, SshKeygen};
