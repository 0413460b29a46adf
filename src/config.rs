//! Run parameters for the fixture generator.

use std::path::PathBuf;

use crate::catalog::{self, KeyType};
use crate::errors::*;

/// A key type together with the sizes it may be generated with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpec {
    pub key_type: KeyType,
    pub sizes: Vec<u32>,
}

impl KeySpec {
    pub fn new(key_type: KeyType, sizes: &[u32]) -> Self {
        KeySpec {
            key_type,
            sizes: sizes.to_vec(),
        }
    }
}

impl From<KeyType> for KeySpec {
    fn from(key_type: KeyType) -> Self {
        KeySpec::new(key_type, key_type.sizes())
    }
}

/// How many option directives are prefixed to each line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionCount {
    /// uniformly in `0..=max`, drawn per line.
    Uniform { max: usize },
    /// always exactly this many.
    Exactly(usize),
}

impl OptionCount {
    pub fn max(self) -> usize {
        match self {
            OptionCount::Uniform { max } => max,
            OptionCount::Exactly(n) => n,
        }
    }
}

/// Everything that shapes a fixture run. `Default` is the reference run:
/// 1000 lines, every key type, comments up to 300 characters and up to five
/// options per line, written to `test_keys.txt`.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub iterations: usize,
    pub key_specs: Vec<KeySpec>,
    pub comment_alphabet: Vec<char>,
    pub max_comment_len: usize,
    pub option_catalog: Vec<String>,
    pub option_count: OptionCount,
    /// private key path handed to the key generator; the public key is
    /// expected at the same path with `.pub` appended.
    pub key_path: PathBuf,
    pub output_path: PathBuf,
    /// seeds the random generator. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            iterations: catalog::ITERATIONS,
            key_specs: KeyType::ALL.into_iter().map(KeySpec::from).collect(),
            comment_alphabet: catalog::comment_alphabet(),
            max_comment_len: catalog::MAX_COMMENT_LEN,
            option_catalog: catalog::OPTION_CATALOG.iter().map(|o| o.to_string()).collect(),
            option_count: OptionCount::Uniform {
                max: catalog::MAX_OPTIONS,
            },
            key_path: PathBuf::from(catalog::KEY_FILE),
            output_path: PathBuf::from(catalog::OUTPUT_FILE),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// path of the public half of the working key pair.
    pub fn public_key_path(&self) -> PathBuf {
        let mut path = self.key_path.clone().into_os_string();
        path.push(".pub");
        PathBuf::from(path)
    }

    /// reject configurations the sampler cannot draw from.
    pub fn validate(&self) -> Result<()> {
        if self.key_specs.is_empty() {
            return Err(FixtureError::InvalidConfig("no key types configured".into()));
        }
        if let Some(spec) = self.key_specs.iter().find(|s| s.sizes.is_empty()) {
            return Err(FixtureError::InvalidConfig(format!(
                "no key sizes configured for {}",
                spec.key_type
            )));
        }
        if self.comment_alphabet.is_empty() && self.max_comment_len > 0 {
            return Err(FixtureError::InvalidConfig(
                "comments may be non-empty but the alphabet is empty".into(),
            ));
        }
        if self.option_catalog.is_empty() && self.option_count.max() > 0 {
            return Err(FixtureError::InvalidConfig(
                "options may be drawn but the option catalog is empty".into(),
            ));
        }
        if self.option_catalog.iter().any(|o| o.is_empty()) {
            return Err(FixtureError::InvalidConfig("empty option directive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_run() {
        let config = GeneratorConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.key_specs.len(), 3);
        assert_eq!(config.option_catalog.len(), 5);
        assert_eq!(config.option_count, OptionCount::Uniform { max: 5 });
        assert_eq!(config.max_comment_len, 300);
        assert_eq!(config.output_path, PathBuf::from("test_keys.txt"));
        assert_eq!(config.public_key_path(), PathBuf::from("tmpkey.pub"));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_catalogs() {
        let mut config = GeneratorConfig::default();
        config.key_specs.clear();
        assert!(matches!(config.validate(), Err(FixtureError::InvalidConfig(_))));

        let mut config = GeneratorConfig::default();
        config.key_specs = vec![KeySpec::new(KeyType::Rsa, &[])];
        assert!(matches!(config.validate(), Err(FixtureError::InvalidConfig(_))));

        let mut config = GeneratorConfig::default();
        config.option_catalog.clear();
        assert!(matches!(config.validate(), Err(FixtureError::InvalidConfig(_))));

        let mut config = GeneratorConfig::default();
        config.comment_alphabet.clear();
        assert!(matches!(config.validate(), Err(FixtureError::InvalidConfig(_))));
    }

    #[test]
    fn empty_catalogs_allowed_when_unused() {
        let mut config = GeneratorConfig::default();
        config.option_catalog.clear();
        config.option_count = OptionCount::Exactly(0);
        config.comment_alphabet.clear();
        config.max_comment_len = 0;
        assert!(config.validate().is_ok());
    }
}
