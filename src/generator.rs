//! The fixture generation loop.
//!
//! each iteration clears the working key pair, asks the key generator for a
//! fresh one and turns its public half into a [`FixtureLine`]. lines are only
//! kept in memory; nothing reaches the output file until [`write_fixtures`]
//! runs after the last iteration, so a failed run leaves no partial output.

use std::fs;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::errors::*;
use crate::fixture::FixtureLine;
use crate::keygen::{KeyGenerator, KeyRequest, SshKeygen};
use crate::sample;

pub struct Generator<K, R> {
    config: GeneratorConfig,
    keygen: K,
    rng: R,
}

impl<K: KeyGenerator> Generator<K, StdRng> {
    /// a generator whose rng is seeded from `config.seed`, or from the OS
    /// when no seed is set.
    pub fn from_config(config: GeneratorConfig, keygen: K) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Generator::new(config, keygen, rng)
    }
}

impl<K: KeyGenerator, R: Rng> Generator<K, R> {
    pub fn new(config: GeneratorConfig, keygen: K, rng: R) -> Self {
        Generator {
            config,
            keygen,
            rng,
        }
    }

    /// generate every line of the run, in order.
    pub fn run(&mut self) -> Result<Vec<FixtureLine>> {
        self.config.validate()?;
        info!(
            iterations = self.config.iterations,
            key_path = %self.config.key_path.display(),
            "generating fixtures"
        );

        let mut lines = Vec::with_capacity(self.config.iterations);
        for iteration in 0..self.config.iterations {
            lines.push(self.next_line(iteration)?);
        }
        Ok(lines)
    }

    fn next_line(&mut self, iteration: usize) -> Result<FixtureLine> {
        let public_key_path = self.config.public_key_path();
        remove_stale(&self.config.key_path)?;
        remove_stale(&public_key_path)?;

        let (key_type, bits) = sample::key(&mut self.rng, &self.config.key_specs)?;
        let comment = sample::comment(
            &mut self.rng,
            &self.config.comment_alphabet,
            self.config.max_comment_len,
        );
        let request = KeyRequest {
            key_type,
            bits,
            comment,
        };
        self.keygen.generate(&request, &self.config.key_path)?;

        let options = sample::options(
            &mut self.rng,
            &self.config.option_catalog,
            self.config.option_count,
        );
        let public_key =
            fs::read_to_string(&public_key_path).map_err(|source| FixtureError::ReadPublicKey {
                path: public_key_path.clone(),
                source,
            })?;

        debug!(
            iteration,
            %key_type,
            bits,
            comment_len = request.comment.len(),
            options = options.len(),
            "generated key"
        );
        Ok(FixtureLine::new(options, public_key))
    }
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(FixtureError::RemoveStale {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// the fixture file contents: every line in order, nothing in between.
pub fn render(lines: &[FixtureLine]) -> String {
    lines.iter().map(|line| line.to_string()).collect()
}

/// write the rendered lines to `path`, replacing whatever was there.
pub fn write_fixtures(path: &Path, lines: &[FixtureLine]) -> Result<()> {
    let contents = render(lines);
    fs::write(path, &contents).map_err(|source| FixtureError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        lines = lines.len(),
        bytes = contents.len(),
        "wrote fixtures"
    );
    Ok(())
}

/// run `ssh-keygen` for every line of `config` and write the output file.
pub fn generate_fixtures(config: &GeneratorConfig) -> Result<Vec<FixtureLine>> {
    generate_fixtures_with(config, SshKeygen::default())
}

/// like [`generate_fixtures`] with any key generator. the output file is
/// only written once every line exists.
pub fn generate_fixtures_with<K: KeyGenerator>(
    config: &GeneratorConfig,
    keygen: K,
) -> Result<Vec<FixtureLine>> {
    let mut generator = Generator::from_config(config.clone(), keygen);
    let lines = generator.run()?;
    write_fixtures(&config.output_path, &lines)?;
    Ok(lines)
}
