//! Random selection of the per-line parameters.
//!
//! every draw is uniform and with replacement; nothing here touches the
//! filesystem, so a seeded rng always yields the same parameters.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::KeyType;
use crate::config::{KeySpec, OptionCount};
use crate::errors::*;

/// pick a key type, then one of the sizes allowed for it.
pub fn key<R: Rng + ?Sized>(rng: &mut R, specs: &[KeySpec]) -> Result<(KeyType, u32)> {
    let spec = specs
        .choose(rng)
        .ok_or_else(|| FixtureError::InvalidConfig("no key types configured".into()))?;
    let bits = spec.sizes.choose(rng).ok_or_else(|| {
        FixtureError::InvalidConfig(format!("no key sizes configured for {}", spec.key_type))
    })?;
    Ok((spec.key_type, *bits))
}

/// a comment of uniform length in `0..=max_len` over `alphabet`.
pub fn comment<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char], max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len).filter_map(|_| alphabet.choose(rng)).collect()
}

/// option directives for one line. duplicates are kept.
pub fn options<R: Rng + ?Sized>(rng: &mut R, catalog: &[String], count: OptionCount) -> Vec<String> {
    let n = match count {
        OptionCount::Uniform { max } => rng.gen_range(0..=max),
        OptionCount::Exactly(n) => n,
    };
    (0..n).filter_map(|_| catalog.choose(rng).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, OPTION_CATALOG};
    use crate::config::GeneratorConfig;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn key_pairs_come_from_catalog(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let (key_type, bits) = key(&mut rng, &config.key_specs).unwrap();
            prop_assert!(key_type.sizes().contains(&bits));
            prop_assert!(!(key_type == KeyType::Ecdsa && bits == 2048));
        }

        #[test]
        fn comments_stay_in_alphabet(seed in any::<u64>()) {
            let alphabet = catalog::comment_alphabet();
            let mut rng = StdRng::seed_from_u64(seed);
            let comment = comment(&mut rng, &alphabet, catalog::MAX_COMMENT_LEN);
            prop_assert!(comment.chars().count() <= 300);
            prop_assert!(comment.chars().all(|c| alphabet.contains(&c)));
        }

        #[test]
        fn options_come_from_catalog(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let options = options(&mut rng, &config.option_catalog, config.option_count);
            prop_assert!(options.len() <= 5);
            for option in &options {
                prop_assert!(OPTION_CATALOG.contains(&option.as_str()));
            }
            let joined = options.join(",");
            prop_assert!(!joined.starts_with(','));
            prop_assert!(!joined.ends_with(','));
        }
    }

    #[test]
    fn exact_option_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = vec!["restrict".to_string()];
        let options = options(&mut rng, &catalog, OptionCount::Exactly(3));
        assert_eq!(options, vec!["restrict", "restrict", "restrict"]);
    }

    #[test]
    fn every_option_count_is_reachable() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..2000 {
            let n = options(&mut rng, &config.option_catalog, config.option_count).len();
            seen[n] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn empty_key_catalog() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(key(&mut rng, &[]), Err(FixtureError::InvalidConfig(_))));
    }

    #[test]
    fn zero_length_comments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(comment(&mut rng, &catalog::comment_alphabet(), 0), "");
    }
}
