//! Runs the generator against the real `ssh-keygen`. Skipped when the tool is
//! not installed.

use std::io::ErrorKind;
use std::process::Command;

use authorized_keys_fixtures::catalog::comment_alphabet;
use authorized_keys_fixtures::{
    generate_fixtures, FixtureLine, GeneratorConfig, KeySpec, KeyType, OptionCount,
};

fn have_ssh_keygen() -> bool {
    match Command::new("ssh-keygen").arg("-?").output() {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("ssh-keygen not found, skipping");
            false
        }
        _ => true,
    }
}

#[test]
fn single_restricted_ed25519_line() {
    if !have_ssh_keygen() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        iterations: 1,
        key_specs: vec![KeySpec::new(KeyType::Ed25519, &[256])],
        option_catalog: vec!["restrict".into()],
        option_count: OptionCount::Exactly(1),
        key_path: dir.path().join("tmpkey"),
        output_path: dir.path().join("test_keys.txt"),
        ..GeneratorConfig::default()
    };

    generate_fixtures(&config).unwrap();

    let written = std::fs::read_to_string(&config.output_path).unwrap();
    assert!(written.starts_with("restrict ssh-ed25519 AAAA"), "{}", written);
    assert!(written.ends_with('\n'));
    assert_eq!(written.lines().count(), 1);

    let lines = FixtureLine::parse_all(&written).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].options, vec!["restrict"]);
    let key = lines[0].key().unwrap();
    assert_eq!(key.keytype(), "ssh-ed25519");
    let alphabet = comment_alphabet();
    assert!(key
        .comment
        .unwrap_or_default()
        .chars()
        .all(|c| alphabet.contains(&c)));
}

#[test]
fn mixed_key_types() {
    if !have_ssh_keygen() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig {
        iterations: 12,
        // keep rsa small so the run stays quick.
        key_specs: vec![
            KeySpec::new(KeyType::Rsa, &[1024]),
            KeySpec::from(KeyType::Ed25519),
            KeySpec::from(KeyType::Ecdsa),
        ],
        key_path: dir.path().join("tmpkey"),
        output_path: dir.path().join("test_keys.txt"),
        ..GeneratorConfig::default()
    };

    let generated = generate_fixtures(&config).unwrap();
    let written = std::fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(written.lines().count(), 12);

    let lines = FixtureLine::parse_all(&written).unwrap();
    assert_eq!(lines, generated);
    for line in &lines {
        assert!(line.options.len() <= 5);
        let key = line.key().unwrap();
        match key.keytype().as_str() {
            "ssh-rsa" => assert_eq!(key.size(), 1024),
            "ssh-ed25519" => assert_eq!(key.size(), 256),
            other => {
                assert!(other.starts_with("ecdsa-sha2-nistp"));
                assert!(KeyType::Ecdsa.sizes().contains(&(key.size() as u32)));
            }
        }
    }
}
