use std::collections::BTreeMap;
use std::{env, fs};

use authorized_keys_fixtures::FixtureLine;

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "test_keys.txt".to_string());
    println!("Inspecting '{}':", path);
    let text = fs::read_to_string(&path).expect("unable to read fixtures file");
    let lines = FixtureLine::parse_all(&text).expect("unable to parse fixtures file");

    let mut types = BTreeMap::new();
    let mut directives = BTreeMap::new();
    for (i, line) in lines.iter().enumerate() {
        let key = line
            .key()
            .unwrap_or_else(|e| panic!("unable to parse key at line {}: {}", i + 1, e));
        *types.entry((key.keytype(), key.size())).or_insert(0) += 1;
        for (name, _) in line.key_options() {
            *directives.entry(name).or_insert(0) += 1;
        }
        println!(
            " * Key #{} [{} options] -> {}",
            i + 1,
            line.options.len(),
            key.to_fingerprint_string()
        );
    }

    println!("{} keys", lines.len());
    for ((keytype, size), count) in types {
        println!("  {:>5} x {} {}", count, keytype, size);
    }
    println!("option directives:");
    for (name, count) in directives {
        println!("  {:>5} x {}", count, name);
    }
}
