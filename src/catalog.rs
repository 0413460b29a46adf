//! The fixed constants of a reference fixture run.

use std::fmt;

/// Number of fixture lines in a reference run.
pub const ITERATIONS: usize = 1_000;

/// Longest comment handed to the key generator.
pub const MAX_COMMENT_LEN: usize = 300;

/// Largest number of option directives prefixed to a single line.
pub const MAX_OPTIONS: usize = 5;

/// Working path of the private key. The public key lands next to it with a
/// `.pub` suffix.
pub const KEY_FILE: &str = "tmpkey";

/// Where the concatenated fixtures are written.
pub const OUTPUT_FILE: &str = "test_keys.txt";

/// `authorized_keys` directives a fixture line may be prefixed with.
pub const OPTION_CATALOG: [&str; 5] = [
    r#"command="uptime""#,
    "no-agent-forwarding",
    "restrict",
    r#"environment="LOGNAME=tricksy""#,
    r#"environment="HOME=/tmp""#,
];

/// Characters a comment is drawn from: ascii letters, space, `-` and `_`.
pub fn comment_alphabet() -> Vec<char> {
    ('A'..='Z')
        .chain('a'..='z')
        .chain([' ', '-', '_'])
        .collect()
}

/// Key algorithms, named the way they are handed to `ssh-keygen -t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Ed25519,
    Ecdsa,
}

impl KeyType {
    pub const ALL: [KeyType; 3] = [KeyType::Rsa, KeyType::Ed25519, KeyType::Ecdsa];

    /// the `-t` argument for this key type.
    pub fn name(self) -> &'static str {
        match self {
            KeyType::Rsa => "ssh-rsa",
            KeyType::Ed25519 => "ssh-ed25519",
            KeyType::Ecdsa => "ecdsa",
        }
    }

    /// the `-b` values a reference run picks from for this key type.
    ///
    /// `ssh-keygen` ignores `-b` for ed25519 keys, so those sizes only vary
    /// the command line, not the key.
    pub fn sizes(self) -> &'static [u32] {
        match self {
            KeyType::Rsa => &[1024, 2048, 4096],
            KeyType::Ed25519 => &[128, 256, 512],
            KeyType::Ecdsa => &[256, 384, 521],
        }
    }

    /// whether a public key of type `keytype` (as written in a `.pub` file)
    /// is what `ssh-keygen -t <self>` produces.
    pub fn produces(self, keytype: &str) -> bool {
        match self {
            KeyType::Rsa | KeyType::Ed25519 => keytype == self.name(),
            KeyType::Ecdsa => keytype.starts_with("ecdsa-sha2-"),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
