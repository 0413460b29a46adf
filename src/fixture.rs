//! A single `authorized_keys` fixture line.

use std::fmt;

use crate::errors::*;
use crate::key::PublicKey;

/// An option directive split into its name and unquoted value, so
/// `command="uptime"` is `("command", Some("uptime"))` and `restrict` is
/// `("restrict", None)`.
pub type KeyOption = (String, Option<String>);

/// Option directives followed by public key text.
///
/// `public_key` is kept exactly as the key generator wrote it, trailing
/// newline included, so rendering a line reproduces the file bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureLine {
    pub options: Vec<String>,
    pub public_key: String,
}

impl FixtureLine {
    pub fn new(options: Vec<String>, public_key: String) -> Self {
        FixtureLine {
            options,
            public_key,
        }
    }

    /// the comma joined options, empty when there are none.
    pub fn options_prefix(&self) -> String {
        self.options.join(",")
    }

    /// the options as name and value pairs.
    pub fn key_options(&self) -> Vec<KeyOption> {
        self.options.iter().map(|o| split_directive(o)).collect()
    }

    /// decode the key material of this line.
    pub fn key(&self) -> Result<PublicKey> {
        PublicKey::parse(&self.public_key)
    }

    /// split a line into its options and key text.
    ///
    /// the first field is taken as options unless it looks like a keytype.
    /// commas and whitespace inside double quotes do not split, so
    /// `command="a, b"` stays one directive.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let first = first_field(line);
        if first.is_empty() {
            return Err(FixtureError::InvalidFormat);
        }
        if is_keytype(first) {
            return Ok(FixtureLine::new(vec![], line.to_string()));
        }

        let options = split_options(first)?;
        let public_key = line[first.len()..].trim_start_matches([' ', '\t']);
        if public_key.trim().is_empty() {
            return Err(FixtureError::InvalidFormat);
        }
        Ok(FixtureLine::new(options, public_key.to_string()))
    }

    /// parse every line of a fixtures file. blank lines and `#` comments are
    /// skipped.
    pub fn parse_all(text: &str) -> Result<Vec<Self>> {
        text.split_inclusive('\n')
            .filter(|l| {
                let l = l.trim_start();
                !l.is_empty() && !l.starts_with('#')
            })
            .map(FixtureLine::parse)
            .collect()
    }
}

impl fmt::Display for FixtureLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.options.is_empty() {
            f.write_str(&self.public_key)
        } else {
            write!(f, "{} {}", self.options_prefix(), self.public_key)
        }
    }
}

fn is_keytype(field: &str) -> bool {
    field.starts_with("ssh-") || field.starts_with("ecdsa-") || field.starts_with("sk-")
}

// the leading run of the line up to the first whitespace outside quotes.
fn first_field(line: &str) -> &str {
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_directive(directive: &str) -> KeyOption {
    match directive.split_once('=') {
        None => (directive.to_string(), None),
        Some((name, value)) => {
            let value = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                Some(quoted) => quoted.replace("\\\"", "\""),
                None => value.to_string(),
            };
            (name.to_string(), Some(value))
        }
    }
}

fn split_options(field: &str) -> Result<Vec<String>> {
    let mut options = vec![];
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;
    for c in field.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                if current.is_empty() {
                    return Err(FixtureError::InvalidFormat);
                }
                options.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if quoted || current.is_empty() {
        return Err(FixtureError::InvalidFormat);
    }
    options.push(current);
    Ok(options)
}
