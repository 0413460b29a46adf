//! Decoding of the OpenSSH public keys embedded in fixture lines.
//!
//! only the key types a fixture run can produce are understood: rsa, ed25519
//! and the three nist ecdsa curves.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use md5::Md5;
use sha2::{Digest, Sha256};

use crate::errors::*;
use crate::reader::Reader;
use crate::writer::Writer;

const SSH_RSA: &str = "ssh-rsa";
const SSH_ED25519: &str = "ssh-ed25519";
const ECDSA_PREFIX: &str = "ecdsa-sha2-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Nistp256,
    Nistp384,
    Nistp521,
}

impl Curve {
    pub fn get_identifier(&self) -> &'static str {
        match *self {
            Curve::Nistp256 => "nistp256",
            Curve::Nistp384 => "nistp384",
            Curve::Nistp521 => "nistp521",
        }
    }

    pub fn bits(&self) -> usize {
        match *self {
            Curve::Nistp256 => 256,
            Curve::Nistp384 => 384,
            Curve::Nistp521 => 521,
        }
    }

    fn from_identifier(id: &str) -> Result<Curve> {
        match id {
            "nistp256" => Ok(Curve::Nistp256),
            "nistp384" => Ok(Curve::Nistp384),
            "nistp521" => Ok(Curve::Nistp521),
            _ => Err(FixtureError::UnsupportedCurve(id.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Data {
    Rsa { exponent: Vec<u8>, modulus: Vec<u8> },
    Ed25519 { key: Vec<u8> },
    Ecdsa { curve: Curve, key: Vec<u8> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub data: Data,
    pub comment: Option<String>,
}

impl PublicKey {
    /// parse a `<keytype> <base64> [comment]` line, as written to a `.pub`
    /// file by `ssh-keygen`. the declared keytype must match the one inside
    /// the encoded blob.
    pub fn parse(key: &str) -> Result<Self> {
        let mut parts = key.split_whitespace();
        let keytype = parts.next().ok_or(FixtureError::InvalidFormat)?;
        let blob = parts.next().ok_or(FixtureError::InvalidFormat)?;
        let comment = parts.collect::<Vec<_>>().join(" ");

        let buf = STANDARD.decode(blob)?;
        let mut reader = Reader::new(&buf);
        if reader.read_string()? != keytype {
            return Err(FixtureError::InvalidFormat);
        }

        let data = match keytype {
            SSH_RSA => {
                // the data for an rsa key consists of three pieces:
                //    ssh-rsa public-exponent modulus
                // see ssh-rsa format in https://tools.ietf.org/html/rfc4253#section-6.6
                let e = reader.read_mpint()?;
                let n = reader.read_mpint()?;
                Data::Rsa {
                    exponent: e.into(),
                    modulus: n.into(),
                }
            }
            SSH_ED25519 => {
                // the data for an ed25519 key consists of two pieces:
                //    ssh-ed25519 key
                // see https://tools.ietf.org/html/rfc8709#section-4
                let key = reader.read_bytes()?;
                Data::Ed25519 { key: key.into() }
            }
            _ if keytype.starts_with(ECDSA_PREFIX) => {
                // the data for an ecdsa key consists of three pieces:
                //    ecdsa-sha2-[identifier] [identifier] Q
                // see https://tools.ietf.org/html/rfc5656#section-3.1
                let identifier = reader.read_string()?;
                let curve = Curve::from_identifier(identifier)?;
                if keytype[ECDSA_PREFIX.len()..] != *identifier {
                    return Err(FixtureError::InvalidFormat);
                }
                let key = reader.read_bytes()?;
                Data::Ecdsa {
                    curve,
                    key: key.into(),
                }
            }
            _ => return Err(FixtureError::UnsupportedKeytype(keytype.into())),
        };

        if !reader.is_empty() {
            return Err(FixtureError::InvalidFormat);
        }

        Ok(PublicKey {
            data,
            comment: if comment.is_empty() {
                None
            } else {
                Some(comment)
            },
        })
    }

    pub fn keytype(&self) -> String {
        match self.data {
            Data::Rsa { .. } => SSH_RSA.to_string(),
            Data::Ed25519 { .. } => SSH_ED25519.to_string(),
            Data::Ecdsa { curve, .. } => format!("{}{}", ECDSA_PREFIX, curve.get_identifier()),
        }
    }

    /// size of the key in bits.
    pub fn size(&self) -> usize {
        match self.data {
            Data::Rsa { ref modulus, .. } => match modulus.iter().position(|b| *b != 0) {
                Some(i) => (modulus.len() - i) * 8 - modulus[i].leading_zeros() as usize,
                None => 0,
            },
            Data::Ed25519 { .. } => 256,
            Data::Ecdsa { curve, .. } => curve.bits(),
        }
    }

    /// the binary blob as it appears base64 encoded in the key line.
    pub fn data(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_string(&self.keytype());
        match self.data {
            Data::Rsa {
                ref exponent,
                ref modulus,
            } => {
                writer.write_mpint(exponent);
                writer.write_mpint(modulus);
            }
            Data::Ed25519 { ref key } => writer.write_bytes(key),
            Data::Ecdsa { curve, ref key } => {
                writer.write_string(curve.get_identifier());
                writer.write_bytes(key);
            }
        }
        writer.into_vec()
    }

    /// sha256 fingerprint, formatted like `ssh-keygen -l`.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.data());
        STANDARD_NO_PAD.encode(digest)
    }

    /// legacy md5 fingerprint as colon separated hex.
    pub fn fingerprint_md5(&self) -> String {
        let digest = Md5::digest(self.data());
        digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":")
    }

    pub fn to_fingerprint_string(&self) -> String {
        format!(
            "{} SHA256:{} {}",
            self.size(),
            self.fingerprint(),
            self.comment.as_deref().unwrap_or("no comment")
        )
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.keytype(), STANDARD.encode(self.data()))?;
        if let Some(ref comment) = self.comment {
            write!(f, " {}", comment)?;
        }
        Ok(())
    }
}
