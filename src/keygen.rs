//! Key pair generation through an external tool.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::trace;

use crate::catalog::KeyType;
use crate::errors::*;

/// Parameters for a single key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRequest {
    pub key_type: KeyType,
    pub bits: u32,
    pub comment: String,
}

/// Something that writes a key pair to disk: the private key at `path` and
/// the public key at `path` + `.pub`.
pub trait KeyGenerator {
    fn generate(&mut self, request: &KeyRequest, path: &Path) -> Result<()>;
}

/// Runs `ssh-keygen` with an unencrypted key and no prompts.
#[derive(Clone, Debug)]
pub struct SshKeygen {
    program: OsString,
}

impl Default for SshKeygen {
    fn default() -> Self {
        SshKeygen::new("ssh-keygen")
    }
}

impl SshKeygen {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        SshKeygen {
            program: program.as_ref().to_os_string(),
        }
    }

    /// argument vector for one invocation. every value is its own argument,
    /// so the comment reaches `ssh-keygen` untouched whatever it contains.
    pub fn args(request: &KeyRequest, path: &Path) -> Vec<OsString> {
        vec![
            "-q".into(),
            "-t".into(),
            request.key_type.name().into(),
            "-b".into(),
            request.bits.to_string().into(),
            "-f".into(),
            path.as_os_str().to_os_string(),
            "-C".into(),
            request.comment.as_str().into(),
            "-N".into(),
            "".into(),
        ]
    }
}

impl KeyGenerator for SshKeygen {
    fn generate(&mut self, request: &KeyRequest, path: &Path) -> Result<()> {
        let args = Self::args(request, path);
        trace!(program = ?self.program, ?args, "running key generator");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| FixtureError::KeygenSpawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(FixtureError::KeygenFailed {
                program: self.program.to_string_lossy().into_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
