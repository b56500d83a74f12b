//! Bearer token storage.
//!
//! The store holds at most one token. "No token" is a normal state, the
//! anonymous one, not an error. Storage is treated as always available:
//! if the backing file is missing, unreadable, or garbage, `get()` just
//! says there is no token, and a failed write is logged and forgotten.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// File name used when no other key is configured.
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// An opaque bearer token.
///
/// The inner string is private so it can only be read on purpose, via
/// [`expose`](Self::expose). `Debug` and `Display` print a redacted form,
/// which keeps tokens out of `tracing` output even when a whole struct is
/// logged with `?`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token. Surrounding whitespace is trimmed; a blank
    /// string is not a credential and yields `None`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() == raw.len() {
            Some(Self(raw))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw token, for putting on the wire or on disk.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Holds the current bearer token.
///
/// # Trait bounds
///
/// - `Send + Sync` so one store can be shared (behind an `Arc`) by the
///   HTTP client, which reads it, and the session controller, which
///   writes it.
/// - `'static` because it lives as long as the client does.
///
/// Methods never fail; see the module docs for how I/O errors are handled.
pub trait CredentialStore: Send + Sync + 'static {
    /// The persisted token, or `None` when anonymous.
    fn get(&self) -> Option<Credential>;

    /// Persists `credential`, replacing any previous one.
    fn set(&self, credential: &Credential);

    /// Removes any persisted token. A no-op when nothing is stored.
    fn clear(&self);
}

// ---------------------------------------------------------------------------
// FileCredentialStore
// ---------------------------------------------------------------------------

/// Stores the token as the entire contents of one file.
///
/// The file lives at `<dir>/<key>`. Its presence means "logged in on next
/// start"; its absence means anonymous.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// A store whose file is `dir/key`.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(key),
        }
    }

    /// A store whose file is `dir/token`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, DEFAULT_CREDENTIAL_KEY)
    }

    /// Where the token is (or would be) written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Option<Credential>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8(bytes).ok().and_then(Credential::new)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes to a sibling temp file and renames it into place, so a
    /// crash mid-write never leaves a half-written token behind.
    fn write(&self, credential: &Credential) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, credential.expose())?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Tokens are secrets; keep the file owner-only where the platform lets us.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "could not read stored credential, treating as anonymous"
            );
            None
        })
    }

    fn set(&self, credential: &Credential) {
        match self.write(credential) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential stored");
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not persist credential"
                );
            }
        }
    }

    fn clear(&self) {
        match self.remove() {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential cleared");
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not remove stored credential"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryCredentialStore
// ---------------------------------------------------------------------------

/// A process-local store. Same contract as [`FileCredentialStore`] minus
/// durability: used in tests and by embedders that persist tokens
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `credential`, as if it had been
    /// persisted by a previous run.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            token: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        // A panic while holding this lock can't leave the Option half
        // written, so a poisoned lock is still safe to read.
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, credential: &Credential) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(credential.clone());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
