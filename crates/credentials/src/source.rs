use crate::{CredentialsError, Mnemonic};
use std::{
    env::VarError,
    fmt, io,
    path::{Path, PathBuf},
};
use tracing::debug;
use zeroize::Zeroizing;

/// Secret file read when nothing else is configured.
pub const DEFAULT_SECRET_FILE: &str = ".secret";

/// Where the deployer mnemonic is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Plaintext file holding the phrase
    File(PathBuf),
    /// Environment variable holding the phrase
    Env(String),
}

impl SecretSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn env(var: impl Into<String>) -> Self {
        Self::Env(var.into())
    }

    /// Read the mnemonic from this source.
    pub fn load(&self) -> Result<Mnemonic, CredentialsError> {
        match self {
            Self::File(path) => read_file(path),
            Self::Env(var) => read_env(var),
        }
    }
}

impl Default for SecretSource {
    fn default() -> Self {
        Self::file(DEFAULT_SECRET_FILE)
    }
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Env(var) => write!(f, "env {var}"),
        }
    }
}

/// Try each source in order and return the first mnemonic found.
///
/// Absent sources fall through to the next one. A source that exists but is
/// unreadable or empty stops the chain with its own error.
pub fn load_first(sources: &[SecretSource]) -> Result<Mnemonic, CredentialsError> {
    for source in sources {
        match source.load() {
            Ok(mnemonic) => {
                debug!(%source, words = mnemonic.word_count(), "Loaded mnemonic");
                return Ok(mnemonic);
            }
            Err(e) if e.is_absent() => {
                debug!(%source, "Secret source not present");
            }
            Err(e) => return Err(e),
        }
    }

    let tried = sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(CredentialsError::NoSource(tried))
}

fn read_file(path: &Path) -> Result<Mnemonic, CredentialsError> {
    let contents = std::fs::read_to_string(path)
        .map(Zeroizing::new)
        .map_err(|e| io_error(path, e))?;

    Mnemonic::new(contents.as_str())
        .ok_or_else(|| CredentialsError::Empty(format!("secret file {}", path.display())))
}

fn read_env(var: &str) -> Result<Mnemonic, CredentialsError> {
    let value = std::env::var(var)
        .map(Zeroizing::new)
        .map_err(|e| match e {
            VarError::NotPresent => CredentialsError::EnvNotSet(var.to_string()),
            VarError::NotUnicode(_) => CredentialsError::EnvNotUnicode(var.to_string()),
        })?;

    Mnemonic::new(value.as_str())
        .ok_or_else(|| CredentialsError::Empty(format!("environment variable {var}")))
}

fn io_error(path: &Path, error: io::Error) -> CredentialsError {
    let path = path.to_path_buf();
    match error.kind() {
        io::ErrorKind::NotFound => CredentialsError::NotFound { path },
        io::ErrorKind::PermissionDenied => CredentialsError::PermissionDenied { path },
        _ => CredentialsError::Unreadable {
            path,
            source: error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const PHRASE: &str = "test test test test test test test test test test test junk";

    fn secret_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = secret_file(&format!("{PHRASE}\n"));

        let mnemonic = SecretSource::file(file.path()).load().unwrap();
        assert_eq!(mnemonic.phrase(), PHRASE);
        assert_eq!(mnemonic.word_count(), 12);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SecretSource::file(dir.path().join(".secret"))
            .load()
            .unwrap_err();

        assert!(matches!(err, CredentialsError::NotFound { .. }));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("missing credentials"));
    }

    #[test]
    fn test_empty_file() {
        let file = secret_file("   \n");
        let err = SecretSource::file(file.path()).load().unwrap_err();

        assert!(matches!(err, CredentialsError::Empty(_)));
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = SecretSource::file(dir.path()).load().unwrap_err();
        assert!(matches!(err, CredentialsError::Unreadable { .. }));
        assert!(!err.is_absent());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unreadable_keeps_io_kind() {
        let dir = TempDir::new().unwrap();
        let err = SecretSource::file(dir.path()).load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::IsADirectory);
    }

    #[test]
    fn test_permission_denied_maps_kind() {
        let err = io_error(
            Path::new(".secret"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, CredentialsError::PermissionDenied { .. }));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_load_from_env() {
        let var = "CREDENTIALS_TEST_LOAD_FROM_ENV";
        std::env::set_var(var, format!("  {PHRASE}  "));

        let mnemonic = SecretSource::env(var).load().unwrap();
        assert_eq!(mnemonic.phrase(), PHRASE);

        std::env::remove_var(var);
        assert!(matches!(
            SecretSource::env(var).load(),
            Err(CredentialsError::EnvNotSet(_))
        ));
    }

    #[test]
    fn test_env_takes_precedence() {
        let var = "CREDENTIALS_TEST_ENV_PRECEDENCE";
        let file = secret_file("file words only");
        let sources = [SecretSource::env(var), SecretSource::file(file.path())];

        std::env::remove_var(var);
        assert_eq!(load_first(&sources).unwrap().phrase(), "file words only");

        std::env::set_var(var, PHRASE);
        assert_eq!(load_first(&sources).unwrap().phrase(), PHRASE);
        std::env::remove_var(var);
    }

    #[test]
    fn test_chain_stops_on_empty_source() {
        let var = "CREDENTIALS_TEST_CHAIN_EMPTY";
        std::env::set_var(var, " ");
        let file = secret_file(PHRASE);

        let err = load_first(&[SecretSource::env(var), SecretSource::file(file.path())])
            .unwrap_err();
        assert!(matches!(err, CredentialsError::Empty(_)));
        std::env::remove_var(var);
    }

    #[cfg(unix)]
    #[test]
    fn test_chain_stops_on_non_unicode_env() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let var = "CREDENTIALS_TEST_CHAIN_NON_UNICODE";
        std::env::set_var(var, OsStr::from_bytes(b"abc\xff def"));
        let file = secret_file("file words");

        let err = load_first(&[SecretSource::env(var), SecretSource::file(file.path())])
            .unwrap_err();
        assert!(matches!(err, CredentialsError::EnvNotUnicode(_)));
        assert!(!err.is_absent());
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        std::env::remove_var(var);
    }

    #[test]
    fn test_chain_exhausted() {
        let dir = TempDir::new().unwrap();
        let sources = [
            SecretSource::env("CREDENTIALS_TEST_CHAIN_UNSET"),
            SecretSource::file(dir.path().join(".secret")),
        ];

        let err = load_first(&sources).unwrap_err();
        assert!(matches!(err, CredentialsError::NoSource(_)));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("env CREDENTIALS_TEST_CHAIN_UNSET"));
    }
}
