//! Platform-specific filesystem behavior
//!
//! Centralizes the quirks the resolver must not scatter through its logic:
//! the directory-as-file open tolerance of some platforms, Windows namespaced
//! paths, and the canonical cache-key form of a descriptor path.

use std::path::{Path, PathBuf};

/// Filesystem capabilities resolved once at startup.
///
/// On AIX, opening a directory through a file path succeeds and returns
/// readable garbage instead of failing with EISDIR (libuv#2025). The resolver
/// consults this flag instead of comparing platform strings inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether a raw file open can spuriously succeed on a directory
    pub tolerates_dir_open: bool,
}

impl Capabilities {
    /// Detect capabilities for the running platform
    pub fn detect() -> Self {
        Self {
            tolerates_dir_open: cfg!(target_os = "aix"),
        }
    }

    /// Capabilities of a platform without the directory-open quirk
    pub fn strict() -> Self {
        Self {
            tolerates_dir_open: false,
        }
    }

    /// Capabilities of a platform with the directory-open quirk
    pub fn tolerant() -> Self {
        Self {
            tolerates_dir_open: true,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Convert a path to the platform's namespaced form.
///
/// On Windows this applies the `\\?\` verbatim prefix so long paths and
/// reserved names read correctly; elsewhere the path passes through.
pub fn to_namespaced_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let raw = path.as_os_str().to_string_lossy();
        if raw.starts_with(r"\\?\") || raw.starts_with(r"\\.\") {
            return path.to_path_buf();
        }
        if let Some(unc) = raw.strip_prefix(r"\\") {
            return PathBuf::from(format!(r"\\?\UNC\{unc}"));
        }
        return PathBuf::from(format!(r"\\?\{raw}"));
    }
    #[cfg(not(windows))]
    {
        path.to_path_buf()
    }
}

/// Canonical cache-key form of a descriptor path.
///
/// Two spellings that the underlying filesystem treats as the same file must
/// produce the same key: the namespaced form, case-folded where the
/// filesystem is case-insensitive.
pub fn canonical_key(path: &Path) -> PathBuf {
    let namespaced = to_namespaced_path(path);
    #[cfg(windows)]
    {
        PathBuf::from(namespaced.to_string_lossy().to_lowercase())
    }
    #[cfg(not(windows))]
    {
        namespaced
    }
}

/// Build the canonical `file://` URL for a descriptor path.
///
/// Used as the lookup key into the integrity manifest. Only the characters
/// that would change the URL's structure are escaped.
pub fn to_file_url(path: &Path) -> String {
    let mut url = String::from("file://");
    for component in path.to_string_lossy().split(['/', '\\']) {
        if component.is_empty() {
            continue;
        }
        url.push('/');
        for byte in component.bytes() {
            match byte {
                b'%' | b'?' | b'#' | b' ' | 0x00..=0x1F | 0x80..=0xFF => {
                    url.push('%');
                    url.push_str(&format!("{byte:02X}"));
                }
                _ => url.push(byte as char),
            }
        }
    }
    url
}
