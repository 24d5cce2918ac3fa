use std::fmt;
use std::time::SystemTime;

use crate::types::{EntryKind, RemoteEntry};

/// Permission and type bits of an entry
///
/// The low nine bits are the usual `rwxrwxrwx` permissions; [`FileMode::DIR`]
/// marks a directory. A mode of zero means the kind is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIR: u32 = 1 << 31;
    pub const PERM: u32 = 0o777;

    /// `dr-xr-xr-x`
    pub const READ_ONLY_DIR: FileMode = FileMode(Self::DIR | 0o555);
    /// `-r--r--r--`
    pub const READ_ONLY_FILE: FileMode = FileMode(0o444);
    pub const UNKNOWN: FileMode = FileMode(0);

    pub const fn perm(self) -> u32 {
        self.0 & Self::PERM
    }

    pub const fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    pub fn file_type(self) -> FileType {
        if self.is_dir() {
            FileType::Dir
        } else if self.0 == 0 {
            FileType::Unknown
        } else {
            FileType::Regular
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(10);
        out.push(if self.is_dir() { 'd' } else { '-' });
        for shift in [6, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Dir,
    Regular,
    Unknown,
}

/// File information for one entry of the repository
///
/// Wraps either an entry returned by the backend or, for an opened directory,
/// a synthetic record holding only the directory name. Serves both as the
/// result of `stat` and as a directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    inner: Inner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inner {
    Remote(RemoteEntry),
    Dir { name: String },
}

impl Metadata {
    pub fn from_entry(entry: RemoteEntry) -> Self {
        Self {
            inner: Inner::Remote(entry),
        }
    }

    pub fn synthetic_dir(name: impl Into<String>) -> Self {
        Self {
            inner: Inner::Dir { name: name.into() },
        }
    }

    pub fn name(&self) -> &str {
        match &self.inner {
            Inner::Remote(entry) => &entry.name,
            Inner::Dir { name } => name,
        }
    }

    /// Size in bytes; always 0 for directories, whatever the backend reported
    pub fn size(&self) -> u64 {
        match &self.inner {
            Inner::Remote(entry) if entry.entry_kind() != EntryKind::Dir => entry.size,
            _ => 0,
        }
    }

    /// Read-only mode derived from the entry kind
    ///
    /// Kinds other than `file` and `dir` (symlinks, submodules, anything new)
    /// get [`FileMode::UNKNOWN`] instead of an error.
    pub fn mode(&self) -> FileMode {
        match &self.inner {
            Inner::Remote(entry) => match entry.entry_kind() {
                EntryKind::Dir => FileMode::READ_ONLY_DIR,
                EntryKind::File => FileMode::READ_ONLY_FILE,
                EntryKind::Other => FileMode::UNKNOWN,
            },
            Inner::Dir { .. } => FileMode::READ_ONLY_DIR,
        }
    }

    pub fn file_type(&self) -> FileType {
        self.mode().file_type()
    }

    pub fn is_dir(&self) -> bool {
        match &self.inner {
            Inner::Remote(entry) => entry.entry_kind() == EntryKind::Dir,
            Inner::Dir { .. } => true,
        }
    }

    /// The contents API carries no per-entry timestamps.
    pub fn modified(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    /// The backend entry this metadata wraps, if any.
    pub fn sys(&self) -> Option<&RemoteEntry> {
        match &self.inner {
            Inner::Remote(entry) => Some(entry),
            Inner::Dir { .. } => None,
        }
    }

    /// File information for a directory entry. Never re-fetches.
    pub fn info(&self) -> Metadata {
        self.clone()
    }
}
