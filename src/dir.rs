use std::io::{self, Read};

use crate::{error::FsError, file::File, metadata::Metadata};

/// Chunked enumeration of a directory handle
pub trait ReadDirFile: File {
    /// Return the next entries of the directory
    ///
    /// With `count > 0`, at most `count` entries are returned and an exhausted
    /// directory yields `Err(FsError::Eof)`. With `count == 0`, every remaining
    /// entry is returned in one call, and an exhausted directory yields an
    /// empty list.
    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError>;
}

/// A directory of the repository, listed once at open time
///
/// Entries keep the order the backend returned them in.
#[derive(Debug, Clone)]
pub struct RepoDir {
    meta: Metadata,
    entries: Vec<Metadata>,
    cursor: usize,
}

impl RepoDir {
    pub fn new(meta: Metadata, entries: Vec<Metadata>) -> Self {
        Self {
            meta,
            entries,
            cursor: 0,
        }
    }

    /// Entries not yet returned by [`ReadDirFile::read_dir`]
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }
}

impl Read for RepoDir {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(FsError::IsADirectory {
            op: "read",
            path: self.meta.name().to_string(),
        }
        .into())
    }
}

impl File for RepoDir {
    fn stat(&self) -> &Metadata {
        &self.meta
    }
}

impl ReadDirFile for RepoDir {
    fn read_dir(&mut self, count: usize) -> Result<Vec<Metadata>, FsError> {
        let mut n = self.remaining();
        if count > 0 && n > count {
            n = count;
        }
        if n == 0 {
            return if count == 0 { Ok(Vec::new()) } else { Err(FsError::Eof) };
        }

        let list = self.entries[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(list)
    }
}
