use std::io::{self, Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::{error::FsError, metadata::Metadata};

/// An open handle: stat-able, byte-readable, closable
///
/// Implemented by both [`RepoFile`] and [`RepoDir`](crate::RepoDir); only the
/// file also implements [`Seek`] and [`ReadAt`], only the directory
/// implements [`ReadDirFile`](crate::ReadDirFile).
pub trait File: Read + Send {
    /// Metadata captured when the handle was opened
    fn stat(&self) -> &Metadata;

    /// Handles hold no external resource; closing always succeeds and may repeat.
    fn close(&mut self) -> Result<(), FsError> {
        Ok(())
    }
}

/// Positional reads that leave the handle's cursor alone
pub trait ReadAt {
    /// Copy bytes starting at `offset` into `buf`
    ///
    /// `offset` may equal the data length. A count shorter than `buf.len()`
    /// means the data ended; it is not an error. An offset past the end fails
    /// with `InvalidInput`.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

/// A file of the repository, fully fetched and decoded
#[derive(Debug, Clone)]
pub struct RepoFile {
    meta: Metadata,
    data: Bytes,
    offset: u64,
}

impl RepoFile {
    pub fn new(meta: Metadata, data: Bytes) -> Self {
        Self {
            meta,
            data,
            offset: 0,
        }
    }

    /// Current read position
    pub fn position(&self) -> u64 {
        self.offset
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn invalid(&self, op: &'static str) -> io::Error {
        FsError::invalid(op, self.meta.name()).into()
    }
}

impl Read for RepoFile {
    /// Returns `Ok(0)` once the cursor reaches the end.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(rest) = usize::try_from(self.offset)
            .ok()
            .and_then(|start| self.data.get(start..))
        else {
            return Ok(0);
        };
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.offset += n as u64;
        Ok(n)
    }
}

impl Seek for RepoFile {
    /// The target must land in `0..=len`; otherwise the cursor is unchanged.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => i128::from(self.offset) + i128::from(delta),
            SeekFrom::End(delta) => i128::from(self.len()) + i128::from(delta),
        };
        if target < 0 || target > i128::from(self.len()) {
            return Err(self.invalid("seek"));
        }
        self.offset = target as u64;
        Ok(self.offset)
    }
}

impl ReadAt for RepoFile {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let rest = usize::try_from(offset)
            .ok()
            .and_then(|start| self.data.get(start..))
            .ok_or_else(|| self.invalid("read"))?;
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        Ok(n)
    }
}

impl File for RepoFile {
    fn stat(&self) -> &Metadata {
        &self.meta
    }
}
