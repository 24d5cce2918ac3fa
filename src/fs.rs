use std::io::{self, Read};
use std::sync::Arc;

use bytes::Bytes;

use crate::{
    config::GitHubConfig,
    dir::{ReadDirFile, RepoDir},
    error::{ContentError, FsError},
    file::{File, RepoFile},
    github::GitHubSource,
    metadata::Metadata,
    path,
    resolver::ContentResolver,
    source::ContentsApi,
    types::{Contents, RemoteEntry},
};

/// Read-only filesystem over one remote repository
///
/// Every call validates the path, performs exactly one backend lookup and
/// builds fresh handles from the result. Nothing is cached and no state is
/// shared between calls, so a `RepoFs` can be used from many tasks at once.
#[derive(Clone)]
pub struct RepoFs {
    resolver: ContentResolver,
}

/// An opened path: either a file or a directory
#[derive(Debug)]
pub enum Handle {
    File(RepoFile),
    Dir(RepoDir),
}

impl RepoFs {
    pub fn new(api: Arc<dyn ContentsApi>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            resolver: ContentResolver::new(api, owner, repo),
        }
    }

    /// Filesystem over `owner/repo` on GitHub
    pub fn github(
        config: GitHubConfig,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let source = GitHubSource::new(config)?;
        Ok(Self::new(Arc::new(source), owner, repo))
    }

    pub fn owner(&self) -> &str {
        self.resolver.owner()
    }

    pub fn repo(&self) -> &str {
        self.resolver.repo()
    }

    /// Open a file or directory
    ///
    /// `""` and `"."` open the repository root.
    pub async fn open(&self, name: &str) -> Result<Handle, FsError> {
        match self.resolve("open", name).await? {
            Contents::Listing(entries) => {
                let entries = entries.into_iter().map(Metadata::from_entry).collect();
                let meta = Metadata::synthetic_dir(path::base_name(name));
                Ok(Handle::Dir(RepoDir::new(meta, entries)))
            }
            Contents::File(entry) => {
                let (meta, data) = decode("open", name, entry)?;
                Ok(Handle::File(RepoFile::new(meta, data)))
            }
        }
    }

    /// Read a whole file
    ///
    /// A path that resolves to a directory fails with `NotExist`.
    pub async fn read_file(&self, name: &str) -> Result<Bytes, FsError> {
        match self.resolve("open", name).await? {
            Contents::File(entry) => Ok(decode("open", name, entry)?.1),
            Contents::Listing(_) => Err(FsError::not_exist("open", name)),
        }
    }

    /// List a directory, in backend order
    ///
    /// A path that resolves to a file fails with `NotExist`.
    pub async fn read_dir(&self, name: &str) -> Result<Vec<Metadata>, FsError> {
        match self.resolve("open", name).await? {
            Contents::Listing(entries) => Ok(entries.into_iter().map(Metadata::from_entry).collect()),
            Contents::File(_) => Err(FsError::not_exist("open", name)),
        }
    }

    async fn resolve(&self, op: &'static str, name: &str) -> Result<Contents, FsError> {
        let api_path = path::api_path(name).ok_or_else(|| FsError::invalid(op, name))?;
        self.resolver
            .resolve(api_path)
            .await
            .map_err(|e| FsError::upstream(op, name, e))
    }
}

/// Decode a file entry; the returned metadata no longer carries the encoded blob.
fn decode(op: &'static str, name: &str, mut entry: RemoteEntry) -> Result<(Metadata, Bytes), FsError> {
    let data = entry
        .decode_content()
        .map_err(|e| FsError::upstream(op, name, e))?;
    entry.content = None;
    Ok((Metadata::from_entry(entry), data))
}

impl Handle {
    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    pub fn into_file(self) -> Option<RepoFile> {
        match self {
            Handle::File(file) => Some(file),
            Handle::Dir(_) => None,
        }
    }

    pub fn into_dir(self) -> Option<RepoDir> {
        match self {
            Handle::Dir(dir) => Some(dir),
            Handle::File(_) => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut dyn ReadDirFile> {
        match self {
            Handle::Dir(dir) => Some(dir as &mut dyn ReadDirFile),
            Handle::File(_) => None,
        }
    }
}

impl Read for Handle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Handle::File(file) => file.read(buf),
            Handle::Dir(dir) => dir.read(buf),
        }
    }
}

impl File for Handle {
    fn stat(&self) -> &Metadata {
        match self {
            Handle::File(file) => file.stat(),
            Handle::Dir(dir) => dir.stat(),
        }
    }

    fn close(&mut self) -> Result<(), FsError> {
        match self {
            Handle::File(file) => file.close(),
            Handle::Dir(dir) => dir.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::{Seek, SeekFrom};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockApi {
        contents: HashMap<String, Contents>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentsApi for MockApi {
        async fn get_contents(
            &self,
            _owner: &str,
            _repo: &str,
            path: &str,
        ) -> crate::error::Result<Contents> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.contents
                .get(path)
                .cloned()
                .ok_or_else(|| ContentError::NotFound {
                    path: path.to_string(),
                })
        }

        fn identifier(&self) -> String {
            "mock".to_string()
        }
    }

    fn readme() -> Vec<u8> {
        (0..1024u32).map(|i| (i % 251) as u8).collect()
    }

    fn repo_fs() -> (RepoFs, Arc<MockApi>) {
        let mut contents = HashMap::new();
        contents.insert(
            "".to_string(),
            Contents::Listing(vec![
                RemoteEntry::file("README.md", "README.md", readme()),
                RemoteEntry::dir("src", "src"),
            ]),
        );
        contents.insert(
            "README.md".to_string(),
            Contents::File(RemoteEntry::file("README.md", "README.md", readme())),
        );
        let mut huge = RemoteEntry::file("huge.bin", "huge.bin", b"");
        huge.encoding = Some("none".to_string());
        contents.insert("huge.bin".to_string(), Contents::File(huge));

        let api = Arc::new(MockApi {
            contents,
            calls: AtomicUsize::new(0),
        });
        (RepoFs::new(api.clone(), "owner", "repo"), api)
    }

    #[tokio::test]
    async fn test_open_readme() {
        let (fs, _) = repo_fs();
        let mut file = fs.open("README.md").await.unwrap().into_file().unwrap();

        assert_eq!(file.stat().size(), 1024);
        assert!(file.stat().sys().unwrap().content.is_none());

        let mut buf = [0u8; 10];
        assert_eq!(file.read(&mut buf).unwrap(), 10);
        assert_eq!(file.position(), 10);
        assert_eq!(file.seek(SeekFrom::End(0)).unwrap(), 1024);
    }

    #[tokio::test]
    async fn test_open_root() {
        let (fs, api) = repo_fs();

        for root in ["", "."] {
            let mut handle = fs.open(root).await.unwrap();
            assert!(handle.is_dir());
            assert_eq!(handle.stat().name(), ".");

            let entries = handle.as_dir_mut().unwrap().read_dir(0).unwrap();
            let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
            assert_eq!(names, ["README.md", "src"]);
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalid_path_skips_backend() {
        let (fs, api) = repo_fs();

        for name in ["/README.md", "src/", "a//b", "../x", "src/./lib.rs"] {
            let err = fs.open(name).await.unwrap_err();
            assert!(matches!(err, FsError::Invalid { op: "open", .. }), "{name}");
            assert!(matches!(fs.read_file(name).await, Err(FsError::Invalid { .. })));
            assert!(matches!(fs.read_dir(name).await, Err(FsError::Invalid { .. })));
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_read_file_kind_mismatch() {
        let (fs, _) = repo_fs();

        assert_eq!(fs.read_file("README.md").await.unwrap(), Bytes::from(readme()));

        let err = fs.read_file("").await.unwrap_err();
        assert!(matches!(err, FsError::NotExist { .. }));

        let err = fs.read_dir("README.md").await.unwrap_err();
        assert!(matches!(err, FsError::NotExist { .. }));
    }

    #[tokio::test]
    async fn test_upstream_errors_wrapped() {
        let (fs, _) = repo_fs();

        let err = fs.open("missing.txt").await.unwrap_err();
        assert!(err.is_not_exist());
        assert!(matches!(
            err,
            FsError::Upstream {
                source: ContentError::NotFound { .. },
                ..
            }
        ));

        for result in [
            fs.open("huge.bin").await.map(|_| ()),
            fs.read_file("huge.bin").await.map(|_| ()),
        ] {
            assert!(matches!(
                result,
                Err(FsError::Upstream {
                    source: ContentError::UnsupportedEncoding { .. },
                    ..
                })
            ));
        }
    }

    #[tokio::test]
    async fn test_every_call_refetches() {
        let (fs, api) = repo_fs();

        fs.read_file("README.md").await.unwrap();
        fs.read_file("README.md").await.unwrap();
        fs.open("README.md").await.unwrap();
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_handle_read_dispatch() {
        let (fs, _) = repo_fs();

        let mut dir = fs.open("").await.unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(
            dir.read(&mut buf).unwrap_err().kind(),
            io::ErrorKind::IsADirectory
        );
        assert!(dir.close().is_ok());

        let mut file = fs.open("README.md").await.unwrap();
        assert_eq!(file.read(&mut buf).unwrap(), 4);
        assert!(file.as_dir_mut().is_none());
        assert!(file.into_dir().is_none());
    }
}
