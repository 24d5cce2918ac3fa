pub mod config;
pub mod dir;
pub mod error;
pub mod file;
pub mod fs;
pub mod github;
pub mod metadata;
pub mod path;
pub mod resolver;
pub mod source;
pub mod types;

pub use config::GitHubConfig;
pub use dir::{ReadDirFile, RepoDir};
pub use error::{ContentError, FsError, Result};
pub use file::{File, ReadAt, RepoFile};
pub use fs::{Handle, RepoFs};
pub use github::GitHubSource;
pub use metadata::{FileMode, FileType, Metadata};
pub use resolver::ContentResolver;
pub use source::ContentsApi;
pub use types::{Contents, EntryKind, RemoteEntry};
