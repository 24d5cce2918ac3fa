/// Print a file, or list a directory, of a GitHub repository
///
/// Usage: cargo run --example cat -- <owner> <repo> [path]
///
/// Reads GITHUB_TOKEN, REPO_FS_REF and REPO_FS_API_URL from the environment.
/// Set RUST_LOG=repo_fs=debug to see each contents request.

use repo_fs::{File, GitHubConfig, Handle, ReadDirFile, RepoFs};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(owner), Some(repo)) = (args.next(), args.next()) else {
        eprintln!("usage: cat <owner> <repo> [path]");
        std::process::exit(2);
    };
    let path = args.next().unwrap_or_default();

    let fs = RepoFs::github(GitHubConfig::from_env(), owner, repo)?;

    match fs.open(&path).await? {
        Handle::File(mut file) => {
            io::copy(&mut file, &mut io::stdout().lock())?;
            file.close()?;
        }
        Handle::Dir(mut dir) => {
            let mut out = io::stdout().lock();
            // Page through the listing the way a generic walker would
            loop {
                match dir.read_dir(16) {
                    Ok(entries) => {
                        for entry in entries {
                            writeln!(out, "{} {:>8} {}", entry.mode(), entry.size(), entry.name())?;
                        }
                    }
                    Err(e) if e.is_eof() => break,
                    Err(e) => return Err(e.into()),
                }
            }
            dir.close()?;
        }
    }

    Ok(())
}
