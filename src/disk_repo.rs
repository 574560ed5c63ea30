// Filesystem capacity via statvfs

use crate::models::DiskUsage;
use std::path::PathBuf;
use tracing::instrument;

pub struct DiskRepo {
    path: PathBuf,
}

impl DiskRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Capacity counters of the filesystem holding `path`. Runs the syscall on the blocking pool.
    #[instrument(skip(self), fields(repo = "disk", operation = "get_disk_usage"))]
    pub async fn get_disk_usage(&self) -> anyhow::Result<DiskUsage> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let stat = nix::sys::statvfs::statvfs(path.as_path())
                .map_err(|e| anyhow::anyhow!("statvfs {}: {}", path.display(), e))?;
            // f_blocks and f_bfree are counted in fragment-size units
            Ok(DiskUsage::from_blocks(
                stat.blocks() as u64,
                stat.blocks_free() as u64,
                stat.fragment_size() as u64,
            ))
        })
        .await
        .map_err(|e| anyhow::anyhow!("statvfs task join: {}", e))?
    }
}
