use super::ReadAt;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Random-access reader over a package on the local filesystem.
///
/// Reads run on tokio's blocking pool so a scan never stalls a worker.
pub struct LocalFileReader {
    path: PathBuf,
    file: Arc<std::fs::File>,
    size: u64,
}

impl LocalFileReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        let size = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(file),
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let file = Arc::clone(&self.file);
        let len = buf.len();
        let data = tokio::task::spawn_blocking(move || {
            let mut data = vec![0u8; len];
            let n = read_full_at(&file, offset, &mut data)?;
            data.truncate(n);
            Ok::<_, std::io::Error>(data)
        })
        .await
        .context("blocking read task failed")??;

        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Positional read that keeps going until `buf` is full or the file ends.
fn read_full_at(file: &std::fs::File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = read_once_at(file, offset + filled as u64, &mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(unix)]
fn read_once_at(file: &std::fs::File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_once_at(file: &std::fs::File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(not(any(unix, windows)))]
fn read_once_at(file: &std::fs::File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};
    let mut file = file;
    file.seek(SeekFrom::Start(offset))?;
    file.read(buf)
}
