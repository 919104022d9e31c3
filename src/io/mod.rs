mod local;

pub use local::LocalFileReader;

use anyhow::{Result, bail};
use async_trait::async_trait;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer.
    ///
    /// Returns fewer bytes than requested only at end of input.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Fill `buf` completely from `offset`, failing on a short read.
pub async fn read_exact_at<R: ReadAt + ?Sized>(reader: &R, offset: u64, buf: &mut [u8]) -> Result<()> {
    let n = reader.read_at(offset, buf).await?;
    if n < buf.len() {
        bail!(
            "unexpected end of archive: wanted {} bytes at offset {}, got {}",
            buf.len(),
            offset,
            n
        );
    }
    Ok(())
}
