//! Central directory reader.
//!
//! Only the tail of the package is touched: the End of Central Directory
//! record (plus its ZIP64 counterpart when present) and the central
//! directory itself. Entry data is never decompressed.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::debug;

use super::structures::*;
use crate::io::{ReadAt, read_exact_at};

/// Maximum ZIP comment size allowed by the format.
const MAX_COMMENT_SIZE: u64 = 65535;

/// An opened package whose central directory has been read.
///
/// Construction is the "ready" point: once [`ArchiveReader::open`] returns,
/// every entry is enumerable. Call [`ArchiveReader::close`] when done.
pub struct ArchiveReader<R: ReadAt> {
    reader: Arc<R>,
    entries: Vec<ArchiveEntry>,
}

impl<R: ReadAt> ArchiveReader<R> {
    /// Read the central directory of `reader`.
    ///
    /// # Errors
    ///
    /// Fails if the source is not a zip archive, or if the directory is
    /// truncated or points outside the file.
    pub async fn open(reader: Arc<R>) -> Result<Self> {
        let size = reader.size();
        let (eocd, eocd_offset) = locate_eocd(reader.as_ref(), size).await?;

        let location = if eocd.needs_zip64() {
            read_zip64_location(reader.as_ref(), &eocd, eocd_offset).await?
        } else {
            eocd.location()
        };
        debug!(
            "central directory: {} entries, {} bytes at offset {}",
            location.entries, location.size, location.offset
        );

        let end = location
            .offset
            .checked_add(location.size)
            .context("central directory size overflows")?;
        if end > size {
            bail!(
                "central directory ends at {} but the archive is only {} bytes",
                end,
                size
            );
        }

        let mut directory = vec![0u8; location.size as usize];
        read_exact_at(reader.as_ref(), location.offset, &mut directory).await?;

        // Each header takes at least 46 bytes, which bounds the preallocation.
        let capacity = location
            .entries
            .min(location.size / CentralHeader::MIN_SIZE as u64);
        let mut entries = Vec::with_capacity(capacity as usize);
        let mut cursor = Cursor::new(directory.as_slice());
        for index in 0..location.entries {
            let entry = CentralHeader::read_entry(&mut cursor)
                .with_context(|| format!("reading central directory entry {index}"))?;
            entries.push(entry);
        }

        Ok(Self { reader, entries })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in central directory order, which carries no guarantees.
    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    /// Release the underlying source.
    pub fn close(self) -> Vec<ArchiveEntry> {
        drop(self.reader);
        self.entries
    }
}

/// Find the EOCD record, trying the comment-less position first.
async fn locate_eocd<R: ReadAt + ?Sized>(reader: &R, size: u64) -> Result<(EndOfCentralDirectory, u64)> {
    let record = EndOfCentralDirectory::SIZE as u64;
    if size < record {
        bail!("not a zip archive: {} bytes is too short", size);
    }

    let mut tail = [0u8; EndOfCentralDirectory::SIZE];
    read_exact_at(reader, size - record, &mut tail).await?;
    if &tail[0..4] == EndOfCentralDirectory::SIGNATURE && tail[20..22] == [0, 0] {
        return Ok((EndOfCentralDirectory::parse(&tail)?, size - record));
    }

    let window = (MAX_COMMENT_SIZE + record).min(size);
    let window_start = size - window;
    let mut buf = vec![0u8; window as usize];
    read_exact_at(reader, window_start, &mut buf).await?;

    let last = buf.len() - EndOfCentralDirectory::SIZE;
    for at in (0..=last).rev() {
        if &buf[at..at + 4] != EndOfCentralDirectory::SIGNATURE {
            continue;
        }
        let eocd = EndOfCentralDirectory::parse(&buf[at..])?;
        // The comment must run exactly to the end of the file.
        if eocd.comment_len as usize == buf.len() - at - EndOfCentralDirectory::SIZE {
            return Ok((eocd, window_start + at as u64));
        }
    }

    bail!("not a zip archive: end of central directory not found")
}

/// Directory location from the ZIP64 record. Saturated classic fields with no
/// locator in front of the EOCD are taken at face value.
async fn read_zip64_location<R: ReadAt + ?Sized>(
    reader: &R,
    eocd: &EndOfCentralDirectory,
    eocd_offset: u64,
) -> Result<DirectoryLocation> {
    let Some(locator_offset) = eocd_offset.checked_sub(Zip64Locator::SIZE as u64) else {
        debug!("no room for a ZIP64 locator, using classic directory fields");
        return Ok(eocd.location());
    };
    let mut locator = [0u8; Zip64Locator::SIZE];
    read_exact_at(reader, locator_offset, &mut locator).await?;
    let Some(record_offset) = Zip64Locator::record_offset(&locator) else {
        debug!("no ZIP64 locator before the EOCD, using classic directory fields");
        return Ok(eocd.location());
    };

    let mut record = [0u8; Zip64Record::MIN_SIZE];
    read_exact_at(reader, record_offset, &mut record).await?;
    Zip64Record::location(&record)
}
