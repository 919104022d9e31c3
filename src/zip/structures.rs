use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use anyhow::{Context, Result, bail};

/// Marker value a classic record stores when the real value lives in a ZIP64 field.
const U16_SENTINEL: u16 = 0xFFFF;
const U32_SENTINEL: u32 = 0xFFFF_FFFF;

/// ZIP64 extended information extra field id.
const ZIP64_EXTRA_ID: u16 = 0x0001;

/// Where the central directory lives and how many records it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryLocation {
    pub offset: u64,
    pub size: u64,
    pub entries: u64,
}

/// End of Central Directory record (22 bytes plus comment)
#[derive(Debug)]
pub struct EndOfCentralDirectory {
    pub entries_on_disk: u16,
    pub total_entries: u16,
    pub directory_size: u32,
    pub directory_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            bail!("malformed end of central directory record");
        }

        // Skip the two disk-number fields; multi-volume archives are not VSIX packages.
        let mut cursor = Cursor::new(&data[8..]);
        Ok(Self {
            entries_on_disk: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            directory_size: cursor.read_u32::<LittleEndian>()?,
            directory_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }

    /// True when any field is saturated and the ZIP64 record must be consulted.
    pub fn needs_zip64(&self) -> bool {
        self.entries_on_disk == U16_SENTINEL
            || self.total_entries == U16_SENTINEL
            || self.directory_size == U32_SENTINEL
            || self.directory_offset == U32_SENTINEL
    }

    pub fn location(&self) -> DirectoryLocation {
        DirectoryLocation {
            offset: self.directory_offset as u64,
            size: self.directory_size as u64,
            entries: self.total_entries as u64,
        }
    }
}

/// ZIP64 End of Central Directory Locator (20 bytes), stored right before the EOCD.
pub struct Zip64Locator;

impl Zip64Locator {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    pub const SIZE: usize = 20;

    /// Absolute offset of the ZIP64 EOCD record, or `None` when `data` is not a locator.
    pub fn record_offset(data: &[u8]) -> Option<u64> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }
        let mut cursor = Cursor::new(&data[8..16]);
        cursor.read_u64::<LittleEndian>().ok()
    }
}

/// ZIP64 End of Central Directory record (56 bytes minimum)
pub struct Zip64Record;

impl Zip64Record {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    pub const MIN_SIZE: usize = 56;

    pub fn location(data: &[u8]) -> Result<DirectoryLocation> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            bail!("malformed ZIP64 end of central directory record");
        }
        // signature(4) size(8) made-by(2) needed(2) disk(4) cd-disk(4) disk-entries(8)
        let mut cursor = Cursor::new(&data[32..]);
        let entries = cursor.read_u64::<LittleEndian>()?;
        let size = cursor.read_u64::<LittleEndian>()?;
        let offset = cursor.read_u64::<LittleEndian>()?;
        Ok(DirectoryLocation {
            offset,
            size,
            entries,
        })
    }
}

/// One record of the package manifest: a slash-separated path and a directory flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_directory: bool,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

/// Central Directory File Header (46 bytes plus variable fields)
pub struct CentralHeader;

impl CentralHeader {
    pub const SIGNATURE: &'static [u8] = b"PK\x01\x02";
    pub const MIN_SIZE: usize = 46;

    /// Decode the header at the cursor and leave the cursor on the next one.
    pub fn read_entry(cursor: &mut Cursor<&[u8]>) -> Result<ArchiveEntry> {
        let start = cursor.position();
        let mut fixed = [0u8; Self::MIN_SIZE];
        cursor
            .read_exact(&mut fixed)
            .with_context(|| format!("truncated central directory header at {start}"))?;
        if &fixed[0..4] != Self::SIGNATURE {
            bail!("bad central directory header signature at {start}");
        }

        let mut fields = Cursor::new(&fixed[20..]);
        let compressed = fields.read_u32::<LittleEndian>()?;
        let uncompressed = fields.read_u32::<LittleEndian>()?;
        let name_len = fields.read_u16::<LittleEndian>()? as usize;
        let extra_len = fields.read_u16::<LittleEndian>()? as usize;
        let comment_len = fields.read_u16::<LittleEndian>()? as u64;

        let mut name = vec![0u8; name_len];
        cursor
            .read_exact(&mut name)
            .context("truncated entry name in central directory")?;
        let name = String::from_utf8_lossy(&name).into_owned();

        let mut extra = vec![0u8; extra_len];
        cursor
            .read_exact(&mut extra)
            .context("truncated extra field in central directory")?;

        let mut compressed_size = compressed as u64;
        let mut uncompressed_size = uncompressed as u64;
        if compressed == U32_SENTINEL || uncompressed == U32_SENTINEL {
            widen_sizes(&extra, compressed, uncompressed, &mut compressed_size, &mut uncompressed_size)?;
        }

        cursor.set_position(cursor.position() + comment_len);

        Ok(ArchiveEntry {
            is_directory: name.ends_with('/'),
            name,
            compressed_size,
            uncompressed_size,
        })
    }
}

/// Replace saturated sizes with their ZIP64 values. The ZIP64 field lists the
/// uncompressed size first, then the compressed size, each only when saturated.
fn widen_sizes(
    extra: &[u8],
    compressed: u32,
    uncompressed: u32,
    compressed_size: &mut u64,
    uncompressed_size: &mut u64,
) -> Result<()> {
    let mut cursor = Cursor::new(extra);
    while (cursor.position() as usize) + 4 <= extra.len() {
        let id = cursor.read_u16::<LittleEndian>()?;
        let len = cursor.read_u16::<LittleEndian>()? as u64;
        let body_end = cursor.position() + len;
        if id == ZIP64_EXTRA_ID {
            if uncompressed == U32_SENTINEL && cursor.position() + 8 <= body_end {
                *uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed == U32_SENTINEL && cursor.position() + 8 <= body_end {
                *compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            return Ok(());
        }
        cursor.set_position(body_end);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, extra: &[u8], sizes: (u32, u32)) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(CentralHeader::SIGNATURE);
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(&sizes.0.to_le_bytes());
        out.extend_from_slice(&sizes.1.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        out.extend_from_slice(&[0u8; 14]);
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(extra);
        out
    }

    #[test]
    fn directory_flag_follows_trailing_slash() {
        let mut data = header("META-INF/", &[], (0, 0));
        data.extend(header("META-INF/manifest.json", &[], (10, 20)));
        let mut cursor = Cursor::new(data.as_slice());

        let dir = CentralHeader::read_entry(&mut cursor).unwrap();
        assert!(dir.is_directory);
        assert_eq!(dir.name, "META-INF/");

        let file = CentralHeader::read_entry(&mut cursor).unwrap();
        assert!(!file.is_directory);
        assert_eq!(file.compressed_size, 10);
        assert_eq!(file.uncompressed_size, 20);
    }

    #[test]
    fn zip64_extra_field_widens_sizes() {
        let mut extra = Vec::new();
        extra.extend_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
        extra.extend_from_slice(&16u16.to_le_bytes());
        extra.extend_from_slice(&(5u64 << 32).to_le_bytes());
        extra.extend_from_slice(&(3u64 << 32).to_le_bytes());
        let data = header("big.bin", &extra, (U32_SENTINEL, U32_SENTINEL));

        let entry = CentralHeader::read_entry(&mut Cursor::new(data.as_slice())).unwrap();
        assert_eq!(entry.uncompressed_size, 5u64 << 32);
        assert_eq!(entry.compressed_size, 3u64 << 32);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut data = header("a.txt", &[], (0, 0));
        data[2] = 0x09;
        assert!(CentralHeader::read_entry(&mut Cursor::new(data.as_slice())).is_err());
    }

    #[test]
    fn rejects_truncated_name() {
        let mut data = header("extension.vsixmanifest", &[], (0, 0));
        data.truncate(CentralHeader::MIN_SIZE + 4);
        assert!(CentralHeader::read_entry(&mut Cursor::new(data.as_slice())).is_err());
    }
}
