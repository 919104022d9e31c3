//! Listing the contents of a zip package.
//!
//! A VSIX file is an ordinary zip archive. Listing it needs nothing but the
//! central directory, so this module reads the archive from its end:
//!
//! 1. Find the End of Central Directory (EOCD) record
//! 2. If any field is saturated, follow the ZIP64 locator to the ZIP64 EOCD
//! 3. Read the whole central directory in one request and decode every header
//!
//! - [`structures`]: on-disk records and the [`ArchiveEntry`] they decode to
//! - [`parser`]: the [`ArchiveReader`] that drives the steps above
//!
//! Integrity is not verified: CRCs, local headers and entry data are ignored.

mod parser;
mod structures;

pub use parser::ArchiveReader;
pub use structures::ArchiveEntry;
