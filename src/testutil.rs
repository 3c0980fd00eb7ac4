//! Test fixtures: scratch directories and an in-memory archive writer.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Crc;
use flate2::Compression;
use flate2::write::DeflateEncoder;
use tempfile::TempDir;

use crate::zip::{
    CDFH_SIGNATURE, EndOfCentralDirectory, LFH_SIGNATURE, Zip64EOCD, Zip64EOCDLocator,
};

/// Scratch directory under the system temp dir, removed when dropped.
pub fn temp_dir(label: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("cmsfs-{}-", label))
        .tempdir()
        .unwrap()
}

// 2016-03-14 15:26:52
const DOS_DATE: u16 = ((2016 - 1980) << 9) | (3 << 5) | 14;
const DOS_TIME: u16 = (15 << 11) | (26 << 5) | 26;

/// One entry as it should appear in the archive headers.
pub struct RawEntry<'a> {
    pub method: u16,
    pub flags: u16,
    pub compressed: &'a [u8],
    /// Bytes the CRC-32 is computed over
    pub content: &'a [u8],
    /// Uncompressed size written to the headers
    pub declared_size: u64,
}

impl<'a> RawEntry<'a> {
    pub fn stored(content: &'a [u8]) -> Self {
        Self {
            method: 0,
            flags: 0,
            compressed: content,
            content,
            declared_size: content.len() as u64,
        }
    }
}

/// Writes small STORED/DEFLATE archives for tests.
#[derive(Default)]
pub struct ZipBuilder {
    data: Vec<u8>,
    central: Vec<u8>,
    entries: u16,
    comment: Vec<u8>,
    zip64: bool,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write ZIP64 extra fields for the entries added after this call,
    /// and a ZIP64 trailer.
    pub fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    pub fn stored(self, name: &str, content: &[u8]) -> Self {
        self.raw(name, RawEntry::stored(content))
    }

    pub fn deflated(self, name: &str, content: &[u8]) -> Self {
        let compressed = deflate(content);
        self.raw(
            name,
            RawEntry {
                method: 8,
                compressed: &compressed,
                ..RawEntry::stored(content)
            },
        )
    }

    pub fn directory(self, name: &str) -> Self {
        self.stored(name, b"")
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn raw(mut self, name: &str, entry: RawEntry<'_>) -> Self {
        let mut crc = Crc::new();
        crc.update(entry.content);
        let offset = self.data.len() as u64;
        let compressed_size = entry.compressed.len() as u64;

        let lfh = &mut self.data;
        lfh.write_all(LFH_SIGNATURE).unwrap();
        lfh.write_u16::<LittleEndian>(20).unwrap(); // version needed
        lfh.write_u16::<LittleEndian>(entry.flags).unwrap();
        lfh.write_u16::<LittleEndian>(entry.method).unwrap();
        lfh.write_u16::<LittleEndian>(DOS_TIME).unwrap();
        lfh.write_u16::<LittleEndian>(DOS_DATE).unwrap();
        lfh.write_u32::<LittleEndian>(crc.sum()).unwrap();
        lfh.write_u32::<LittleEndian>(compressed_size as u32).unwrap();
        lfh.write_u32::<LittleEndian>(entry.declared_size as u32).unwrap();
        lfh.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        lfh.write_u16::<LittleEndian>(0).unwrap(); // extra length
        lfh.write_all(name.as_bytes()).unwrap();
        lfh.write_all(entry.compressed).unwrap();

        // With ZIP64 the 32-bit fields saturate and the real values move to extra field 0x0001
        let (size32, csize32, offset32, extra_len) = if self.zip64 {
            (0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 28u16)
        } else {
            (
                entry.declared_size as u32,
                compressed_size as u32,
                offset as u32,
                0u16,
            )
        };

        let cd = &mut self.central;
        cd.write_all(CDFH_SIGNATURE).unwrap();
        cd.write_u16::<LittleEndian>(if self.zip64 { 45 } else { 20 }).unwrap(); // made by
        cd.write_u16::<LittleEndian>(if self.zip64 { 45 } else { 20 }).unwrap(); // needed
        cd.write_u16::<LittleEndian>(entry.flags).unwrap();
        cd.write_u16::<LittleEndian>(entry.method).unwrap();
        cd.write_u16::<LittleEndian>(DOS_TIME).unwrap();
        cd.write_u16::<LittleEndian>(DOS_DATE).unwrap();
        cd.write_u32::<LittleEndian>(crc.sum()).unwrap();
        cd.write_u32::<LittleEndian>(csize32).unwrap();
        cd.write_u32::<LittleEndian>(size32).unwrap();
        cd.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        cd.write_u16::<LittleEndian>(extra_len).unwrap();
        cd.write_u16::<LittleEndian>(0).unwrap(); // comment length
        cd.write_u16::<LittleEndian>(0).unwrap(); // disk number start
        cd.write_u16::<LittleEndian>(0).unwrap(); // internal attrs
        cd.write_u32::<LittleEndian>(0).unwrap(); // external attrs
        cd.write_u32::<LittleEndian>(offset32).unwrap();
        cd.write_all(name.as_bytes()).unwrap();
        if self.zip64 {
            cd.write_u16::<LittleEndian>(0x0001).unwrap();
            cd.write_u16::<LittleEndian>(24).unwrap();
            cd.write_u64::<LittleEndian>(entry.declared_size).unwrap();
            cd.write_u64::<LittleEndian>(compressed_size).unwrap();
            cd.write_u64::<LittleEndian>(offset).unwrap();
        }

        self.entries += 1;
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = self.data;
        let cd_offset = out.len() as u64;
        let cd_size = self.central.len() as u64;
        out.extend_from_slice(&self.central);

        if self.zip64 {
            let eocd64_offset = out.len() as u64;
            out.write_all(Zip64EOCD::SIGNATURE).unwrap();
            out.write_u64::<LittleEndian>(Zip64EOCD::MIN_SIZE as u64 - 12).unwrap();
            out.write_u16::<LittleEndian>(45).unwrap(); // version made by
            out.write_u16::<LittleEndian>(45).unwrap(); // version needed
            out.write_u32::<LittleEndian>(0).unwrap(); // disk number
            out.write_u32::<LittleEndian>(0).unwrap(); // disk with central directory
            out.write_u64::<LittleEndian>(self.entries as u64).unwrap();
            out.write_u64::<LittleEndian>(self.entries as u64).unwrap();
            out.write_u64::<LittleEndian>(cd_size).unwrap();
            out.write_u64::<LittleEndian>(cd_offset).unwrap();

            out.write_all(Zip64EOCDLocator::SIGNATURE).unwrap();
            out.write_u32::<LittleEndian>(0).unwrap(); // disk with ZIP64 EOCD
            out.write_u64::<LittleEndian>(eocd64_offset).unwrap();
            out.write_u32::<LittleEndian>(1).unwrap(); // total disks
        }

        let (entries16, cd_size32, cd_offset32) = if self.zip64 {
            (0xFFFF, 0xFFFFFFFF, 0xFFFFFFFF)
        } else {
            (self.entries, cd_size as u32, cd_offset as u32)
        };

        out.write_all(EndOfCentralDirectory::SIGNATURE).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap(); // disk number
        out.write_u16::<LittleEndian>(0).unwrap(); // disk with central directory
        out.write_u16::<LittleEndian>(entries16).unwrap();
        out.write_u16::<LittleEndian>(entries16).unwrap();
        out.write_u32::<LittleEndian>(cd_size32).unwrap();
        out.write_u32::<LittleEndian>(cd_offset32).unwrap();
        out.write_u16::<LittleEndian>(self.comment.len() as u16).unwrap();
        out.write_all(&self.comment).unwrap();
        out
    }
}

pub fn deflate(content: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}
