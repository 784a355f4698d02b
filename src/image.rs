// Memory image file handling: the full 25,600-byte FTM-400DR dump, loaded
// whole before any mutation and written back whole only on success.

use crate::layout::IMAGE_SIZE;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad image length: {actual} bytes (expected {expected})")]
    BadLength { expected: usize, actual: usize },

    #[error("record at {offset:#06x}+{len} runs past the end of the image")]
    OutOfBounds { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ImageError>;

/// An in-memory copy of the radio's memory dump. Channel records are copied
/// into it in place; the file on disk is only touched by [`Image::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<u8>,
}

impl Image {
    /// Read a dump file. Anything but exactly [`IMAGE_SIZE`] bytes is fatal
    /// before any channel gets processed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        if data.len() != IMAGE_SIZE {
            return Err(ImageError::BadLength {
                expected: IMAGE_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self { data })
    }

    /// Write the full image, byte for byte.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(&self.data)?;
        Ok(())
    }

    /// Copy a packed record into the image at @offset. Later writes to the
    /// same offset overwrite earlier ones; that is how duplicate slots in
    /// the document resolve (last write wins).
    pub fn write_record(&mut self, offset: usize, record: &[u8]) -> Result<()> {
        let end = offset + record.len();
        if end > self.data.len() {
            return Err(ImageError::OutOfBounds {
                offset,
                len: record.len(),
            });
        }
        self.data[offset..end].copy_from_slice(record);
        Ok(())
    }

    /// Borrow a span of the image, for inspection.
    pub fn get(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset + len;
        if end > self.data.len() {
            return Err(ImageError::OutOfBounds { offset, len });
        }
        Ok(&self.data[offset..end])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for Image {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AsRef<[u8]> for Image {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_save_round_trip() -> Result<()> {
        let tempfile = NamedTempFile::new().unwrap();
        let path = tempfile.path();

        let mut data = vec![0u8; IMAGE_SIZE];
        data[0] = 0xAA;
        data[IMAGE_SIZE - 1] = 0x55;

        Image::from(data.clone()).save(path)?;
        let loaded = Image::load(path)?;
        assert_eq!(loaded.as_bytes(), &data[..]);

        Ok(())
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut tempfile = NamedTempFile::new().unwrap();
        tempfile.write_all(&vec![0u8; IMAGE_SIZE - 1]).unwrap();
        tempfile.flush().unwrap();

        match Image::load(tempfile.path()) {
            Err(ImageError::BadLength { expected, actual }) => {
                assert_eq!(expected, IMAGE_SIZE);
                assert_eq!(actual, IMAGE_SIZE - 1);
            }
            other => panic!("expected BadLength, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Image::load("/nonexistent/ftm400.dat"),
            Err(ImageError::Io(_))
        ));
    }

    #[test]
    fn test_write_record() {
        let mut image = Image::from(vec![0u8; IMAGE_SIZE]);
        image.write_record(0x0200, &[1, 2, 3, 4]).unwrap();
        assert_eq!(image.get(0x0200, 4).unwrap(), &[1, 2, 3, 4]);

        // last write wins
        image.write_record(0x0200, &[9, 9, 9, 9]).unwrap();
        assert_eq!(image.get(0x0200, 4).unwrap(), &[9, 9, 9, 9]);

        assert!(image.write_record(IMAGE_SIZE - 2, &[0; 4]).is_err());
    }
}
