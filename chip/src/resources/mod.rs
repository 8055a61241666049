//! Loading of rom images, either plain files or entries of a ZIP archive.
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use zip::read::ZipArchive;

use crate::{definitions::memory, LoadError};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The content of the rom stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, the data has to fit
    /// into the program area of the memory.
    pub fn new(name: &str, data: impl Into<Box<[u8]>>) -> Result<Self, LoadError> {
        let data = data.into();
        if data.is_empty() {
            return Err(LoadError::Empty(name.to_string()));
        }
        if data.len() > memory::PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                name: name.to_string(),
                len: data.len(),
                max: memory::PROGRAM_SIZE,
            });
        }

        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will read the whole file as rom, the name is the file stem.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut data = Vec::new();
        File::open(path)?.read_to_end(&mut data)?;

        let name = path
            .file_stem()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("read rom '{}' with {} bytes from {}", name, data.len(), path.display());

        Rom::new(&name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

/// Represents an archive of roms
pub struct RomArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl RomArchive<BufReader<File>> {
    /// Will open the ZIP archive at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        RomArchive::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> RomArchive<R> {
    pub fn new(reader: R) -> Result<Self, LoadError> {
        Ok(RomArchive {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        let mut names: Vec<_> = self.archive.file_names().collect();
        names.sort_unstable();
        names
    }

    /// Will decompress the rom with the given name from the archive
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, LoadError> {
        let mut file = self.archive.by_name(name)?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Rom::new(name, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::{write::FileOptions, CompressionMethod, ZipWriter};

    const PONG: [u8; 6] = [0x6A, 0x02, 0x6B, 0x0C, 0x6C, 0x3F];
    const MAZE: [u8; 4] = [0xA2, 0x1E, 0xC2, 0x01];

    fn archive() -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in [("PONG", &PONG[..]), ("MAZE", &MAZE[..]), ("EMPTY", &[][..])] {
            writer.start_file(name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_rom_new() {
        let rom = Rom::new("PONG", PONG.to_vec()).unwrap();
        assert_eq!(rom.get_name(), "PONG");
        assert_eq!(rom.get_data(), &PONG[..]);
    }

    #[test]
    fn test_rom_empty() {
        let res = Rom::new("EMPTY", Vec::new());
        assert!(matches!(res, Err(LoadError::Empty(name)) if name == "EMPTY"));
    }

    #[test]
    fn test_rom_too_large() {
        let res = Rom::new("HUGE", vec![0; memory::PROGRAM_SIZE + 1]);
        assert!(matches!(
            res,
            Err(LoadError::TooLarge { len, max, .. }) if len == memory::PROGRAM_SIZE + 1 && max == memory::PROGRAM_SIZE
        ));
        assert!(Rom::new("FITS", vec![0; memory::PROGRAM_SIZE]).is_ok());
    }

    #[test]
    fn test_rom_from_file() {
        let path = std::env::temp_dir().join(format!("chip8-rom-{}.ch8", std::process::id()));
        std::fs::write(&path, PONG).unwrap();

        let rom = Rom::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let rom = rom.unwrap();
        assert_eq!(rom.get_data(), &PONG[..]);
        assert!(rom.get_name().starts_with("chip8-rom-"));
    }

    #[test]
    fn test_rom_from_missing_file() {
        let res = Rom::from_file("/this/path/does/not/exist.ch8");
        assert!(matches!(res, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_file_names() {
        let ra = RomArchive::new(archive()).unwrap();
        assert_eq!(ra.file_names(), vec!["EMPTY", "MAZE", "PONG"]);
    }

    #[test]
    fn test_rom_extract() {
        let mut ra = RomArchive::new(archive()).unwrap();
        let rom = ra.get_file_data("MAZE").unwrap();
        assert_eq!(rom.get_name(), "MAZE");
        assert_eq!(rom.get_data(), &MAZE[..]);

        assert!(matches!(ra.get_file_data("EMPTY"), Err(LoadError::Empty(_))));
        assert!(matches!(ra.get_file_data("TETRIS"), Err(LoadError::Archive(_))));
    }

    #[test]
    fn test_not_an_archive() {
        let res = RomArchive::new(Cursor::new(PONG.to_vec()));
        assert!(matches!(res, Err(LoadError::Archive(_))));
    }
}
