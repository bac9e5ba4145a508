//! Where theme assets are read from: a resource directory on disk or a zip
//! bundle held in memory. Both use the same relative layout.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use super::ResourceError;

pub(super) trait AssetSource {
    /// Sorted names of the files (or sub-directories) directly inside `dir`.
    /// A missing directory lists as empty.
    fn list(&mut self, dir: &str, dirs: bool) -> Result<Vec<String>, ResourceError>;

    /// Contents of the file at `path`, or `None` if it does not exist.
    fn read(&mut self, path: &str) -> Result<Option<Vec<u8>>, ResourceError>;
}

pub(super) struct DirSource<'a> {
    root: &'a Path,
}

impl<'a> DirSource<'a> {
    pub(super) fn new(root: &'a Path) -> Self {
        Self { root }
    }
}

fn io_error(path: PathBuf) -> impl FnOnce(io::Error) -> ResourceError {
    move |source| ResourceError::Io { path, source }
}

impl AssetSource for DirSource<'_> {
    fn list(&mut self, dir: &str, dirs: bool) -> Result<Vec<String>, ResourceError> {
        let path = self.root.join(dir);
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(path)(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error(path.clone()))?;
            let file_type = entry.file_type().map_err(io_error(entry.path()))?;
            if file_type.is_dir() != dirs {
                continue;
            }
            // Non-UTF-8 names cannot be asset keys
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&mut self, path: &str) -> Result<Option<Vec<u8>>, ResourceError> {
        let full = self.root.join(path);
        match fs::read(&full) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(full)(e)),
        }
    }
}

pub(super) struct ArchiveSource<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ArchiveSource<'a> {
    pub(super) fn new(data: &'a [u8]) -> Result<Self, ResourceError> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }
}

impl AssetSource for ArchiveSource<'_> {
    fn list(&mut self, dir: &str, dirs: bool) -> Result<Vec<String>, ResourceError> {
        let prefix = format!("{dir}/");
        let mut names = BTreeSet::new();
        for name in self.archive.file_names() {
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((first, _)) if dirs && !first.is_empty() => {
                    names.insert(first.to_string());
                }
                None if !dirs && !rest.is_empty() => {
                    names.insert(rest.to_string());
                }
                _ => {}
            }
        }
        Ok(names.into_iter().collect())
    }

    fn read(&mut self, path: &str) -> Result<Option<Vec<u8>>, ResourceError> {
        match self.archive.by_name(path) {
            Ok(mut file) => {
                let mut data = Vec::new();
                file.read_to_end(&mut data)
                    .map_err(io_error(PathBuf::from(path)))?;
                Ok(Some(data))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
