//! Parsing `.tmx` documents from bytes fetched through Bevy's asset I/O.
//!
//! The `tiled` loader reads files synchronously, while `LoadContext` only hands out
//! bytes asynchronously. Parsing is therefore retried: every attempt serves the
//! files fetched so far from memory, and the first file `tiled` asks for that is
//! not there yet is reported back so the caller can fetch it and try again.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use bevy::platform::collections::HashMap;

use crate::document::TiledMap;
use crate::loaders::map::{DocumentError, document_from_map};

/// Files already read, keyed by the exact path `tiled` requested.
#[derive(Debug, Default, Clone)]
pub struct PreloadedFiles {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl PreloadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<'a> tiled::ResourceReader for &'a PreloadedFiles {
    type Resource = Cursor<&'a [u8]>;
    type Error = io::Error;

    fn read_from(&mut self, path: &Path) -> Result<Self::Resource, Self::Error> {
        let preloaded: &'a PreloadedFiles = *self;
        preloaded
            .files
            .get(path)
            .map(|bytes| Cursor::new(bytes.as_slice()))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Outcome of one parse attempt.
#[derive(Debug)]
pub enum ParseStep {
    Done(TiledMap),
    /// `tiled` asked for a file that has not been fetched yet
    NeedsFile(PathBuf),
}

/// Try to parse the map at `path` using only `files`.
pub fn parse_preloaded(path: &Path, files: &PreloadedFiles) -> Result<ParseStep, DocumentError> {
    let mut loader = tiled::Loader::with_reader(files);
    match loader.load_tmx_map(path) {
        Ok(map) => Ok(ParseStep::Done(document_from_map(&map, path)?)),
        Err(tiled::Error::ResourceLoadingError { path: missing, .. })
            if !files.contains(&missing) =>
        {
            Ok(ParseStep::NeedsFile(missing))
        }
        Err(err) => Err(err.into()),
    }
}
