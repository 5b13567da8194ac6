//! EPUB reading and writing
//!
//! The whole archive is held in memory. Chapters are exposed as editable
//! markup; everything else is carried through untouched on write.

use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::opf::{find_opf_path, parse_opf};
use super::{Chapter, EpubError};

const CONTAINER_PATH: &str = "META-INF/container.xml";
const MIMETYPE_PATH: &str = "mimetype";

/// A file stored in the archive
#[derive(Debug, Clone)]
struct Entry {
    name: String,
    data: Vec<u8>,
    stored: bool,
}

/// An EPUB held in memory
#[derive(Debug, Clone)]
pub struct EpubBook {
    pub title: Option<String>,
    entries: Vec<Entry>,
    chapters: Vec<Chapter>,
}

impl EpubBook {
    /// Open an EPUB from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EpubError> {
        let path = path.as_ref();
        let mut data = Vec::new();
        File::open(path)?.read_to_end(&mut data)?;
        let book = Self::from_bytes(&data)?;
        tracing::debug!(
            "Opened {} with {} documents",
            path.display(),
            book.chapters.len()
        );
        Ok(book)
    }

    /// Parse an EPUB from raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, EpubError> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if !file.is_file() {
                continue;
            }
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            entries.push(Entry {
                name: file.name().to_string(),
                data: content,
                stored: file.compression() == CompressionMethod::Stored,
            });
        }

        let read_text = |name: &str| -> Result<String, EpubError> {
            let entry = entries
                .iter()
                .find(|e| e.name == name)
                .ok_or_else(|| EpubError::ResourceNotFound(name.to_string()))?;
            String::from_utf8(entry.data.clone())
                .map_err(|e| EpubError::InvalidEpub(format!("{} is not UTF-8: {}", name, e)))
        };

        let opf_path = find_opf_path(&read_text(CONTAINER_PATH)?)?;
        let opf_dir = opf_path
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();
        let opf = parse_opf(&read_text(&opf_path)?, &opf_dir)?;

        let mut chapters = Vec::new();
        for item in opf.documents() {
            match read_text(&item.path) {
                Ok(markup) => chapters.push(Chapter::new(item.path.clone(), markup)),
                Err(EpubError::ResourceNotFound(path)) => {
                    tracing::warn!("Manifest lists missing document {}", path);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self {
            title: opf.title,
            entries,
            chapters,
        })
    }

    /// Documents in reading order
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapters_mut(&mut self) -> &mut [Chapter] {
        &mut self.chapters
    }

    /// Write the book to `path`, creating parent directories
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), EpubError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.write(File::create(path)?)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Serialize the archive; `mimetype` goes first and uncompressed
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W, EpubError> {
        let mut zip = ZipWriter::new(writer);

        let (mimetype, rest): (Vec<&Entry>, Vec<&Entry>) =
            self.entries.iter().partition(|e| e.name == MIMETYPE_PATH);

        for entry in mimetype.into_iter().chain(rest) {
            let method = if entry.stored || entry.name == MIMETYPE_PATH {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(entry.name.as_str(), options)?;

            match self.chapters.iter().find(|c| c.href == entry.name && c.is_modified()) {
                Some(chapter) => zip.write_all(chapter.markup().as_bytes())?,
                None => zip.write_all(&entry.data)?,
            }
        }

        Ok(zip.finish()?)
    }

    /// Serialize the archive into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>, EpubError> {
        Ok(self.write(Cursor::new(Vec::new()))?.into_inner())
    }
}
