use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use tracing::{debug, trace};
use zerocopy::BigEndian;

use crate::{Document, Error, Result};

/// How a document is stored on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum FileFormat {
    /// Canonical text.
    Text,
    /// Uncompressed big-endian binary NBT.
    Binary,
    /// Gzip-compressed big-endian binary NBT, the format of player and level data.
    #[default]
    GzipBinary,
}

impl FileFormat {
    /// Detects the format of existing file content.
    ///
    /// `0x0a` opens a binary compound but is also a newline, so UTF-8
    /// content whose first non-whitespace byte is `{` is text.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes {
            [0x1f, 0x8b, ..] => FileFormat::GzipBinary,
            [0x0a, ..] if !looks_like_text(bytes) => FileFormat::Binary,
            _ => FileFormat::Text,
        }
    }

    /// The format a new file at `path` is created in.
    pub fn for_path(path: &Path, fallback: FileFormat) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("dat" | "dat_old" | "nbt" | "schematic" | "schem") => FileFormat::GzipBinary,
            Some("snbt" | "txt") => FileFormat::Text,
            _ => fallback,
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<(String, Document)> {
        match self {
            FileFormat::Text => {
                let text = std::str::from_utf8(bytes).map_err(|error| {
                    Error::malformed_bytes(bytes, error.valid_up_to(), "file is not valid UTF-8")
                })?;
                Ok((String::new(), Document::parse(text)?))
            }
            FileFormat::Binary => {
                let (name, root) = crate::binary::read_root::<BigEndian>(bytes)?;
                Ok((name, Document::from(root)))
            }
            FileFormat::GzipBinary => {
                let mut raw = Vec::new();
                GzDecoder::new(bytes)
                    .read_to_end(&mut raw)
                    .map_err(|_| Error::malformed_bytes(bytes, 0, "invalid gzip stream"))?;
                FileFormat::Binary.decode(&raw)
            }
        }
    }

    fn encode(self, name: &str, document: &Document) -> Result<Vec<u8>> {
        match self {
            FileFormat::Text => {
                let mut text = document.to_pretty_snbt("    ");
                text.push('\n');
                Ok(text.into_bytes())
            }
            FileFormat::Binary => document.to_binary::<BigEndian>(name),
            FileFormat::GzipBinary => {
                let raw = document.to_binary::<BigEndian>(name)?;
                let mut encoder =
                    GzEncoder::new(Vec::with_capacity(raw.len() / 2), Compression::default());
                encoder.write_all(&raw)?;
                Ok(encoder.finish()?)
            }
        }
    }
}

fn looks_like_text(bytes: &[u8]) -> bool {
    bytes.iter().find(|byte| !byte.is_ascii_whitespace()) == Some(&b'{')
        && std::str::from_utf8(bytes).is_ok()
}

/// A document read from disk and written back only by [`save`](Self::save).
#[derive(Clone, Debug)]
pub struct FileBinding {
    path: PathBuf,
    format: FileFormat,
    root_name: String,
    document: Document,
}

impl FileBinding {
    /// Opens `path`, or starts an empty document there when no file exists.
    ///
    /// A file that exists but does not decode fails with
    /// [`Error::MalformedTag`]; an existing file holding only whitespace is
    /// an empty document.
    pub fn open(path: impl Into<PathBuf>, new_file_format: FileFormat) -> Result<Self> {
        let path = path.into();
        match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {
                debug!(path = %path.display(), "opened blank nbt file");
                Ok(Self::empty(path, FileFormat::Text))
            }
            Ok(bytes) => {
                let format = FileFormat::detect(&bytes);
                let (root_name, document) = format.decode(&bytes)?;
                debug!(path = %path.display(), ?format, len = bytes.len(), "opened nbt file");
                Ok(Self {
                    path,
                    format,
                    root_name,
                    document,
                })
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let format = FileFormat::for_path(&path, new_file_format);
                debug!(path = %path.display(), ?format, "nbt file missing, starting empty");
                Ok(Self::empty(path, format))
            }
            Err(error) => Err(Error::IO(error)),
        }
    }

    fn empty(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            root_name: String::new(),
            document: Document::new(),
        }
    }

    /// Serializes the document to its path, creating parent directories and
    /// overwriting any existing file.
    pub fn save(&self) -> Result<()> {
        let bytes = self.format.encode(&self.root_name, &self.document)?;
        let parent = self.path.parent();
        if let Some(parent) = parent.filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &bytes)?;
        trace!(
            path = %self.path.display(),
            format = ?self.format,
            len = bytes.len(),
            "saved nbt file"
        );
        Ok(())
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn format(&self) -> FileFormat {
        self.format
    }

    #[inline]
    pub fn set_format(&mut self, format: FileFormat) {
        self.format = format;
    }

    /// Root name read from a binary file; empty for text and new files.
    #[inline]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[inline]
    pub fn into_document(self) -> Document {
        self.document
    }
}
