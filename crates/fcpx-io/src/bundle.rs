//! Files and `.fcpxmld` bundles on disk.
//!
//! A bundle is a directory whose `Info.fcpxml` member holds the document;
//! media payloads sit next to it and are not this crate's business. Whether
//! a given document version is allowed to ship as a bundle is the
//! converter's call, not the loader's.

use std::fs;
use std::path::Path;

use fcpx_model::Document;
use tracing::debug;

use crate::error::{DocumentError, Result};
use crate::reader::read_document;
use crate::writer::write_document;

/// Extension of a bundle directory.
pub const BUNDLE_EXTENSION: &str = "fcpxmld";

/// Name of the document member inside a bundle.
pub const INFO_FILE: &str = "Info.fcpxml";

/// True when the path names a bundle rather than a plain XML file.
///
/// Decided by shape alone (`.fcpxmld` extension or an existing directory);
/// the path does not have to exist.
pub fn is_bundle_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) || path.is_dir()
}

/// Load a document from a plain `.fcpxml` file or a `.fcpxmld` bundle.
pub fn load_path(path: &Path) -> Result<Document> {
    let file = if is_bundle_path(path) {
        path.join(INFO_FILE)
    } else {
        path.to_path_buf()
    };
    debug!(path = %file.display(), "Loading document");
    let text = fs::read_to_string(&file).map_err(|source| DocumentError::FileRead {
        path: file,
        source,
    })?;
    read_document(&text)
}

/// Write a document as a plain XML file.
pub fn save_path(doc: &Document, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Writing document");
    fs::write(path, write_document(doc)).map_err(|source| DocumentError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document as a `.fcpxmld` bundle directory.
///
/// Creates the directory when needed and replaces an existing `Info.fcpxml`
/// member; other bundle members are left alone.
pub fn save_bundle(doc: &Document, path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| DocumentError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    save_path(doc, &path.join(INFO_FILE))
}
