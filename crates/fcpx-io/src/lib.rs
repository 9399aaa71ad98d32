//! Reading and writing FCPXML documents.
//!
//! [`read_document`] parses XML text into a [`fcpx_model::Document`] and
//! [`write_document`] renders one back in the indentation and doctype
//! convention the format uses. [`load_path`] and [`save_bundle`] add the
//! plain-file versus `.fcpxmld`-bundle distinction on top. No namespace or
//! external-entity handling; the element vocabulary is closed.

pub mod bundle;
pub mod error;
pub mod reader;
pub mod writer;

pub use bundle::{BUNDLE_EXTENSION, INFO_FILE, is_bundle_path, load_path, save_bundle, save_path};
pub use error::{DocumentError, Result};
pub use reader::read_document;
pub use writer::{write_document, write_document_to};
