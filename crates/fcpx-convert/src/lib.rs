//! Version conversion of FCPXML documents.
//!
//! [`convert`] rewrites a document for another known schema version by
//! stepping through every version in between, one adjacent hop at a time.
//! Each hop strips elements the next version does not carry, renames
//! attributes whose spelling changed, and materializes schema defaults for
//! attributes crossing their introduction, all recorded as
//! [`AppliedChange`] entries against the paths they touched.

pub mod changes;
pub mod convert;
pub mod error;

pub use changes::{AppliedChange, Conversion, ConvertOptions, Packaging};
pub use convert::{convert, convert_with_options};
pub use error::{ConversionError, Result};
