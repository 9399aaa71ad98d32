//! The change log a conversion produces.

use std::fmt;

use fcpx_model::{Document, ElementType, Version};
use serde::{Deserialize, Serialize};

/// One delta applied while stepping a document between adjacent versions.
///
/// Paths refer to the tree as it stood when the step ran, so a stripped
/// element's descendants never show up under their own entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "kebab-case")]
pub enum AppliedChange {
    /// An element the step target does not carry was dropped with its
    /// whole subtree.
    StrippedElement {
        path: String,
        element: ElementType,
        version: Version,
    },

    /// An attribute with no spelling left at the step target was dropped.
    StrippedAttribute {
        path: String,
        attribute: String,
        version: Version,
    },

    /// An attribute was rewritten under the spelling the step target uses.
    RenamedAttribute {
        path: String,
        from: String,
        to: String,
        version: Version,
    },

    /// A schema default became explicit when its attribute first appeared.
    SynthesizedAttribute {
        path: String,
        attribute: String,
        value: String,
        version: Version,
    },
}

impl AppliedChange {
    /// Short machine-friendly name for the change kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::StrippedElement { .. } => "strip-element",
            Self::StrippedAttribute { .. } => "strip-attribute",
            Self::RenamedAttribute { .. } => "rename-attribute",
            Self::SynthesizedAttribute { .. } => "synthesize-attribute",
        }
    }

    /// Path of the node the change applied to.
    pub fn path(&self) -> &str {
        match self {
            Self::StrippedElement { path, .. }
            | Self::StrippedAttribute { path, .. }
            | Self::RenamedAttribute { path, .. }
            | Self::SynthesizedAttribute { path, .. } => path,
        }
    }

    /// The step-target version at which the change applied.
    pub fn version(&self) -> Version {
        match self {
            Self::StrippedElement { version, .. }
            | Self::StrippedAttribute { version, .. }
            | Self::RenamedAttribute { version, .. }
            | Self::SynthesizedAttribute { version, .. } => *version,
        }
    }
}

impl fmt::Display for AppliedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrippedElement {
                path,
                element,
                version,
            } => {
                write!(f, "stripped <{element}> at {path} (absent from {version})")
            }
            Self::StrippedAttribute {
                path,
                attribute,
                version,
            } => {
                write!(
                    f,
                    "stripped `{attribute}` at {path} (absent from {version})"
                )
            }
            Self::RenamedAttribute {
                path,
                from,
                to,
                version,
            } => {
                write!(f, "renamed `{from}` to `{to}` at {path} ({version} spelling)")
            }
            Self::SynthesizedAttribute {
                path,
                attribute,
                value,
                version,
            } => {
                write!(
                    f,
                    "synthesized `{attribute}=\"{value}\"` at {path} (default since {version})"
                )
            }
        }
    }
}

/// How the converted document is meant to be written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Packaging {
    /// A single `.fcpxml` file.
    #[default]
    Xml,
    /// A `.fcpxmld` bundle directory; needs schema 1.10 or later.
    Bundle,
}

/// Knobs for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    pub packaging: Packaging,
}

/// A converted document together with everything the conversion did to it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: Document,
    pub source: Version,
    pub target: Version,
    pub changes: Vec<AppliedChange>,
}

impl Conversion {
    /// True when no value was dropped. Renames and synthesized defaults
    /// keep every value the source expressed.
    pub fn is_lossless(&self) -> bool {
        self.changes.iter().all(|change| {
            matches!(
                change,
                AppliedChange::RenamedAttribute { .. } | AppliedChange::SynthesizedAttribute { .. }
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_serialize_with_tagged_kinds() {
        let change = AppliedChange::RenamedAttribute {
            path: "fcpxml/library/event/project/sequence/spine/sync-clip".to_string(),
            from: "syncOffset".to_string(),
            to: "contentSyncOffset".to_string(),
            version: Version::new(1, 9, 0),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["change"], "renamed-attribute");
        assert_eq!(json["from"], "syncOffset");
        assert_eq!(json["version"], "1.9");
    }

    #[test]
    fn display_reads_as_one_line() {
        let change = AppliedChange::StrippedElement {
            path: "fcpxml/library/event/project/sequence/spine/asset-clip/caption".to_string(),
            element: ElementType::Caption,
            version: Version::new(1, 7, 0),
        };
        assert_eq!(
            change.to_string(),
            "stripped <caption> at fcpxml/library/event/project/sequence/spine/asset-clip/caption \
             (absent from 1.7)"
        );
    }
}
