//! The feature table: which schema version introduced, removed, renamed, or
//! defaulted each versioned construct.
//!
//! The table is deliberately sparse. Anything not listed here has existed
//! unchanged across every known version and always reads as available; the
//! grammar says whether it is legal at all. Lookups never fail, they answer
//! [`Availability::Unavailable`] instead.

use std::fmt;

use fcpx_model::{ElementType, Version};

/// Versioned behavior that is not a single element or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StructuralFeature {
    /// Saving a document as a `.fcpxmld` bundle.
    BundlePackaging,
}

/// What one feature-table row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureKey {
    Element(ElementType),
    Attribute {
        element: ElementType,
        name: &'static str,
    },
    Structural(StructuralFeature),
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "<{element}>"),
            Self::Attribute { element, name } => write!(f, "<{element} {name}>"),
            Self::Structural(StructuralFeature::BundlePackaging) => {
                f.write_str("bundle packaging")
            }
        }
    }
}

/// One row of the feature table.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub key: FeatureKey,
    /// First version carrying the feature; `None` means "since 1.5".
    pub introduced_at: Option<Version>,
    /// First version no longer carrying the feature.
    pub removed_at: Option<Version>,
    /// Replacement attribute name taking over at `removed_at`.
    pub renamed_to: Option<&'static str>,
    /// Schema default an absent value is read as.
    pub default_value: Option<&'static str>,
}

/// Availability of a feature at one specific version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// Available, and an absent value reads as the given default.
    AvailableWithDefault(&'static str),
    /// Gone at this version; the named attribute carries the value instead.
    Renamed(&'static str),
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available | Self::AvailableWithDefault(_))
    }
}

const fn feature(key: FeatureKey) -> Feature {
    Feature {
        key,
        introduced_at: None,
        removed_at: None,
        renamed_to: None,
        default_value: None,
    }
}

const fn attribute(element: ElementType, name: &'static str) -> FeatureKey {
    FeatureKey::Attribute { element, name }
}

/// Every versioned construct the converter and the structural validator
/// know about.
pub const FEATURES: &[Feature] = &[
    // Closed captions arrived with 1.8.
    Feature {
        introduced_at: Some(Version::new(1, 8, 0)),
        ..feature(FeatureKey::Element(ElementType::Caption))
    },
    // Application-internal markers arrived with 1.13.
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(FeatureKey::Element(ElementType::HiddenClipMarker))
    },
    // Wide-gamut library setting arrived with 1.7.
    Feature {
        introduced_at: Some(Version::new(1, 7, 0)),
        ..feature(attribute(ElementType::Library, "colorProcessing"))
    },
    // Representation kinds arrived with 1.8; absent means the original.
    Feature {
        introduced_at: Some(Version::new(1, 8, 0)),
        default_value: Some("original-media"),
        ..feature(attribute(ElementType::MediaRep, "kind"))
    },
    // Secondary parameter values arrived with 1.11.
    Feature {
        introduced_at: Some(Version::new(1, 11, 0)),
        ..feature(attribute(ElementType::Param, "auxValue"))
    },
    // Stereoscopic hero-eye selection arrived with 1.13.
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::Format, "heroEye"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::Asset, "heroEyeOverride"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::AssetClip, "heroEyeOverride"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::Clip, "heroEyeOverride"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::McClip, "heroEyeOverride"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::RefClip, "heroEyeOverride"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 13, 0)),
        ..feature(attribute(ElementType::SyncClip, "heroEyeOverride"))
    },
    // Conform rates spelled their source rate `frameRate` before 1.6.
    Feature {
        removed_at: Some(Version::new(1, 6, 0)),
        renamed_to: Some("srcFrameRate"),
        ..feature(attribute(ElementType::ConformRate, "frameRate"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 6, 0)),
        ..feature(attribute(ElementType::ConformRate, "srcFrameRate"))
    },
    // Sync offsets were renamed at 1.9 and dropped entirely at 1.12.
    Feature {
        removed_at: Some(Version::new(1, 9, 0)),
        renamed_to: Some("contentSyncOffset"),
        ..feature(attribute(ElementType::SyncClip, "syncOffset"))
    },
    Feature {
        introduced_at: Some(Version::new(1, 9, 0)),
        removed_at: Some(Version::new(1, 12, 0)),
        ..feature(attribute(ElementType::SyncClip, "contentSyncOffset"))
    },
    // Bundle packaging arrived with 1.10.
    Feature {
        introduced_at: Some(Version::new(1, 10, 0)),
        ..feature(FeatureKey::Structural(StructuralFeature::BundlePackaging))
    },
];

fn availability_of(row: &Feature, version: Version) -> Availability {
    if let Some(introduced) = row.introduced_at
        && version < introduced
    {
        return Availability::Unavailable;
    }
    if let Some(removed) = row.removed_at
        && version >= removed
    {
        return match row.renamed_to {
            Some(replacement) => Availability::Renamed(replacement),
            None => Availability::Unavailable,
        };
    }
    match row.default_value {
        Some(default) => Availability::AvailableWithDefault(default),
        None => Availability::Available,
    }
}

/// Availability of an element at `version`. Elements without a table row
/// are available everywhere.
pub fn element_availability(element: ElementType, version: Version) -> Availability {
    FEATURES
        .iter()
        .find(|row| row.key == FeatureKey::Element(element))
        .map_or(Availability::Available, |row| {
            availability_of(row, version)
        })
}

/// Availability of an attribute at `version`. Attributes without a table
/// row are available everywhere.
pub fn attribute_availability(
    element: ElementType,
    name: &str,
    version: Version,
) -> Availability {
    FEATURES
        .iter()
        .find(|row| match row.key {
            FeatureKey::Attribute {
                element: row_element,
                name: row_name,
            } => row_element == element && row_name == name,
            _ => false,
        })
        .map_or(Availability::Available, |row| {
            availability_of(row, version)
        })
}

pub fn structural_availability(structural: StructuralFeature, version: Version) -> Availability {
    FEATURES
        .iter()
        .find(|row| row.key == FeatureKey::Structural(structural))
        .map_or(Availability::Available, |row| {
            availability_of(row, version)
        })
}

/// Rows whose lifecycle changes exactly at `version`.
pub fn changes_at(version: Version) -> impl Iterator<Item = &'static Feature> {
    FEATURES.iter().filter(move |row| {
        row.introduced_at == Some(version) || row.removed_at == Some(version)
    })
}

/// Attribute defaults whose carrier first appears exactly at `version`.
///
/// Yields `(attribute name, default value)` pairs for `element`. Used when
/// stepping a document upward across the introduction boundary so the
/// default becomes explicit in the output.
pub fn defaults_introduced_at(
    element: ElementType,
    version: Version,
) -> impl Iterator<Item = (&'static str, &'static str)> {
    FEATURES.iter().filter_map(move |row| match row.key {
        FeatureKey::Attribute {
            element: row_element,
            name,
        } if row_element == element && row.introduced_at == Some(version) => {
            row.default_value.map(|value| (name, value))
        }
        _ => None,
    })
}

/// Whether any row keys on `element` itself or one of its attributes.
///
/// An element that is untracked here, and whose whole subtree is untracked,
/// reads identically under every known version.
pub fn is_tracked(element: ElementType) -> bool {
    FEATURES.iter().any(|row| match row.key {
        FeatureKey::Element(row_element) => row_element == element,
        FeatureKey::Attribute {
            element: row_element,
            ..
        } => row_element == element,
        FeatureKey::Structural(_) => false,
    })
}

/// Terminal fate of an attribute at `version`, rename chains followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeResolution {
    /// The attribute exists under its own name.
    Keep,
    /// The value lives under this name at the target version.
    RenameTo(&'static str),
    /// Neither the attribute nor any rename successor exists.
    Drop,
}

/// Follow renames until the attribute either exists or is gone.
///
/// Renames are chased in both directions: an attribute replaced at some
/// version maps forward to its successor, and an attribute that does not
/// exist yet maps backward to the spelling that carried the value before
/// it. Chains are short and curated; the hop limits only guard against a
/// malformed table.
pub fn resolve_attribute(
    element: ElementType,
    name: &str,
    version: Version,
) -> AttributeResolution {
    let mut next = match attribute_availability(element, name, version) {
        Availability::Available | Availability::AvailableWithDefault(_) => {
            return AttributeResolution::Keep;
        }
        Availability::Unavailable => return resolve_backward(element, name, version),
        Availability::Renamed(next) => next,
    };
    for _ in 0..4 {
        match attribute_availability(element, next, version) {
            Availability::Available | Availability::AvailableWithDefault(_) => {
                return AttributeResolution::RenameTo(next);
            }
            Availability::Renamed(after) => next = after,
            Availability::Unavailable => return AttributeResolution::Drop,
        }
    }
    AttributeResolution::Drop
}

fn resolve_backward(element: ElementType, name: &str, version: Version) -> AttributeResolution {
    let mut current = name;
    for _ in 0..4 {
        let predecessor = FEATURES.iter().find_map(|row| match row.key {
            FeatureKey::Attribute {
                element: row_element,
                name: row_name,
            } if row_element == element && row.renamed_to == Some(current) => Some(row_name),
            _ => None,
        });
        let Some(predecessor) = predecessor else {
            return AttributeResolution::Drop;
        };
        if attribute_availability(element, predecessor, version).is_available() {
            return AttributeResolution::RenameTo(predecessor);
        }
        current = predecessor;
    }
    AttributeResolution::Drop
}
