//! Versioned schema knowledge.
//!
//! Two static tables back everything else: the [`grammar`] says what shape
//! each element has, and the [`features`] table says at which versions the
//! versioned parts of that shape exist. Validators and the converter consult
//! both rather than carrying version data of their own.

pub mod features;
pub mod grammar;

pub use features::{
    AttributeResolution, Availability, FEATURES, Feature, FeatureKey, StructuralFeature,
    attribute_availability, changes_at, defaults_introduced_at, element_availability,
    is_tracked, resolve_attribute, structural_availability,
};
pub use grammar::{
    AttributeRule, Cardinality, ChildRule, ElementGrammar, Presence, ValueKind, grammar,
};
