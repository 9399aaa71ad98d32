//! Semantic validation: version-independent wellformedness of the document
//! as a whole. Root shape and version declaration, resource id uniqueness
//! per scope, and reference resolution. Never consults the feature table.

use fcpx_model::{
    Document, ElementType, NodeId, VERSION_ATTR, ValidationError, ValidationErrorKind,
    ValidationResult, Version, context,
};
use fcpx_standards::{ValueKind, grammar};
use fcpx_views::attr;

/// Collect every semantic violation in the document.
pub fn validate_semantics(doc: &Document) -> ValidationResult {
    let mut result = ValidationResult::new();
    check_root_shape(doc, &mut result);
    check_resource_ids(doc, &mut result);
    check_references(doc, &mut result);
    result
}

fn check_root_shape(doc: &Document, out: &mut ValidationResult) {
    let root_tag = doc.tag(doc.root());
    if root_tag != ElementType::Fcpxml {
        out.push(
            ValidationError::new(
                ValidationErrorKind::InvalidRootElement,
                format!("document root must be `<fcpxml>`, found `<{root_tag}>`"),
            )
            .with_context(context::PATH, doc.path(doc.root()))
            .with_context(context::ELEMENT, root_tag.name()),
        );
        return;
    }
    match doc.attribute(doc.root(), VERSION_ATTR) {
        Some(raw) if raw.parse::<Version>().is_ok() => {}
        Some(raw) => {
            out.push(
                ValidationError::new(
                    ValidationErrorKind::UnsupportedVersion,
                    format!("root `{VERSION_ATTR}` attribute `{raw}` is not a version string"),
                )
                .with_context(context::PATH, doc.path(doc.root()))
                .with_context(context::ATTRIBUTE, VERSION_ATTR)
                .with_context(context::VALUE, raw),
            );
        }
        None => {
            out.push(
                ValidationError::new(
                    ValidationErrorKind::UnsupportedVersion,
                    format!("root carries no `{VERSION_ATTR}` attribute"),
                )
                .with_context(context::PATH, doc.path(doc.root()))
                .with_context(context::ATTRIBUTE, VERSION_ATTR),
            );
        }
    }
}

/// Each `resources` element is its own id scope; the same id may appear in
/// different scopes but not twice in one.
fn check_resource_ids(doc: &Document, out: &mut ValidationResult) {
    for scope in doc.descendants(doc.root()) {
        if doc.tag(scope) != ElementType::Resources {
            continue;
        }
        let mut seen: Vec<&str> = Vec::new();
        for child in doc.children(scope) {
            if !doc.tag(*child).is_resource() {
                continue;
            }
            // A missing id is a structural finding, not a semantic one.
            let Some(id) = doc.attribute(*child, attr::ID) else {
                continue;
            };
            if seen.contains(&id) {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateResourceId,
                        format!("resource id `{id}` is declared more than once"),
                    )
                    .with_context(context::PATH, doc.path(*child))
                    .with_context(context::ID, id),
                );
            } else {
                seen.push(id);
            }
        }
    }
}

/// Every reference-kinded attribute must name a resource visible from the
/// referencing node.
fn check_references(doc: &Document, out: &mut ValidationResult) {
    for node in doc.descendants(doc.root()) {
        let rules = grammar(doc.tag(node));
        for (name, value) in doc.attributes(node) {
            let Some(rule) = rules.attribute(name) else {
                continue;
            };
            if rule.value != ValueKind::ResourceRef || value.is_empty() {
                continue;
            }
            if resolve(doc, node, value).is_none() {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::UnresolvedReference,
                        format!("no resource with id `{value}` is in scope"),
                    )
                    .with_context(context::PATH, doc.path(node))
                    .with_context(context::ATTRIBUTE, name)
                    .with_context(context::ID, value),
                );
            }
        }
    }
}

/// Walk enclosing scopes outward from `node` looking for a resource with
/// the given id. The nearest match wins.
pub fn resolve(doc: &Document, node: NodeId, id: &str) -> Option<NodeId> {
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        for child in doc.children(current) {
            if doc.tag(*child) != ElementType::Resources {
                continue;
            }
            let found = doc.children(*child).iter().copied().find(|resource| {
                doc.tag(*resource).is_resource()
                    && doc.attribute(*resource, attr::ID) == Some(id)
            });
            if found.is_some() {
                return found;
            }
        }
        cursor = doc.parent(current);
    }
    None
}
