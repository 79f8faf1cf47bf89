//! Query parameter extraction and resolution
//!
//! Extraction looks at the syntax around every `$name` reference and needs
//! no schema. Resolution maps the cast types onto [`KnownScalarType`]s,
//! walking user-defined scalars up to a known base, and merges repeated
//! references to the same parameter.

use std::collections::{HashMap, HashSet};

use eqlkit_parser::parse;
use eqlkit_syntax::{get_all_children, get_node_text, Span, SyntaxKind, SyntaxNode, SyntaxTree};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{KnownScalarType, ParamError, SchemaScalar};

/// One syntactic occurrence of a parameter reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedParameter {
    /// Name without the leading `$`
    pub name: String,
    /// Cast type as written, e.g. `int64` or `default::MyInt`
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub array: bool,
    pub optional: bool,
    pub error: Option<ParamError>,
    /// Span of the `$name` token
    pub span: Span,
}

/// A parameter after resolution, one per distinct name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub scalar: Option<KnownScalarType>,
    pub array: bool,
    pub optional: bool,
    pub error: Option<ParamError>,
}

impl ResolvedParameter {
    fn unresolved(param: &ExtractedParameter, error: ParamError) -> Self {
        Self {
            name: param.name.clone(),
            scalar: None,
            array: param.array,
            optional: param.optional,
            error: Some(error),
        }
    }

    fn compatible_with(&self, other: &ResolvedParameter) -> bool {
        self.scalar == other.scalar && self.array == other.array && self.optional == other.optional
    }
}

/// Collect every parameter reference in the tree, in document order
pub fn extract_parameters(tree: &SyntaxTree, source: &str) -> Vec<ExtractedParameter> {
    get_all_children(tree.root(), SyntaxKind::QueryParameterName)
        .into_iter()
        .map(|node| {
            let text = get_node_text(source, node);
            let mut param = ExtractedParameter {
                name: text.strip_prefix('$').unwrap_or(text).to_string(),
                type_name: None,
                array: false,
                optional: false,
                error: None,
                span: node.span(),
            };
            if let Err(error) = read_cast(&mut param, node, source) {
                param.error = Some(error);
            }
            param
        })
        .collect()
}

/// Fill in the cast details of `param` from the `<...>` preceding `node`
fn read_cast(
    param: &mut ExtractedParameter,
    node: SyntaxNode<'_>,
    source: &str,
) -> Result<(), ParamError> {
    let cast = node
        .parent()
        .filter(|parent| parent.kind() == SyntaxKind::QueryParameter)
        .and(node.prev_sibling())
        .filter(|sibling| sibling.kind() == SyntaxKind::Cast)
        .ok_or(ParamError::MissingCast)?;

    let mut current = cast.first_child().ok_or(ParamError::InvalidCast)?;

    if current.kind() == SyntaxKind::Keyword {
        let modifier = get_node_text(source, current).to_ascii_lowercase();
        let next = current.next_sibling();
        match (modifier.as_str(), next) {
            ("optional" | "required", Some(next)) => {
                param.optional = modifier == "optional";
                current = next;
            }
            _ => return Err(ParamError::InvalidCast),
        }
    }

    if current.kind() == SyntaxKind::BuiltinName && get_node_text(source, current) == "array" {
        param.array = true;
        current = current.next_sibling().ok_or(ParamError::InvalidCast)?;
    }

    if current.kind() != SyntaxKind::Name || current.next_sibling().is_some() {
        return Err(ParamError::InvalidCast);
    }
    param.type_name = Some(get_node_text(source, current).to_string());
    Ok(())
}

/// Resolve extracted parameters against a scalar catalogue.
///
/// The result has one entry per parameter name, in order of first
/// occurrence. An entry without an error is replaced by a later erroneous
/// occurrence of the same name; once an entry carries an error it is kept.
pub fn resolve_parameters(
    extracted: &[ExtractedParameter],
    scalars: &[SchemaScalar],
) -> IndexMap<String, ResolvedParameter> {
    let catalogue: HashMap<&str, &SchemaScalar> = scalars
        .iter()
        .map(|scalar| (scalar.name.as_str(), scalar))
        .collect();
    let mut resolved: IndexMap<String, ResolvedParameter> = IndexMap::new();

    for param in extracted {
        let candidate = match (param.error, param.type_name.as_deref()) {
            (Some(error), _) => ResolvedParameter::unresolved(param, error),
            (None, None) => ResolvedParameter::unresolved(param, ParamError::InvalidCast),
            (None, Some(type_name)) => match resolve_scalar(type_name, &catalogue) {
                Some(scalar) => ResolvedParameter {
                    name: param.name.clone(),
                    scalar: Some(scalar),
                    array: param.array,
                    optional: param.optional,
                    error: None,
                },
                None => ResolvedParameter::unresolved(param, ParamError::UnsupportedType),
            },
        };
        trace!(
            name = %candidate.name,
            scalar = ?candidate.scalar,
            error = ?candidate.error,
            "resolved occurrence"
        );

        match resolved.get_mut(&param.name) {
            None => {
                resolved.insert(param.name.clone(), candidate);
            }
            Some(existing) if existing.error.is_some() => {}
            Some(existing) if candidate.error.is_some() => *existing = candidate,
            Some(existing) => {
                if !existing.compatible_with(&candidate) {
                    existing.error = Some(ParamError::IncompatibleUsages);
                }
            }
        }
    }
    resolved
}

/// Walk from `type_name` up the first-parent chain to a known scalar
fn resolve_scalar<'a>(
    type_name: &'a str,
    catalogue: &HashMap<&'a str, &'a SchemaScalar>,
) -> Option<KnownScalarType> {
    let mut visited = HashSet::new();
    let mut current = type_name;
    loop {
        if let Some(known) = KnownScalarType::lookup(current) {
            return Some(known);
        }
        if !visited.insert(current) {
            debug!(type_name, "scalar inheritance cycle");
            return None;
        }
        let scalar = match catalogue.get(current) {
            Some(scalar) => *scalar,
            None => *catalogue.get(format!("default::{current}").as_str())?,
        };
        current = scalar.extends.first()?.as_str();
    }
}

/// Parse `source` and resolve its parameters.
///
/// Returns `None` when the source cannot be parsed at all.
pub fn extract_query_parameters(
    source: &str,
    scalars: &[SchemaScalar],
) -> Option<IndexMap<String, ResolvedParameter>> {
    let tree = match parse(source) {
        Ok(tree) => tree,
        Err(err) => {
            debug!(%err, "parse failed, no parameters");
            return None;
        }
    };
    let extracted = extract_parameters(&tree, source);
    let resolved = resolve_parameters(&extracted, scalars);
    debug!(
        occurrences = extracted.len(),
        params = resolved.len(),
        "extracted query parameters"
    );
    Some(resolved)
}
