//! # XSD Tree Builder
//!
//! Reads an XML Schema document and produces the navigable [`SchemaNode`]
//! tree plus the [`SchemaSummary`].
//!
//! ## Design
//!
//! Top-level `xs:element`, `xs:complexType`, `xs:simpleType` and
//! `xs:attributeGroup` declarations are indexed by name once. The tree is
//! then expanded from the chosen root element:
//!
//! - An inline `xs:simpleType` contributes its enumeration; an inline
//!   `xs:complexType` contributes attributes and child elements.
//! - Otherwise a named simple type contributes its enumeration and a named
//!   complex type contributes attributes and children, unless that complex
//!   type is already being expanded further up the same branch. Recursive
//!   types therefore end in a childless node instead of looping.
//! - Child elements are gathered in document order through
//!   `sequence`/`choice`/`all` and through the `extension`/`restriction` of
//!   `complexContent`/`simpleContent`.
//! - `ref="x"` elements expand the global element `x` with the local
//!   occurrence constraints.
//!
//! The whole document is processed eagerly; the result owns no borrow of the
//! source text.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use roxmltree::{Document, Node};
use thiserror::Error;

use xsdnav_core::{
    Cardinality, MaxOccurs, SchemaAttribute, SchemaNode, SchemaNodeKind, SchemaSummary,
};

/// Namespace of XML Schema itself.
pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Errors raised while loading a schema document.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("failed to read schema {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("failed to parse schema {location}: {reason}")]
    Xml {
        /// Where the document came from.
        location: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document element is not `xs:schema`.
    #[error("document element is <{found}>, expected xs:schema")]
    NotASchema {
        /// The document element that was found.
        found: String,
    },

    /// The schema declares no top-level element to root the tree at.
    #[error("schema has no top-level root element")]
    NoRootElement,

    /// A `minOccurs`/`maxOccurs` value is not a valid count.
    #[error("element \"{element}\" has invalid {attribute}=\"{value}\"")]
    InvalidOccurs {
        /// Name of the offending element.
        element: String,
        /// `minOccurs` or `maxOccurs`.
        attribute: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Options controlling how a schema is loaded.
#[derive(Debug, Clone, Default)]
pub struct XsdLoadOptions {
    /// Top-level element to root the tree at, when present in the schema.
    /// Falls back to the first top-level element.
    pub preferred_root: Option<String>,
    /// Location reported in the summary. Defaults to `schema/<file name>`
    /// when loading from a file, and to an empty string otherwise.
    pub schema_location: Option<String>,
}

/// A fully expanded schema: tree plus summary.
#[derive(Debug, Clone)]
pub struct XsdSchema {
    summary: SchemaSummary,
    root: SchemaNode,
}

impl XsdSchema {
    /// Load and expand the schema at `path`.
    pub fn from_file(path: impl AsRef<Path>, options: &XsdLoadOptions) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut options = options.clone();
        if options.schema_location.is_none() {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            options.schema_location = Some(format!("schema/{file_name}"));
        }

        let schema = Self::parse_named(&text, &path.display().to_string(), &options)?;
        tracing::info!(
            path = %path.display(),
            root = %schema.root.name,
            nodes = schema.root.subtree_len(),
            "loaded schema"
        );
        Ok(schema)
    }

    /// Expand a schema held in memory.
    pub fn parse(text: &str, options: &XsdLoadOptions) -> Result<Self, SchemaLoadError> {
        Self::parse_named(text, "<memory>", options)
    }

    fn parse_named(text: &str, origin: &str, options: &XsdLoadOptions) -> Result<Self, SchemaLoadError> {
        let document = Document::parse(text).map_err(|e| SchemaLoadError::Xml {
            location: origin.to_string(),
            reason: e.to_string(),
        })?;

        let schema_element = document.root_element();
        if !is_xs(schema_element, "schema") {
            return Err(SchemaLoadError::NotASchema {
                found: schema_element.tag_name().name().to_string(),
            });
        }

        let catalog = Catalog::index(schema_element);
        let summary = SchemaSummary {
            schema_version: schema_element.attribute("version").unwrap_or_default().to_string(),
            target_namespace: catalog.target_namespace.clone(),
            schema_location: options.schema_location.clone().unwrap_or_default(),
            root_elements: catalog.element_order.iter().map(|s| s.to_string()).collect(),
            top_level_types: catalog.complex_type_order.iter().map(|s| s.to_string()).collect(),
        };

        let root_element = catalog
            .root_element(options.preferred_root.as_deref())
            .ok_or(SchemaLoadError::NoRootElement)?;
        let root = catalog.build_element(root_element, &Guards::default())?;

        Ok(Self { summary, root })
    }

    /// The schema summary.
    pub fn summary(&self) -> &SchemaSummary {
        &self.summary
    }

    /// Root of the expanded tree.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Split into summary and tree.
    pub fn into_parts(self) -> (SchemaSummary, SchemaNode) {
        (self.summary, self.root)
    }
}

/// Strip a `{uri}` or `prefix:` qualifier.
pub fn local_name(value: &str) -> &str {
    if let Some((_, rest)) = value.split_once('}') {
        return rest;
    }
    match value.split_once(':') {
        Some((_, rest)) => rest,
        None => value,
    }
}

fn is_xs(node: Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local
        && node.tag_name().namespace() == Some(XS_NS)
}

fn xs_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    local: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |child| is_xs(*child, local))
}

fn first_xs_child<'a, 'input>(node: Node<'a, 'input>, local: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_xs(*child, local))
}

/// Expansion-path guards: complex types and element refs currently being
/// expanded on this branch.
#[derive(Debug, Clone, Default)]
struct Guards {
    types: HashSet<String>,
    refs: HashSet<String>,
}

/// Named top-level declarations of one schema document.
struct Catalog<'a, 'input> {
    target_namespace: String,
    elements: HashMap<&'a str, Node<'a, 'input>>,
    element_order: Vec<&'a str>,
    complex_types: HashMap<&'a str, Node<'a, 'input>>,
    complex_type_order: Vec<&'a str>,
    simple_types: HashMap<&'a str, Node<'a, 'input>>,
    attribute_groups: HashMap<&'a str, Node<'a, 'input>>,
}

impl<'a, 'input> Catalog<'a, 'input> {
    fn index(schema: Node<'a, 'input>) -> Self {
        let mut catalog = Self {
            target_namespace: schema.attribute("targetNamespace").unwrap_or_default().to_string(),
            elements: HashMap::new(),
            element_order: Vec::new(),
            complex_types: HashMap::new(),
            complex_type_order: Vec::new(),
            simple_types: HashMap::new(),
            attribute_groups: HashMap::new(),
        };

        for child in schema.children().filter(Node::is_element) {
            let Some(name) = child.attribute("name") else {
                continue;
            };
            if is_xs(child, "element") {
                if catalog.elements.insert(name, child).is_none() {
                    catalog.element_order.push(name);
                }
            } else if is_xs(child, "complexType") {
                if catalog.complex_types.insert(name, child).is_none() {
                    catalog.complex_type_order.push(name);
                }
            } else if is_xs(child, "simpleType") {
                catalog.simple_types.insert(name, child);
            } else if is_xs(child, "attributeGroup") {
                catalog.attribute_groups.insert(name, child);
            }
        }

        catalog
    }

    fn root_element(&self, preferred: Option<&str>) -> Option<Node<'a, 'input>> {
        if let Some(preferred) = preferred {
            if let Some(element) = self.elements.get(preferred) {
                return Some(*element);
            }
            tracing::warn!(preferred, "preferred root element not declared; using first element");
        }
        let first = self.element_order.first()?;
        self.elements.get(first).copied()
    }

    fn build_element(&self, element: Node<'a, 'input>, guards: &Guards) -> Result<SchemaNode, SchemaLoadError> {
        if element.attribute("name").is_none() {
            if let Some(reference) = element.attribute("ref") {
                return self.build_reference(element, local_name(reference), guards);
            }
        }

        let name = element.attribute("name").unwrap_or_default();
        let type_name = element.attribute("type").map(local_name);
        let mut node = SchemaNode {
            name: name.to_string(),
            kind: SchemaNodeKind::Element,
            type_name: type_name.map(str::to_string),
            namespace: self.target_namespace.clone(),
            cardinality: Some(parse_occurs(element, name)?),
            attributes: Vec::new(),
            enumeration: None,
            children: Vec::new(),
        };

        if let Some(inline_simple) = first_xs_child(element, "simpleType") {
            node.enumeration = Some(extract_enumeration(inline_simple));
        }

        if let Some(inline_complex) = first_xs_child(element, "complexType") {
            node.attributes = self.collect_attributes(inline_complex);
            node.children = self.collect_children(inline_complex, guards)?;
            return Ok(node);
        }

        let Some(type_name) = type_name else {
            return Ok(node);
        };

        if let Some(simple) = self.simple_types.get(type_name) {
            node.enumeration = Some(extract_enumeration(*simple));
        }

        if let Some(complex) = self.complex_types.get(type_name) {
            if guards.types.contains(type_name) {
                tracing::trace!(element = name, type_name, "recursive type; not expanding");
                return Ok(node);
            }
            let mut next = guards.clone();
            next.types.insert(type_name.to_string());
            node.attributes = self.collect_attributes(*complex);
            node.children = self.collect_children(*complex, &next)?;
        }

        Ok(node)
    }

    fn build_reference(
        &self,
        element: Node<'a, 'input>,
        reference: &str,
        guards: &Guards,
    ) -> Result<SchemaNode, SchemaLoadError> {
        let cardinality = parse_occurs(element, reference)?;

        let target = self.elements.get(reference);
        let mut node = match target {
            Some(target) if !guards.refs.contains(reference) => {
                let mut next = guards.clone();
                next.refs.insert(reference.to_string());
                self.build_element(*target, &next)?
            }
            _ => {
                let mut bare = SchemaNode::element(reference);
                bare.namespace = self.target_namespace.clone();
                bare
            }
        };

        node.cardinality = Some(cardinality);
        Ok(node)
    }

    fn collect_children(&self, container: Node<'a, 'input>, guards: &Guards) -> Result<Vec<SchemaNode>, SchemaLoadError> {
        let mut particles = Vec::new();
        gather_elements(container, &mut particles);
        particles
            .into_iter()
            .map(|particle| self.build_element(particle, guards))
            .collect()
    }

    fn collect_attributes(&self, complex: Node<'a, 'input>) -> Vec<SchemaAttribute> {
        let mut attributes = Vec::new();

        for attribute in xs_children(complex, "attribute") {
            attributes.push(self.build_attribute(attribute, None));
        }
        for group_ref in xs_children(complex, "attributeGroup") {
            if let Some(reference) = group_ref.attribute("ref") {
                attributes.extend(self.resolve_attribute_group(local_name(reference), &HashSet::new()));
            }
        }

        for extension in complex.descendants().filter(|n| is_xs(*n, "extension")) {
            for attribute in xs_children(extension, "attribute") {
                attributes.push(self.build_attribute(attribute, None));
            }
            for group_ref in xs_children(extension, "attributeGroup") {
                if let Some(reference) = group_ref.attribute("ref") {
                    attributes.extend(self.resolve_attribute_group(local_name(reference), &HashSet::new()));
                }
            }
        }

        attributes
    }

    fn resolve_attribute_group(&self, group_name: &str, seen: &HashSet<String>) -> Vec<SchemaAttribute> {
        if seen.contains(group_name) {
            return Vec::new();
        }
        let Some(group) = self.attribute_groups.get(group_name) else {
            tracing::debug!(group_name, "attribute group not declared");
            return Vec::new();
        };

        let mut next_seen = seen.clone();
        next_seen.insert(group_name.to_string());

        let mut resolved = Vec::new();
        for child in group.children().filter(Node::is_element) {
            if is_xs(child, "attribute") {
                resolved.push(self.build_attribute(child, Some(group_name)));
            } else if is_xs(child, "attributeGroup") {
                if let Some(nested) = child.attribute("ref") {
                    resolved.extend(self.resolve_attribute_group(local_name(nested), &next_seen));
                }
            }
        }
        resolved
    }

    fn build_attribute(&self, attribute: Node<'a, 'input>, source: Option<&str>) -> SchemaAttribute {
        let type_name = attribute.attribute("type").map(local_name);

        let enum_values = if let Some(inline_simple) = first_xs_child(attribute, "simpleType") {
            extract_enumeration(inline_simple)
        } else if let Some(simple) = type_name.and_then(|t| self.simple_types.get(t)) {
            extract_enumeration(*simple)
        } else {
            Vec::new()
        };

        SchemaAttribute {
            name: attribute.attribute("name").unwrap_or_default().to_string(),
            kind: SchemaNodeKind::Attribute,
            type_name: type_name.map(str::to_string),
            enum_values,
            source: source.map(str::to_string),
        }
    }
}

/// Collect element particles of `container` in document order.
fn gather_elements<'a, 'input>(container: Node<'a, 'input>, out: &mut Vec<Node<'a, 'input>>) {
    for child in container.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "element" => out.push(child),
            "sequence" | "choice" | "all" => gather_elements(child, out),
            "complexContent" | "simpleContent" => {
                for derivation in xs_children(child, "extension") {
                    gather_elements(derivation, out);
                }
                for derivation in xs_children(child, "restriction") {
                    gather_elements(derivation, out);
                }
            }
            _ => {}
        }
    }
}

fn extract_enumeration(simple_type: Node<'_, '_>) -> Vec<String> {
    simple_type
        .descendants()
        .filter(|n| is_xs(*n, "enumeration"))
        .filter_map(|n| n.attribute("value"))
        .map(str::to_string)
        .collect()
}

fn parse_occurs(element: Node<'_, '_>, name: &str) -> Result<Cardinality, SchemaLoadError> {
    let min_raw = element.attribute("minOccurs").unwrap_or("1");
    let min = min_raw.trim().parse().map_err(|_| SchemaLoadError::InvalidOccurs {
        element: name.to_string(),
        attribute: "minOccurs",
        value: min_raw.to_string(),
    })?;

    let max_raw = element.attribute("maxOccurs").unwrap_or("1");
    let max = if max_raw.trim() == "unbounded" {
        MaxOccurs::Unbounded
    } else {
        MaxOccurs::Bounded(max_raw.trim().parse().map_err(|_| SchemaLoadError::InvalidOccurs {
            element: name.to_string(),
            attribute: "maxOccurs",
            value: max_raw.to_string(),
        })?)
    };

    Ok(Cardinality { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:t="urn:test" targetNamespace="urn:test" version="2.1">
{body}
</xs:schema>"#
        )
    }

    fn load(body: &str) -> XsdSchema {
        XsdSchema::parse(&wrap(body), &XsdLoadOptions::default()).unwrap()
    }

    fn names(nodes: &[SchemaNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn summary_lists_top_level_declarations() {
        let schema = load(
            r#"
            <xs:element name="root" type="t:rootType"/>
            <xs:element name="other" type="xs:string"/>
            <xs:complexType name="rootType"><xs:sequence/></xs:complexType>
            <xs:complexType name="unusedType"/>
            <xs:simpleType name="code"><xs:restriction base="xs:string"/></xs:simpleType>
            "#,
        );
        let summary = schema.summary();
        assert_eq!(summary.schema_version, "2.1");
        assert_eq!(summary.target_namespace, "urn:test");
        assert_eq!(summary.root_elements, ["root", "other"]);
        assert_eq!(summary.top_level_types, ["rootType", "unusedType"]);
        assert_eq!(summary.schema_location, "");
    }

    #[test]
    fn preferred_root_wins_over_first_element() {
        let text = wrap(r#"<xs:element name="first"/><xs:element name="second"/>"#);
        let options = XsdLoadOptions {
            preferred_root: Some("second".into()),
            schema_location: None,
        };
        let schema = XsdSchema::parse(&text, &options).unwrap();
        assert_eq!(schema.root().name, "second");

        let options = XsdLoadOptions {
            preferred_root: Some("missing".into()),
            schema_location: None,
        };
        let schema = XsdSchema::parse(&text, &options).unwrap();
        assert_eq!(schema.root().name, "first");
    }

    #[test]
    fn children_follow_document_order_through_compositors() {
        let schema = load(
            r#"
            <xs:element name="root">
              <xs:complexType>
                <xs:sequence>
                  <xs:element name="a" type="xs:string"/>
                  <xs:choice>
                    <xs:element name="b" type="xs:string" minOccurs="0"/>
                    <xs:element name="c" type="xs:string" maxOccurs="unbounded"/>
                  </xs:choice>
                  <xs:element name="d" type="xs:int"/>
                </xs:sequence>
              </xs:complexType>
            </xs:element>
            "#,
        );
        let root = schema.root();
        assert_eq!(names(&root.children), ["a", "b", "c", "d"]);
        assert_eq!(root.cardinality, Some(Cardinality::EXACTLY_ONE));
        assert_eq!(root.children[1].cardinality.unwrap().min, 0);
        assert_eq!(root.children[2].cardinality.unwrap().max, MaxOccurs::Unbounded);
        assert_eq!(root.children[3].type_name.as_deref(), Some("int"));
        assert_eq!(root.namespace, "urn:test");
    }

    #[test]
    fn extension_contributes_children_and_attributes() {
        let schema = load(
            r#"
            <xs:element name="root" type="t:derived"/>
            <xs:complexType name="derived">
              <xs:complexContent>
                <xs:extension base="t:base">
                  <xs:sequence><xs:element name="extra" type="xs:string"/></xs:sequence>
                  <xs:attribute name="flag" type="xs:boolean"/>
                </xs:extension>
              </xs:complexContent>
            </xs:complexType>
            "#,
        );
        let root = schema.root();
        assert_eq!(names(&root.children), ["extra"]);
        assert_eq!(root.attributes.len(), 1);
        assert_eq!(root.attributes[0].name, "flag");
        assert_eq!(root.attributes[0].type_name.as_deref(), Some("boolean"));
    }

    #[test]
    fn recursive_type_stops_expanding() {
        let schema = load(
            r#"
            <xs:element name="folder" type="t:folderType"/>
            <xs:complexType name="folderType">
              <xs:sequence>
                <xs:element name="name" type="xs:string"/>
                <xs:element name="folder" type="t:folderType" minOccurs="0"/>
              </xs:sequence>
            </xs:complexType>
            "#,
        );
        let root = schema.root();
        assert_eq!(names(&root.children), ["name", "folder"]);
        let nested = &root.children[1];
        assert_eq!(nested.type_name.as_deref(), Some("folderType"));
        assert!(nested.children.is_empty());
    }

    #[test]
    fn same_type_in_sibling_branches_expands_in_both() {
        let schema = load(
            r#"
            <xs:element name="root">
              <xs:complexType><xs:sequence>
                <xs:element name="home" type="t:address"/>
                <xs:element name="work" type="t:address"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            <xs:complexType name="address">
              <xs:sequence><xs:element name="street" type="xs:string"/></xs:sequence>
            </xs:complexType>
            "#,
        );
        let root = schema.root();
        assert_eq!(names(&root.children[0].children), ["street"]);
        assert_eq!(names(&root.children[1].children), ["street"]);
    }

    #[test]
    fn attribute_groups_resolve_recursively_with_source() {
        let schema = load(
            r#"
            <xs:element name="root">
              <xs:complexType>
                <xs:attribute name="id" type="xs:ID"/>
                <xs:attributeGroup ref="t:taxProcedureGroup"/>
              </xs:complexType>
            </xs:element>
            <xs:attributeGroup name="taxProcedureGroup">
              <xs:attribute name="taxProcedure" type="t:procedure"/>
              <xs:attributeGroup ref="t:auditGroup"/>
            </xs:attributeGroup>
            <xs:attributeGroup name="auditGroup">
              <xs:attribute name="auditor" type="xs:string"/>
              <xs:attributeGroup ref="t:taxProcedureGroup"/>
            </xs:attributeGroup>
            <xs:simpleType name="procedure">
              <xs:restriction base="xs:string">
                <xs:enumeration value="declaration"/>
                <xs:enumeration value="taxation"/>
              </xs:restriction>
            </xs:simpleType>
            "#,
        );
        let attributes = &schema.root().attributes;
        let attr_names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(attr_names, ["id", "taxProcedure", "auditor"]);
        assert_eq!(attributes[0].source, None);
        assert_eq!(attributes[1].source.as_deref(), Some("taxProcedureGroup"));
        assert!(attributes[1].is_highlighted());
        assert_eq!(attributes[1].enum_values, ["declaration", "taxation"]);
        assert_eq!(attributes[2].source.as_deref(), Some("auditGroup"));
        assert!(!attributes[2].is_highlighted());
    }

    #[test]
    fn enumerations_from_inline_and_named_simple_types() {
        let schema = load(
            r#"
            <xs:element name="root">
              <xs:complexType><xs:sequence>
                <xs:element name="inline">
                  <xs:simpleType><xs:restriction base="xs:string">
                    <xs:enumeration value="x"/><xs:enumeration value="y"/>
                  </xs:restriction></xs:simpleType>
                </xs:element>
                <xs:element name="named" type="t:status"/>
                <xs:element name="plain" type="xs:string"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            <xs:simpleType name="status"><xs:restriction base="xs:int">
              <xs:enumeration value="1"/>
            </xs:restriction></xs:simpleType>
            "#,
        );
        let children = &schema.root().children;
        assert_eq!(children[0].enumeration, Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(children[1].enumeration, Some(vec!["1".to_string()]));
        assert_eq!(children[2].enumeration, None);
    }

    #[test]
    fn element_refs_expand_with_local_occurs() {
        let schema = load(
            r#"
            <xs:element name="root">
              <xs:complexType><xs:sequence>
                <xs:element ref="t:item" minOccurs="0" maxOccurs="unbounded"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            <xs:element name="item">
              <xs:complexType><xs:sequence>
                <xs:element name="value" type="xs:string"/>
                <xs:element ref="t:item" minOccurs="0"/>
              </xs:sequence></xs:complexType>
            </xs:element>
            "#,
        );
        let item = &schema.root().children[0];
        assert_eq!(item.name, "item");
        assert_eq!(
            item.cardinality,
            Some(Cardinality {
                min: 0,
                max: MaxOccurs::Unbounded
            })
        );
        assert_eq!(names(&item.children), ["value", "item"]);
        assert!(item.children[1].children.is_empty());
    }

    #[test]
    fn invalid_occurs_is_reported() {
        let err = XsdSchema::parse(
            &wrap(r#"<xs:element name="root" maxOccurs="many"/>"#),
            &XsdLoadOptions::default(),
        )
        .unwrap_err();
        match err {
            SchemaLoadError::InvalidOccurs { element, attribute, value } => {
                assert_eq!(element, "root");
                assert_eq!(attribute, "maxOccurs");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidOccurs, got {other:?}"),
        }
    }

    #[test]
    fn schema_without_elements_has_no_root() {
        let err = XsdSchema::parse(&wrap(r#"<xs:complexType name="t"/>"#), &XsdLoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaLoadError::NoRootElement));
    }

    #[test]
    fn non_schema_document_is_rejected() {
        let err = XsdSchema::parse("<root/>", &XsdLoadOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaLoadError::NotASchema { found } if found == "root"));
    }

    #[test]
    fn malformed_xml_is_reported() {
        let err = XsdSchema::parse("<xs:schema", &XsdLoadOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Xml { .. }));
    }

    #[test]
    fn local_name_strips_qualifiers() {
        assert_eq!(local_name("{urn:x}item"), "item");
        assert_eq!(local_name("t:item"), "item");
        assert_eq!(local_name("item"), "item");
    }
}
