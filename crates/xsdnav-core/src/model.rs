//! # Schema Tree Model
//!
//! The hierarchical schema representation every other component operates on.
//! A tree is loaded once per session and never mutated afterwards; a reload
//! replaces the whole tree.
//!
//! Field names and shapes match the backend JSON (`camelCase`, `type` for the
//! type reference, `max` as an integer or the literal `"unbounded"`).

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What kind of schema construct a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaNodeKind {
    /// `xs:element`.
    Element,
    /// `xs:complexType`.
    ComplexType,
    /// `xs:simpleType`.
    SimpleType,
    /// `xs:attribute`.
    Attribute,
}

impl fmt::Display for SchemaNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element => write!(f, "element"),
            Self::ComplexType => write!(f, "complexType"),
            Self::SimpleType => write!(f, "simpleType"),
            Self::Attribute => write!(f, "attribute"),
        }
    }
}

/// Upper occurrence bound of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// A finite bound.
    Bounded(u32),
    /// `maxOccurs="unbounded"`.
    Unbounded,
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl Serialize for MaxOccurs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bounded(n) => serializer.serialize_u32(*n),
            Self::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

impl<'de> Deserialize<'de> for MaxOccurs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MaxOccursVisitor;

        impl<'de> Visitor<'de> for MaxOccursVisitor {
            type Value = MaxOccurs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or \"unbounded\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MaxOccurs, E> {
                u32::try_from(v)
                    .map(MaxOccurs::Bounded)
                    .map_err(|_| E::custom(format!("maxOccurs {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MaxOccurs, E> {
                u32::try_from(v)
                    .map(MaxOccurs::Bounded)
                    .map_err(|_| E::custom(format!("maxOccurs {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MaxOccurs, E> {
                if v == "unbounded" {
                    Ok(MaxOccurs::Unbounded)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(MaxOccursVisitor)
    }
}

/// Occurrence constraints of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    /// `minOccurs`.
    pub min: u32,
    /// `maxOccurs`.
    pub max: MaxOccurs,
}

impl Cardinality {
    /// The XSD default, `minOccurs="1" maxOccurs="1"`.
    pub const EXACTLY_ONE: Self = Self {
        min: 1,
        max: MaxOccurs::Bounded(1),
    };

    /// Whether the element may be omitted.
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Attribute groups whose attributes are called out in node details.
pub const HIGHLIGHTED_ATTRIBUTE_GROUPS: [&str; 3] =
    ["taxProcedureGroup", "taxFactorGroup", "taxCompetenceGroup"];

/// Attribute descriptor attached to an element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    /// Local attribute name.
    pub name: String,
    /// Always [`SchemaNodeKind::Attribute`] on the wire.
    #[serde(default = "attribute_kind")]
    pub kind: SchemaNodeKind,
    /// Local name of the attribute type, if declared.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    /// Allowed literal values; empty when unrestricted.
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<String>,
    /// Name of the attribute group the attribute was pulled in from.
    #[serde(default)]
    pub source: Option<String>,
}

fn attribute_kind() -> SchemaNodeKind {
    SchemaNodeKind::Attribute
}

impl SchemaAttribute {
    /// Whether the attribute originates from one of the
    /// [`HIGHLIGHTED_ATTRIBUTE_GROUPS`].
    pub fn is_highlighted(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|group| HIGHLIGHTED_ATTRIBUTE_GROUPS.contains(&group))
    }
}

/// One node of the schema tree. Children are owned exclusively by their
/// parent, so the structure is a tree: no cycles, no sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Local name without namespace prefix.
    pub name: String,
    /// Construct kind.
    pub kind: SchemaNodeKind,
    /// Local name of the referenced type, if any.
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    /// Target namespace of the declaring schema.
    #[serde(default)]
    pub namespace: String,
    /// Occurrence constraints; absent for non-particles.
    #[serde(default)]
    pub cardinality: Option<Cardinality>,
    /// Attribute descriptors in declaration order.
    #[serde(default)]
    pub attributes: Vec<SchemaAttribute>,
    /// Allowed literal values, if the content is an enumeration.
    #[serde(default)]
    pub enumeration: Option<Vec<String>>,
    /// Child nodes in declaration order.
    #[serde(default)]
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// A bare element node with no type, attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SchemaNodeKind::Element,
            type_name: None,
            namespace: String::new(),
            cardinality: None,
            attributes: Vec::new(),
            enumeration: None,
            children: Vec::new(),
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: SchemaNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style children append.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether the node has any children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// First direct child with the given name, in list order.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Number of nodes in the subtree rooted here, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SchemaNode::subtree_len).sum::<usize>()
    }

    /// Pre-order iterator over the subtree rooted here.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Pre-order traversal over a [`SchemaNode`] subtree.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a SchemaNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a SchemaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Headline facts about the loaded schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    /// `version` attribute of `xs:schema`.
    pub schema_version: String,
    /// `targetNamespace` attribute of `xs:schema`.
    pub target_namespace: String,
    /// Where the schema was loaded from.
    pub schema_location: String,
    /// Names of the top-level element declarations.
    pub root_elements: Vec<String>,
    /// Names of the top-level complex types.
    pub top_level_types: Vec<String>,
}

/// Envelope returned by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTreeResponse {
    /// Root of the tree.
    pub root: SchemaNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_deserializes_backend_json() {
        let json = serde_json::json!({
            "name": "naturalPersonTaxData",
            "kind": "element",
            "type": "naturalPersonTaxDataType",
            "namespace": "http://www.ech.ch/xmlns/eCH-0278/1",
            "cardinality": {"min": 1, "max": 1},
            "attributes": [
                {"name": "taxProcedure", "kind": "attribute", "type": "string", "enum": ["a", "b"], "source": "taxProcedureGroup"}
            ],
            "enumeration": null,
            "children": [
                {"name": "person", "kind": "element", "type": null, "namespace": "",
                 "cardinality": {"min": 0, "max": "unbounded"}, "attributes": [],
                 "enumeration": null, "children": []}
            ]
        });

        let node: SchemaNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.name, "naturalPersonTaxData");
        assert_eq!(node.type_name.as_deref(), Some("naturalPersonTaxDataType"));
        assert_eq!(node.cardinality, Some(Cardinality::EXACTLY_ONE));
        assert!(node.attributes[0].is_highlighted());
        let child = &node.children[0];
        assert_eq!(
            child.cardinality,
            Some(Cardinality {
                min: 0,
                max: MaxOccurs::Unbounded
            })
        );
        assert!(child.cardinality.unwrap().is_optional());
    }

    #[test]
    fn max_occurs_serializes_as_number_or_literal() {
        assert_eq!(
            serde_json::to_value(MaxOccurs::Bounded(3)).unwrap(),
            serde_json::json!(3)
        );
        assert_eq!(
            serde_json::to_value(MaxOccurs::Unbounded).unwrap(),
            serde_json::json!("unbounded")
        );
    }

    #[test]
    fn max_occurs_rejects_other_strings() {
        let result: Result<MaxOccurs, _> = serde_json::from_value(serde_json::json!("many"));
        assert!(result.is_err());
    }

    #[test]
    fn kind_uses_camel_case() {
        assert_eq!(
            serde_json::to_value(SchemaNodeKind::ComplexType).unwrap(),
            serde_json::json!("complexType")
        );
        assert_eq!(SchemaNodeKind::SimpleType.to_string(), "simpleType");
    }

    #[test]
    fn pre_order_visits_parent_before_children_in_list_order() {
        let root = SchemaNode::element("Schema").with_children([
            SchemaNode::element("A").with_child(SchemaNode::element("B")),
            SchemaNode::element("C"),
        ]);
        let names: Vec<&str> = root.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Schema", "A", "B", "C"]);
        assert_eq!(root.subtree_len(), 4);
    }

    #[test]
    fn attribute_without_group_is_not_highlighted() {
        let attr = SchemaAttribute {
            name: "id".into(),
            kind: SchemaNodeKind::Attribute,
            type_name: None,
            enum_values: vec![],
            source: Some("otherGroup".into()),
        };
        assert!(!attr.is_highlighted());
    }

    #[test]
    fn summary_round_trips_camel_case() {
        let summary = SchemaSummary {
            schema_version: "1.0".into(),
            target_namespace: "urn:x".into(),
            schema_location: "schema/x.xsd".into(),
            root_elements: vec!["root".into()],
            top_level_types: vec!["rootType".into()],
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["schemaVersion"], "1.0");
        assert_eq!(value["topLevelTypes"][0], "rootType");
    }
}
