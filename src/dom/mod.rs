mod parser;
mod selector;
mod serializer;

pub use parser::parse_document;
pub use selector::Selector;

use indexmap::IndexMap;

use crate::spec::AttributeMap;

/// Opaque handle to a node in a [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
    Declaration(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: IndexMap<String, String>,
}

/// Parsed document, held as an arena of nodes addressed by [`NodeId`].
///
/// Only what the deferred pass needs: attribute access and mutation,
/// subtree-scoped selector queries in document order, and serialization
/// back to markup. Not a general-purpose HTML library.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Dom {
    fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: IndexMap<String, String>,
    ) -> NodeId {
        self.create_node(Some(parent), NodeType::Element(Element { tag_name, attrs }))
    }

    fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    fn create_comment(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Comment(text))
    }

    fn create_declaration(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Declaration(text))
    }

    fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    fn parent_element(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        self.element(parent).map(|_| parent)
    }

    pub fn attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attribute(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .map(|e| e.attrs.contains_key(name))
            .unwrap_or(false)
    }

    /// Set an attribute on an element; no-op for non-element nodes. A new
    /// attribute lands after the existing ones.
    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node_id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node_id) {
            element.attrs.shift_remove(name);
        }
    }

    /// Clone of an element's attribute map, in source order; empty for
    /// non-element nodes.
    pub fn attributes(&self, node_id: NodeId) -> AttributeMap {
        self.element(node_id)
            .map(|e| e.attrs.clone())
            .unwrap_or_default()
    }

    /// Replace an element's attribute map wholesale; no-op for non-element
    /// nodes.
    pub fn replace_attributes(&mut self, node_id: NodeId, attributes: AttributeMap) {
        if let Some(element) = self.element_mut(node_id) {
            element.attrs = attributes;
        }
    }

    /// Every element carrying `name`, in document order.
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.collect_elements_dfs(self.root, &mut all);
        all.into_iter()
            .filter(|&id| self.has_attribute(id, name))
            .collect()
    }

    fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    fn collect_descendant_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }
}
