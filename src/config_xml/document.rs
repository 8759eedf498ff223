//! # Config document
//!
//! In-memory tree of a Jenkins `config.xml` (job, node or view).
//!
//! Nodes live in an arena and are addressed by [`NodeId`] handles, so an editor
//! can look an element up anywhere in the document and mutate it afterwards
//! without holding a borrow. Detached nodes stay in the arena but are no
//! longer reachable from the root, which is all that serialization sees.

use crate::config_xml::error::ConfigEditError;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Slot 0 of every arena: the document itself, parent of the root element.
const DOCUMENT: NodeId = NodeId(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// `<?xml version=".." encoding=".." standalone=".."?>`, kept as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self {
            version: "1.1".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigDocument {
    declaration: Option<XmlDeclaration>,
    nodes: Vec<NodeData>,
}

impl ConfigDocument {
    /// Creates a document holding only an empty root element.
    pub fn new(root_name: &str) -> Self {
        let mut doc = Self::empty(Some(XmlDeclaration::default()));
        doc.append_element(DOCUMENT, root_name);
        doc
    }

    fn empty(declaration: Option<XmlDeclaration>) -> Self {
        Self {
            declaration,
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// # parse
    ///
    /// Builds a document from XML text. Text, comments, CDATA and processing
    /// instructions are kept in source order; whitespace between top-level
    /// items is not.
    pub fn parse(xml: &str) -> Result<Self, ConfigEditError> {
        let mut reader = Reader::from_str(xml);
        let mut doc = Self::empty(None);
        let mut open: Vec<NodeId> = vec![DOCUMENT];

        loop {
            let event = reader.read_event().map_err(|e| {
                ConfigEditError::Parse(format!("at byte {}: {}", reader.buffer_position(), e))
            })?;
            let current = *open.last().unwrap_or(&DOCUMENT);

            match event {
                Event::Decl(decl) => doc.declaration = Some(read_declaration(&decl)?),
                Event::Start(start) => {
                    let id = doc.push(current, read_element(&start)?);
                    open.push(id);
                }
                Event::Empty(start) => {
                    doc.push(current, read_element(&start)?);
                }
                Event::End(_) => {
                    if open.len() <= 1 {
                        return Err(ConfigEditError::Parse("unbalanced end tag".to_string()));
                    }
                    open.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(parse_error)?;
                    if current == DOCUMENT {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Err(ConfigEditError::Parse(format!(
                            "text outside the root element: {}",
                            text.trim()
                        )));
                    }
                    doc.push(current, NodeKind::Text(text.into_owned()));
                }
                Event::CData(cdata) => {
                    doc.push(current, NodeKind::CData(utf8(cdata.into_inner())?));
                }
                Event::Comment(comment) => {
                    doc.push(current, NodeKind::Comment(utf8(comment.into_inner())?));
                }
                Event::PI(pi) => {
                    let content = std::str::from_utf8(&pi).map_err(parse_error)?;
                    doc.push(current, NodeKind::ProcessingInstruction(content.to_string()));
                }
                Event::DocType(doctype) => {
                    doc.push(current, NodeKind::DocType(utf8(doctype.into_inner())?));
                }
                Event::Eof => break,
            }
        }

        if open.len() != 1 {
            return Err(ConfigEditError::Parse("unclosed element".to_string()));
        }

        let roots = doc.child_elements(DOCUMENT).count();
        if roots != 1 {
            return Err(ConfigEditError::Parse(format!(
                "expected a single root element, found {}",
                roots
            )));
        }

        Ok(doc)
    }

    pub fn declaration(&self) -> Option<&XmlDeclaration> {
        self.declaration.as_ref()
    }

    pub(crate) fn document_node(&self) -> NodeId {
        DOCUMENT
    }

    /// The single root element (`project`, `slave`, `hudson.model.ListView`...).
    pub fn root(&self) -> NodeId {
        self.child_elements(DOCUMENT).next().unwrap_or(DOCUMENT)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(move |c| self.name(*c).is_some())
    }

    /// First direct child element called `name`.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(parent)
            .find(|c| self.name(*c) == Some(name))
    }

    /// Preorder walk below `from` (excluding `from`).
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        let mut stack = self.nodes[from.0].children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First element called `name` in document order, anywhere in the tree.
    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        self.find_first_in(DOCUMENT, name)
    }

    pub fn find_first_in(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(scope).find(|id| self.name(*id) == Some(name))
    }

    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.find_all_in(DOCUMENT, name)
    }

    pub fn find_all_in(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|id| self.name(*id) == Some(name))
            .collect()
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            match attributes.iter_mut().find(|(k, _)| k == key) {
                Some((_, v)) => *v = value.to_string(),
                None => attributes.push((key.to_string(), value.to_string())),
            }
        }
    }

    /// Concatenated text and CDATA of the direct children.
    pub fn text(&self, id: NodeId) -> String {
        self.nodes[id.0]
            .children
            .iter()
            .filter_map(|c| match &self.nodes[c.0].kind {
                NodeKind::Text(t) | NodeKind::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces everything below `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            self.push(id, NodeKind::Text(text.to_string()));
        }
    }

    pub fn has_element_children(&self, id: NodeId) -> bool {
        self.child_elements(id).next().is_some()
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.remove(child);
        }
    }

    /// Appends `<name/>` as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                name: name.to_string(),
                attributes: Vec::new(),
            },
        )
    }

    /// Appends `<name>text</name>` as the last child of `parent`.
    pub fn append_text_element(&mut self, parent: NodeId, name: &str, text: &str) -> NodeId {
        let id = self.append_element(parent, name);
        self.set_text(id, text);
        id
    }

    /// Inserts `<name/>` immediately after `sibling`.
    pub fn insert_element_after(
        &mut self,
        sibling: NodeId,
        name: &str,
    ) -> Result<NodeId, ConfigEditError> {
        let parent = match self.parent(sibling) {
            Some(p) if p != DOCUMENT => p,
            _ => {
                return Err(ConfigEditError::missing(
                    "parent",
                    "the root element cannot have siblings",
                ))
            }
        };
        let id = self.alloc(
            NodeKind::Element {
                name: name.to_string(),
                attributes: Vec::new(),
            },
            parent,
        );
        let children = &mut self.nodes[parent.0].children;
        let pos = children
            .iter()
            .position(|c| *c == sibling)
            .map(|p| p + 1)
            .unwrap_or(children.len());
        children.insert(pos, id);
        Ok(id)
    }

    /// Removes `id` and its whole subtree. Descendants are detached before
    /// their ancestors, deepest first.
    pub fn remove(&mut self, id: NodeId) {
        if id == DOCUMENT {
            return;
        }
        self.detach_subtree(id);
        self.detach(id);
    }

    /// Whether `id` is still reachable from the document.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = id;
        while let Some(parent) = self.parent(cursor) {
            cursor = parent;
        }
        cursor == DOCUMENT
    }

    fn detach_subtree(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.detach_subtree(child);
            self.nodes[child.0].parent = None;
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    fn alloc(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn subtree_eq(&self, a: NodeId, other: &ConfigDocument, b: NodeId) -> bool {
        let (ca, cb) = (self.children(a), other.children(b));
        self.kind(a) == other.kind(b)
            && ca.len() == cb.len()
            && ca
                .iter()
                .zip(cb.iter())
                .all(|(x, y)| self.subtree_eq(*x, other, *y))
    }
}

/// Structural equality: same declaration and same reachable tree.
impl PartialEq for ConfigDocument {
    fn eq(&self, other: &Self) -> bool {
        self.declaration == other.declaration && self.subtree_eq(DOCUMENT, other, DOCUMENT)
    }
}

pub struct Descendants<'a> {
    doc: &'a ConfigDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id.0].children.iter().rev().copied());
        Some(id)
    }
}

fn parse_error(e: impl std::fmt::Display) -> ConfigEditError {
    ConfigEditError::Parse(e.to_string())
}

fn utf8(bytes: Cow<'_, [u8]>) -> Result<String, ConfigEditError> {
    String::from_utf8(bytes.into_owned()).map_err(parse_error)
}

fn read_element(start: &BytesStart) -> Result<NodeKind, ConfigEditError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(parse_error)?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(parse_error)?
            .to_string();
        let value = attr.unescape_value().map_err(parse_error)?.into_owned();
        attributes.push((key, value));
    }

    Ok(NodeKind::Element { name, attributes })
}

fn read_declaration(decl: &BytesDecl) -> Result<XmlDeclaration, ConfigEditError> {
    let version = utf8(decl.version().map_err(parse_error)?)?;
    let encoding = match decl.encoding() {
        Some(enc) => Some(utf8(enc.map_err(parse_error)?)?),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(s) => Some(utf8(s.map_err(parse_error)?)?),
        None => None,
    };

    Ok(XmlDeclaration {
        version,
        encoding,
        standalone,
    })
}
