//! Rendering back end for cards.
//!
//! Cards only ever talk to a [`RenderSink`]; [`ElementTree`] is the
//! in-memory implementation used by the CLI and the tests.

use std::fmt::{self, Write};

/// Handle to an element owned by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Body,
    Div,
    Paragraph,
    Button,
    Image,
}

impl ElementKind {
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Body => "body",
            ElementKind::Div => "div",
            ElementKind::Paragraph => "p",
            ElementKind::Button => "button",
            ElementKind::Image => "img",
        }
    }

    fn is_void(self) -> bool {
        matches!(self, ElementKind::Image)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The primitives a card needs from a page.
///
/// Selectors are either `.class` or a bare tag name, and `find` searches
/// the descendants of `root` depth-first, never `root` itself.
pub trait RenderSink {
    fn body(&self) -> ElementId;

    fn create_element(
        &mut self,
        kind: ElementKind,
        text: Option<&str>,
        class: Option<&str>,
    ) -> ElementId;

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    fn append(&mut self, parent: ElementId, child: ElementId);

    fn find(&self, root: ElementId, selector: &str) -> Option<ElementId>;

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);
}

#[derive(Debug, Clone)]
struct Node {
    kind: ElementKind,
    text: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Node {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            text: String::new(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) => self.classes.iter().any(|c| c == class),
            None => self.kind.tag() == selector,
        }
    }
}

/// Arena-backed element tree rooted at a `<body>`.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Node>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self { nodes: vec![Node::new(ElementKind::Body)] }
    }

    fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.node(id).kind
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.node(id).text
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).parent
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every descendant of `root` matching `selector`, in document order.
    pub fn find_all(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.walk(root, &mut |id| {
            if id != root && self.node(id).matches(selector) {
                found.push(id);
            }
        });
        found
    }

    fn walk(&self, id: ElementId, visit: &mut impl FnMut(ElementId)) {
        visit(id);
        for &child in &self.node(id).children {
            self.walk(child, visit);
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.node(id).parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.body(), 0, &mut out);
        out
    }

    fn write_html(&self, id: ElementId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let indent = "  ".repeat(depth);

        let _ = write!(out, "{indent}<{}", node.kind);
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&node.classes.join(" ")));
        }
        for (name, value) in &node.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_html(value));
        }

        if node.kind.is_void() {
            out.push_str(">\n");
            return;
        }

        if node.children.is_empty() {
            let _ = writeln!(out, ">{}</{}>", escape_html(&node.text), node.kind);
            return;
        }

        out.push_str(">\n");
        if !node.text.is_empty() {
            let _ = writeln!(out, "{indent}  {}", escape_html(&node.text));
        }
        for &child in &node.children {
            self.write_html(child, depth + 1, out);
        }
        let _ = writeln!(out, "{indent}</{}>", node.kind);
    }

    /// Indented outline of the visible text, one element per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(self.body(), 0, &mut out);
        out
    }

    fn write_text(&self, id: ElementId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let indent = "  ".repeat(depth);

        match node.kind {
            ElementKind::Body => {}
            ElementKind::Div => {
                if let Some(class) = node.classes.first() {
                    let _ = writeln!(out, "{indent}[{class}]");
                }
            }
            ElementKind::Button => {
                let _ = writeln!(out, "{indent}<{}>", node.text);
            }
            ElementKind::Image => {
                if let Some(src) = self.attribute(id, "src") {
                    let _ = writeln!(out, "{indent}icon: {src}");
                }
            }
            ElementKind::Paragraph => {
                if !node.text.is_empty() {
                    let _ = writeln!(out, "{indent}{}", node.text);
                }
            }
        }

        let depth = if node.kind == ElementKind::Body { depth } else { depth + 1 };
        for &child in &node.children {
            self.write_text(child, depth, out);
        }
    }
}

impl RenderSink for ElementTree {
    fn body(&self) -> ElementId {
        ElementId(0)
    }

    fn create_element(
        &mut self,
        kind: ElementKind,
        text: Option<&str>,
        class: Option<&str>,
    ) -> ElementId {
        let mut node = Node::new(kind);
        if let Some(text) = text {
            node.text = text.to_string();
        }
        if let Some(class) = class {
            node.classes.push(class.to_string());
        }
        self.nodes.push(node);
        ElementId(self.nodes.len() - 1)
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        // Appending an ancestor would create a cycle.
        if self.is_ancestor(child, parent) {
            return;
        }
        if let Some(old) = self.node(child).parent {
            self.node_mut(old).children.retain(|&c| c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn find(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.node(root)
            .children
            .iter()
            .find_map(|&child| {
                if self.node(child).matches(selector) {
                    Some(child)
                } else {
                    self.find(child, selector)
                }
            })
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.node_mut(element).text = text.to_string();
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let attributes = &mut self.node_mut(element).attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
