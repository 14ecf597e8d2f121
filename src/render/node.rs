//! The markup tree handlers produce.

use crate::constants::CHARS_PER_BLOCK_ESTIMATE;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "source"];

/// A node of rendered output.
///
/// `key` carries the source block id so a consumer can keep identity
/// stable across re-renders. It is emitted as `data-block-id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    Element {
        tag: String,
        key: Option<String>,
        attributes: Vec<(String, String)>,
        children: Vec<RenderedNode>,
    },
    /// Text, escaped on output.
    Text(String),
    /// Markup emitted verbatim (prepared code highlighting).
    Raw(String),
}

impl RenderedNode {
    pub fn element(tag: &str) -> Self {
        RenderedNode::Element {
            tag: tag.to_string(),
            key: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        RenderedNode::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        RenderedNode::Raw(markup.into())
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let RenderedNode::Element { attributes, .. } = &mut self {
            attributes.push((name.to_string(), value.into()));
        }
        self
    }

    /// Appends `class` to the element's class list. `None` and empty
    /// strings leave the node unchanged.
    pub fn class(mut self, class: Option<&str>) -> Self {
        let class = match class.map(str::trim) {
            Some(class) if !class.is_empty() => class,
            _ => return self,
        };
        if let RenderedNode::Element { attributes, .. } = &mut self {
            match attributes.iter_mut().find(|(name, _)| name == "class") {
                Some((_, existing)) => {
                    existing.push(' ');
                    existing.push_str(class);
                }
                None => attributes.push(("class".to_string(), class.to_string())),
            }
        }
        self
    }

    pub fn child(mut self, node: RenderedNode) -> Self {
        if let RenderedNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children_from(mut self, nodes: impl IntoIterator<Item = RenderedNode>) -> Self {
        if let RenderedNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Sets the key unless the handler already chose one.
    pub fn keyed(mut self, new_key: &str) -> Self {
        if let RenderedNode::Element { key, .. } = &mut self {
            if key.is_none() {
                *key = Some(new_key.to_string());
            }
        }
        self
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            RenderedNode::Element { key, .. } => key.as_deref(),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            RenderedNode::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            RenderedNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[RenderedNode] {
        match self {
            RenderedNode::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    /// Renames the element, keeping everything else.
    pub fn retagged(mut self, new_tag: &str) -> Self {
        if let RenderedNode::Element { tag, .. } = &mut self {
            *tag = new_tag.to_string();
        }
        self
    }

    /// Concatenated text of the subtree, without markup.
    pub fn text_content(&self) -> String {
        match self {
            RenderedNode::Text(text) => text.clone(),
            RenderedNode::Raw(_) => String::new(),
            RenderedNode::Element { children, .. } => {
                children.iter().map(RenderedNode::text_content).collect()
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(CHARS_PER_BLOCK_ESTIMATE);
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            RenderedNode::Text(text) => out.push_str(&html_escape::encode_text(text)),
            RenderedNode::Raw(markup) => out.push_str(markup),
            RenderedNode::Element {
                tag,
                key,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if let Some(key) = key {
                    push_attribute(out, "data-block-id", key);
                }
                for (name, value) in attributes {
                    push_attribute(out, name, value);
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}

/// Serializes a node list in order.
pub fn nodes_to_html(nodes: &[RenderedNode]) -> String {
    let mut out = String::with_capacity(nodes.len() * CHARS_PER_BLOCK_ESTIMATE);
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}
