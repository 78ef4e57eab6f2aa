use serde::{Deserialize, Serialize};

use super::document::{NodeId, SimDocument};

/// One element of a page fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A page layout, loadable from JSON:
///
/// ```json
/// { "root": { "tag": "body", "children": [ { "tag": "button", "id": "menuButton" } ] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub root: NodeSpec,
}

impl PageSpec {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builds a fresh document from this layout.
    pub fn build(&self) -> SimDocument {
        let document = SimDocument::with_root(&self.root.tag, self.root.id.as_deref());
        let mut stack: Vec<(NodeId, &NodeSpec)> = self
            .root
            .children
            .iter()
            .rev()
            .map(|child| (document.root(), child))
            .collect();

        while let Some((parent, spec)) = stack.pop() {
            let node = document.append(parent, &spec.tag, spec.id.as_deref());
            stack.extend(spec.children.iter().rev().map(|child| (node, child)));
        }
        document
    }
}
