use std::collections::{HashMap, HashSet};
use std::path::Path;

use cgmath::Point3;
use serde::Deserialize;

use crate::camera::{Camera, CameraSpec};
use crate::collider::Collider;

/// Index of a node in the scene arena.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One scene element. Nodes carrying a description participate in the
/// description tree; nodes without one are opaque geometry that still blocks
/// scan rays and splits the hierarchy into separate trees.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub description: Option<String>,
    pub position: Point3<f32>,
    pub collider: Option<Collider>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned arena of scene nodes mirroring the host hierarchy, with parent and
/// ordered child links kept as indices.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        description: Option<String>,
        position: Point3<f32>,
        collider: Option<Collider>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.into(),
            description,
            position,
            collider,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn is_described(&self, id: NodeId) -> bool {
        self.nodes[id.0].description.is_some()
    }

    /// True iff the node has no parent or its parent carries no description.
    pub fn is_root(&self, id: NodeId) -> bool {
        match self.nodes[id.0].parent {
            None => true,
            Some(parent) => self.nodes[parent.0].description.is_none(),
        }
    }

    /// Uppermost described ancestor of the tree this node is in; the node
    /// itself when it is already a root.
    pub fn find_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            match self.nodes[current.0].parent {
                Some(parent) if self.nodes[parent.0].description.is_some() => current = parent,
                _ => return current,
            }
        }
    }

    /// Map a set of discovered nodes to the deduplicated set of their roots.
    pub fn reduce_to_roots(&self, ids: impl IntoIterator<Item = NodeId>) -> HashSet<NodeId> {
        ids.into_iter().map(|id| self.find_root(id)).collect()
    }

    /// Full text of the tree rooted at this node: first half of the child
    /// list, own description, second half, each fragment followed by a single
    /// space, with exactly one trailing character removed at the end.
    ///
    /// The midpoint is computed over all children; children without a
    /// description are skipped (their subtrees too) but still shift the
    /// split index.
    pub fn inorder_representation(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        let midpoint = node.children.len() / 2;
        let mut repr = String::new();

        for &child in &node.children[..midpoint] {
            if self.is_described(child) {
                repr.push_str(&self.inorder_representation(child));
                repr.push(' ');
            }
        }
        repr.push_str(node.description.as_deref().unwrap_or(""));
        repr.push(' ');
        for &child in &node.children[midpoint..] {
            if self.is_described(child) {
                repr.push_str(&self.inorder_representation(child));
                repr.push(' ');
            }
        }

        repr.pop();
        repr
    }

    /// Load a scene file and build the graph plus its camera.
    pub fn load(path: &Path) -> Result<(SceneGraph, Camera), SceneError> {
        let text = std::fs::read_to_string(path)?;
        let file: SceneFile = serde_json::from_str(&text)?;
        Self::from_spec(&file)
    }

    /// Build the graph from a parsed scene file. Parents must be declared
    /// before the objects that reference them.
    pub fn from_spec(file: &SceneFile) -> Result<(SceneGraph, Camera), SceneError> {
        let mut graph = SceneGraph::new();
        let mut by_name: HashMap<&str, NodeId> = HashMap::new();

        for object in &file.objects {
            if by_name.contains_key(object.name.as_str()) {
                return Err(SceneError::DuplicateName(object.name.clone()));
            }
            let parent = match &object.parent {
                None => None,
                Some(parent_name) => Some(*by_name.get(parent_name.as_str()).ok_or_else(
                    || SceneError::UnknownParent {
                        child: object.name.clone(),
                        parent: parent_name.clone(),
                    },
                )?),
            };
            let id = graph.add_node(
                parent,
                object.name.clone(),
                object.description.clone(),
                Point3::new(object.position[0], object.position[1], object.position[2]),
                object.collider,
            );
            by_name.insert(object.name.as_str(), id);
        }

        Ok((graph, Camera::from_spec(&file.camera)))
    }
}

/// Serde shape of a scene file: camera plus an ordered object list.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneFile {
    pub camera: CameraSpec,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub collider: Option<Collider>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("object {child:?} references unknown parent {parent:?}")]
    UnknownParent { child: String, parent: String },
    #[error("duplicate object name: {0}")]
    DuplicateName(String),
}
