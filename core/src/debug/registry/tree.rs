//! Tree structure for hierarchical debug UI display

use super::DebugRegistry;

/// Tree node for hierarchical display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A group containing child nodes
    Group {
        name: String,
        children: Vec<TreeNode>,
    },
    /// A leaf property (index into `registry.properties()`)
    Property(usize),
    /// A leaf data source (index into `registry.data_sources()`)
    DataSource(usize),
}

impl DebugRegistry {
    /// Build a tree structure from the flat lists for UI rendering
    ///
    /// Names are split on `/`; properties come before data sources within
    /// each group, both in registration order.
    pub fn build_tree(&self) -> Vec<TreeNode> {
        let mut root_nodes: Vec<TreeNode> = Vec::new();

        for (idx, property) in self.properties.iter().enumerate() {
            let path_parts: Vec<&str> = property.name().split('/').collect();
            insert_into_tree(&mut root_nodes, &path_parts, TreeNode::Property(idx));
        }

        for (idx, source) in self.data_sources.iter().enumerate() {
            let path_parts: Vec<&str> = source.name().split('/').collect();
            insert_into_tree(&mut root_nodes, &path_parts, TreeNode::DataSource(idx));
        }

        root_nodes
    }
}

/// Insert a leaf at the end of `path_parts`, creating groups along the way
fn insert_into_tree(nodes: &mut Vec<TreeNode>, path_parts: &[&str], leaf: TreeNode) {
    let [group_name, rest @ ..] = path_parts else {
        return;
    };

    if rest.is_empty() {
        nodes.push(leaf);
        return;
    }

    let group_idx = nodes
        .iter()
        .position(|n| matches!(n, TreeNode::Group { name, .. } if name == group_name));

    match group_idx {
        Some(idx) => {
            if let TreeNode::Group { children, .. } = &mut nodes[idx] {
                insert_into_tree(children, rest, leaf);
            }
        }
        None => {
            let mut children = Vec::new();
            insert_into_tree(&mut children, rest, leaf);
            nodes.push(TreeNode::Group {
                name: group_name.to_string(),
                children,
            });
        }
    }
}
