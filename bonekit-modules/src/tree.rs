//! Arena of routable modules and the walk that enumerates them.
//!
//! Modules hang off each other under names. A module may be reachable from
//! several parents, including its own descendants, so the tree is really a
//! graph; [`ModuleTree::collect_modules`] visits every node at most once.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::{debug, trace, warn};

use crate::error::{ModulesError, Result};

/// Handle to one module node in a [`ModuleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct ModuleNode {
    type_name: String,
    children: BTreeMap<String, ModuleId>,
}

#[derive(Debug)]
pub struct ModuleTree {
    nodes: Vec<ModuleNode>,
}

impl ModuleTree {
    /// A tree holding only its root module.
    pub fn new(root_type: impl Into<String>) -> Self {
        Self {
            nodes: vec![ModuleNode {
                type_name: root_type.into(),
                children: BTreeMap::new(),
            }],
        }
    }

    pub fn root(&self) -> ModuleId {
        ModuleId(0)
    }

    /// Number of modules below the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when the root has no modules attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a module and attach it to `parent` under `name`.
    pub fn add_module(
        &mut self,
        parent: ModuleId,
        name: &str,
        type_name: impl Into<String>,
    ) -> Result<ModuleId> {
        self.check_edge(parent, name)?;
        let id = ModuleId(self.nodes.len());
        self.nodes.push(ModuleNode {
            type_name: type_name.into(),
            children: BTreeMap::new(),
        });
        self.nodes[parent.0].children.insert(name.to_string(), id);
        Ok(id)
    }

    /// Make an existing module reachable from `parent` under `name` as well.
    pub fn link(&mut self, parent: ModuleId, name: &str, target: ModuleId) -> Result<()> {
        self.node(target)?;
        self.check_edge(parent, name)?;
        self.nodes[parent.0].children.insert(name.to_string(), target);
        Ok(())
    }

    pub fn type_name(&self, id: ModuleId) -> Result<&str> {
        Ok(&self.node(id)?.type_name)
    }

    /// Named children of a module in name order.
    pub fn children(&self, id: ModuleId) -> Result<impl Iterator<Item = (&str, ModuleId)>> {
        Ok(self
            .node(id)?
            .children
            .iter()
            .map(|(name, child)| (name.as_str(), *child)))
    }

    fn node(&self, id: ModuleId) -> Result<&ModuleNode> {
        self.nodes
            .get(id.0)
            .ok_or(ModulesError::UnknownModule { id })
    }

    fn check_edge(&self, parent: ModuleId, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('.') {
            return Err(ModulesError::InvalidName {
                name: name.to_string(),
            });
        }
        let node = self.node(parent)?;
        if node.children.contains_key(name) {
            return Err(ModulesError::DuplicateChild {
                parent: node.type_name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Dotted paths of every module reachable from the root.
    ///
    /// Children are visited in name order and each module is collected under
    /// the first path that reaches it. Descent stops below `max_depth`.
    pub fn collect_modules(&self, max_depth: usize, trace_walk: bool) -> Vec<String> {
        let mut walk = Walk {
            tree: self,
            max_depth,
            trace_walk,
            visited: HashSet::from([self.root()]),
            paths: Vec::new(),
        };
        walk.visit(self.root(), 0, "");
        debug!(modules = walk.paths.len(), "collected modules");
        walk.paths
    }
}

struct Walk<'a> {
    tree: &'a ModuleTree,
    max_depth: usize,
    trace_walk: bool,
    visited: HashSet<ModuleId>,
    paths: Vec<String>,
}

impl Walk<'_> {
    fn visit(&mut self, parent: ModuleId, depth: usize, prefix: &str) {
        if depth > self.max_depth {
            warn!(depth, %parent, prefix, "reached maximum module depth");
            return;
        }

        let tree = self.tree;
        let node = &tree.nodes[parent.0];
        for (name, &child) in &node.children {
            if !self.visited.insert(child) {
                if self.trace_walk {
                    trace!(module = %child, name = name.as_str(), "already visited");
                }
                continue;
            }

            let path = format!("{prefix}{name}");
            if self.trace_walk {
                trace!(module = %child, path = path.as_str(), depth, "collected module");
            }
            self.paths.push(path.clone());
            self.visit(child, depth + 1, &format!("{path}."));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_in_name_order() {
        let mut tree = ModuleTree::new("Vi");
        let user = tree.add_module(tree.root(), "user", "User").unwrap();
        tree.add_module(tree.root(), "file", "File").unwrap();
        tree.add_module(user, "profile", "Profile").unwrap();
        tree.add_module(user, "group", "Group").unwrap();

        assert_eq!(
            tree.collect_modules(10, false),
            vec!["file", "user", "user.group", "user.profile"]
        );
    }

    #[test]
    fn test_cycle_terminates_and_visits_once() {
        let mut tree = ModuleTree::new("Vi");
        let a = tree.add_module(tree.root(), "a", "A").unwrap();
        let b = tree.add_module(a, "b", "B").unwrap();
        tree.link(b, "back", a).unwrap();
        tree.link(b, "home", tree.root()).unwrap();
        tree.link(tree.root(), "z", b).unwrap();

        assert_eq!(tree.collect_modules(10, true), vec!["a", "a.b"]);
    }

    #[test]
    fn test_depth_guard() {
        let mut tree = ModuleTree::new("Vi");
        let mut parent = tree.root();
        for i in 0..6 {
            parent = tree.add_module(parent, &format!("m{i}"), "M").unwrap();
        }
        // Depth 0 lists root's children, so max_depth 2 keeps three levels
        assert_eq!(
            tree.collect_modules(2, false),
            vec!["m0", "m0.m1", "m0.m1.m2"]
        );
        assert_eq!(tree.collect_modules(10, false).len(), 6);
    }

    #[test]
    fn test_rejects_bad_edges() {
        let mut tree = ModuleTree::new("Vi");
        tree.add_module(tree.root(), "user", "User").unwrap();

        assert!(matches!(
            tree.add_module(tree.root(), "user", "Other"),
            Err(ModulesError::DuplicateChild { .. })
        ));
        assert!(matches!(
            tree.add_module(tree.root(), "a.b", "AB"),
            Err(ModulesError::InvalidName { .. })
        ));
        assert!(matches!(
            tree.add_module(tree.root(), "", "Empty"),
            Err(ModulesError::InvalidName { .. })
        ));
        assert!(matches!(
            tree.link(tree.root(), "ghost", ModuleId(99)),
            Err(ModulesError::UnknownModule { .. })
        ));
    }

    #[test]
    fn test_children_and_type_names() {
        let mut tree = ModuleTree::new("Vi");
        assert!(tree.is_empty());
        let user = tree.add_module(tree.root(), "user", "User").unwrap();
        assert_eq!(tree.type_name(user).unwrap(), "User");
        assert_eq!(
            tree.children(tree.root()).unwrap().collect::<Vec<_>>(),
            vec![("user", user)]
        );
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }
}
