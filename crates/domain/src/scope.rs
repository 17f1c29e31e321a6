// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::DomainError;

/// The five administrative levels, shallowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Top-level zone grouping several provinces.
    Zone,
    /// Province.
    Province,
    /// District department of education.
    Department,
    /// School cluster.
    Cluster,
    /// Individual school.
    School,
}

impl ScopeKind {
    /// Depth in the tree; zones are 0, schools are 4.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        match self {
            Self::Zone => 0,
            Self::Province => 1,
            Self::Department => 2,
            Self::Cluster => 3,
            Self::School => 4,
        }
    }

    /// The kind a parent node must have; `None` for zones.
    #[must_use]
    pub const fn parent_kind(&self) -> Option<Self> {
        match self {
            Self::Zone => None,
            Self::Province => Some(Self::Zone),
            Self::Department => Some(Self::Province),
            Self::Cluster => Some(Self::Department),
            Self::School => Some(Self::Cluster),
        }
    }

    /// Returns the stable string form of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zone => "zone",
            Self::Province => "province",
            Self::Department => "department",
            Self::Cluster => "cluster",
            Self::School => "school",
        }
    }
}

impl FromStr for ScopeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zone" => Ok(Self::Zone),
            "province" => Ok(Self::Province),
            "department" => Ok(Self::Department),
            "cluster" => Ok(Self::Cluster),
            "school" => Ok(Self::School),
            other => Err(DomainError::InvalidScopeKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One node of the administrative hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeNode {
    /// Stable string id, e.g. `"zone-1"` or `"school-412"`.
    pub id: String,
    /// The node's level.
    pub kind: ScopeKind,
    /// Parent node id; `None` only for zones.
    pub parent_id: Option<String>,
}

impl ScopeNode {
    /// Creates a node without validating linkage; the tree validates on
    /// insert.
    #[must_use]
    pub const fn new(id: String, kind: ScopeKind, parent_id: Option<String>) -> Self {
        Self {
            id,
            kind,
            parent_id,
        }
    }
}

/// The administrative hierarchy, loaded once at startup and immutable
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTree {
    nodes: HashMap<String, ScopeNode>,
}

impl ScopeTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, parent-first.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateScopeNode`] if the id is taken,
    /// [`DomainError::ScopeDepthMismatch`] if the node's kind is not
    /// exactly one level below its parent's (or a zone carries a parent),
    /// and [`DomainError::OrphanScopeNode`] if the parent is not in the
    /// tree.
    pub fn insert(&mut self, node: ScopeNode) -> Result<(), DomainError> {
        if self.nodes.contains_key(&node.id) {
            return Err(DomainError::DuplicateScopeNode { node_id: node.id });
        }
        match (&node.parent_id, node.kind.parent_kind()) {
            (None, None) => {}
            (Some(parent_id), Some(required_kind)) => {
                let parent: &ScopeNode = self.nodes.get(parent_id).ok_or_else(|| {
                    DomainError::OrphanScopeNode {
                        node_id: node.id.clone(),
                        parent_id: parent_id.clone(),
                    }
                })?;
                if parent.kind != required_kind {
                    return Err(DomainError::ScopeDepthMismatch {
                        node_id: node.id,
                        kind: node.kind,
                        parent_kind: Some(parent.kind),
                    });
                }
            }
            (None, Some(_)) | (Some(_), None) => {
                return Err(DomainError::ScopeDepthMismatch {
                    node_id: node.id,
                    kind: node.kind,
                    parent_kind: None,
                });
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownScopeNode`] for an id not in the
    /// tree. Unknown ids are never treated as an empty scope.
    pub fn get(&self, node_id: &str) -> Result<&ScopeNode, DomainError> {
        self.nodes
            .get(node_id)
            .ok_or_else(|| DomainError::UnknownScopeNode {
                node_id: node_id.to_string(),
            })
    }

    /// Whether the tree holds a node with this id.
    #[must_use]
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `ancestor_id` appears on `node_id`'s path to the root.
    ///
    /// A node is its own ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownScopeNode`] if either id is not in
    /// the tree.
    pub fn is_ancestor_of(&self, ancestor_id: &str, node_id: &str) -> Result<bool, DomainError> {
        // Validate the ancestor id up front so an unknown id is always an
        // error rather than a false result.
        self.get(ancestor_id)?;
        let mut current: &ScopeNode = self.get(node_id)?;
        loop {
            if current.id == ancestor_id {
                return Ok(true);
            }
            match &current.parent_id {
                Some(parent_id) => current = self.get(parent_id)?,
                None => return Ok(false),
            }
        }
    }

    /// The node's path from itself up to its zone.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownScopeNode`] if the id is not in the
    /// tree.
    pub fn path_to_root(&self, node_id: &str) -> Result<Vec<&ScopeNode>, DomainError> {
        let mut path: Vec<&ScopeNode> = Vec::new();
        let mut current: &ScopeNode = self.get(node_id)?;
        loop {
            path.push(current);
            match &current.parent_id {
                Some(parent_id) => current = self.get(parent_id)?,
                None => return Ok(path),
            }
        }
    }

    /// All nodes at or below the given node.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownScopeNode`] if the id is not in the
    /// tree.
    pub fn descendants(&self, node_id: &str) -> Result<Vec<&ScopeNode>, DomainError> {
        self.get(node_id)?;
        let mut found: Vec<&ScopeNode> = Vec::new();
        for node in self.nodes.values() {
            if self.is_ancestor_of(node_id, &node.id)? {
                found.push(node);
            }
        }
        Ok(found)
    }
}

/// An actor's position in the hierarchy: a contiguous prefix of a
/// root-to-leaf path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationScope {
    /// The zone; always present.
    pub zone_id: String,
    /// The province, when the scope reaches that deep.
    pub province_id: Option<String>,
    /// The department, when the scope reaches that deep.
    pub department_id: Option<String>,
    /// The cluster, when the scope reaches that deep.
    pub cluster_id: Option<String>,
    /// The school, when the scope reaches that deep.
    pub school_id: Option<String>,
}

impl LocationScope {
    /// A scope ending at the zone level.
    #[must_use]
    pub const fn zone(zone_id: String) -> Self {
        Self {
            zone_id,
            province_id: None,
            department_id: None,
            cluster_id: None,
            school_id: None,
        }
    }

    /// The deepest node id present in the scope.
    #[must_use]
    pub fn most_specific(&self) -> &str {
        self.school_id
            .as_deref()
            .or(self.cluster_id.as_deref())
            .or(self.department_id.as_deref())
            .or(self.province_id.as_deref())
            .unwrap_or(&self.zone_id)
    }

    /// The level of the deepest node present in the scope.
    #[must_use]
    pub const fn most_specific_kind(&self) -> ScopeKind {
        if self.school_id.is_some() {
            ScopeKind::School
        } else if self.cluster_id.is_some() {
            ScopeKind::Cluster
        } else if self.department_id.is_some() {
            ScopeKind::Department
        } else if self.province_id.is_some() {
            ScopeKind::Province
        } else {
            ScopeKind::Zone
        }
    }

    /// Validates that the scope is a contiguous, correctly-linked path
    /// prefix in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownScopeNode`] for an id not in the
    /// tree and [`DomainError::MalformedLocationScope`] when a level is
    /// skipped, a node has the wrong kind, or a node does not link to the
    /// declared parent.
    pub fn validate(&self, tree: &ScopeTree) -> Result<(), DomainError> {
        let levels: [(Option<&str>, ScopeKind); 5] = [
            (Some(self.zone_id.as_str()), ScopeKind::Zone),
            (self.province_id.as_deref(), ScopeKind::Province),
            (self.department_id.as_deref(), ScopeKind::Department),
            (self.cluster_id.as_deref(), ScopeKind::Cluster),
            (self.school_id.as_deref(), ScopeKind::School),
        ];

        let mut previous: Option<&str> = None;
        for (id, kind) in levels {
            match id {
                Some(id) => {
                    let node: &ScopeNode = tree.get(id)?;
                    if node.kind != kind {
                        return Err(DomainError::MalformedLocationScope {
                            reason: format!(
                                "'{id}' is a {} node, expected {kind}",
                                node.kind.as_str()
                            ),
                        });
                    }
                    if node.parent_id.as_deref() != previous {
                        return Err(DomainError::MalformedLocationScope {
                            reason: format!("'{id}' does not belong to the declared parent"),
                        });
                    }
                    previous = Some(id);
                }
                None => {
                    // Once a level is absent every deeper level must be too.
                    let deeper: bool = levels
                        .iter()
                        .any(|(other, other_kind)| other.is_some() && other_kind.depth() > kind.depth());
                    if deeper {
                        return Err(DomainError::MalformedLocationScope {
                            reason: format!("scope skips the {kind} level"),
                        });
                    }
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}
