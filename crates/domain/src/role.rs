// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::scope::ScopeKind;

/// Actor roles in the ministry hierarchy, highest authority first.
///
/// Role names are stable wire identifiers; capabilities are never derived
/// from the enum itself but read from the seeded [`RoleHierarchy`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ministry administrator. No location scope; sees everything.
    Administrator,
    /// Zone-level official overseeing several provinces.
    Zone,
    /// Provincial office of education official.
    Provincial,
    /// District department of education official.
    Department,
    /// School-cluster coordinator.
    Cluster,
    /// School director.
    Director,
    /// Classroom teacher or mentee.
    Teacher,
}

impl Role {
    /// All roles in rank order, highest authority first.
    pub const ALL: [Self; 7] = [
        Self::Administrator,
        Self::Zone,
        Self::Provincial,
        Self::Department,
        Self::Cluster,
        Self::Director,
        Self::Teacher,
    ];

    /// Returns the stable string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Zone => "zone",
            Self::Provincial => "provincial",
            Self::Department => "department",
            Self::Cluster => "cluster",
            Self::Director => "director",
            Self::Teacher => "teacher",
        }
    }

    /// The scope level this role is stationed at.
    ///
    /// `None` only for `Administrator`, the one role without a location
    /// scope.
    #[must_use]
    pub const fn station(&self) -> Option<ScopeKind> {
        match self {
            Self::Administrator => None,
            Self::Zone => Some(ScopeKind::Zone),
            Self::Provincial => Some(ScopeKind::Province),
            Self::Department => Some(ScopeKind::Department),
            Self::Cluster => Some(ScopeKind::Cluster),
            Self::Director | Self::Teacher => Some(ScopeKind::School),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Administrator => 0,
            Self::Zone => 1,
            Self::Provincial => 2,
            Self::Department => 3,
            Self::Cluster => 4,
            Self::Director => 5,
            Self::Teacher => 6,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Self::Administrator),
            "zone" => Ok(Self::Zone),
            "provincial" => Ok(Self::Provincial),
            "department" => Ok(Self::Department),
            "cluster" => Ok(Self::Cluster),
            "director" => Ok(Self::Director),
            "teacher" => Ok(Self::Teacher),
            other => Err(DomainError::UnknownRole {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the `role_hierarchy_access` capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHierarchyEntry {
    /// The role this row describes.
    pub role: Role,
    /// Numeric authority level, strictly decreasing from Administrator
    /// down to Teacher.
    pub level: i32,
    /// Whether the role may approve or reject submitted missions.
    pub can_approve_missions: bool,
    /// Whether the role may view aggregated analytics.
    pub can_view_analytics: bool,
}

/// The in-memory capability table, loaded once at startup.
///
/// The seeded database table is the single source of truth; this type
/// only validates and indexes it. Construction fails unless every role
/// is present exactly once with strictly decreasing levels, so lookups
/// after construction are infallible and can never fail open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    entries: [RoleHierarchyEntry; 7],
}

impl RoleHierarchy {
    /// Builds the hierarchy from the seeded table rows.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRoleHierarchy`] if a role is missing
    /// or duplicated, or if levels are not strictly decreasing from
    /// Administrator to Teacher. An empty table is therefore fatal.
    pub fn from_entries(rows: &[RoleHierarchyEntry]) -> Result<Self, DomainError> {
        let mut slots: [Option<RoleHierarchyEntry>; 7] = [None; 7];
        for row in rows {
            let slot: &mut Option<RoleHierarchyEntry> = &mut slots[row.role.index()];
            if slot.is_some() {
                return Err(DomainError::InvalidRoleHierarchy {
                    reason: format!("duplicate entry for role '{}'", row.role),
                });
            }
            *slot = Some(*row);
        }

        let mut entries: [RoleHierarchyEntry; 7] = [RoleHierarchyEntry {
            role: Role::Teacher,
            level: 0,
            can_approve_missions: false,
            can_view_analytics: false,
        }; 7];
        for role in Role::ALL {
            match slots[role.index()] {
                Some(entry) => entries[role.index()] = entry,
                None => {
                    return Err(DomainError::InvalidRoleHierarchy {
                        reason: format!("missing entry for role '{role}'"),
                    });
                }
            }
        }

        for pair in entries.windows(2) {
            if pair[1].level >= pair[0].level {
                return Err(DomainError::InvalidRoleHierarchy {
                    reason: format!(
                        "level of '{}' ({}) must be below level of '{}' ({})",
                        pair[1].role, pair[1].level, pair[0].role, pair[0].level
                    ),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Numeric authority level of a role.
    #[must_use]
    pub const fn rank(&self, role: Role) -> i32 {
        self.entries[role.index()].level
    }

    /// Whether the role may approve or reject submitted missions.
    #[must_use]
    pub const fn can_approve(&self, role: Role) -> bool {
        self.entries[role.index()].can_approve_missions
    }

    /// Whether the role may view aggregated analytics.
    #[must_use]
    pub const fn can_view_analytics(&self, role: Role) -> bool {
        self.entries[role.index()].can_view_analytics
    }

    /// Whether `a` holds strictly more authority than `b`.
    #[must_use]
    pub const fn outranks(&self, a: Role, b: Role) -> bool {
        self.rank(a) > self.rank(b)
    }

    /// The validated table rows in rank order.
    #[must_use]
    pub const fn entries(&self) -> &[RoleHierarchyEntry; 7] {
        &self.entries
    }
}
