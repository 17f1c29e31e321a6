// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scope tree loading.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::{ScopeNode, ScopeTree};

use crate::data_models::ScopeNodeRow;
use crate::diesel_schema::scope_nodes;
use crate::error::PersistenceError;

/// Loads the full location tree into memory.
///
/// Rows are inserted parent-first, ordered by level, so that every
/// parent link resolves during insertion. A row that fails the tree's
/// own validation means the table is corrupt, not merely stale.
///
/// # Errors
///
/// Returns an error if the query fails or a stored node cannot be
/// reconstructed into a valid tree.
pub fn load_scope_tree(conn: &mut SqliteConnection) -> Result<ScopeTree, PersistenceError> {
    let rows: Vec<ScopeNodeRow> = scope_nodes::table.load::<ScopeNodeRow>(conn)?;

    let mut nodes: Vec<ScopeNode> = rows
        .into_iter()
        .map(ScopeNode::try_from)
        .collect::<Result<Vec<ScopeNode>, PersistenceError>>()?;
    nodes.sort_by_key(|node| node.kind.depth());

    let mut tree: ScopeTree = ScopeTree::new();
    for node in nodes {
        tree.insert(node)
            .map_err(|err| PersistenceError::ReconstructionError(err.to_string()))?;
    }
    Ok(tree)
}
