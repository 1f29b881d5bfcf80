use crate::repo::RepoData;

use super::row::{GroupKind, RowKind};
use super::RefViewState;

impl RefViewState {
    pub(super) fn footer(&self, repo_data: &dyn RepoData) -> Option<String> {
        let filters = self.chain.filter_depth();
        if filters > 0 {
            let plural = if filters > 1 { "s" } else { "" };
            return Some(format!("{} filter{} applied", filters, plural));
        }

        let row = self
            .chain
            .visible_rows()
            .get(self.cursor.selected_index())?;

        let footer = match row.kind {
            RowKind::GroupHeader(GroupKind::LocalBranches) => {
                let branches = repo_data.branches();
                if branches.loading {
                    "Branches: Loading...".to_string()
                } else {
                    format!("Branches: {}", local_branch_total(repo_data, branches.local.len()))
                }
            }
            RowKind::GroupHeader(GroupKind::RemoteBranches) => {
                let branches = repo_data.branches();
                if branches.loading {
                    "Remote Branches: Loading...".to_string()
                } else {
                    format!("Remote Branches: {}", branches.remote.len())
                }
            }
            RowKind::GroupHeader(GroupKind::Tags) => {
                let tags = repo_data.local_tags();
                if tags.loading {
                    "Tags: Loading...".to_string()
                } else {
                    format!("Tags: {}", tags.tags.len())
                }
            }
            RowKind::LocalBranch => {
                let local = repo_data.branches().local.len();
                format!(
                    "Branch {} of {}",
                    row.index_in_group,
                    local_branch_total(repo_data, local)
                )
            }
            RowKind::RemoteBranch => format!(
                "Remote Branch {} of {}",
                row.index_in_group,
                repo_data.branches().remote.len()
            ),
            RowKind::Tag => format!(
                "Tag {} of {}",
                row.index_in_group,
                repo_data.local_tags().tags.len()
            ),
            RowKind::Spacer | RowKind::Loading => return None,
        };

        Some(footer)
    }
}

/// Named local branches plus the synthetic detached HEAD entry, if shown.
fn local_branch_total(repo_data: &dyn RepoData, named: usize) -> usize {
    let detached = repo_data.head().is_some_and(|h| h.is_detached());
    named + usize::from(detached)
}
