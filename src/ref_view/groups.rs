use tracing::trace;

use crate::config::GroupConfig;
use crate::model::ObjectId;
use crate::repo::RepoData;

use super::chain::FilterChain;
use super::row::{DisplayRow, GroupId, GroupKind, RowKind};

/// Appends a group's rows to the chain.
pub type RowGenerator = fn(&Group, GroupId, &dyn RepoData, &mut FilterChain);

pub struct Group {
    name: String,
    kind: GroupKind,
    expanded: bool,
    generator: RowGenerator,
}

impl Group {
    pub fn new(name: impl Into<String>, kind: GroupKind, expanded: bool) -> Self {
        let generator: RowGenerator = match kind {
            GroupKind::LocalBranches | GroupKind::RemoteBranches => generate_branches,
            GroupKind::Tags => generate_tags,
        };
        Self {
            name: name.into(),
            kind,
            expanded,
            generator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(super) fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub(super) fn generate(&self, id: GroupId, repo_data: &dyn RepoData, chain: &mut FilterChain) {
        (self.generator)(self, id, repo_data, chain)
    }
}

pub fn default_groups(cfg: &GroupConfig) -> Vec<Group> {
    vec![
        Group::new("Branches", GroupKind::LocalBranches, cfg.branches_expanded),
        Group::new(
            "Remote Branches",
            GroupKind::RemoteBranches,
            cfg.remote_branches_expanded,
        ),
        Group::new("Tags", GroupKind::Tags, cfg.tags_expanded),
    ]
}

pub fn detached_head_label(oid: &ObjectId) -> String {
    format!("HEAD detached at {}", oid.short())
}

fn generate_branches(group: &Group, id: GroupId, repo_data: &dyn RepoData, chain: &mut FilterChain) {
    let branches = repo_data.branches();
    if branches.loading {
        chain.add(DisplayRow::loading(id));
        return;
    }

    let mut index = 1;
    let (kind, entries) = match group.kind() {
        GroupKind::LocalBranches => {
            if let Some(head) = repo_data.head().filter(|h| h.is_detached()) {
                chain.add(DisplayRow::entry(
                    RowKind::LocalBranch,
                    &detached_head_label(&head.oid),
                    head.oid.clone(),
                    id,
                    index,
                ));
                index += 1;
            }
            (RowKind::LocalBranch, branches.local)
        }
        _ => (RowKind::RemoteBranch, branches.remote),
    };

    trace!(group = group.name(), entries = entries.len(), "generating branch rows");
    for branch in entries.iter() {
        chain.add(DisplayRow::entry(
            kind,
            &branch.name,
            branch.oid.clone(),
            id,
            index,
        ));
        index += 1;
    }
}

fn generate_tags(group: &Group, id: GroupId, repo_data: &dyn RepoData, chain: &mut FilterChain) {
    let tags = repo_data.local_tags();
    if tags.loading {
        chain.add(DisplayRow::loading(id));
        return;
    }

    trace!(group = group.name(), entries = tags.tags.len(), "generating tag rows");
    for (i, tag) in tags.tags.iter().enumerate() {
        chain.add(DisplayRow::entry(
            RowKind::Tag,
            &tag.name,
            tag.oid.clone(),
            id,
            i + 1,
        ));
    }
}
