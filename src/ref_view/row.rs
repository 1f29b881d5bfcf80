use crate::model::ObjectId;
use crate::window::ThemeComponent;

use super::groups::Group;

const ENTRY_INDENT: &str = "   ";

/// Index into the view's group list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    LocalBranches,
    RemoteBranches,
    Tags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    GroupHeader(GroupKind),
    LocalBranch,
    RemoteBranch,
    Tag,
    Spacer,
    Loading,
}

impl RowKind {
    pub fn is_selectable(self) -> bool {
        !matches!(self, RowKind::Spacer | RowKind::Loading)
    }

    pub fn is_entry(self) -> bool {
        matches!(self, RowKind::LocalBranch | RowKind::RemoteBranch | RowKind::Tag)
    }

    pub fn theme_component(self) -> ThemeComponent {
        match self {
            RowKind::GroupHeader(GroupKind::LocalBranches) => {
                ThemeComponent::RefviewLocalBranchesHeader
            }
            RowKind::GroupHeader(GroupKind::RemoteBranches) => {
                ThemeComponent::RefviewRemoteBranchesHeader
            }
            RowKind::GroupHeader(GroupKind::Tags) => ThemeComponent::RefviewTagsHeader,
            RowKind::LocalBranch => ThemeComponent::RefviewLocalBranch,
            RowKind::RemoteBranch => ThemeComponent::RefviewRemoteBranch,
            RowKind::Tag => ThemeComponent::RefviewTag,
            _ => ThemeComponent::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub text: String,
    pub oid: Option<ObjectId>,
    pub kind: RowKind,
    pub group: Option<GroupId>,
    /// 1-based position among the entries of its group; 0 for non-entry rows.
    pub index_in_group: usize,
}

impl DisplayRow {
    pub(super) fn header(group: &Group, id: GroupId) -> Self {
        let marker = if group.is_expanded() { '-' } else { '+' };
        Self {
            text: format!("  [{}] {}", marker, group.name()),
            oid: None,
            kind: RowKind::GroupHeader(group.kind()),
            group: Some(id),
            index_in_group: 0,
        }
    }

    pub(super) fn spacer() -> Self {
        Self {
            text: String::new(),
            oid: None,
            kind: RowKind::Spacer,
            group: None,
            index_in_group: 0,
        }
    }

    pub(super) fn loading(id: GroupId) -> Self {
        Self {
            text: format!("{}Loading...", ENTRY_INDENT),
            oid: None,
            kind: RowKind::Loading,
            group: Some(id),
            index_in_group: 0,
        }
    }

    pub(super) fn entry(
        kind: RowKind,
        name: &str,
        oid: ObjectId,
        id: GroupId,
        index_in_group: usize,
    ) -> Self {
        Self {
            text: format!("{}{}", ENTRY_INDENT, name),
            oid: Some(oid),
            kind,
            group: Some(id),
            index_in_group,
        }
    }

    pub fn name(&self) -> &str {
        self.text.trim_start()
    }

    pub fn is_selectable(&self) -> bool {
        self.kind.is_selectable()
    }
}
