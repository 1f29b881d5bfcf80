use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::model::{Branch, Head, Tag};

pub mod git;

pub use git::GitRepoData;

pub type LoadSender = UnboundedSender<LoadEvent>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSource {
    Branches,
    LocalTags,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSource::Branches => f.write_str("branches"),
            LoadSource::LocalTags => f.write_str("tags"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadEvent {
    Branches,
    LocalTags,
    Failed { source: LoadSource, error: String },
}

#[derive(Clone, Debug, Default)]
pub struct BranchSet {
    pub local: Arc<[Branch]>,
    pub remote: Arc<[Branch]>,
    pub loading: bool,
}

#[derive(Clone, Debug, Default)]
pub struct TagSet {
    pub tags: Arc<[Tag]>,
    pub loading: bool,
}

pub trait RepoData: Send + Sync {
    fn load_head(&self) -> Result<()>;

    /// Starts loading local and remote branches. Completion is signalled on `done`.
    fn load_branches(&self, done: LoadSender) -> Result<()>;

    fn load_local_tags(&self, done: LoadSender) -> Result<()>;

    fn branches(&self) -> BranchSet;

    fn local_tags(&self) -> TagSet;

    /// `None` until `load_head` has succeeded.
    fn head(&self) -> Option<Head>;
}
