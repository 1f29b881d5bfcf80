use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result, anyhow};
use git2::{BranchType, ReferenceType, Repository};
use tokio::runtime::Handle;
use tracing::{debug, error};

use super::{BranchSet, LoadEvent, LoadSender, LoadSource, RepoData, TagSet};
use crate::model::{Branch, Head, ObjectId, Tag};

#[derive(Debug)]
struct Snapshot {
    head: Option<Head>,
    branches: BranchSet,
    tags: TagSet,
}

// git2::Repository is not Sync, so every load opens its own handle.
pub struct GitRepoData {
    path: PathBuf,
    runtime: Handle,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl GitRepoData {
    pub fn open(path: &Path, runtime: Handle) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("open git repository at {}", path.display()))?;
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self {
            path: root,
            runtime,
            snapshot: Arc::new(RwLock::new(Snapshot {
                head: None,
                branches: BranchSet {
                    loading: true,
                    ..BranchSet::default()
                },
                tags: TagSet {
                    loading: true,
                    ..TagSet::default()
                },
            })),
        })
    }

    /// Work tree root (or git dir for bare repositories).
    pub fn root(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write(snapshot: &RwLock<Snapshot>) -> RwLockWriteGuard<'_, Snapshot> {
    snapshot.write().unwrap_or_else(PoisonError::into_inner)
}

fn send(done: &LoadSender, event: LoadEvent) {
    if done.send(event).is_err() {
        debug!("load event receiver dropped");
    }
}

impl RepoData for GitRepoData {
    fn load_head(&self) -> Result<()> {
        let repo = Repository::open(&self.path).context("open repository")?;
        let head = read_head(&repo)?;
        debug!(oid = %head.oid, detached = head.is_detached(), "loaded HEAD");
        write(&self.snapshot).head = Some(head);
        Ok(())
    }

    fn load_branches(&self, done: LoadSender) -> Result<()> {
        write(&self.snapshot).branches.loading = true;
        let path = self.path.clone();
        let snapshot = Arc::clone(&self.snapshot);

        self.runtime.spawn_blocking(move || {
            let event = match read_branches(&path) {
                Ok((local, remote)) => {
                    debug!(local = local.len(), remote = remote.len(), "branches loaded");
                    write(&snapshot).branches = BranchSet {
                        local: local.into(),
                        remote: remote.into(),
                        loading: false,
                    };
                    LoadEvent::Branches
                }
                Err(err) => {
                    error!("loading branches failed: {err:#}");
                    write(&snapshot).branches = BranchSet::default();
                    LoadEvent::Failed {
                        source: LoadSource::Branches,
                        error: format!("{err:#}"),
                    }
                }
            };
            send(&done, event);
        });

        Ok(())
    }

    fn load_local_tags(&self, done: LoadSender) -> Result<()> {
        write(&self.snapshot).tags.loading = true;
        let path = self.path.clone();
        let snapshot = Arc::clone(&self.snapshot);

        self.runtime.spawn_blocking(move || {
            let event = match read_tags(&path) {
                Ok(tags) => {
                    debug!(tags = tags.len(), "tags loaded");
                    write(&snapshot).tags = TagSet {
                        tags: tags.into(),
                        loading: false,
                    };
                    LoadEvent::LocalTags
                }
                Err(err) => {
                    error!("loading tags failed: {err:#}");
                    write(&snapshot).tags = TagSet::default();
                    LoadEvent::Failed {
                        source: LoadSource::LocalTags,
                        error: format!("{err:#}"),
                    }
                }
            };
            send(&done, event);
        });

        Ok(())
    }

    fn branches(&self) -> BranchSet {
        self.read().branches.clone()
    }

    fn local_tags(&self) -> TagSet {
        self.read().tags.clone()
    }

    fn head(&self) -> Option<Head> {
        self.read().head.clone()
    }
}

fn read_head(repo: &Repository) -> Result<Head> {
    let reference = repo.head().context("read HEAD")?;
    let oid = reference
        .target()
        .map(ObjectId::from)
        .ok_or_else(|| anyhow!("HEAD does not point at a commit"))?;

    let branch = if reference.is_branch() {
        reference.shorthand().map(|name| Branch {
            name: name.to_string(),
            oid: oid.clone(),
        })
    } else {
        None
    };

    Ok(Head { oid, branch })
}

fn read_branches(path: &Path) -> Result<(Vec<Branch>, Vec<Branch>)> {
    let repo = Repository::open(path).context("open repository")?;
    let mut local = Vec::new();
    let mut remote = Vec::new();

    for entry in repo.branches(None).context("list branches")? {
        let (branch, kind) = entry.context("read branch")?;
        let reference = branch.get();
        // origin/HEAD and friends
        if reference.kind() == Some(ReferenceType::Symbolic) {
            continue;
        }
        let Some(oid) = reference.target() else {
            continue;
        };
        let Some(name) = branch.name().context("decode branch name")? else {
            continue;
        };

        let branch = Branch {
            name: name.to_string(),
            oid: oid.into(),
        };
        match kind {
            BranchType::Local => local.push(branch),
            BranchType::Remote => remote.push(branch),
        }
    }

    local.sort_by(|a, b| a.name.cmp(&b.name));
    remote.sort_by(|a, b| a.name.cmp(&b.name));
    Ok((local, remote))
}

fn read_tags(path: &Path) -> Result<Vec<Tag>> {
    let repo = Repository::open(path).context("open repository")?;
    let mut tags = Vec::new();

    repo.tag_foreach(|oid, raw_name| {
        let raw_name = String::from_utf8_lossy(raw_name);
        let name = raw_name
            .strip_prefix("refs/tags/")
            .unwrap_or(&raw_name)
            .to_string();

        // Annotated tags point at a tag object; show the commit it tags.
        let target = repo
            .find_object(oid, None)
            .and_then(|obj| obj.peel_to_commit())
            .map(|commit| commit.id())
            .unwrap_or(oid);

        tags.push(Tag {
            name,
            oid: target.into(),
        });
        true
    })
    .context("list tags")?;

    tags.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tags)
}
