#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};

use refpane::channels::Channels;
use refpane::model::{Branch, Head, ObjectId, Tag};
use refpane::ref_view::{Group, GroupKind, RefListener, RefView};
use refpane::repo::{BranchSet, LoadEvent, LoadSender, RepoData, TagSet};
use refpane::window::Window;

pub fn oid(seed: &str) -> ObjectId {
    let hex: String = seed
        .bytes()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
        .chars()
        .chain(std::iter::repeat('0'))
        .take(40)
        .collect();
    ObjectId(hex)
}

pub fn branch(name: &str) -> Branch {
    Branch {
        name: name.to_string(),
        oid: oid(name),
    }
}

pub fn tag(name: &str) -> Tag {
    Tag {
        name: name.to_string(),
        oid: oid(name),
    }
}

#[derive(Default)]
struct FakeState {
    head: Option<Head>,
    branches: BranchSet,
    tags: TagSet,
    senders: Vec<LoadSender>,
}

/// In-memory `RepoData`. Loads complete immediately unless `hold_loads` was called.
#[derive(Default)]
pub struct FakeRepo {
    state: Mutex<FakeState>,
    hold: Mutex<bool>,
}

impl FakeRepo {
    pub fn new(local: &[&str], remote: &[&str], tags: &[&str]) -> Self {
        let repo = Self::default();
        repo.set_branches(local, remote);
        repo.set_tags(tags);
        if let Some(first) = local.first() {
            repo.set_head_branch(first);
        }
        repo
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_branches(&self, local: &[&str], remote: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.branches = BranchSet {
            local: local.iter().map(|n| branch(n)).collect(),
            remote: remote.iter().map(|n| branch(n)).collect(),
            loading: false,
        };
    }

    pub fn set_tags(&self, tags: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.tags = TagSet {
            tags: tags.iter().map(|n| tag(n)).collect(),
            loading: false,
        };
    }

    pub fn set_head_branch(&self, name: &str) {
        self.state.lock().unwrap().head = Some(Head {
            oid: oid(name),
            branch: Some(branch(name)),
        });
    }

    pub fn set_detached_head(&self, id: ObjectId) {
        self.state.lock().unwrap().head = Some(Head {
            oid: id,
            branch: None,
        });
    }

    pub fn set_loading(&self, branches: bool, tags: bool) {
        let mut state = self.state.lock().unwrap();
        state.branches.loading = branches;
        state.tags.loading = tags;
    }

    /// Keeps loads pending until `finish_loads`.
    pub fn hold_loads(&self) {
        *self.hold.lock().unwrap() = true;
    }

    pub fn finish_loads(&self) {
        let senders = {
            let mut state = self.state.lock().unwrap();
            state.branches.loading = false;
            state.tags.loading = false;
            std::mem::take(&mut state.senders)
        };
        if let [branches, tags, ..] = senders.as_slice() {
            branches.send(LoadEvent::Branches).unwrap();
            tags.send(LoadEvent::LocalTags).unwrap();
        }
    }

    fn start_load(&self, done: LoadSender, event: LoadEvent, mark: impl FnOnce(&mut FakeState)) {
        if *self.hold.lock().unwrap() {
            let mut state = self.state.lock().unwrap();
            mark(&mut state);
            state.senders.push(done);
        } else {
            done.send(event).unwrap();
        }
    }
}

impl RepoData for FakeRepo {
    fn load_head(&self) -> Result<()> {
        if self.state.lock().unwrap().head.is_none() {
            bail!("no HEAD");
        }
        Ok(())
    }

    fn load_branches(&self, done: LoadSender) -> Result<()> {
        self.start_load(done, LoadEvent::Branches, |s| s.branches.loading = true);
        Ok(())
    }

    fn load_local_tags(&self, done: LoadSender) -> Result<()> {
        self.start_load(done, LoadEvent::LocalTags, |s| s.tags.loading = true);
        Ok(())
    }

    fn branches(&self) -> BranchSet {
        self.state.lock().unwrap().branches.clone()
    }

    fn local_tags(&self) -> TagSet {
        self.state.lock().unwrap().tags.clone()
    }

    fn head(&self) -> Option<Head> {
        self.state.lock().unwrap().head.clone()
    }
}

#[derive(Default)]
pub struct RecordingChannels {
    pub redraws: Mutex<usize>,
    pub statuses: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<Vec<String>>>,
}

impl RecordingChannels {
    pub fn redraw_count(&self) -> usize {
        *self.redraws.lock().unwrap()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<Vec<String>> {
        self.errors.lock().unwrap().clone()
    }
}

impl Channels for RecordingChannels {
    fn update_display(&self) {
        *self.redraws.lock().unwrap() += 1;
    }

    fn report_status(&self, status: String) {
        self.statuses.lock().unwrap().push(status);
    }

    fn report_errors(&self, errors: Vec<String>) {
        self.errors.lock().unwrap().push(errors);
    }
}

#[derive(Default)]
pub struct RecordingListener {
    pub selected: Mutex<Vec<(String, ObjectId)>>,
    pub fail: bool,
}

impl RecordingListener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Vec<(String, ObjectId)> {
        self.selected.lock().unwrap().clone()
    }
}

impl RefListener for RecordingListener {
    fn on_ref_select(&self, ref_name: &str, oid: &ObjectId) -> Result<()> {
        self.selected
            .lock()
            .unwrap()
            .push((ref_name.to_string(), oid.clone()));
        if self.fail {
            bail!("listener rejected {}", ref_name);
        }
        Ok(())
    }
}

pub struct Harness {
    pub repo: Arc<FakeRepo>,
    pub channels: Arc<RecordingChannels>,
    pub listener: Arc<RecordingListener>,
    pub view: RefView,
    pub loads: tokio::sync::mpsc::UnboundedReceiver<LoadEvent>,
}

impl Harness {
    /// Builds a view over `repo` with `groups`, initialises it and applies every load event sent
    /// so far.
    pub fn new(repo: FakeRepo, groups: Vec<Group>) -> Result<Self> {
        let repo = repo.shared();
        let channels = Arc::new(RecordingChannels::default());
        let listener = Arc::new(RecordingListener::default());
        let view = RefView::new(repo.clone(), channels.clone()).with_groups(groups);
        view.register_ref_listener(listener.clone());

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        view.initialise(&tx)?;

        let mut harness = Self {
            repo,
            channels,
            listener,
            view,
            loads: rx,
        };
        harness.pump();
        Ok(harness)
    }

    pub fn pump(&mut self) {
        while let Ok(event) = self.loads.try_recv() {
            self.view.on_load_event(event);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.view.line_count())
            .map(|i| self.view.line(i))
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.view.view_pos().selected_index()
    }

    pub fn selected_line(&self) -> String {
        self.view.line(self.selected())
    }

    pub fn render(&self, rows: usize, cols: usize) -> Result<Window> {
        let mut win = Window::new(rows, cols);
        self.view.render(&mut win)?;
        Ok(win)
    }
}

pub fn branches_and_tags_expanded() -> Vec<Group> {
    vec![
        Group::new("Branches", GroupKind::LocalBranches, true),
        Group::new("Tags", GroupKind::Tags, true),
    ]
}

pub fn all_groups(expanded: bool) -> Vec<Group> {
    vec![
        Group::new("Branches", GroupKind::LocalBranches, expanded),
        Group::new("Remote Branches", GroupKind::RemoteBranches, expanded),
        Group::new("Tags", GroupKind::Tags, expanded),
    ]
}

/// Work tree with one commit on `main`, branches `dev` and `feature/x`, a lightweight tag `v1`, an
/// annotated tag `v2` and a remote-tracking `origin/main` with a symbolic `origin/HEAD`.
pub fn init_git_repo(dir: &std::path::Path) -> Result<git2::Oid> {
    use anyhow::Context;

    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = git2::Repository::init_opts(dir, &opts).context("init repository")?;
    let sig = git2::Signature::now("Ref Pane", "refpane@example.com")?;

    let tree_id = repo.index()?.write_tree().context("write tree")?;
    let tree = repo.find_tree(tree_id)?;
    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .context("commit")?;
    let commit = repo.find_commit(oid)?;

    repo.branch("dev", &commit, false)?;
    repo.branch("feature/x", &commit, false)?;
    repo.tag_lightweight("v1", commit.as_object(), false)?;
    repo.tag("v2", commit.as_object(), &sig, "release v2", false)?;
    repo.reference("refs/remotes/origin/main", oid, true, "fetch")?;
    repo.reference_symbolic(
        "refs/remotes/origin/HEAD",
        "refs/remotes/origin/main",
        true,
        "clone",
    )?;

    Ok(oid)
}
