use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    PrevLine,
    NextLine,
    PrevPage,
    NextPage,
    FirstLine,
    LastLine,
    ScrollLeft,
    ScrollRight,
    Select,
    AddFilter,
    RemoveFilter,
    FilterPrompt,
    Search,
    SearchPrompt,
    SearchNext,
    SearchPrev,
    ClearSearch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionArg {
    Str(String),
    Int(i64),
}

impl ActionArg {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ActionArg::Str(s) => Some(s),
            ActionArg::Int(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub args: Vec<ActionArg>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    pub fn with_arg(kind: ActionKind, arg: ActionArg) -> Self {
        Self {
            kind,
            args: vec![arg],
        }
    }

    pub fn add_filter(query: impl Into<String>) -> Self {
        Self::with_arg(ActionKind::AddFilter, ActionArg::Str(query.into()))
    }

    pub fn search(pattern: impl Into<String>) -> Self {
        Self::with_arg(ActionKind::Search, ActionArg::Str(pattern.into()))
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Action::new(kind)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        for arg in &self.args {
            match arg {
                ActionArg::Str(s) => write!(f, " {:?}", s)?,
                ActionArg::Int(n) => write!(f, " {}", n)?,
            }
        }
        Ok(())
    }
}
