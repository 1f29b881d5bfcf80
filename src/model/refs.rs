use serde::{Deserialize, Serialize};

use super::ObjectId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub oid: ObjectId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub oid: ObjectId,
}

/// Where HEAD points. `branch` is `None` when HEAD is detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Head {
    pub oid: ObjectId,
    pub branch: Option<Branch>,
}

impl Head {
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }
}
