mod ids;
mod refs;

pub use ids::ObjectId;
pub use refs::{Branch, Head, Tag};
