//! Pure derived queries over a node/edge snapshot.
//!
//! - `relations`: children lists, parent lookup, id lookup and roots
//! - `visibility`: collapse closure and the visible node/edge subset

mod relations;
mod visibility;

pub use relations::{build_relationships, Relationships};
pub use visibility::{descendants_of, filter_visible, Visibility};
