use thiserror::Error;

/// Errors raised while reconstructing tree structure from parent pointers.
///
/// Cyclic chains are detected with an explicit visited set during traversal;
/// a dangling chain (missing parent) is not an error — those nodes pass
/// through a layout call untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("cyclic parent chain detected at node `{node_id}`")]
    CyclicHierarchy { node_id: String },
}
