pub mod crop;
pub mod hierarchy;

pub use crop::{corpus_from_bindings, CropRecord, ScoredRecord};
pub use hierarchy::{
    graph_parts_from_bindings, node_from_framed_details, wrap_label, HierarchyEdge, HierarchyNode,
    Membership, TypedAttribute,
};
