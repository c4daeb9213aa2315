pub mod crop_graph;
pub mod highlight;

pub use crop_graph::{CropGraph, GraphQuery, LinkDirection};
pub use highlight::{
    apply_highlight, compute_lineage, is_system_active, reset_highlight, EdgeStyle,
    HighlightSink, HighlightUpdate, NodeStyle, SystemFilter, VisualState,
};
