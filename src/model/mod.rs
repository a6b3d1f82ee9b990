mod association;
mod layout;

pub use association::{Association, AssociationTable};
pub use layout::{GraphLayout, LayoutEdge, NodeRole, PlacedNode, Point};
