//! Tag hierarchy module - ranked, recursively partitioned tag trees.

mod hierarchy_model;
mod tag_hierarchy_builder;


pub use hierarchy_model::{
    HierarchyBucket, HierarchyType, TagHierarchy, TagHierarchyNode, TagImportanceScheme,
};
pub use tag_hierarchy_builder::TagHierarchyBuilder;
