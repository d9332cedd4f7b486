// Professional Cataloguing Module
// Handles LCC call numbers, schedule trees, range indexes and tree dumps

pub mod classification;
pub mod range_index;
pub mod render;
pub mod tree_builder;

pub use classification::{CallNumber, validate_lcc};
pub use range_index::{CategoryIndex, RangeIndex, RangeTable};
pub use render::render_tree;
pub use tree_builder::build_tree;
