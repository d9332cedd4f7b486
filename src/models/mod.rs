pub mod forest;
pub mod item;
pub mod node;
pub mod schedule;
pub mod tree;

pub use forest::ClassificationForest;
pub use item::{ItemRecord, ItemSummary};
pub use node::{ClassificationNode, ItemEntry, NodeId, NodeKind, NumericRange};
pub use schedule::Schedule;
pub use tree::ClassificationTree;
