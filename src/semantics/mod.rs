// ============================================================================
// spark-collections - Value Semantics
// How elements are compared and how they are rendered as text
// ============================================================================

pub mod identity;
pub mod render;

pub use identity::{ByIdentity, Identity, Ref};
pub use render::{render, Render, Rendered};
