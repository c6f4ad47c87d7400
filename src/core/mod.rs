// ============================================================================
// spark-collections - Core Module
// Shared pointer alias, the collection contract, errors, and dynamic values
// ============================================================================

pub mod error;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use error::{Error, Result};
pub use types::{Collection, Element, Shared};
pub use value::{FromValue, Value};
