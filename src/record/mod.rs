// ============================================================================
// spark-collections - Records
// Typed field access layered on Map
// ============================================================================
//
// A record type is declared once as a `RecordShape` (a name plus field
// names). Its `RecordFactory` builds `Record` values, rejecting fields the
// shape does not declare. For compile-time named accessors see `record!`.
// ============================================================================

mod shape;
mod view;

pub use shape::{record, RecordFactory, RecordShape};
pub use view::Record;
