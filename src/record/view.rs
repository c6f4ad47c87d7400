// ============================================================================
// spark-collections - Records
// A named-field view over a Map, checked against a RecordShape
// ============================================================================

use std::fmt;
use std::hash::Hasher;

use tracing::trace;

use crate::collections::Map;
use crate::core::error::Result;
use crate::core::types::Shared;
use crate::core::value::{FromValue, Value};
use crate::record::shape::RecordShape;
use crate::semantics::identity::Identity;
use crate::semantics::render::Render;

/// An immutable record: field values stored in a `Map`, keyed by field name.
///
/// Every key is a field declared by the record's [`RecordShape`]. A record
/// is its own instance: two records wrapping the same map are still
/// different records.
///
/// # Example
///
/// ```
/// use spark_collections::{record, Value};
///
/// let person = record("Person", ["name", "age"]);
/// let p = person.create([("name", Value::from("Thomas")), ("age", Value::from(34))])?;
///
/// let renamed = p.set("name", "Tom")?;
/// assert_eq!(renamed.get("name"), Some(&Value::from("Tom")));
/// assert_eq!(p.get("name"), Some(&Value::from("Thomas")));
///
/// // Writing the current value returns the same record
/// assert!(p.set("name", "Thomas")?.ptr_eq(&p));
///
/// let age: Option<i64> = p.field("age")?;
/// assert_eq!(age, Some(34));
/// # Ok::<(), spark_collections::Error>(())
/// ```
pub struct Record {
    inner: Shared<RecordInner>,
}

struct RecordInner {
    shape: Shared<RecordShape>,
    fields: Map<Shared<str>, Value>,
}

impl Record {
    pub(crate) fn new(shape: Shared<RecordShape>, fields: Map<Shared<str>, Value>) -> Self {
        Self {
            inner: Shared::new(RecordInner { shape, fields }),
        }
    }

    pub fn shape(&self) -> &RecordShape {
        &self.inner.shape
    }

    /// Shorthand for `shape().name()`.
    pub fn name(&self) -> &str {
        self.inner.shape.name()
    }

    /// The current value of `name`, or `None` if it is not set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.fields.get(name)
    }

    /// Typed read of `name`.
    pub fn field<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        self.get(name).map(T::from_value).transpose()
    }

    pub fn has(&self, name: &str) -> bool {
        self.inner.fields.has(name)
    }

    /// Names of the fields that are set, in insertion order.
    pub fn keys(&self) -> Vec<Shared<str>> {
        self.inner.fields.keys()
    }

    /// The backing map.
    pub fn as_map(&self) -> &Map<Shared<str>, Value> {
        &self.inner.fields
    }

    pub fn into_map(self) -> Map<Shared<str>, Value> {
        self.inner.fields.clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(&self.inner, &other.inner)
    }

    /// Sets a declared field, returning a new record.
    ///
    /// Returns the receiver when `value` is the same as the current value,
    /// and [`Error::UnknownField`](crate::Error::UnknownField) for a field
    /// the shape does not declare.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<Record> {
        let key = self.inner.shape.check(name)?;
        Ok(self.write(key, value.into()))
    }

    /// Infallible write used by `record!` types, whose fields are declared
    /// by construction.
    #[doc(hidden)]
    pub fn __write_declared(&self, name: &str, value: Value) -> Record {
        let key = match self.inner.shape.field(name) {
            Some(field) => Shared::clone(field),
            None => Shared::from(name),
        };
        self.write(key, value)
    }

    fn write(&self, key: Shared<str>, value: Value) -> Record {
        if let Some(current) = self.inner.fields.get(&*key) {
            if current.same(&value) {
                return self.clone();
            }
        }
        trace!(record = self.name(), field = &*key, "record field written");
        Record::new(
            Shared::clone(&self.inner.shape),
            self.inner.fields.set(key, value),
        )
    }
}

impl Clone for Record {
    /// Shares the record: the clone is the same instance.
    fn clone(&self) -> Self {
        Self {
            inner: Shared::clone(&self.inner),
        }
    }
}

impl Identity for Record {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Shared::as_ptr(&self.inner), state)
    }
}

/// Renders like the backing map.
impl Render for Record {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fields.render(f)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.name());
        for (name, value) in self.inner.fields.iter() {
            out.field(name, value);
        }
        out.finish()
    }
}
