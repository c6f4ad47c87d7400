// ============================================================================
// spark-collections - Record Shapes
// Named field lists and the factories that build records against them
// ============================================================================

use tracing::debug;

use crate::collections::Map;
use crate::core::error::{Error, Result};
use crate::core::types::Shared;
use crate::core::value::Value;
use crate::record::view::Record;

// =============================================================================
// RECORD SHAPE
// =============================================================================

/// A record type: a name and an ordered list of declared field names.
///
/// Duplicate field names are dropped, keeping the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    name: Shared<str>,
    fields: Vec<Shared<str>>,
}

impl RecordShape {
    pub fn new<I, S>(name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declared: Vec<Shared<str>> = Vec::new();
        for field in fields {
            let field = field.as_ref();
            if !declared.iter().any(|existing| &**existing == field) {
                declared.push(Shared::from(field));
            }
        }
        Self {
            name: Shared::from(name),
            fields: declared,
        }
    }

    /// The record type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|field| &**field)
    }

    /// The interned name of a declared field.
    pub fn field(&self, name: &str) -> Option<&Shared<str>> {
        self.fields.iter().find(|field| &***field == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Resolves `name` to its declared key or fails with
    /// [`Error::UnknownField`].
    pub(crate) fn check(&self, name: &str) -> Result<Shared<str>> {
        match self.field(name) {
            Some(field) => Ok(Shared::clone(field)),
            None => {
                debug!(record = %self.name, field = name, "rejected undeclared field");
                Err(Error::unknown_field(&self.name, name))
            }
        }
    }
}

// =============================================================================
// RECORD FACTORY
// =============================================================================

/// Builds [`Record`]s of one shape.
///
/// # Example
///
/// ```
/// use spark_collections::record;
///
/// let person = record("Person", ["name", "age"]);
///
/// let p = person.create([("name", "Thomas")])?;
/// assert_eq!(p.to_string(), "map<name: Thomas>");
///
/// let p = p.set("age", 34)?;
/// assert_eq!(p.to_string(), "map<name: Thomas, age: 34>");
///
/// assert!(person.create([("height", 180)]).is_err());
/// # Ok::<(), spark_collections::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordFactory {
    shape: Shared<RecordShape>,
}

impl RecordFactory {
    pub fn new<I, S>(name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_shape(RecordShape::new(name, fields))
    }

    pub fn from_shape(shape: RecordShape) -> Self {
        Self {
            shape: Shared::new(shape),
        }
    }

    pub fn shape(&self) -> &RecordShape {
        &self.shape
    }

    /// A record with no fields set.
    pub fn empty(&self) -> Record {
        Record::new(Shared::clone(&self.shape), Map::new())
    }

    /// Builds a record from field/value pairs.
    ///
    /// Fields may be omitted; a field outside the shape is an error.
    pub fn create<I, S, V>(&self, pairs: I) -> Result<Record>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<Value>,
    {
        let mut entries: Vec<(Shared<str>, Value)> = Vec::new();
        for (name, value) in pairs {
            entries.push((self.shape.check(name.as_ref())?, value.into()));
        }

        Ok(Record::new(Shared::clone(&self.shape), Map::from(entries)))
    }

    /// Wraps an existing map as a record without copying it.
    ///
    /// Every key must be a declared field.
    pub fn wrap(&self, fields: Map<Shared<str>, Value>) -> Result<Record> {
        for (name, _) in fields.iter() {
            self.shape.check(name)?;
        }
        Ok(Record::new(Shared::clone(&self.shape), fields))
    }

    /// Accepts a record built elsewhere.
    ///
    /// A record of an equal shape is returned as is; any other record has
    /// its map re-checked and wrapped.
    pub fn adopt(&self, record: Record) -> Result<Record> {
        if *record.shape() == *self.shape {
            return Ok(record);
        }
        self.wrap(record.into_map())
    }
}

/// Declares a record type and returns its factory.
pub fn record<I, S>(name: &str, fields: I) -> RecordFactory
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RecordFactory::new(name, fields)
}

// =============================================================================
// TESTS
// =============================================================================
