// ============================================================================
// spark-collections - Dynamic Values
// A single element type for heterogeneous collections
// ============================================================================
//
// A `Vector<Value>` can hold numbers, strings and other collections side by
// side. Numbers form one numeric type: `Int(2)` and `Float(2.0)` are the same
// value, but an `Int` equals a `Float` only when the float holds exactly that
// integer. Strings compare by content. Containers and records compare by
// instance.
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::collections::{Map, Set, Vector};
use crate::core::error::{Error, Result};
use crate::core::types::Shared;
use crate::record::Record;
use crate::semantics::identity::Identity;
use crate::semantics::render::Render;

// =============================================================================
// VALUE
// =============================================================================

/// A dynamically typed element.
///
/// # Example
///
/// ```
/// use spark_collections::{Value, Vector};
///
/// let mixed = Vector::<Value>::new().push(1).push("two").push(3.5);
/// assert_eq!(mixed.to_string(), "vec<1,two,3.5>");
///
/// // Numbers compare by numeric value across Int and Float
/// assert!(mixed.includes(&Value::from(1.0)));
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Shared<str>),
    Vector(Vector<Value>),
    Set(Set<Value>),
    Map(Map<Value, Value>),
    Record(Record),
}

impl Value {
    /// Short name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Vector(_) => "vector",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, also for floats with no fractional part.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(x) => exact_int(*x),
            _ => None,
        }
    }

    /// Any number as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector<Value>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set<Value>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<Value, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// The integer a float holds exactly, if any.
fn exact_int(x: f64) -> Option<i64> {
    // i64::MIN is -2^63 and representable; 2^63 itself is out of range
    let limit = -(i64::MIN as f64);
    if x.fract() == 0.0 && x >= -limit && x < limit {
        Some(x as i64)
    } else {
        None
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

impl Identity for Value {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => {
                exact_int(*x) == Some(*i)
            }
            (Value::Str(a), Value::Str(b)) => a.same(b),
            (Value::Vector(a), Value::Vector(b)) => a.same(b),
            (Value::Set(a), Value::Set(b)) => a.same(b),
            (Value::Map(a), Value::Map(b)) => a.same(b),
            (Value::Record(a), Value::Record(b)) => a.same(b),
            _ => false,
        }
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0_u8.hash(state),
            Value::Bool(b) => {
                1_u8.hash(state);
                b.hash(state);
            }
            // Integral floats hash as their integer
            Value::Int(i) => {
                2_u8.hash(state);
                i.hash(state);
            }
            Value::Float(x) => {
                2_u8.hash(state);
                match exact_int(*x) {
                    Some(i) => i.hash(state),
                    None => x.identity_hash(state),
                }
            }
            Value::Str(s) => {
                3_u8.hash(state);
                s.identity_hash(state);
            }
            Value::Vector(v) => v.identity_hash(state),
            Value::Set(s) => s.identity_hash(state),
            Value::Map(m) => m.identity_hash(state),
            Value::Record(r) => r.identity_hash(state),
        }
    }
}

/// Reference equality, the same relation collections use.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

// =============================================================================
// RENDERING
// =============================================================================

impl Render for Value {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => b.render(f),
            Value::Int(i) => i.render(f),
            Value::Float(x) => x.render(f),
            Value::Str(s) => s.render(f),
            Value::Vector(v) => v.render(f),
            Value::Set(s) => s.render(f),
            Value::Map(m) => m.render(f),
            Value::Record(r) => r.render(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

// =============================================================================
// CONVERSIONS INTO VALUE
// =============================================================================

macro_rules! int_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Shared::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Shared::from(value))
    }
}

impl From<Shared<str>> for Value {
    fn from(value: Shared<str>) -> Self {
        Value::Str(value)
    }
}

impl From<Vector<Value>> for Value {
    fn from(value: Vector<Value>) -> Self {
        Value::Vector(value)
    }
}

impl From<Set<Value>> for Value {
    fn from(value: Set<Value>) -> Self {
        Value::Set(value)
    }
}

impl From<Map<Value, Value>> for Value {
    fn from(value: Map<Value, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

/// `None` becomes [`Value::Null`].
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// =============================================================================
// CONVERSIONS OUT OF VALUE
// =============================================================================

/// Typed extraction from a [`Value`].
///
/// Fails with [`Error::TypeMismatch`] when the value holds another kind.
/// Containers come out as the same instance.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::type_mismatch("bool", value.type_name()))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_int()
            .ok_or_else(|| Error::type_mismatch("int", value.type_name()))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_float()
            .ok_or_else(|| Error::type_mismatch("float", value.type_name()))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::type_mismatch("string", value.type_name()))
    }
}

impl FromValue for Shared<str> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(Shared::clone(s)),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

macro_rules! container_from_value {
    ($($ty:ty => $variant:ident, $name:literal);* $(;)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::$variant(inner) => Ok(inner.clone()),
                        other => Err(Error::type_mismatch($name, other.type_name())),
                    }
                }
            }
        )*
    };
}

container_from_value!(
    Vector<Value> => Vector, "vector";
    Set<Value> => Set, "set";
    Map<Value, Value> => Map, "map";
    Record => Record, "record";
);

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::DefaultHasher;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.identity_hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn numbers_are_one_type() {
        assert!(Value::Int(2).same(&Value::Float(2.0)));
        assert_eq!(hash_of(&Value::Int(2)), hash_of(&Value::Float(2.0)));
        assert!(!Value::Int(2).same(&Value::Float(2.5)));
        assert!(Value::Float(-0.0).same(&Value::Int(0)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let two_53 = 9_007_199_254_740_992_i64;
        let float = Value::Float(two_53 as f64);

        assert!(float.same(&Value::Int(two_53)));
        assert!(!float.same(&Value::Int(two_53 + 1)));
        assert!(!Value::Int(two_53).same(&Value::Int(two_53 + 1)));
        assert_eq!(hash_of(&float), hash_of(&Value::Int(two_53)));

        let set = Set::from(vec![Value::Int(two_53), Value::Int(two_53 + 1), float]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn out_of_range_floats_are_not_ints() {
        assert_eq!(Value::Float(9.3e18).as_int(), None);
        assert_eq!(Value::Float(i64::MIN as f64).as_int(), Some(i64::MIN));
        assert!(!Value::Float(f64::INFINITY).same(&Value::Int(i64::MAX)));
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn nan_is_never_the_same() {
        let nan = Value::Float(f64::NAN);
        assert!(!nan.same(&nan.clone()));
    }

    #[test]
    fn strings_compare_by_content() {
        let a = Value::from("Thomas");
        let b = Value::from(String::from("Thomas"));
        assert!(a.same(&b));
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(!a.same(&Value::from("Tom")));
    }

    #[test]
    fn kinds_never_mix() {
        assert!(!Value::Null.same(&Value::Bool(false)));
        assert!(!Value::from("1").same(&Value::Int(1)));
        assert!(!Value::Bool(true).same(&Value::Int(1)));
    }

    #[test]
    fn containers_compare_by_instance() {
        let inner = Vector::from(vec![Value::Int(1)]);
        let a = Value::from(inner.clone());
        let b = Value::from(inner);
        let c = Value::from(Vector::from(vec![Value::Int(1)]));

        assert!(a.same(&b));
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(!a.same(&c));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn render_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::from("text").to_string(), "text");

        let nested = Value::from(Vector::from(vec![Value::Int(1), Value::from("a")]));
        assert_eq!(nested.to_string(), "vec<1,a>");
    }

    #[test]
    fn option_converts_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(4.0).as_int(), Some(4));
        assert_eq!(Value::Float(4.5).as_int(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn from_value_extracts_or_fails() {
        assert_eq!(i64::from_value(&Value::Int(7)), Ok(7));
        assert_eq!(f64::from_value(&Value::Int(7)), Ok(7.0));
        assert_eq!(
            String::from_value(&Value::from("hi")),
            Ok(String::from("hi"))
        );
        assert_eq!(
            i64::from_value(&Value::from("hi")),
            Err(Error::TypeMismatch {
                expected: "int",
                found: "string"
            })
        );
        assert!(bool::from_value(&Value::Null).is_err());
    }

    #[test]
    fn container_extraction_keeps_the_instance() {
        let vector = Vector::from(vec![Value::Int(1)]);
        let value = Value::from(vector.clone());
        let extracted = Vector::<Value>::from_value(&value);
        assert!(matches!(extracted, Ok(v) if v.ptr_eq(&vector)));

        assert!(Set::<Value>::from_value(&value).is_err());
    }
}
