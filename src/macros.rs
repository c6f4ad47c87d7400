// ============================================================================
// spark-collections - Ergonomic Macros
// ============================================================================

/// Build a [`Vector`](crate::Vector) from a list of values.
///
/// # Usage
///
/// ```rust
/// use spark_collections::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v.to_string(), "vec<1,2,3>");
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Vector::from([$($value),+])
    };
}

/// Build a [`Set`](crate::Set) from a list of values, dropping duplicates.
///
/// # Usage
///
/// ```rust
/// use spark_collections::set;
///
/// let s = set!["a", "b", "a"];
/// assert_eq!(s.to_string(), "set<a,b>");
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Set::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Set::from([$($value),+])
    };
}

/// Build a [`Map`](crate::Map) from `key => value` pairs.
///
/// # Usage
///
/// ```rust
/// use spark_collections::map;
///
/// let m = map! { "a" => 1, "b" => 2 };
/// assert_eq!(m.to_string(), "map<a: 1, b: 2>");
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Map::from([$(($key, $value)),+])
    };
}

/// Declare a typed record with named accessors.
///
/// Each field is written `name: Type => setter`. The macro generates a
/// wrapper around [`Record`](crate::Record) with a getter per field
/// (`name(&self) -> Option<Type>`), the named setter
/// (`setter(&self, Type) -> Self`), and conversions to and from
/// [`Value`](crate::Value) so typed records nest inside one another.
///
/// Field types must convert into `Value` and implement
/// [`FromValue`](crate::FromValue). `from_record` checks every set field
/// against its declared type, so a getter returns `None` only for an unset
/// field.
///
/// # Usage
///
/// ```rust
/// use spark_collections::record;
///
/// record! {
///     pub struct Person {
///         name: String => set_name,
///         age: i64 => set_age,
///     }
/// }
///
/// let p = Person::new().set_name("Thomas".into()).set_age(34);
/// assert_eq!(p.name().as_deref(), Some("Thomas"));
/// assert_eq!(p.age(), Some(34));
/// assert_eq!(p.to_string(), "map<name: Thomas, age: 34>");
///
/// // Same value, same record
/// assert!(p.set_age(34).ptr_eq(&p));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident : $ty:ty => $setter:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name($crate::Record);

        #[allow(dead_code)]
        impl $name {
            /// Factory for the underlying record shape.
            pub fn factory() -> $crate::RecordFactory {
                let fields: &[&str] = &[$(stringify!($field)),*];
                $crate::RecordFactory::new(stringify!($name), fields)
            }

            /// A record with no fields set.
            pub fn new() -> Self {
                Self(Self::factory().empty())
            }

            /// Adopts an untyped record whose fields all belong to this shape.
            ///
            /// Fails with `TypeMismatch` when a set field does not convert to
            /// its declared type, so the getters never hide a bad value.
            pub fn from_record(record: $crate::Record) -> $crate::Result<Self> {
                let record = Self::factory().adopt(record)?;
                $(
                    if let Some(value) = record.get(stringify!($field)) {
                        <$ty as $crate::FromValue>::from_value(value)?;
                    }
                )*
                Ok(Self(record))
            }

            pub fn as_record(&self) -> &$crate::Record {
                &self.0
            }

            pub fn ptr_eq(&self, other: &Self) -> bool {
                self.0.ptr_eq(&other.0)
            }

            $(
                pub fn $field(&self) -> Option<$ty> {
                    self.0.field::<$ty>(stringify!($field)).ok().flatten()
                }

                pub fn $setter(&self, value: $ty) -> Self {
                    Self(self.0.__write_declared(
                        stringify!($field),
                        $crate::Value::from(value),
                    ))
                }
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<$name> for $crate::Value {
            fn from(value: $name) -> Self {
                $crate::Value::Record(value.0)
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                let record = <$crate::Record as $crate::FromValue>::from_value(value)?;
                Self::from_record(record)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
