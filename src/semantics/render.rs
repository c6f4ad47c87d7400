// ============================================================================
// spark-collections - Value Renderer
// Debug/display text for collection elements
// ============================================================================
//
// Collections delegate to their own textual form; scalars print through
// `Display`; strings print verbatim; opaque objects held in a `Ref` print
// through `Debug`. The output is for humans and snapshot comparisons only and
// cannot be parsed back.
// ============================================================================

use std::fmt;

use crate::core::types::Shared;
use crate::semantics::identity::Ref;

// =============================================================================
// RENDER TRAIT
// =============================================================================

/// Writes a value as display text inside a collection's textual form.
pub trait Render {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Adapter that lets any [`Render`] value be used with `format!`.
pub struct Rendered<'a, T: ?Sized>(pub &'a T);

impl<T: Render + ?Sized> fmt::Display for Rendered<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(f)
    }
}

/// Renders a value to a string.
///
/// # Example
///
/// ```
/// use spark_collections::{render, Vector};
///
/// assert_eq!(render(&42), "42");
/// assert_eq!(render("plain"), "plain");
/// assert_eq!(render(&Vector::from(vec![1, 2])), "vec<1,2>");
/// ```
pub fn render<T: Render + ?Sized>(value: &T) -> String {
    Rendered(value).to_string()
}

// =============================================================================
// SCALARS
// =============================================================================

macro_rules! display_render {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

display_render!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

/// Floats print in shortest round-trip form. Magnitudes at or above `1e21`
/// or below `1e-6` switch to exponent form (`1e+21`, `1.5e-7`), infinities
/// print as `Infinity`/`-Infinity` and both zeros as `0`.
macro_rules! float_render {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let x = *self;
                    if x.is_nan() {
                        return f.write_str("NaN");
                    }
                    if x.is_infinite() {
                        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
                    }
                    if x == 0.0 {
                        return f.write_str("0");
                    }
                    let magnitude = x.abs();
                    if magnitude >= 1e21 || magnitude < 1e-6 {
                        let exp = format!("{:e}", x);
                        return match exp.split_once('e') {
                            Some((mantissa, power)) if !power.starts_with('-') => {
                                write!(f, "{}e+{}", mantissa, power)
                            }
                            _ => f.write_str(&exp),
                        };
                    }
                    fmt::Display::fmt(&x, f)
                }
            }
        )*
    };
}

float_render!(f32, f64);

impl Render for Shared<str> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).render(f)
    }
}

/// Objects have no textual form of their own; fall back to `Debug`.
impl<T: fmt::Debug + ?Sized> Render for Ref<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &**self)
    }
}

// =============================================================================
// HELPERS FOR COLLECTION FORMS
// =============================================================================

/// Writes `open`, the slots separated by commas, then `>`.
///
/// A hole renders as nothing, so `[10, hole, 30]` becomes `10,,30`.
pub(crate) fn render_slots<'a, T, I>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    slots: I,
) -> fmt::Result
where
    T: Render + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    f.write_str(open)?;
    for (i, slot) in slots.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        if let Some(value) = slot {
            value.render(f)?;
        }
    }
    f.write_str(">")
}

// =============================================================================
// TESTS
// =============================================================================
