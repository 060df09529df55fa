// File: src/value.rs
// Purpose: Value model shared by the engine and the rule evaluators

use crate::record::{FieldKind, Record};

/// Primitive view of a field value, as seen by rule evaluators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Records, sequences and anything else without a primitive reading
    Unsupported,
}

/// A value that can sit in a validated field
///
/// Implemented here for primitives, strings, `Option`, `Vec`, slices, arrays and `Box`,
/// and by `#[derive(Validate)]` for records.
pub trait FieldValue {
    /// Short name of the value's shape ("string", "int", "struct", ...)
    fn kind(&self) -> &'static str;

    /// Whether this is the type's zero/empty value
    fn is_zero(&self) -> bool;

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Unsupported
    }

    /// `Some(slot)` when the value is an optional reference; `slot` is `None` when absent
    fn optional(&self) -> Option<Option<&dyn FieldValue>> {
        None
    }

    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Elements of a sequence value
    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        None
    }

    /// Static shape of the type, used for field descriptors
    fn field_kind() -> FieldKind
    where
        Self: Sized,
    {
        FieldKind::Scalar
    }
}

macro_rules! signed_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn kind(&self) -> &'static str {
                    "int"
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn scalar(&self) -> Scalar<'_> {
                    Scalar::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! unsigned_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn kind(&self) -> &'static str {
                    "uint"
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn scalar(&self) -> Scalar<'_> {
                    Scalar::Uint(*self as u64)
                }
            }
        )*
    };
}

signed_field_value!(i8, i16, i32, i64, isize);
unsigned_field_value!(u8, u16, u32, u64, usize);

impl FieldValue for f32 {
    fn kind(&self) -> &'static str {
        "float"
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Float(f64::from(*self))
    }
}

impl FieldValue for f64 {
    fn kind(&self) -> &'static str {
        "float"
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Float(*self)
    }
}

impl FieldValue for bool {
    fn kind(&self) -> &'static str {
        "bool"
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Bool(*self)
    }
}

impl FieldValue for str {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Str(self)
    }
}

impl FieldValue for String {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn scalar(&self) -> Scalar<'_> {
        Scalar::Str(self.as_str())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind(&self) -> &'static str {
        "option"
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn optional(&self) -> Option<Option<&dyn FieldValue>> {
        Some(self.as_ref().map(|value| value as &dyn FieldValue))
    }

    fn field_kind() -> FieldKind {
        T::field_kind().into_optional()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        Some(self.iter().map(|item| item as &dyn FieldValue).collect())
    }

    fn field_kind() -> FieldKind {
        FieldKind::sequence_of(T::field_kind())
    }
}

impl<T: FieldValue> FieldValue for [T] {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        Some(self.iter().map(|item| item as &dyn FieldValue).collect())
    }
}

impl<T: FieldValue, const N: usize> FieldValue for [T; N] {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    // Arrays have a fixed length, so zero means every element is zero
    fn is_zero(&self) -> bool {
        self.iter().all(FieldValue::is_zero)
    }

    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        Some(self.iter().map(|item| item as &dyn FieldValue).collect())
    }

    fn field_kind() -> FieldKind {
        FieldKind::sequence_of(T::field_kind())
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn scalar(&self) -> Scalar<'_> {
        (**self).scalar()
    }

    fn optional(&self) -> Option<Option<&dyn FieldValue>> {
        (**self).optional()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }

    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        (**self).elements()
    }

    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn scalar(&self) -> Scalar<'_> {
        (**self).scalar()
    }

    fn optional(&self) -> Option<Option<&dyn FieldValue>> {
        (**self).optional()
    }

    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }

    fn elements(&self) -> Option<Vec<&dyn FieldValue>> {
        (**self).elements()
    }
}

/// Forwards `FieldValue` for a single-field tuple newtype to its inner value
///
/// ```rust,ignore
/// struct Login(String);
/// rusty_valid::scalar_newtype!(Login);
/// ```
#[macro_export]
macro_rules! scalar_newtype {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                fn kind(&self) -> &'static str {
                    $crate::FieldValue::kind(&self.0)
                }

                fn is_zero(&self) -> bool {
                    $crate::FieldValue::is_zero(&self.0)
                }

                fn scalar(&self) -> $crate::Scalar<'_> {
                    $crate::FieldValue::scalar(&self.0)
                }
            }
        )+
    };
}

/// A field's value after one level of optionality has been resolved
///
/// The engine builds this once per field so evaluators never unwrap `Option` themselves.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    value: Option<&'a dyn FieldValue>,
    optional: bool,
}

impl<'a> Field<'a> {
    /// Unwraps at most one optional layer of `value`
    pub fn resolve(value: &'a dyn FieldValue) -> Self {
        match value.optional() {
            Some(slot) => Self {
                value: slot,
                optional: true,
            },
            None => Self {
                value: Some(value),
                optional: false,
            },
        }
    }

    /// True when the declared slot is an optional reference
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True when an optional slot holds nothing
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&'a dyn FieldValue> {
        self.value
    }

    /// Zero check after dereferencing; absent counts as zero
    pub fn is_zero(&self) -> bool {
        self.value.map_or(true, |value| value.is_zero())
    }

    /// Absent, or a plain (non-optional) zero value
    ///
    /// Rules that are vacuously satisfied on "nothing to check" use this.
    pub fn is_vacant(&self) -> bool {
        match self.value {
            None => true,
            Some(value) => !self.optional && value.is_zero(),
        }
    }

    pub fn scalar(&self) -> Scalar<'a> {
        match self.value {
            Some(value) => value.scalar(),
            None => Scalar::Unsupported,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("optional", &self.optional)
            .field("absent", &self.is_absent())
            .field("scalar", &self.scalar())
            .finish()
    }
}
