// File: src/record.rs
// Purpose: Field descriptors for record types

use crate::value::FieldValue;

/// Static shape of a field's declared type
///
/// Descriptive only: the engine finds nested records from the runtime value, so a
/// borrowed record (`&Inner`) reads as `Scalar` here yet is still recursed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    OptionalScalar,
    NestedRecord,
    OptionalNestedRecord,
    SequenceOfNestedRecord,
    OptionalSequenceOfNestedRecord,
}

impl FieldKind {
    /// Kind of `Option<T>` given the kind of `T`
    ///
    /// A second optional layer is not unwrapped again, so it reads as a plain optional scalar.
    pub fn into_optional(self) -> Self {
        match self {
            FieldKind::Scalar => FieldKind::OptionalScalar,
            FieldKind::NestedRecord => FieldKind::OptionalNestedRecord,
            FieldKind::SequenceOfNestedRecord => FieldKind::OptionalSequenceOfNestedRecord,
            FieldKind::OptionalScalar
            | FieldKind::OptionalNestedRecord
            | FieldKind::OptionalSequenceOfNestedRecord => FieldKind::OptionalScalar,
        }
    }

    /// Kind of a sequence whose elements have kind `element`
    pub fn sequence_of(element: FieldKind) -> Self {
        match element {
            FieldKind::NestedRecord => FieldKind::SequenceOfNestedRecord,
            _ => FieldKind::Scalar,
        }
    }
}

/// One field of a record, as handed to the validation engine
///
/// Built fresh for every validation call by [`Record::fields`].
pub struct FieldDescriptor<'a> {
    /// Declared field name
    pub name: &'static str,
    /// External (serialization) name, when one is declared
    pub rename: Option<&'static str>,
    /// Rule annotation, empty when the field declares no rules
    pub annotation: &'static str,
    pub kind: FieldKind,
    pub value: &'a dyn FieldValue,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new<T: FieldValue>(name: &'static str, value: &'a T) -> Self {
        Self {
            name,
            rename: None,
            annotation: "",
            kind: T::field_kind(),
            value,
        }
    }

    pub fn rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    pub fn annotation(mut self, annotation: &'static str) -> Self {
        self.annotation = annotation;
        self
    }

    /// Name violations are reported under
    pub fn external_name(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }
}

impl std::fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("rename", &self.rename)
            .field("annotation", &self.annotation)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A struct whose fields can be walked by the validation engine
///
/// Automatically implemented by `#[derive(Validate)]`
pub trait Record {
    /// Rust type name of the record
    fn type_name(&self) -> &'static str;

    /// Ordered field descriptors, in declaration order
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;
}
