use std::cmp::Ordering;

use crate::comparator::EntryComparator;
use crate::entry::MapEntry;
use crate::error::Result;
use crate::serialization::{
    DataDeserialize, DataSerializable, ObjectDataInput, ObjectDataOutput, TypeTag,
};

/// Orders two entries by the integer `field` of their JSON values.
///
/// Both fields are read before comparing, so an error in `a` is reported
/// ahead of one in `b`.
pub(crate) fn compare_by_field(
    field: &str,
    reverse: bool,
    a: &MapEntry,
    b: &MapEntry,
) -> Result<Ordering> {
    let left = a.value().integer_field(field)?;
    let right = b.value().integer_field(field)?;

    if reverse {
        Ok(right.cmp(&left))
    } else {
        Ok(left.cmp(&right))
    }
}

/// Sorts JSON values by any integer field.
///
/// Wire format: field name (length prefixed UTF-8) then the reverse flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldComparator {
    field: String,
    reverse: bool,
}

impl FieldComparator {
    pub fn new(field: impl Into<String>, reverse: bool) -> Self {
        Self {
            field: field.into(),
            reverse,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }
}

impl EntryComparator for FieldComparator {
    fn compare(&self, a: &MapEntry, b: &MapEntry) -> Result<Ordering> {
        compare_by_field(&self.field, self.reverse, a, b)
    }

    fn name(&self) -> &str {
        "gridsort.FieldComparator"
    }
}

impl DataSerializable for FieldComparator {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()> {
        output.write_string(&self.field)?;
        output.write_bool(self.reverse);
        Ok(())
    }
}

impl DataDeserialize for FieldComparator {
    const TYPE_TAG: TypeTag = TypeTag::new(1, 2);

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self> {
        let field = input.read_string()?;
        let reverse = input.read_bool()?;
        Ok(Self { field, reverse })
    }
}
