use std::borrow::Cow;
use std::cmp::Ordering;

use crate::comparator::{EntryComparator, IterationType};
use crate::entry::MapEntry;
use crate::error::{Error, Result};
use crate::serialization::{
    DataDeserialize, DataSerializable, ObjectDataInput, ObjectDataOutput, TypeTag,
};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonKind {
    /// Lexicographic order of the text.
    #[default]
    Ascending = 0,
    /// Reversed lexicographic order of the text.
    Descending = 1,
    /// Order by the number of characters of the text.
    Length = 2,
}

impl TryFrom<i32> for ComparisonKind {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(ComparisonKind::Ascending),
            1 => Ok(ComparisonKind::Descending),
            2 => Ok(ComparisonKind::Length),
            _ => Err(Error::InvalidEnumValue {
                kind: "comparison kind",
                value,
            }),
        }
    }
}

/// Compares the text form of entries, no document parsing involved.
///
/// `IterationType` picks the text: the key, the value, or the key followed by
/// the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyValueComparator {
    kind: ComparisonKind,
    iteration_type: IterationType,
}

impl KeyValueComparator {
    pub fn new(kind: ComparisonKind, iteration_type: IterationType) -> Self {
        Self {
            kind,
            iteration_type,
        }
    }

    pub fn kind(&self) -> ComparisonKind {
        self.kind
    }

    pub fn iteration_type(&self) -> IterationType {
        self.iteration_type
    }

    fn text<'a>(&self, entry: &'a MapEntry) -> Cow<'a, str> {
        match self.iteration_type {
            IterationType::Key => Cow::Owned(entry.key().to_string()),
            IterationType::Value => Cow::Borrowed(entry.value().as_str()),
            IterationType::Entry => Cow::Owned(format!("{}{}", entry.key(), entry.value())),
        }
    }
}

impl EntryComparator for KeyValueComparator {
    fn compare(&self, a: &MapEntry, b: &MapEntry) -> Result<Ordering> {
        let left = self.text(a);
        let right = self.text(b);

        Ok(match self.kind {
            ComparisonKind::Ascending => left.cmp(&right),
            ComparisonKind::Descending => right.cmp(&left),
            ComparisonKind::Length => left.chars().count().cmp(&right.chars().count()),
        })
    }

    fn name(&self) -> &str {
        "gridsort.KeyValueComparator"
    }
}

impl DataSerializable for KeyValueComparator {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()> {
        output.write_i32(self.kind as i32);
        output.write_i32(self.iteration_type as i32);
        Ok(())
    }
}

impl DataDeserialize for KeyValueComparator {
    const TYPE_TAG: TypeTag = TypeTag::new(66, 2);

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self> {
        let kind = ComparisonKind::try_from(input.read_i32()?)?;
        let iteration_type = IterationType::try_from(input.read_i32()?)?;
        Ok(Self {
            kind,
            iteration_type,
        })
    }
}
