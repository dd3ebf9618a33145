use std::fmt::Debug;

use crate::entry::MapEntry;
use crate::error::{DocumentError, Error, Result};
use crate::serialization::{
    DataDeserialize, DataSerializable, ObjectDataInput, ObjectDataOutput, TypeTag,
};

use super::PREDICATE_FACTORY_ID;

/// Attribute name that refers to the entry key instead of a document field.
pub const KEY_ATTRIBUTE: &str = "__key";

/// Selects the entries a paging query works on.
pub trait EntryFilter: DataSerializable + Debug + Send + Sync {
    fn matches(&self, entry: &MapEntry) -> Result<bool>;
}

/// Passes every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrueFilter;

impl EntryFilter for TrueFilter {
    fn matches(&self, _entry: &MapEntry) -> Result<bool> {
        Ok(true)
    }
}

impl DataSerializable for TrueFilter {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, _output: &mut ObjectDataOutput) -> Result<()> {
        Ok(())
    }
}

impl DataDeserialize for TrueFilter {
    const TYPE_TAG: TypeTag = TypeTag::new(PREDICATE_FACTORY_ID, 14);

    fn read_data(_input: &mut ObjectDataInput<'_>) -> Result<Self> {
        Ok(TrueFilter)
    }
}

/// Passes entries whose integer `attribute` lies in `from..=to`.
///
/// Entries without the attribute, or with a non integer one, do not match.
/// A value that is not valid JSON is still an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetweenFilter {
    attribute: String,
    from: i64,
    to: i64,
}

impl BetweenFilter {
    pub fn new(attribute: impl Into<String>, from: i64, to: i64) -> Self {
        Self {
            attribute: attribute.into(),
            from,
            to,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl EntryFilter for BetweenFilter {
    fn matches(&self, entry: &MapEntry) -> Result<bool> {
        let value = if self.attribute == KEY_ATTRIBUTE {
            entry.key()
        } else {
            match entry.value().integer_field(&self.attribute) {
                Ok(value) => value,
                Err(
                    Error::MissingField { .. }
                    | Error::MalformedDocument(DocumentError::NotANumber { .. }),
                ) => return Ok(false),
                Err(err) => return Err(err),
            }
        };

        Ok((self.from..=self.to).contains(&value))
    }
}

impl DataSerializable for BetweenFilter {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()> {
        output.write_string(&self.attribute)?;
        output.write_i64(self.to);
        output.write_i64(self.from);
        Ok(())
    }
}

impl DataDeserialize for BetweenFilter {
    const TYPE_TAG: TypeTag = TypeTag::new(PREDICATE_FACTORY_ID, 2);

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self> {
        let attribute = input.read_string()?;
        let to = input.read_i64()?;
        let from = input.read_i64()?;
        Ok(Self { attribute, from, to })
    }
}
