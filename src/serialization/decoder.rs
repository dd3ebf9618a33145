use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

use super::{ObjectDataInput, TypeTag};

/// Builds a `T` from the payload of an identified frame. The frame header
/// has already been consumed when the decoder runs.
pub type Decoder<T> = for<'a> fn(&mut ObjectDataInput<'a>) -> Result<Arc<T>>;

/// Statically typed table from `TypeTag` to decoder.
///
/// Registration never overrides: a tag that is already taken is rejected, so
/// two types sharing an id are caught when the table is built rather than
/// when a payload is decoded by the wrong type.
pub struct DecoderTable<T: ?Sized> {
    factories: HashMap<i32, HashMap<(i32, u8), Decoder<T>>>,
}

impl<T: ?Sized> Default for DecoderTable<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<T: ?Sized> DecoderTable<T> {
    pub fn register(&mut self, tag: TypeTag, decoder: Decoder<T>) -> Result<()> {
        let classes = self.factories.entry(tag.factory_id).or_default();
        if classes.contains_key(&(tag.class_id, tag.version)) {
            return Err(Error::DuplicateTypeTag(tag));
        }

        tracing::debug!("Register decoder for {}", tag);
        classes.insert((tag.class_id, tag.version), decoder);
        Ok(())
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.factories
            .get(&tag.factory_id)
            .is_some_and(|classes| classes.contains_key(&(tag.class_id, tag.version)))
    }

    pub fn len(&self) -> usize {
        self.factories.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a frame header from `input` and runs the matching decoder.
    pub fn decode(&self, input: &mut ObjectDataInput<'_>) -> Result<Arc<T>> {
        let tag = input.read_type_tag()?;
        let classes = self
            .factories
            .get(&tag.factory_id)
            .ok_or(Error::UnknownFactory(tag.factory_id))?;
        let decoder = classes
            .get(&(tag.class_id, tag.version))
            .ok_or(Error::UnknownType(tag))?;

        tracing::trace!("Decode {}", tag);
        decoder(input)
    }
}
