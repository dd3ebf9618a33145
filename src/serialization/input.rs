use std::sync::Arc;

use bytes::{Buf, Bytes};

use crate::comparator::EntryComparator;
use crate::config::ByteOrder;
use crate::error::{Error, Result};
use crate::paging::EntryFilter;

use super::output::NULL_LENGTH;
use super::{DataDeserialize, SerializationService, TypeTag};

/// Binary source for identified objects, the mirror of `ObjectDataOutput`.
///
/// Every read checks the remaining length first and a short buffer is
/// reported as `Error::BufferUnderflow`. A failed primitive or length prefixed
/// read leaves the position where it was, length prefix included.
pub struct ObjectDataInput<'a> {
    data: Bytes,
    byte_order: ByteOrder,
    service: &'a SerializationService,
}

impl<'a> ObjectDataInput<'a> {
    pub(crate) fn new(data: Bytes, service: &'a SerializationService) -> Self {
        Self {
            data,
            byte_order: service.config().byte_order(),
            service,
        }
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<()> {
        if self.data.remaining() < needed {
            return Err(Error::BufferUnderflow {
                needed,
                remaining: self.data.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.data.get_u8())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(match self.byte_order {
            ByteOrder::BigEndian => self.data.get_i16(),
            ByteOrder::LittleEndian => self.data.get_i16_le(),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(match self.byte_order {
            ByteOrder::BigEndian => self.data.get_i32(),
            ByteOrder::LittleEndian => self.data.get_i32_le(),
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(match self.byte_order {
            ByteOrder::BigEndian => self.data.get_i64(),
            ByteOrder::LittleEndian => self.data.get_i64_le(),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.ensure(8)?;
        Ok(match self.byte_order {
            ByteOrder::BigEndian => self.data.get_f64(),
            ByteOrder::LittleEndian => self.data.get_f64_le(),
        })
    }

    pub fn read_byte_array(&mut self) -> Result<Option<Bytes>> {
        let start = self.data.clone();
        let len = self.read_i32()?;
        if len == NULL_LENGTH {
            return Ok(None);
        }

        let checked = if len < 0 {
            Err(Error::InvalidLength(len))
        } else {
            self.ensure(len as usize)
        };
        if let Err(err) = checked {
            self.data = start;
            return Err(err);
        }

        Ok(Some(self.data.split_to(len as usize)))
    }

    pub fn read_nullable_string(&mut self) -> Result<Option<String>> {
        match self.read_byte_array()? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.to_vec())?)),
            None => Ok(None),
        }
    }

    pub fn read_string(&mut self) -> Result<String> {
        self.read_nullable_string()?
            .ok_or(Error::InvalidLength(NULL_LENGTH))
    }

    pub fn read_type_tag(&mut self) -> Result<TypeTag> {
        if !self.read_bool()? {
            return Err(Error::NotIdentified);
        }
        let factory_id = self.read_i32()?;
        let class_id = self.read_i32()?;
        let version = self.read_u8()?;

        Ok(TypeTag::new(factory_id, class_id).with_version(version))
    }

    /// Reads an identified object whose concrete type is known in advance.
    pub fn read_object<T: DataDeserialize>(&mut self) -> Result<T> {
        let found = self.read_type_tag()?;
        if found != T::TYPE_TAG {
            return Err(Error::UnexpectedType {
                expected: T::TYPE_TAG,
                found,
            });
        }
        T::read_data(self)
    }

    /// Reads an identified comparator, picking the decoder by its type tag.
    pub fn read_comparator(&mut self) -> Result<Arc<dyn EntryComparator>> {
        let service = self.service;
        service.comparators().decode(self)
    }

    pub fn read_nullable_comparator(&mut self) -> Result<Option<Arc<dyn EntryComparator>>> {
        if self.read_bool()? {
            self.read_comparator().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn read_filter(&mut self) -> Result<Arc<dyn EntryFilter>> {
        let service = self.service;
        service.filters().decode(self)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.remaining()
    }
}
