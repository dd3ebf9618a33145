use bytes::{BufMut, Bytes, BytesMut};

use crate::config::{ByteOrder, SerializationConfig};
use crate::error::{Error, Result};

use super::DataSerializable;

pub(crate) const NULL_LENGTH: i32 = -1;

/// Converts a collection length to its `i32` wire prefix.
pub(crate) fn length_prefix(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::LengthOverflow(len))
}

/// Binary sink for identified objects.
///
/// Multi-byte primitives follow the configured byte order, booleans take a
/// single byte.
pub struct ObjectDataOutput {
    buf: BytesMut,
    byte_order: ByteOrder,
}

impl ObjectDataOutput {
    pub fn new(config: &SerializationConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.output_buffer_size()),
            byte_order: config.byte_order(),
        }
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        match self.byte_order {
            ByteOrder::BigEndian => self.buf.put_i16(value),
            ByteOrder::LittleEndian => self.buf.put_i16_le(value),
        }
    }

    pub fn write_i32(&mut self, value: i32) {
        match self.byte_order {
            ByteOrder::BigEndian => self.buf.put_i32(value),
            ByteOrder::LittleEndian => self.buf.put_i32_le(value),
        }
    }

    pub fn write_i64(&mut self, value: i64) {
        match self.byte_order {
            ByteOrder::BigEndian => self.buf.put_i64(value),
            ByteOrder::LittleEndian => self.buf.put_i64_le(value),
        }
    }

    pub fn write_f64(&mut self, value: f64) {
        match self.byte_order {
            ByteOrder::BigEndian => self.buf.put_f64(value),
            ByteOrder::LittleEndian => self.buf.put_f64_le(value),
        }
    }

    /// Writes `value` as a length prefixed byte array. The length is an `i32`.
    pub fn write_byte_array(&mut self, value: &[u8]) -> Result<()> {
        self.write_i32(length_prefix(value.len())?);
        self.buf.put(value);
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_byte_array(value.as_bytes())
    }

    pub fn write_nullable_string(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.write_string(value),
            None => {
                self.write_i32(NULL_LENGTH);
                Ok(())
            }
        }
    }

    /// Writes the identified frame of `object` followed by its payload.
    pub fn write_object<S: DataSerializable + ?Sized>(&mut self, object: &S) -> Result<()> {
        let tag = object.type_tag();
        self.write_bool(true);
        self.write_i32(tag.factory_id);
        self.write_i32(tag.class_id);
        self.write_u8(tag.version);
        object.write_data(self)
    }

    pub fn write_nullable_object<S: DataSerializable + ?Sized>(
        &mut self,
        object: Option<&S>,
    ) -> Result<()> {
        self.write_bool(object.is_some());
        match object {
            Some(object) => self.write_object(object),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ByteOrder, SerializationConfig};

    use crate::error::Error;

    use super::{length_prefix, ObjectDataOutput};

    #[test]
    fn length_prefix_reports_the_real_length() {
        assert_eq!(length_prefix(0).unwrap(), 0);
        assert_eq!(length_prefix(i32::MAX as usize).unwrap(), i32::MAX);

        let too_long = i32::MAX as usize + 1;
        assert!(matches!(
            length_prefix(too_long),
            Err(Error::LengthOverflow(len)) if len == too_long
        ));
    }

    #[test]
    fn bool_takes_one_byte() {
        let mut output = ObjectDataOutput::new(&SerializationConfig::default());
        output.write_bool(true);
        output.write_bool(false);
        assert_eq!(output.as_slice(), &[1, 0]);
    }

    #[test]
    fn byte_order() {
        let mut big = ObjectDataOutput::new(&SerializationConfig::default());
        big.write_i32(1);
        assert_eq!(big.as_slice(), &[0, 0, 0, 1]);

        let config = SerializationConfig::default().with_byte_order(ByteOrder::LittleEndian);
        let mut little = ObjectDataOutput::new(&config);
        little.write_i32(1);
        assert_eq!(little.as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn string_layout() -> anyhow::Result<()> {
        let mut output = ObjectDataOutput::new(&SerializationConfig::default());
        output.write_string("age")?;
        output.write_nullable_string(None)?;
        assert_eq!(
            output.as_slice(),
            &[0, 0, 0, 3, b'a', b'g', b'e', 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(output.position(), 11);
        Ok(())
    }

    #[test]
    fn grows_past_initial_capacity() {
        let config = SerializationConfig::default().with_output_buffer_size(2);
        let mut output = ObjectDataOutput::new(&config);
        output.write_i64(-1);
        output.write_f64(1.5);
        assert_eq!(output.freeze().len(), 16);
    }
}
