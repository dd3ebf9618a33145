/// Byte order used for multi-byte primitives on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

const DEFAULT_OUTPUT_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone)]
pub struct SerializationConfig {
    pub(crate) byte_order: ByteOrder,

    /// Initial capacity of every `ObjectDataOutput`, it grows on demand.
    pub(crate) output_buffer_size: usize,
}

impl Default for SerializationConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::default(),
            output_buffer_size: DEFAULT_OUTPUT_BUFFER_SIZE,
        }
    }
}

impl SerializationConfig {
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_output_buffer_size(mut self, size: usize) -> Self {
        self.output_buffer_size = size;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn output_buffer_size(&self) -> usize {
        self.output_buffer_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_big_endian() {
        let config = SerializationConfig::default();
        assert_eq!(config.byte_order(), ByteOrder::BigEndian);
        assert_eq!(config.output_buffer_size(), DEFAULT_OUTPUT_BUFFER_SIZE);
    }

    #[test]
    fn builder_overrides() {
        let config = SerializationConfig::default()
            .with_byte_order(ByteOrder::LittleEndian)
            .with_output_buffer_size(16);
        assert_eq!(config.byte_order(), ByteOrder::LittleEndian);
        assert_eq!(config.output_buffer_size(), 16);
    }
}
