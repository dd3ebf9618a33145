use std::fmt::Display;

pub mod decoder;
pub mod input;
pub mod output;
pub mod service;


pub use decoder::{Decoder, DecoderTable};
pub use input::ObjectDataInput;
pub use output::ObjectDataOutput;
pub use service::SerializationService;

use crate::error::Result;

pub const CURRENT_VERSION: u8 = 1;

/// Identifies the decoder of a transmitted object.
///
/// The frame of an identified object looks like this:
///
/// ```text
///   +---------------------------------------------------+
///   | identified: 1 byte | factory id: 4 bytes          |
///   +---------------------------------------------------+
///   | class id: 4 bytes  | version: 1 byte              |
///   +---------------------------------------------------+
///   |  payload written by `DataSerializable::write_data` |
///   +---------------------------------------------------+
/// ```
///
/// Both sides must agree on all three parts. A decoder is only selected on an
/// exact match, so bumping `version` retires old payloads instead of feeding
/// them to a newer decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag {
    pub factory_id: i32,
    pub class_id: i32,
    pub version: u8,
}

impl TypeTag {
    pub const fn new(factory_id: i32, class_id: i32) -> Self {
        Self {
            factory_id,
            class_id,
            version: CURRENT_VERSION,
        }
    }

    pub const fn with_version(self, version: u8) -> Self {
        Self { version, ..self }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type (factory: {}, class: {}, version: {})",
            self.factory_id, self.class_id, self.version
        )
    }
}

/// The writing half of an identified object.
pub trait DataSerializable {
    fn type_tag(&self) -> TypeTag;

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()>;
}

/// The reading half of an identified object. Decoding builds a new value,
/// the decoded state is never mutated afterwards.
pub trait DataDeserialize: Sized {
    const TYPE_TAG: TypeTag;

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self>;
}
