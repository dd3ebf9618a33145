mod age;
mod field;
mod key_value;

pub use age::{AgeComparator, AGE_FIELD};
pub use field::FieldComparator;
pub use key_value::{ComparisonKind, KeyValueComparator};
