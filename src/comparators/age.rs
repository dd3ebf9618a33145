use std::cmp::Ordering;

use crate::comparator::EntryComparator;
use crate::entry::MapEntry;
use crate::error::Result;
use crate::serialization::{
    DataDeserialize, DataSerializable, ObjectDataInput, ObjectDataOutput, TypeTag,
};

use super::field::compare_by_field;

pub const AGE_FIELD: &str = "age";

/// Compares JSON map values by their `age` field.
///
/// The invoking side picks ascending or descending order, the flag is the
/// only state sent to the members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgeComparator {
    reverse: bool,
}

impl AgeComparator {
    pub fn new(reverse: bool) -> Self {
        Self { reverse }
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }
}

impl EntryComparator for AgeComparator {
    fn compare(&self, a: &MapEntry, b: &MapEntry) -> Result<Ordering> {
        compare_by_field(AGE_FIELD, self.reverse, a, b)
    }

    fn name(&self) -> &str {
        "gridsort.AgeComparator"
    }
}

impl DataSerializable for AgeComparator {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()> {
        output.write_bool(self.reverse);
        Ok(())
    }
}

impl DataDeserialize for AgeComparator {
    const TYPE_TAG: TypeTag = TypeTag::new(1, 1);

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self> {
        Ok(Self {
            reverse: input.read_bool()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use itertools::Itertools;
    use rand::Rng;

    use crate::comparator::{sort_entries, EntryComparator};
    use crate::config::SerializationConfig;
    use crate::entry::MapEntry;
    use crate::error::{DocumentError, Error};
    use crate::serialization::SerializationService;

    use super::AgeComparator;

    fn student(key: i64, age: i64) -> MapEntry {
        MapEntry::new(key, format!(r#"{{"student_id": {key}, "age": {age}}}"#))
    }

    fn ages(entries: &[MapEntry]) -> Vec<i64> {
        entries
            .iter()
            .map(|e| e.value().integer_field("age").unwrap())
            .collect_vec()
    }

    #[test]
    fn sign_of_difference() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let asc = AgeComparator::new(false);
        let desc = AgeComparator::new(true);

        for _ in 0..200 {
            let a: i64 = rng.gen_range(-1000..1000);
            let b: i64 = rng.gen_range(-1000..1000);
            let (ea, eb) = (student(1, a), student(2, b));

            assert_eq!(asc.compare_sign(&ea, &eb)?, (a - b).signum() as i32);
            assert_eq!(desc.compare_sign(&ea, &eb)?, (b - a).signum() as i32);
            // reversed order with swapped arguments matches the natural order
            assert_eq!(desc.compare(&eb, &ea)?, asc.compare(&ea, &eb)?);
        }
        Ok(())
    }

    #[test]
    fn extreme_ages_do_not_overflow() -> anyhow::Result<()> {
        let asc = AgeComparator::new(false);
        let low = student(1, i64::MIN);
        let high = student(2, i64::MAX);
        assert_eq!(asc.compare(&low, &high)?, Ordering::Less);
        assert_eq!(asc.compare(&high, &low)?, Ordering::Greater);
        Ok(())
    }

    #[test]
    fn sorts_both_directions() -> anyhow::Result<()> {
        let mut entries = vec![student(1, 30), student(2, 25), student(3, 40)];

        sort_entries(&AgeComparator::new(false), &mut entries)?;
        assert_eq!(ages(&entries), vec![25, 30, 40]);

        sort_entries(&AgeComparator::new(true), &mut entries)?;
        assert_eq!(ages(&entries), vec![40, 30, 25]);
        Ok(())
    }

    #[test]
    fn missing_age_is_an_error() {
        let cmp = AgeComparator::new(false);
        let nameless = MapEntry::new(9, r#"{"student_id": 9}"#);

        assert!(matches!(
            cmp.compare(&student(1, 10), &nameless),
            Err(Error::MissingField { field }) if field == "age"
        ));

        let mut entries = vec![student(1, 10), nameless, student(2, 5)];
        assert!(matches!(
            sort_entries(&cmp, &mut entries),
            Err(Error::MissingField { .. })
        ));
    }

    #[test]
    fn malformed_document_is_an_error() {
        let cmp = AgeComparator::new(true);
        let broken = MapEntry::new(1, r#"{"age": 3"#);
        assert!(matches!(
            cmp.compare(&broken, &student(2, 3)),
            Err(Error::MalformedDocument(_))
        ));
    }

    #[test]
    fn fractional_age_is_truncated() -> anyhow::Result<()> {
        let cmp = AgeComparator::default();
        let thirty = MapEntry::new(1, r#"{"age": 30.0}"#);
        let twenty_five = MapEntry::new(2, r#"{"age": 25}"#);
        assert_eq!(cmp.compare(&thirty, &twenty_five)?, Ordering::Greater);
        assert_eq!(
            cmp.compare(&MapEntry::new(3, r#"{"age": 25.7}"#), &twenty_five)?,
            Ordering::Equal
        );
        Ok(())
    }

    #[test]
    fn non_object_document_is_malformed() {
        let cmp = AgeComparator::default();
        let array = MapEntry::new(1, "[1, 2]");
        assert!(matches!(
            cmp.compare(&array, &student(2, 25)),
            Err(Error::MalformedDocument(DocumentError::NotAnObject))
        ));
    }

    #[test]
    fn flag_is_one_byte() -> anyhow::Result<()> {
        let service = SerializationService::default();
        let mut output = service.output();
        output.write_object(&AgeComparator::new(true))?;

        // identified, factory 1, class 1, version 1, reverse
        assert_eq!(
            output.as_slice(),
            &[1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1]
        );
        Ok(())
    }

    #[test]
    fn transfer_keeps_order() -> anyhow::Result<()> {
        let service = SerializationService::with_builtins(SerializationConfig::default())?;
        let entries = [student(1, 30), student(2, 25), student(3, 40)];

        for reverse in [false, true] {
            let original = AgeComparator::new(reverse);
            let decoded = service.read_comparator(service.to_bytes(&original)?)?;

            for (a, b) in entries.iter().cartesian_product(entries.iter()) {
                assert_eq!(decoded.compare(a, b)?, original.compare(a, b)?);
            }
        }
        Ok(())
    }
}
