use std::cmp::Ordering;
use std::fmt::Debug;

use crate::entry::MapEntry;
use crate::error::{Error, Result};
use crate::serialization::DataSerializable;

/// Orders map entries on the members that run a paging query.
///
/// A comparator is built on the invoking side, sent as an identified object
/// and decoded again on every member, so it must be serializable and must not
/// change after construction.
pub trait EntryComparator: DataSerializable + Debug + Send + Sync {
    fn compare(&self, a: &MapEntry, b: &MapEntry) -> Result<Ordering>;

    fn name(&self) -> &str;

    /// `compare` as a negative, zero or positive number.
    fn compare_sign(&self, a: &MapEntry, b: &MapEntry) -> Result<i32> {
        self.compare(a, b).map(|ordering| ordering as i32)
    }
}

/// Which part of an entry a query returns, and which part a comparator looks at.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationType {
    Key = 0,
    Value = 1,
    #[default]
    Entry = 2,
}

impl IterationType {
    pub fn name(&self) -> &'static str {
        match self {
            IterationType::Key => "KEY",
            IterationType::Value => "VALUE",
            IterationType::Entry => "ENTRY",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "KEY" => Some(IterationType::Key),
            "VALUE" => Some(IterationType::Value),
            "ENTRY" => Some(IterationType::Entry),
            _ => None,
        }
    }
}

impl TryFrom<i32> for IterationType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(IterationType::Key),
            1 => Ok(IterationType::Value),
            2 => Ok(IterationType::Entry),
            _ => Err(Error::InvalidEnumValue {
                kind: "iteration type",
                value,
            }),
        }
    }
}

/// Sorts `entries` in place with `comparator`. The sort is stable.
///
/// The first comparison error stops the sort and is returned, `entries` is
/// left untouched in that case. An inconsistent comparator gives some
/// permutation of `entries` and never panics.
pub fn sort_entries(comparator: &dyn EntryComparator, entries: &mut [MapEntry]) -> Result<()> {
    let mut order = (0..entries.len()).collect::<Vec<_>>();
    let mut scratch = order.clone();
    merge_sort(comparator, entries, &mut order, &mut scratch)?;

    // order[i] is the index of the entry that belongs at i
    let mut target = vec![0; order.len()];
    for (position, &index) in order.iter().enumerate() {
        target[index] = position;
    }
    for i in 0..entries.len() {
        while target[i] != i {
            let j = target[i];
            entries.swap(i, j);
            target.swap(i, j);
        }
    }
    Ok(())
}

fn merge_sort(
    comparator: &dyn EntryComparator,
    entries: &[MapEntry],
    order: &mut [usize],
    scratch: &mut [usize],
) -> Result<()> {
    let len = order.len();
    if len < 2 {
        return Ok(());
    }

    let mid = len / 2;
    {
        let (left, right) = order.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        merge_sort(comparator, entries, left, left_scratch)?;
        merge_sort(comparator, entries, right, right_scratch)?;
    }

    let (mut i, mut j) = (0, mid);
    for slot in scratch.iter_mut() {
        let take_right = i == mid
            || (j < len
                && comparator.compare(&entries[order[j]], &entries[order[i]])? == Ordering::Less);
        if take_right {
            *slot = order[j];
            j += 1;
        } else {
            *slot = order[i];
            i += 1;
        }
    }
    order.copy_from_slice(scratch);
    Ok(())
}
