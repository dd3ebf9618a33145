use std::sync::Arc;

use crate::comparator::{sort_entries, EntryComparator, IterationType};
use crate::entry::MapEntry;
use crate::error::{Error, Result};
use crate::serialization::output::length_prefix;
use crate::serialization::{
    DataDeserialize, DataSerializable, ObjectDataInput, ObjectDataOutput, TypeTag,
};

use super::{EntryFilter, PREDICATE_FACTORY_ID};

/// The last entry of a page that was already returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub page: i32,
    pub entry: MapEntry,
}

/// Page-by-page view over the entries accepted by a filter.
///
/// Entries are sorted by the comparator, or by key when there is none. The
/// predicate remembers its page and the anchors of returned pages; call
/// `reset` before reusing it for another query.
#[derive(Debug, Clone)]
pub struct PagingPredicate {
    filter: Arc<dyn EntryFilter>,
    comparator: Option<Arc<dyn EntryComparator>>,
    page_size: i32,
    page: i32,
    iteration_type: IterationType,
    anchors: Vec<Anchor>,
}

impl PagingPredicate {
    pub fn new(
        filter: Arc<dyn EntryFilter>,
        page_size: i32,
        comparator: Option<Arc<dyn EntryComparator>>,
    ) -> Result<Self> {
        if page_size <= 0 {
            return Err(Error::InvalidPageSize(page_size));
        }

        Ok(Self {
            filter,
            comparator,
            page_size,
            page: 0,
            iteration_type: IterationType::default(),
            anchors: Vec::new(),
        })
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    /// Moves to `page`. A page past the end yields an empty result.
    pub fn set_page(&mut self, page: i32) -> Result<()> {
        if page < 0 {
            return Err(Error::InvalidPage(page));
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> i32 {
        self.page = self.page.saturating_add(1);
        self.page
    }

    /// Moves one page back, staying on the first page.
    pub fn previous_page(&mut self) -> i32 {
        if self.page != 0 {
            self.page -= 1;
        }
        self.page
    }

    pub fn reset(&mut self) {
        self.iteration_type = IterationType::default();
        self.anchors.clear();
        self.page = 0;
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn iteration_type(&self) -> IterationType {
        self.iteration_type
    }

    pub fn set_iteration_type(&mut self, iteration_type: IterationType) {
        self.iteration_type = iteration_type;
    }

    pub fn comparator(&self) -> Option<&Arc<dyn EntryComparator>> {
        self.comparator.as_ref()
    }

    pub fn filter(&self) -> &Arc<dyn EntryFilter> {
        &self.filter
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Filters and sorts `entries`, then returns the current page.
    ///
    /// A filter or comparator error fails the whole call and leaves the
    /// anchors untouched.
    pub fn apply(&mut self, entries: impl IntoIterator<Item = MapEntry>) -> Result<Vec<MapEntry>> {
        let mut matched = Vec::new();
        for entry in entries {
            if self.filter.matches(&entry)? {
                matched.push(entry);
            }
        }

        match &self.comparator {
            Some(comparator) => sort_entries(comparator.as_ref(), &mut matched)?,
            None => matched.sort_by_key(MapEntry::key),
        }

        let page_size = self.page_size as usize;
        let start = (self.page as usize).saturating_mul(page_size);
        tracing::debug!(
            "Paging {} matched entries, page: {}, page size: {}",
            matched.len(),
            self.page,
            self.page_size
        );

        if start >= matched.len() {
            return Ok(Vec::new());
        }

        let end = (start + page_size).min(matched.len());
        let page: Vec<MapEntry> = matched.drain(start..end).collect();
        if let Some(last) = page.last() {
            self.set_anchor(last.clone());
        }
        Ok(page)
    }

    fn set_anchor(&mut self, entry: MapEntry) {
        let anchor = Anchor {
            page: self.page,
            entry,
        };
        match self.anchors.binary_search_by_key(&self.page, |a| a.page) {
            Ok(i) => self.anchors[i] = anchor,
            Err(i) => self.anchors.insert(i, anchor),
        }
    }
}

impl DataSerializable for PagingPredicate {
    fn type_tag(&self) -> TypeTag {
        Self::TYPE_TAG
    }

    fn write_data(&self, output: &mut ObjectDataOutput) -> Result<()> {
        output.write_object(&*self.filter)?;
        output.write_nullable_object(self.comparator.as_deref())?;
        output.write_i32(self.page);
        output.write_i32(self.page_size);
        output.write_string(self.iteration_type.name())?;

        output.write_i32(length_prefix(self.anchors.len())?);
        for anchor in &self.anchors {
            output.write_i32(anchor.page);
            output.write_i64(anchor.entry.key());
            output.write_string(anchor.entry.value().as_str())?;
        }
        Ok(())
    }
}

impl DataDeserialize for PagingPredicate {
    const TYPE_TAG: TypeTag = TypeTag::new(PREDICATE_FACTORY_ID, 15);

    fn read_data(input: &mut ObjectDataInput<'_>) -> Result<Self> {
        let filter = input.read_filter()?;
        let comparator = input.read_nullable_comparator()?;
        let page = input.read_i32()?;
        let page_size = input.read_i32()?;

        let name = input.read_string()?;
        let iteration_type =
            IterationType::from_name(&name).ok_or(Error::UnknownIterationType(name))?;

        let count = input.read_i32()?;
        if count < 0 {
            return Err(Error::InvalidLength(count));
        }
        let mut anchors = Vec::with_capacity((count as usize).min(input.remaining()));
        for _ in 0..count {
            let page = input.read_i32()?;
            let key = input.read_i64()?;
            let value = input.read_string()?;
            anchors.push(Anchor {
                page,
                entry: MapEntry::new(key, value),
            });
        }

        let mut predicate = PagingPredicate::new(filter, page_size, comparator)?;
        predicate.set_page(page)?;
        predicate.iteration_type = iteration_type;
        predicate.anchors = anchors;
        Ok(predicate)
    }
}
