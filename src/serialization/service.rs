use std::sync::Arc;

use bytes::Bytes;

use crate::comparator::EntryComparator;
use crate::comparators::{AgeComparator, FieldComparator, KeyValueComparator};
use crate::config::SerializationConfig;
use crate::error::Result;
use crate::paging::{BetweenFilter, EntryFilter, PagingPredicate, TrueFilter};

use super::{DataDeserialize, DataSerializable, DecoderTable, ObjectDataInput, ObjectDataOutput};

fn decode_comparator<C>(input: &mut ObjectDataInput<'_>) -> Result<Arc<dyn EntryComparator>>
where
    C: EntryComparator + DataDeserialize + 'static,
{
    Ok(Arc::new(C::read_data(input)?))
}

fn decode_filter<F>(input: &mut ObjectDataInput<'_>) -> Result<Arc<dyn EntryFilter>>
where
    F: EntryFilter + DataDeserialize + 'static,
{
    Ok(Arc::new(F::read_data(input)?))
}

/// Frames objects for transfer and decodes them on the receiving side.
///
/// Both members and clients hold one of these, built once and then only
/// read, so it can be shared behind an `Arc`.
#[derive(Default)]
pub struct SerializationService {
    config: SerializationConfig,
    comparators: DecoderTable<dyn EntryComparator>,
    filters: DecoderTable<dyn EntryFilter>,
}

impl SerializationService {
    /// A service with empty decoder tables.
    pub fn new(config: SerializationConfig) -> Self {
        Self {
            config,
            comparators: DecoderTable::default(),
            filters: DecoderTable::default(),
        }
    }

    /// A service that can decode every comparator and filter of this crate.
    pub fn with_builtins(config: SerializationConfig) -> Result<Self> {
        let mut service = Self::new(config);
        service.register_comparator::<AgeComparator>()?;
        service.register_comparator::<FieldComparator>()?;
        service.register_comparator::<KeyValueComparator>()?;
        service.register_filter::<TrueFilter>()?;
        service.register_filter::<BetweenFilter>()?;
        Ok(service)
    }

    pub fn register_comparator<C>(&mut self) -> Result<()>
    where
        C: EntryComparator + DataDeserialize + 'static,
    {
        self.comparators
            .register(C::TYPE_TAG, decode_comparator::<C>)
    }

    pub fn register_filter<F>(&mut self) -> Result<()>
    where
        F: EntryFilter + DataDeserialize + 'static,
    {
        self.filters.register(F::TYPE_TAG, decode_filter::<F>)
    }

    pub fn config(&self) -> &SerializationConfig {
        &self.config
    }

    pub fn comparators(&self) -> &DecoderTable<dyn EntryComparator> {
        &self.comparators
    }

    pub fn filters(&self) -> &DecoderTable<dyn EntryFilter> {
        &self.filters
    }

    pub fn output(&self) -> ObjectDataOutput {
        ObjectDataOutput::new(&self.config)
    }

    pub fn input(&self, data: Bytes) -> ObjectDataInput<'_> {
        ObjectDataInput::new(data, self)
    }

    /// Encodes `object` as a single identified frame.
    pub fn to_bytes<S: DataSerializable + ?Sized>(&self, object: &S) -> Result<Bytes> {
        let mut output = self.output();
        output.write_object(object)?;
        let bytes = output.freeze();
        tracing::trace!("Encoded {} into {} bytes", object.type_tag(), bytes.len());
        Ok(bytes)
    }

    pub fn read_comparator(&self, data: Bytes) -> Result<Arc<dyn EntryComparator>> {
        let mut input = self.input(data);
        input.read_comparator()
    }

    pub fn read_filter(&self, data: Bytes) -> Result<Arc<dyn EntryFilter>> {
        let mut input = self.input(data);
        input.read_filter()
    }

    pub fn read_paging_predicate(&self, data: Bytes) -> Result<PagingPredicate> {
        self.read_object(data)
    }

    pub fn read_object<T: DataDeserialize>(&self, data: Bytes) -> Result<T> {
        let mut input = self.input(data);
        input.read_object()
    }
}

impl std::fmt::Debug for SerializationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationService")
            .field("config", &self.config)
            .field("comparators", &self.comparators.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

