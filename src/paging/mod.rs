mod filter;
mod predicate;

pub use filter::{BetweenFilter, EntryFilter, TrueFilter, KEY_ATTRIBUTE};
pub use predicate::{Anchor, PagingPredicate};

/// Factory id shared by filters and the paging predicate.
pub const PREDICATE_FACTORY_ID: i32 = -20;
