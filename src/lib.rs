pub mod comparator;
pub mod comparators;
pub mod config;
pub mod entry;
pub mod error;
pub mod json;
pub mod paging;
pub mod serialization;

pub use comparator::{EntryComparator, IterationType};
pub use entry::MapEntry;
pub use error::{Error, Result};
pub use json::JsonValue;

use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL_ALLOCATOR: MiMalloc = MiMalloc;

#[ctor::ctor]
fn init() {
    color_backtrace::install();

    // A host application may already own the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_file(true)
        .with_level(true)
        .without_time()
        .with_thread_ids(true)
        .try_init();
}
