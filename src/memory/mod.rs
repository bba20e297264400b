pub mod chunk;
pub mod dynamic_pool;
pub mod index_set;
pub mod item_pool;
pub mod slab_pool;
pub mod typed_pool;

pub use chunk::Chunk;
pub use dynamic_pool::{DynamicPool, DEFAULT_ALIGNMENT, DEFAULT_CHUNK_SIZE_BYTES};
pub use index_set::{
    DynamicIndexSet, DynamicIndexStorage, FixedIndexSet, FixedIndexStorage, GrowableIndexStorage,
    IndexSet, IndexStorage,
};
pub use item_pool::ItemPool;
pub use slab_pool::{SlabPool, SlabPoolStats};
pub use typed_pool::TypedPool;
