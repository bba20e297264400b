//! TypedPool<T> - [`SlabPool`] especializado para um único tipo de
//! elemento `T`, conhecido em tempo de compilação.
//!
//! Espelha o `TypedPool<T>` do professor (`avila-math/src/memory/pool.rs`):
//! um wrapper fino que deriva `element_size`/`alignment` de `T` e
//! encaminha para o pool bruto.

use std::ptr::NonNull;

use super::slab_pool::{SlabPool, SlabPoolStats};

/// Contagem padrão de slots por chunk, equivalente ao
/// `1024*1024/(10*4)` (~25.6k) da fonte original.
pub const DEFAULT_CHUNK_SLOT_COUNT: usize = 1024 * 1024 / (10 * 4);

pub struct TypedPool<T> {
    pool: SlabPool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedPool<T> {
    pub fn new(chunk_slot_count: usize) -> Self {
        Self {
            pool: SlabPool::new(chunk_slot_count, std::mem::size_of::<T>(), std::mem::align_of::<T>()),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn with_default_chunk_size() -> Self {
        Self::new(DEFAULT_CHUNK_SLOT_COUNT)
    }

    /// Constrói `value` num slot recém-alocado.
    pub fn create(&mut self, value: T) -> Option<NonNull<T>> {
        self.pool.create(value)
    }

    /// Verifica a posse, roda o destrutor de `T` e então libera o slot.
    pub fn destroy(&mut self, ptr: NonNull<T>) -> bool {
        self.pool.destroy(ptr)
    }

    pub fn contains(&self, ptr: *const T) -> bool {
        self.pool.contains(ptr as *const u8)
    }

    pub fn find(&self, ptr: *const T) -> Option<(usize, usize)> {
        self.pool.find(ptr as *const u8)
    }

    pub fn stats(&self) -> SlabPoolStats {
        self.pool.stats()
    }
}
