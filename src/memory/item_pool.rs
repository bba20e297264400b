//! ItemPool - container denso de valores onde `insert` retorna um índice
//! estável que sobrevive até `erase`, e índices apagados são reciclados.

use super::index_set::{DynamicIndexSet, IndexSet};

/// Container que cresce sobre `T`, com índices estáveis e reciclados.
pub struct ItemPool<T> {
    slots: Vec<T>,
    free_indices: DynamicIndexSet,
    occupied_indices: DynamicIndexSet,
}

impl<T: Default> ItemPool<T> {
    /// Insere um `T` construído por padrão, retornando seu índice estável.
    pub fn insert(&mut self) -> usize {
        let slot = self.acquire_slot(T::default);
        self.occupied_indices.push_back(slot);
        slot
    }
}

impl<T: Default> Default for ItemPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemPool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_indices: IndexSet::with_capacity(0),
            occupied_indices: IndexSet::with_capacity(0),
        }
    }

    fn grow_capacity(&mut self, n: usize) {
        self.free_indices.reserve(n);
        self.occupied_indices.reserve(n);
    }

    fn acquire_slot(&mut self, make: impl FnOnce() -> T) -> usize {
        if let Some(slot) = self.free_indices.pop_front() {
            return slot;
        }
        self.slots.push(make());
        let slot = self.slots.len() - 1;
        self.grow_capacity(self.slots.len());
        slot
    }

    /// Insere `value`, retornando seu índice estável.
    pub fn insert_value(&mut self, value: T) -> usize {
        let slot = if let Some(slot) = self.free_indices.pop_front() {
            self.slots[slot] = value;
            slot
        } else {
            self.slots.push(value);
            let slot = self.slots.len() - 1;
            self.grow_capacity(self.slots.len());
            slot
        };
        self.occupied_indices.push_back(slot);
        slot
    }

    /// Move `idx` de ocupado para livre. Não descarta o valor; os bytes do
    /// slot são simplesmente sobrescritos no próximo reuso.
    pub fn erase(&mut self, idx: usize) {
        self.free_indices.push_back(idx);
        self.occupied_indices.remove(idx);
    }

    /// Cresce o armazenamento para capacidade `>= n` sem alterar o
    /// conjunto ocupado observável. Implementado como um crescimento
    /// direto em vez do laço insert-então-erase da fonte original.
    pub fn reserve(&mut self, n: usize)
    where
        T: Default,
    {
        while self.slots.len() < n {
            self.slots.push(T::default());
        }
        self.grow_capacity(self.slots.len());
        for i in 0..self.slots.len() {
            if !self.occupied_indices.contains(i) && !self.free_indices.contains(i) {
                self.free_indices.push_back(i);
            }
        }
    }

    pub fn clear(&mut self) {
        self.occupied_indices.clear();
        self.free_indices.construct(0..self.slots.len());
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.occupied_indices.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.occupied_indices.contains(idx)
    }

    pub fn free_slots(&self) -> &DynamicIndexSet {
        &self.free_indices
    }

    pub fn occupied_slots(&self) -> &DynamicIndexSet {
        &self.occupied_indices
    }
}

impl<T> std::ops::Index<usize> for ItemPool<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.slots[idx]
    }
}

impl<T> std::ops::IndexMut<usize> for ItemPool<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.slots[idx]
    }
}
