//! DynamicPool - pool com despacho de tipo em tempo de execução
//!
//! Roteia alocações de tipos heterogêneos para [`SlabPool`]s por tipo,
//! indexados por [`TypeId`], mantendo a capacidade de localizar, destruir
//! e liberar um objeto a partir de apenas um ponteiro sem tipo.
//!
//! Baseado em `original_source/chunky_mem/include/chunky_mem/
//! memory_pool_dynamic.h` para o conjunto de operações, e no
//! `MemoryManager` do professor (`avila-math/src/memory/manager.rs`) para
//! o formato de um registro `HashMap<identidade, allocator+metadados>`.

use std::any::TypeId;
use std::collections::HashMap;
use std::ptr::NonNull;

use super::chunk::align_up;
use super::slab_pool::SlabPool;

/// Orçamento total de bytes por chunk, por tipo (padrão sugerido de 5 MiB).
pub const DEFAULT_CHUNK_SIZE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_ALIGNMENT: usize = 16;

/// Função com tipo apagado que invoca o destrutor correto para objetos de
/// um dado sub-pool. Capturada uma vez na criação do sub-pool e nunca
/// trocada depois.
type DestructorTrampoline = Box<dyn Fn(*mut u8)>;

struct SubPool {
    pool: SlabPool,
    destructor: DestructorTrampoline,
}

fn destructor_for<T>() -> DestructorTrampoline {
    Box::new(|ptr: *mut u8| unsafe {
        std::ptr::drop_in_place(ptr as *mut T);
    })
}

/// Mapa de identidade de tipo em tempo de execução para
/// `(SlabPool, destructor trampoline)`.
pub struct DynamicPool {
    pools: HashMap<TypeId, SubPool>,
    chunk_size_bytes: usize,
    alignment: usize,
}

impl DynamicPool {
    pub fn new(chunk_size_bytes: usize, alignment: usize) -> Self {
        assert!(alignment.is_power_of_two());
        Self {
            pools: HashMap::new(),
            chunk_size_bytes,
            alignment,
        }
    }

    fn get_or_create_pool<T: 'static>(&mut self) -> &mut SubPool {
        let type_id = TypeId::of::<T>();
        self.pools.entry(type_id).or_insert_with(|| {
            let element_size = std::mem::size_of::<T>();
            let slot_stride = align_up(element_size, self.alignment);
            let chunk_slot_count = (self.chunk_size_bytes / slot_stride).max(1);
            SubPool {
                pool: SlabPool::new(chunk_slot_count, element_size, self.alignment),
                destructor: destructor_for::<T>(),
            }
        })
    }

    /// Procura ou cria o sub-pool de `T`, então constrói `value` num slot
    /// recém-alocado.
    pub fn create<T: 'static>(&mut self, value: T) -> Option<NonNull<T>> {
        self.get_or_create_pool::<T>().pool.create(value)
    }

    /// Destruição tipada: se o sub-pool de `T` é dono de `ptr`, destrói e
    /// libera ali mesmo. Caso contrário, recai no caminho sem tipo, que
    /// varre todo sub-pool.
    pub fn destroy<T: 'static>(&mut self, ptr: NonNull<T>) -> bool {
        if self.get_or_create_pool::<T>().pool.destroy(ptr) {
            return true;
        }
        self.destroy_untyped(ptr.cast::<u8>().as_ptr())
    }

    /// Destruição sem tipo: localiza o sub-pool dono varrendo, invoca seu
    /// destructor trampoline guardado, então desaloca.
    pub fn destroy_untyped(&mut self, ptr: *mut u8) -> bool {
        let Some((type_id, _, _)) = self.find(ptr) else {
            return false;
        };
        let sub = self.pools.get_mut(&type_id).expect("type_id came from find()");
        (sub.destructor)(ptr);
        sub.pool.deallocate_raw(
            NonNull::new(ptr).expect("destroy_untyped called with a null pointer"),
        )
    }

    /// Alocação de slot bruto: reserva um slot sem rodar nenhum construtor.
    pub fn allocate<T: 'static>(&mut self) -> Option<NonNull<T>> {
        self.get_or_create_pool::<T>()
            .pool
            .allocate_raw()
            .map(NonNull::cast)
    }

    /// Liberação de slot bruto: libera um slot sem rodar nenhum destrutor.
    pub fn deallocate<T: 'static>(&mut self, ptr: NonNull<T>) -> bool {
        self.get_or_create_pool::<T>()
            .pool
            .deallocate_raw(ptr.cast::<u8>())
    }

    /// Liberação bruta sem tipo: localiza e então libera, retornando o
    /// sucesso das duas etapas (o `&&` de curto-circuito da fonte
    /// original, agora sem ambiguidade).
    pub fn deallocate_untyped(&mut self, ptr: *mut u8) -> bool {
        let Some((type_id, _, _)) = self.find(ptr) else {
            return false;
        };
        self.pools
            .get_mut(&type_id)
            .expect("type_id came from find()")
            .pool
            .deallocate_raw(NonNull::new(ptr).expect("deallocate_untyped called with a null pointer"))
    }

    /// Varre todo sub-pool em busca do dono de `ptr`.
    pub fn find(&self, ptr: *const u8) -> Option<(TypeId, usize, usize)> {
        for (type_id, sub) in self.pools.iter() {
            if let Some((ci, si)) = sub.pool.find(ptr) {
                return Some((*type_id, ci, si));
            }
        }
        None
    }

    /// Reconstrução de ponteiro a partir de um resultado prévio de
    /// [`Self::find`].
    pub fn get_item<T: 'static>(&self, type_id: TypeId, chunk_index: usize, slot_index: usize) -> Option<NonNull<T>> {
        debug_assert_eq!(type_id, TypeId::of::<T>());
        let sub = self.pools.get(&type_id)?;
        NonNull::new(sub.pool.chunk(chunk_index).at(slot_index)).map(NonNull::cast)
    }

    pub fn contains(&self, ptr: *const u8) -> bool {
        self.pools.values().any(|sub| sub.pool.contains(ptr))
    }

    pub fn contains_typed<T: 'static>(&self, ptr: *const T) -> bool {
        match self.pools.get(&TypeId::of::<T>()) {
            Some(sub) => sub.pool.contains(ptr as *const u8),
            None => false,
        }
    }
}

impl Default for DynamicPool {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE_BYTES, DEFAULT_ALIGNMENT)
    }
}

impl Drop for DynamicPool {
    fn drop(&mut self) {
        for sub in self.pools.values_mut() {
            for ci in 0..sub.pool.chunk_count() {
                let chunk = sub.pool.chunk(ci);
                for slot in 0..chunk.chunk_size() {
                    if chunk.is_allocated(slot) {
                        (sub.destructor)(chunk.at(slot));
                    }
                }
            }
        }
    }
}
