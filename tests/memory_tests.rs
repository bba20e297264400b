use chunk_pool::memory::*;

#[derive(Debug, PartialEq)]
struct Entity {
    id: u64,
    position: [f32; 3],
}

#[test]
fn index_set_fill_then_drain() {
    let mut set: FixedIndexSet<4> = IndexSet::new();
    set.push_back(0);
    set.push_back(1);
    set.push_back(2);
    set.push_back(3);

    assert_eq!(set.len(), 4);
    assert_eq!(set.front(), 0);
    assert_eq!(set.back(), 3);
    assert_eq!(set.next(1), Some(2));

    assert_eq!(set.pop_front(), Some(0));
    assert_eq!(set.pop_front(), Some(1));
    assert_eq!(set.pop_front(), Some(2));
    assert_eq!(set.pop_front(), Some(3));
    assert!(set.is_empty());
}

#[test]
fn index_set_interleaved_insert_remove() {
    let mut set: FixedIndexSet<3> = IndexSet::new();
    set.push_back(0);
    set.push_back(2);
    set.push_back(1);
    set.remove(2);

    let order: Vec<usize> = set.iter().collect();
    assert_eq!(order, vec![0, 1]);
    assert!(!set.contains(2));
}

#[test]
fn chunk_allocate_deallocate_alignment() {
    let mut chunk = Chunk::new(8, 16, 4).unwrap();
    let slot = chunk.allocate().unwrap();
    let ptr = chunk.at(slot);
    assert_eq!((ptr as usize) % 16, 0);
    assert!(chunk.find(ptr).is_some());
    assert!(chunk.deallocate(slot));
    assert!(!chunk.deallocate(slot));
}

#[test]
fn slab_pool_growth_and_reclassification() {
    let mut pool = SlabPool::new(4, 8, 16);
    let mut ptrs = Vec::new();
    for _ in 0..5 {
        let (ci, slot) = pool.allocate().unwrap();
        ptrs.push((ci, pool.chunk(ci).at(slot)));
    }
    assert_eq!(pool.chunk_count(), 2);

    // Deallocate slot 0 of the first chunk: it should move back to partial.
    let (first_chunk, first_ptr) = ptrs[0];
    assert_eq!(first_chunk, 0);
    assert!(pool.deallocate(first_ptr));

    let stats = pool.stats();
    assert!(stats.slots_in_use < stats.slots_total);
}

#[test]
fn slab_pool_typed_create_destroy_round_trip() {
    let mut pool: TypedPool<Entity> = TypedPool::new(16);
    let ptr = pool
        .create(Entity {
            id: 7,
            position: [1.0, 2.0, 3.0],
        })
        .unwrap();

    assert_eq!(
        unsafe { ptr.as_ref() },
        &Entity {
            id: 7,
            position: [1.0, 2.0, 3.0]
        }
    );
    assert!(pool.destroy(ptr));
    assert!(!pool.contains(ptr.as_ptr()));
}

#[test]
fn item_pool_recycles_lowest_free_index() {
    let mut pool: ItemPool<u64> = ItemPool::new();
    let a = pool.insert();
    let b = pool.insert();
    assert_eq!((a, b), (0, 1));

    pool.erase(a);
    let c = pool.insert();
    assert_eq!(c, 0);

    let order: Vec<usize> = pool.occupied_slots().iter().collect();
    assert_eq!(order, vec![1, 0]);
}

#[test]
fn dynamic_pool_cross_type_isolation() {
    struct A(u64);
    struct B {
        _payload: [u8; 24],
    }

    let mut pool = DynamicPool::default();
    let a = pool.create(A(1)).unwrap();
    let b = pool.create(B { _payload: [0; 24] }).unwrap();

    assert!(pool.contains(a.as_ptr() as *const u8));
    assert!(pool.contains(b.as_ptr() as *const u8));

    assert!(pool.destroy_untyped(a.as_ptr() as *mut u8));
    assert!(!pool.contains(a.as_ptr() as *const u8));
    assert!(pool.contains(b.as_ptr() as *const u8));
}

#[test]
fn dynamic_pool_teardown_runs_every_live_destructor() {
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Counted(Rc<RefCell<usize>>);
    impl Drop for Counted {
        fn drop(&mut self) {
            *self.0.borrow_mut() += 1;
        }
    }

    let count = Rc::new(RefCell::new(0));
    {
        let mut pool = DynamicPool::default();
        let first = pool.create(Counted(count.clone())).unwrap();
        pool.create(Counted(count.clone())).unwrap();
        pool.create(Counted(count.clone())).unwrap();

        assert!(pool.destroy(first));
        assert_eq!(*count.borrow(), 1);
    }
    // 1 explicit destroy + 2 during teardown.
    assert_eq!(*count.borrow(), 3);
}
