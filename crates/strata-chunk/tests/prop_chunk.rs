use proptest::prelude::*;
use strata_chunk::{CHUNK_DEPTH, CHUNK_VOLUME, CHUNK_WIDTH, ChunkColumn, ChunkCoord, LocalPos};

fn local() -> impl Strategy<Value = LocalPos> {
    (0..CHUNK_WIDTH, 0..CHUNK_WIDTH, 0..CHUNK_DEPTH).prop_map(|(q, r, l)| LocalPos::new(q, r, l))
}

fn world() -> impl Strategy<Value = i32> {
    -1_000_000i32..=1_000_000
}

proptest! {
    // Writing air leaves no stored entry behind
    #[test]
    fn air_is_never_stored(writes in prop::collection::vec((local(), 0u16..8), 1..200)) {
        let mut c = ChunkColumn::new(ChunkCoord::default());
        for (p, id) in &writes {
            c.set(*p, *id);
        }
        for (p, _) in &writes {
            let id = c.get(*p);
            prop_assert_eq!(c.has_entry(*p), id != 0);
        }
        let last = writes.last().unwrap().0;
        c.set(last, 0);
        prop_assert_eq!(c.get(last), 0);
        prop_assert!(!c.has_entry(last));
        prop_assert!(c.iter_tiles().all(|(_, id)| id != 0));
    }

    // Schedule stays sorted after arbitrary register/deregister sequences
    #[test]
    fn schedule_is_non_decreasing(
        ops in prop::collection::vec((0u32..16, 0.0f64..100.0, any::<bool>()), 1..120)
    ) {
        let mut c = ChunkColumn::new(ChunkCoord::default());
        for (index, due, remove) in ops {
            if remove {
                let before = c.ticks().len();
                let had = c.ticks().iter().any(|e| e.index == index);
                let removed = c.deregister_tick(index);
                prop_assert_eq!(removed, had);
                prop_assert_eq!(c.ticks().len(), before - removed as usize);
            } else {
                c.register_tick(index, due);
            }
            prop_assert!(c.ticks().windows(2).all(|w| w[0].due <= w[1].due));
        }
    }

    // Every world tile has exactly one (chunk, local) home, and it maps back
    #[test]
    fn world_coords_partition(q in world(), r in world(), layer in 0i32..4096) {
        let chunk = ChunkCoord::from_world(q, r, layer);
        let pos = ChunkCoord::local_of(q, r, layer);
        prop_assert!((pos.index() as usize) < CHUNK_VOLUME);
        let (oq, or, ol) = chunk.origin();
        prop_assert_eq!(oq + pos.q as i32, q);
        prop_assert_eq!(or + pos.r as i32, r);
        prop_assert_eq!(ol + pos.layer as i32, layer);
    }
}
