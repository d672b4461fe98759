//! Whole-field generation through the chunk seam.

use glam::IVec3;

use gooeydefence::resources::defenceconfig::DefenceConfig;
use gooeydefence::resources::defencefield::DefenceField;
use gooeydefence::worldgen::rasterizers::FILLING_LEVEL;
use gooeydefence::worldgen::{BlockKind, ChunkView, MemoryChunk, Region, WorldGenerator};

const CHUNK: IVec3 = IVec3::new(32, 16, 32);

/// Ground-level slice through the whole field, split into chunks.
fn generate_ground(generator: &WorldGenerator) -> Vec<MemoryChunk> {
    let mut chunks = Vec::new();
    for cx in -3..3 {
        for cz in -3..3 {
            let mut chunk = MemoryChunk::new(Region::from_chunk(IVec3::new(cx, 0, cz), CHUNK));
            generator.generate_chunk(&mut chunk);
            chunks.push(chunk);
        }
    }
    chunks
}

fn block_at(chunks: &[MemoryChunk], pos: IVec3) -> Option<BlockKind> {
    chunks
        .iter()
        .find(|c| c.region().contains(pos))
        .and_then(|c| c.block(pos))
}

#[test]
fn ground_ring_has_the_wall_entrances_and_shrine() {
    let field = DefenceField::new();
    let generator = WorldGenerator::new(&field, 5, 0.3);
    let chunks = generate_ground(&generator);

    // Plain wall away from the entrances.
    assert_eq!(block_at(&chunks, IVec3::new(0, 0, 60)), Some(BlockKind::WorldBlock));
    assert_eq!(block_at(&chunks, IVec3::new(0, 0, -60)), Some(BlockKind::WorldBlock));

    // Every entrance is open and hooded with the alternate block.
    for entrance in field.entrances() {
        assert_eq!(block_at(&chunks, *entrance), None, "entrance {entrance} is open");
    }
    assert_eq!(block_at(&chunks, IVec3::new(64, 0, 0)), Some(BlockKind::AltWorldBlock));

    // Shrine base at the centre, nothing else near it.
    assert_eq!(block_at(&chunks, IVec3::new(1, 0, 1)), Some(BlockKind::ShrineBlock));
    for x in -5..=5 {
        for z in -5..=5 {
            if x * x + z * z > 25 {
                continue;
            }
            let block = block_at(&chunks, IVec3::new(x, FILLING_LEVEL, z));
            assert_ne!(block, Some(BlockKind::FillingBlock));
        }
    }
}

#[test]
fn filling_respects_threshold_and_clear_zones() {
    let field = DefenceField::new();
    let generator = WorldGenerator::new(&field, 11, 0.3);
    let chunks = generate_ground(&generator);

    let filled: Vec<IVec3> = chunks
        .iter()
        .flat_map(|c| c.blocks())
        .filter(|(_, kind)| *kind == BlockKind::FillingBlock)
        .map(|(pos, _)| pos)
        .collect();
    assert!(!filled.is_empty());

    let mut eligible = 0usize;
    for x in -60..=60 {
        for z in -60..=60 {
            let d = f64::from(x * x + z * z).sqrt();
            if d > 5.0 && d < 60.0 && !field.in_range_of_entrance(IVec3::new(x, 0, z)) {
                eligible += 1;
            }
        }
    }
    let fraction = filled.len() as f64 / eligible as f64;
    assert!((0.25..0.35).contains(&fraction), "fraction {fraction}");

    for pos in &filled {
        let d = f64::from(pos.x * pos.x + pos.z * pos.z).sqrt();
        assert!(d > 5.0 && d < 60.0);
        assert!(!field.in_range_of_entrance(*pos));
    }
}

#[test]
fn same_seed_same_world() {
    let config = DefenceConfig::new();
    let field = config.build_field().unwrap();
    let a = generate_ground(&WorldGenerator::new(&field, 42, config.fill_threshold));
    let b = generate_ground(&WorldGenerator::new(&field, 42, config.fill_threshold));
    let c = generate_ground(&WorldGenerator::new(&field, 43, config.fill_threshold));

    let filling = |chunks: &[MemoryChunk]| {
        let mut v: Vec<IVec3> = chunks
            .iter()
            .flat_map(|c| c.blocks())
            .filter(|(_, k)| *k == BlockKind::FillingBlock)
            .map(|(p, _)| p)
            .collect();
        v.sort_by_key(|p| (p.x, p.y, p.z));
        v
    };
    assert_eq!(filling(&a), filling(&b));
    assert_ne!(filling(&a), filling(&c));
}
