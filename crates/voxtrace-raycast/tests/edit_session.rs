//! Cursor edits across chunk boundaries, observed through chunk snapshots.

use glam::{IVec3, Vec3};
use voxtrace_raycast::{EditAction, EditOutcome, VoxelRay, apply_edit, pick};
use voxtrace_voxel::{ChunkCoord, CountingSink, MaterialId, World};

/// Ray along -X starting inside chunk x=0 and reaching into chunk x=-1.
fn west_ray() -> VoxelRay {
    VoxelRay::new(Vec3::new(2.5, 10.5, 10.5), Vec3::NEG_X, 10.0)
}

#[test]
fn place_and_remove_across_negative_chunk_boundary() {
    let mut world = World::new();
    world.add_voxel(IVec3::new(-3, 10, 10), MaterialId(5)).unwrap();
    assert_eq!(world.chunk_count(), 1);

    // The ray crosses x=0 into the negative chunk and hits the wall.
    let hit = pick(&world, &west_ray()).expect("hit");
    assert_eq!(hit.cell, IVec3::new(-3, 10, 10));
    assert_eq!(hit.previous, IVec3::new(-2, 10, 10));

    // Build a column of voxels back toward the origin; the third placement
    // lands at x=0 and creates the positive chunk.
    for expected_x in [-2, -1, 0] {
        let outcome = apply_edit(&mut world, &west_ray(), EditAction::Place(MaterialId(9))).unwrap();
        let EditOutcome::Placed(placement) = outcome else {
            panic!("expected placement, got {outcome:?}");
        };
        assert!(placement.placed);
        assert_eq!(placement.target, IVec3::new(expected_x, 10, 10));
    }
    assert_eq!(world.chunk_count(), 2);
    assert_eq!(world.voxel_count(), 4);

    let negative = world.chunk(ChunkCoord::new(-1, 0, 0)).expect("negative chunk");
    assert_eq!(negative.voxel_count(), 3);
    let positive = world.chunk(ChunkCoord::new(0, 0, 0)).expect("positive chunk");
    assert_eq!(positive.voxel_count(), 1);

    // Removing walks back out in the order the ray meets them.
    for expected_x in [0, -1, -2, -3] {
        let outcome = apply_edit(&mut world, &west_ray(), EditAction::Remove).unwrap();
        assert_eq!(outcome, EditOutcome::Removed(IVec3::new(expected_x, 10, 10)));
    }
    assert_eq!(
        apply_edit(&mut world, &west_ray(), EditAction::Remove).unwrap(),
        EditOutcome::Missed
    );
    assert_eq!(world.voxel_count(), 0);
    assert_eq!(world.chunk_count(), 2);
}

#[test]
fn edits_reupload_only_touched_chunks() {
    let mut world = World::new();
    world.add_voxel(IVec3::new(-3, 10, 10), MaterialId(5)).unwrap();
    world.add_voxel(IVec3::new(200, 10, 10), MaterialId(5)).unwrap();

    let mut sink = CountingSink::new();
    assert_eq!(world.sync_chunks(&mut sink), 2);
    assert_eq!(world.sync_chunks(&mut sink), 0);

    apply_edit(&mut world, &west_ray(), EditAction::Place(MaterialId(1))).unwrap();
    sink.reset();
    assert_eq!(world.sync_chunks(&mut sink), 1);
    assert_eq!(sink.uploads, 1);
    assert_eq!(sink.uploaded_bytes, 2 * 8);
    assert_eq!(sink.draws, 2);
    assert_eq!(sink.instances, 3);
}

#[test]
fn snapshot_reflects_edits() {
    let mut world = World::new();
    world.add_voxel(IVec3::new(-3, 10, 10), MaterialId(5)).unwrap();
    apply_edit(&mut world, &west_ray(), EditAction::Place(MaterialId(6))).unwrap();

    let mut materials = Vec::new();
    world.for_each_chunk(|_, chunk| {
        materials.extend(chunk.snapshot().iter().map(|r| r.material()));
    });
    materials.sort();
    assert_eq!(materials, vec![MaterialId(5), MaterialId(6)]);
}
