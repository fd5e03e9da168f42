// Host-side tests for the instance grid.

use ascii_core::*;

#[test]
fn columns_follow_aspect() {
    let spec = GridSpec::for_aspect(50, 16.0 / 9.0, QUAD_SIZE);
    assert_eq!(spec.rows, 50);
    assert_eq!(spec.columns, 28);
    assert_eq!(spec.instance_count(), 50 * 28);
}

#[test]
fn columns_have_a_floor() {
    assert_eq!(GridSpec::for_aspect(50, 1000.0, QUAD_SIZE).columns, GRID_MIN_COLUMNS);
    // invalid aspect behaves like a square viewport
    assert_eq!(GridSpec::for_aspect(50, 0.0, QUAD_SIZE).columns, 50);
    assert_eq!(GridSpec::for_aspect(50, f32::NAN, QUAD_SIZE).columns, 50);
}

#[test]
fn instance_uvs_span_the_unit_square() {
    let spec = GridSpec::for_aspect(10, 2.0, 0.1);
    let inst = build_instances(&spec, 1);
    assert_eq!(inst.len(), spec.instance_count() as usize);
    assert_eq!(inst[0].pixel_uv, [0.0, 0.0]);
    assert_eq!(inst[inst.len() - 1].pixel_uv, [1.0, 1.0]);
    // index = i * columns + j
    let j = 1usize;
    assert_eq!(inst[j].pixel_uv, [0.0, 1.0 / (spec.columns - 1) as f32]);
}

#[test]
fn offsets_are_centred() {
    let spec = GridSpec::for_aspect(12, 1.5, 0.1);
    let inst = build_instances(&spec, 3);
    let (sx, sy) = inst
        .iter()
        .fold((0.0f32, 0.0f32), |(x, y), a| (x + a.offset[0], y + a.offset[1]));
    assert!(sx.abs() < 1e-3 && sy.abs() < 1e-3, "sum = ({sx}, {sy})");
    assert!(inst.iter().all(|a| a.offset[2] == 0.0));
    let first = inst[0].offset;
    assert!((first[0] + 0.1 * 11.0 / 2.0).abs() < 1e-6);
}

#[test]
fn jitter_is_seeded_and_in_range() {
    let spec = GridSpec::default();
    let a = build_instances(&spec, DEFAULT_SEED);
    let b = build_instances(&spec, DEFAULT_SEED);
    let c = build_instances(&spec, DEFAULT_SEED + 1);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|i| (0.0..1.0).contains(&i.jitter)));
}

#[test]
fn quad_is_two_triangles_with_top_left_uv() {
    let q = quad_vertices(0.1);
    assert_eq!(q.len(), 6);
    let top_left = q.iter().find(|v| v.position == [-0.05, 0.05]).map(|v| v.uv);
    assert_eq!(top_left, Some([0.0, 0.0]));
    let bottom_right = q.iter().find(|v| v.position == [0.05, -0.05]).map(|v| v.uv);
    assert_eq!(bottom_right, Some([1.0, 1.0]));
}

#[test]
fn instance_layout_is_packed() {
    assert_eq!(std::mem::size_of::<InstanceAttrs>(), 24);
    assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
}
