// Host-side tests for the wave slab geometry.

use ascii_core::*;

fn small_slab() -> WaveMesh {
    WaveMesh::new(&SlabSpec {
        segments: 8,
        ..SlabSpec::default()
    })
}

#[test]
fn slab_matches_spec_extent() {
    let mesh = small_slab();
    let (mut lo, mut hi) = (glam::Vec3::splat(f32::MAX), glam::Vec3::splat(f32::MIN));
    for p in mesh.base_positions() {
        lo = lo.min(*p);
        hi = hi.max(*p);
    }
    assert!((hi.x - 3.0).abs() < 1e-5 && (lo.x + 3.0).abs() < 1e-5);
    assert!((hi.y - 0.15).abs() < 1e-5 && (lo.y + 0.15).abs() < 1e-5);
    assert!((hi.z - 3.0).abs() < 1e-5 && (lo.z + 3.0).abs() < 1e-5);
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
}

#[test]
fn lower_vertices_never_move() {
    let mut mesh = small_slab();
    mesh.update(2.7, &WaveParams::default());
    for (v, p) in mesh.vertices.iter().zip(mesh.base_positions()) {
        if p.y <= 0.0 {
            assert_eq!(v.position, p.to_array());
        }
    }
}

#[test]
fn upper_vertices_follow_displacement() {
    let params = WaveParams::default();
    let t = 1.3;
    let mut mesh = small_slab();
    mesh.update(t, &params);
    for (v, p) in mesh.vertices.iter().zip(mesh.base_positions()) {
        if p.y > 0.0 {
            let expected = p.y + wave_term(p.x, p.z, t, &params) * params.amplitude;
            assert!((v.position[1] - expected).abs() < 1e-5);
            assert_eq!(v.position[0], p.x);
            assert_eq!(v.position[2], p.z);
        }
    }
}

#[test]
fn wave_term_blends_by_twist() {
    let p = WaveParams {
        amplitude: 1.0,
        frequency: 1.0,
        speed: 0.0,
        twist: 0.0,
    };
    assert!((wave_term(0.5, 0.0, 0.0, &p) - 0.5f32.sin()).abs() < 1e-6);
    let p = WaveParams { twist: 1.0, ..p };
    assert!((wave_term(0.5, 0.25, 0.0, &p) - 0.25f32.cos()).abs() < 1e-6);
}

#[test]
fn normals_are_unit_length() {
    let mut mesh = small_slab();
    mesh.update(0.4, &WaveParams::default());
    for v in &mesh.vertices {
        let n = glam::Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-4, "normal {n:?}");
    }
}

#[test]
fn flat_top_faces_up() {
    let mut mesh = small_slab();
    let flat = WaveParams {
        amplitude: 0.0,
        ..WaveParams::default()
    };
    mesh.update(0.0, &flat);
    let top: Vec<_> = mesh
        .vertices
        .iter()
        .filter(|v| (v.position[1] - 0.15).abs() < 1e-6 && v.normal[1] > 0.5)
        .collect();
    assert_eq!(top.len(), 9 * 9);
    for v in top {
        assert!((v.normal[1] - 1.0).abs() < 1e-5);
    }
}

#[test]
fn displaced_top_still_faces_up() {
    let mut mesh = small_slab();
    mesh.update(0.9, &WaveParams::default());
    let top = mesh
        .vertices
        .iter()
        .zip(mesh.base_positions())
        .filter(|(_, p)| p.y > 0.0);
    // the top face is the only one with more than one row of raised vertices
    let up = top.filter(|(v, _)| v.normal[1] > 0.5).count();
    assert_eq!(up, 9 * 9);
}
