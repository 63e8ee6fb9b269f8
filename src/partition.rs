//! Convex decomposition of simple polygons.
//!
//! The partitioner validates its input, passes already-convex polygons
//! through untouched, and otherwise ear-clip triangulates and greedily
//! merges triangles back together across shared diagonals wherever the
//! union stays convex (the Hertel-Mehlhorn recipe). Output order and
//! shape are deterministic for identical input.

use crate::errors::PartitionError;
use crate::float_types::{Real, EPSILON};
use crate::polygon::Polygon;
use hashbrown::HashMap;
use nalgebra::Point2;
use robust::{orient2d, Coord};

/// Decomposes a simple polygon into convex pieces whose union is the
/// input and whose pairwise interiors are disjoint.
///
/// The input may have either winding; pieces come out counter-clockwise
/// and inherit `is_solid`. Fails with [`PartitionError::NotSimplePolygon`]
/// on self-intersecting input, [`PartitionError::DegeneratePolygon`] on
/// collapsed input, and [`PartitionError::PartitionFailed`] when the
/// decomposition cannot prove itself correct.
pub fn partition_convex(polygon: &Polygon) -> Result<Vec<Polygon>, PartitionError> {
    let poly = polygon.cleaned()?;
    check_simple(&poly)?;
    if poly.signed_area().abs() < EPSILON * EPSILON {
        return Err(PartitionError::DegeneratePolygon(
            "signed area indistinguishable from zero",
        ));
    }
    let poly = poly.ensure_ccw();
    if is_convex_loop(&poly.vertices, &identity_loop(poly.vertices.len())) {
        return Ok(vec![poly]);
    }

    let triangles = triangulate(&poly)?;
    let pieces = merge_convex(&poly.vertices, triangles, poly.is_solid)?;

    // Self-check: every piece convex, piece areas summing to the input area.
    let input_area = poly.signed_area();
    let mut total = 0.0;
    for piece in &pieces {
        if !is_convex_loop(&piece.vertices, &identity_loop(piece.vertices.len())) {
            return Err(PartitionError::PartitionFailed("merged piece is not convex"));
        }
        total += piece.signed_area();
    }
    if (total - input_area).abs() > EPSILON * (1.0 + input_area.abs()) {
        return Err(PartitionError::PartitionFailed(
            "piece areas do not sum to the input area",
        ));
    }
    Ok(pieces)
}

/// Exact orientation of the triangle `a b c`: positive for counter-clockwise.
fn orientation(a: Point2<Real>, b: Point2<Real>, c: Point2<Real>) -> f64 {
    orient2d(
        Coord {
            x: a.x as f64,
            y: a.y as f64,
        },
        Coord {
            x: b.x as f64,
            y: b.y as f64,
        },
        Coord {
            x: c.x as f64,
            y: c.y as f64,
        },
    )
}

fn identity_loop(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Whether the CCW index loop over `vertices` turns left (or runs straight)
/// at every corner.
fn is_convex_loop(vertices: &[Point2<Real>], ring: &[usize]) -> bool {
    let n = ring.len();
    (0..n).all(|i| {
        let a = vertices[ring[i]];
        let b = vertices[ring[(i + 1) % n]];
        let c = vertices[ring[(i + 2) % n]];
        orientation(a, b, c) >= 0.0
    })
}

/// O(n^2) pairwise check that no two non-adjacent edges properly cross.
fn check_simple(poly: &Polygon) -> Result<(), PartitionError> {
    let v = &poly.vertices;
    let n = v.len();
    for i in 0..n {
        let (a1, a2) = (v[i], v[(i + 1) % n]);
        for j in (i + 1)..n {
            // Adjacent edges share an endpoint and may not cross properly.
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (b1, b2) = (v[j], v[(j + 1) % n]);
            if segments_cross(a1, a2, b1, b2) {
                return Err(PartitionError::NotSimplePolygon(i, j));
            }
        }
    }
    Ok(())
}

/// Proper intersection: each segment straddles the other's carrier line.
fn segments_cross(
    a1: Point2<Real>,
    a2: Point2<Real>,
    b1: Point2<Real>,
    b2: Point2<Real>,
) -> bool {
    let d1 = orientation(a1, a2, b1);
    let d2 = orientation(a1, a2, b2);
    let d3 = orientation(b1, b2, a1);
    let d4 = orientation(b1, b2, a2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Ear-clip triangulation, every triangle normalized to counter-clockwise.
fn triangulate(poly: &Polygon) -> Result<Vec<[usize; 3]>, PartitionError> {
    let mut flat = Vec::with_capacity(poly.vertices.len() * 2);
    for v in &poly.vertices {
        flat.push(v.x as f64);
        flat.push(v.y as f64);
    }
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|_| PartitionError::PartitionFailed("triangulation failed"))?;
    if indices.is_empty() {
        return Err(PartitionError::PartitionFailed(
            "triangulation produced no triangles",
        ));
    }
    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        if orientation(poly.vertices[a], poly.vertices[b], poly.vertices[c]) >= 0.0 {
            triangles.push([a, b, c]);
        } else {
            triangles.push([a, c, b]);
        }
    }
    Ok(triangles)
}

/// Greedy Hertel-Mehlhorn merge: walk the internal diagonals in ascending
/// index order and delete each one whose removal keeps both neighbors one
/// convex piece.
fn merge_convex(
    vertices: &[Point2<Real>],
    triangles: Vec<[usize; 3]>,
    is_solid: bool,
) -> Result<Vec<Polygon>, PartitionError> {
    let n = vertices.len();
    let ring_edge = |a: usize, b: usize| (a + 1) % n == b || (b + 1) % n == a;

    // Undirected diagonal -> the pieces that share it. In a triangulation
    // of a simple polygon the dual graph is a tree, so each diagonal has
    // exactly two owners.
    let mut shared: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (id, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            let a = tri[k];
            let b = tri[(k + 1) % 3];
            if ring_edge(a, b) {
                continue;
            }
            shared.entry((a.min(b), a.max(b))).or_default().push(id);
        }
    }
    let mut diagonals: Vec<(usize, usize)> = shared.keys().copied().collect();
    diagonals.sort_unstable();

    let mut pieces: Vec<Option<Vec<usize>>> =
        triangles.into_iter().map(|t| Some(t.to_vec())).collect();
    let mut redirect: Vec<usize> = (0..pieces.len()).collect();
    let resolve = |redirect: &[usize], mut id: usize| {
        while redirect[id] != id {
            id = redirect[id];
        }
        id
    };

    for &(a, b) in &diagonals {
        let owners = match shared.get(&(a, b)) {
            Some(owners) if owners.len() == 2 => owners,
            _ => continue,
        };
        let p = resolve(&redirect, owners[0]);
        let q = resolve(&redirect, owners[1]);
        if p == q {
            continue;
        }
        let (Some(loop_p), Some(loop_q)) = (pieces[p].as_ref(), pieces[q].as_ref()) else {
            continue;
        };
        let Some(merged) = splice_loops(loop_p, loop_q, a, b) else {
            continue;
        };
        if is_convex_loop(vertices, &merged) {
            pieces[p] = Some(merged);
            pieces[q] = None;
            redirect[q] = p;
        }
    }

    let mut out = Vec::new();
    for piece in pieces.into_iter().flatten() {
        let ring = strip_straight_corners(vertices, &piece);
        if ring.len() < 3 {
            // Zero-area sliver from a degenerate triangle; contributes nothing.
            continue;
        }
        out.push(Polygon::new(
            ring.iter().map(|&i| vertices[i]).collect(),
            is_solid,
        ));
    }
    if out.is_empty() {
        return Err(PartitionError::PartitionFailed("no pieces survived merging"));
    }
    Ok(out)
}

/// Joins two vertex loops that share the undirected edge `a-b` into one
/// loop with that edge removed. Both inputs and the output are CCW.
fn splice_loops(p: &[usize], q: &[usize], a: usize, b: usize) -> Option<Vec<usize>> {
    let find = |ring: &[usize], from: usize, to: usize| {
        (0..ring.len()).find(|&i| ring[i] == from && ring[(i + 1) % ring.len()] == to)
    };
    // The shared edge runs one way in p and the other way in q.
    let (i, j) = match find(p, a, b) {
        Some(i) => (i, find(q, b, a)?),
        None => (find(p, b, a)?, find(q, a, b)?),
    };
    let (np, nq) = (p.len(), q.len());
    let mut merged = Vec::with_capacity(np + nq - 2);
    // All of p, starting just past the shared edge and ending on it...
    for k in 0..np {
        merged.push(p[(i + 1 + k) % np]);
    }
    // ...then q's chain between the shared endpoints.
    for k in 2..nq {
        merged.push(q[(j + k) % nq]);
    }
    Some(merged)
}

/// Drops corners where the loop runs exactly straight; they add redundant
/// half-space tests downstream.
fn strip_straight_corners(vertices: &[Point2<Real>], ring: &[usize]) -> Vec<usize> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = vertices[ring[(i + n - 1) % n]];
        let cur = vertices[ring[i]];
        let next = vertices[ring[(i + 1) % n]];
        if orientation(prev, cur, next) != 0.0 {
            out.push(ring[i]);
        }
    }
    out
}
