mod support;

use bsp2d::{build, point_in_tree, BspTree, Real};
use nalgebra::Point2;

use crate::support::{l_shape, min_edge_distance, origin_box, solid_box, solid_polygon, u_shape};

fn assert_solid(tree: &BspTree, points: &[[Real; 2]]) {
    for p in points {
        let p = Point2::new(p[0], p[1]);
        assert!(point_in_tree(tree, p), "{p:?} should be solid");
    }
}

fn assert_empty(tree: &BspTree, points: &[[Real; 2]]) {
    for p in points {
        let p = Point2::new(p[0], p[1]);
        assert!(!point_in_tree(tree, p), "{p:?} should be empty");
    }
}

#[test]
fn axis_aligned_box() {
    let tree = build(&[origin_box()]);
    assert_solid(&tree, &[[0.0, 0.0], [3.0, 0.0], [-4.9, 4.9]]);
    assert_empty(&tree, &[[10.0, 0.0], [-10.0, 0.0], [0.0, 10.0], [0.0, -10.0]]);
    // Boundary counts as solid.
    assert_solid(&tree, &[[5.0, 0.0], [0.0, -5.0], [5.0, 5.0]]);
}

#[test]
fn l_shaped_polygon() {
    let tree = build(&[l_shape()]);
    assert_solid(&tree, &[[1.0, 1.0], [1.0, 3.0], [3.0, 1.0]]);
    // The concave notch is outside.
    assert_empty(&tree, &[[3.0, 3.0], [10.0, 10.0], [-1.0, -1.0]]);
    // Boundary of the notch.
    assert_solid(&tree, &[[2.0, 3.0], [3.0, 2.0]]);
}

#[test]
fn two_disjoint_squares() {
    let tree = build(&[solid_box(0.0, 0.0, 2.0, 2.0), solid_box(5.0, 5.0, 7.0, 7.0)]);
    assert_solid(&tree, &[[1.0, 1.0], [6.0, 6.0]]);
    assert_empty(&tree, &[[3.0, 3.0], [10.0, 10.0], [-1.0, 6.0]]);
}

#[test]
fn horizontal_row_of_three_boxes() {
    let tree = build(&[
        solid_box(0.0, 0.0, 2.0, 2.0),
        solid_box(5.0, 0.0, 7.0, 2.0),
        solid_box(10.0, 0.0, 12.0, 2.0),
    ]);
    assert_solid(&tree, &[[1.0, 1.0], [6.0, 1.0], [11.0, 1.0]]);
    assert_empty(&tree, &[[3.0, 1.0], [8.0, 1.0], [13.0, 1.0]]);
}

#[test]
fn u_shape_arms_and_gap() {
    let tree = build(&[u_shape()]);
    assert_solid(&tree, &[[1.0, 2.0], [5.0, 2.0], [3.0, 0.5]]);
    assert_empty(&tree, &[[3.0, 2.0], [3.0, 5.0], [10.0, 10.0]]);
}

#[test]
fn empty_tree_is_empty_everywhere() {
    let tree = build(&[]);
    assert_empty(
        &tree,
        &[[0.0, 0.0], [100.0, 100.0], [-50.0, -50.0], [0.3, -7.7]],
    );
}

#[test]
fn hexagon_center_and_vertices() {
    let tree = build(&[solid_polygon(&[
        [5.0, 0.0],
        [2.5, 4.33],
        [-2.5, 4.33],
        [-5.0, 0.0],
        [-2.5, -4.33],
        [2.5, -4.33],
    ])]);
    assert_solid(&tree, &[[0.0, 0.0], [3.0, 0.0], [5.0, 0.0]]);
    assert_empty(&tree, &[[10.0, 10.0], [6.0, 0.0]]);
}

#[test]
fn nested_boxes_room_with_pillar() {
    let tree = build(&[solid_box(0.0, 0.0, 10.0, 10.0), solid_box(4.0, 4.0, 6.0, 6.0)]);
    assert_solid(&tree, &[[1.0, 1.0], [5.0, 5.0], [2.0, 5.0]]);
    assert_empty(&tree, &[[15.0, 15.0], [-1.0, 5.0]]);
}

#[test]
fn corridor_between_rooms() {
    let tree = build(&[
        solid_box(0.0, 0.0, 2.0, 2.0),
        solid_box(2.0, 0.5, 4.0, 1.5),
        solid_box(4.0, 0.0, 6.0, 2.0),
    ]);
    assert_solid(&tree, &[[1.0, 1.0], [3.0, 1.0], [5.0, 1.0]]);
    assert_empty(&tree, &[[3.0, 3.0], [3.0, 0.2]]);
}

#[test]
fn boxes_in_three_quadrants() {
    let tree = build(&[
        solid_box(-10.0, -10.0, -5.0, -5.0),
        solid_box(5.0, -10.0, 10.0, -5.0),
        solid_box(5.0, 5.0, 10.0, 10.0),
    ]);
    assert_solid(&tree, &[[-7.0, -7.0], [7.0, -7.0], [7.0, 7.0]]);
    assert_empty(&tree, &[[0.0, 0.0], [-7.0, 7.0]]);
}

#[test]
fn stacked_rectangles_share_an_edge() {
    // Two rectangles meeting along y = 0; the shared edge must not leak
    // empty space into the union.
    let tree = build(&[solid_box(-3.0, -1.0, 3.0, 0.0), solid_box(-3.0, 0.0, 3.0, 2.0)]);
    assert_solid(&tree, &[[0.0, -0.5], [0.0, 1.0], [0.0, 0.0], [-2.5, 1.0]]);
    assert_empty(&tree, &[[-5.0, 0.0], [5.0, 0.0], [0.0, 5.0], [0.0, -10.0]]);
}

#[test]
fn oracle_equivalence_off_boundary() {
    for poly in [origin_box(), l_shape(), u_shape()] {
        let oracle = poly.clone().ensure_ccw();
        let tree = build(&[poly]);
        for ix in -30..=30 {
            for iy in -30..=30 {
                let p = Point2::new(ix as Real * 0.35 + 0.013, iy as Real * 0.35 + 0.017);
                if min_edge_distance(&oracle, p) < 1e-3 {
                    continue;
                }
                assert_eq!(
                    point_in_tree(&tree, p),
                    oracle.contains_point(p),
                    "oracle disagreement at {p:?}"
                );
            }
        }
    }
}

#[test]
fn concurrent_readers_share_one_tree() {
    let tree = build(&[origin_box(), solid_box(8.0, 8.0, 9.0, 9.0)]);
    std::thread::scope(|scope| {
        for worker in 0..4 {
            let tree = &tree;
            scope.spawn(move || {
                for i in 0..200 {
                    let x = (i % 40) as Real - 20.0 + worker as Real * 0.1;
                    // Boundary counts as solid, so the interval is closed.
                    let inside = (-5.0..=5.0).contains(&x);
                    assert_eq!(point_in_tree(tree, Point2::new(x, 0.0)), inside);
                }
            });
        }
    });
}

#[test]
fn union_is_commutative_at_query_level() {
    let a = l_shape();
    let b = solid_box(1.0, 1.0, 6.0, 3.0);
    let ab = build(&[a.clone(), b.clone()]);
    let ba = build(&[b, a]);
    for ix in -10..=30 {
        for iy in -10..=30 {
            let p = Point2::new(ix as Real * 0.3 + 0.011, iy as Real * 0.3 + 0.007);
            assert_eq!(
                point_in_tree(&ab, p),
                point_in_tree(&ba, p),
                "union order changed the answer at {p:?}"
            );
        }
    }
}
