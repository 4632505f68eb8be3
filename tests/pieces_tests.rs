//! Piece shape, rotation and wall-kick probe tests

use falltris::core::pieces::{kick_steps, spawn_x, Shape};
use falltris::core::Piece;
use falltris::types::PieceKind;

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let base = Shape::template(kind);
        let mut shape = base;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        assert_eq!(shape, base, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_cell_count() {
    for kind in PieceKind::ALL {
        let mut shape = Shape::template(kind);
        for _ in 0..4 {
            shape = shape.rotated_cw();
            assert_eq!(shape.filled().count(), 4);
        }
    }
}

#[test]
fn test_o_rotation_is_fixed_point() {
    let o = Shape::template(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_s_rotation() {
    // .##      #.
    // ##.  ->  ##
    //          .#
    let rotated = Shape::template(PieceKind::S).rotated_cw();
    let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[0, 1]]).unwrap();
    assert_eq!(rotated, expected);
}

#[test]
fn test_spawn_positions() {
    assert_eq!(spawn_x(4), 3);
    assert_eq!(spawn_x(3), 4);
    assert_eq!(spawn_x(2), 4);

    for kind in PieceKind::ALL {
        let piece = Piece::spawn(kind);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.shape, Shape::template(kind));
    }
}

#[test]
fn test_kick_probe_positions() {
    // Cumulative offsets: +1, -1, +2, -2
    let positions: Vec<i8> = kick_steps(4, 0)
        .scan(0i8, |x, step| {
            *x += step;
            Some(*x)
        })
        .collect();
    assert_eq!(positions, vec![1, -1, 2, -2]);
}

#[test]
fn test_kick_leniency_adds_probes() {
    assert_eq!(kick_steps(2, 0).count(), 2);
    assert_eq!(kick_steps(2, 1).count(), 3);
}

#[test]
fn test_translated_is_pure() {
    let piece = Piece::spawn(PieceKind::L);
    let moved = piece.translated(-2, 3);
    assert_eq!((moved.x, moved.y), (piece.x - 2, 3));
    assert_eq!(moved.shape, piece.shape);
    assert_eq!((piece.x, piece.y), (4, 0));
}
