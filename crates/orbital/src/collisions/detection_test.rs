use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::collisions::detection::scan_body;

fn disc(id: u32, x: f64, radius: f64) -> Body {
    let mut body = Body::new(1.0, radius, Point2::new(x, 0.0), Vector2::zeros()).unwrap();
    body.id = BodyId(id);
    body
}

#[test]
fn test_scan_finds_direct_overlaps() {
    let bodies = [disc(0, 0.0, 1.0), disc(1, 10.0, 1.0), disc(2, 1.5, 1.0)];

    let scan = scan_body(&bodies, 0);

    assert_eq!(scan.members, vec![0, 2]);
    assert!(scan.overlapping);
}

#[test]
fn test_scan_keeps_store_order_around_seed() {
    let bodies = [disc(0, 0.0, 1.0), disc(1, 1.5, 1.0), disc(2, 3.0, 1.0)];

    let scan = scan_body(&bodies, 1);

    assert_eq!(scan.members, vec![0, 1, 2]);
}

#[test]
fn test_scan_ignores_indirect_overlaps() {
    // 0 touches 1, 1 touches 2, 0 does not touch 2
    let bodies = [disc(0, 0.0, 1.0), disc(1, 1.5, 1.0), disc(2, 3.0, 1.0)];

    let scan = scan_body(&bodies, 0);

    assert_eq!(scan.members, vec![0, 1]);
}

#[test]
fn test_touching_counts_as_overlap() {
    let bodies = [disc(0, 0.0, 1.0), disc(1, 2.0, 1.0)];

    let scan = scan_body(&bodies, 1);
    assert_eq!(scan.members, vec![0, 1]);
}

#[test]
fn test_scan_without_overlap() {
    let bodies = [disc(0, 0.0, 1.0), disc(1, 2.1, 1.0)];

    let scan = scan_body(&bodies, 0);

    assert!(scan.members.is_empty());
    assert!(!scan.overlapping);
}

#[test]
fn test_immune_overlap_is_reported_but_not_merged() {
    let bodies = [disc(0, 0.0, 1.0), disc(1, 1.0, 1.0).immune()];

    let active = scan_body(&bodies, 0);
    assert!(active.members.is_empty());
    assert!(active.overlapping);

    let immune = scan_body(&bodies, 1);
    assert!(immune.members.is_empty());
    assert!(immune.overlapping);
}

#[test]
fn test_immune_neighbour_does_not_block_others() {
    let bodies = [
        disc(0, 0.0, 1.0),
        disc(1, 0.5, 1.0).immune(),
        disc(2, 1.0, 1.0),
    ];

    let scan = scan_body(&bodies, 0);
    assert_eq!(scan.members, vec![0, 2]);
}
