use crate::dim2::edge_ring::{EdgeId, EdgeRing};

/// Checks that a live edge and its neighbors link back to each other.
pub fn validate_edge_connectivity(edge_id: EdgeId, ring: &EdgeRing) {
    let edge = ring.edge(edge_id);
    assert!(edge.is_live(), "Edge is not live. edge_id: {:?}", edge_id);

    let next = ring.edge(edge.next);
    let prev = ring.edge(edge.prev);

    assert!(next.is_live(), "Next edge is not live. edge_id: {:?}", edge_id);
    assert!(prev.is_live(), "Previous edge is not live. edge_id: {:?}", edge_id);
    assert_eq!(
        next.prev, edge_id,
        "Next edge does not point back correctly. edge_id: {:?}, next: {:?}",
        edge_id, edge.next
    );
    assert_eq!(
        prev.next, edge_id,
        "Previous edge does not point back correctly. edge_id: {:?}, prev: {:?}",
        edge_id, edge.prev
    );
}

/// Checks that the live edges form exactly one closed loop.
pub fn validate_ring(ring: &EdgeRing) {
    let Some(start) = ring.first_live() else {
        return;
    };

    let live_count = (0..ring.len() as u32)
        .map(EdgeId)
        .filter(|id| ring.edge(*id).is_live())
        .count();

    let mut visited = 0;
    for id in ring.traverse(start) {
        validate_edge_connectivity(id, ring);
        visited += 1;
    }

    assert_eq!(
        visited, live_count,
        "Live edges do not form a single loop. visited: {}, live: {}",
        visited, live_count
    );
}
