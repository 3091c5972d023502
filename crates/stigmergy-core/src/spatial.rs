use crate::detection::PointOfInterest;
use rstar::{RTree, RTreeObject, AABB};

/// A point of interest's location plus its index in the registry.
#[derive(Clone, Copy, Debug)]
pub struct PoiLocation {
    pub index: usize,
    pub position: [f64; 2],
}

impl RTreeObject for PoiLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Build an R*-tree over point positions via bulk_load (O(n log n)).
pub fn build_index(points: &[PointOfInterest]) -> RTree<PoiLocation> {
    RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .map(|(index, p)| PoiLocation {
                index,
                position: p.position,
            })
            .collect(),
    )
}

/// Indices of points strictly within `radius` of `center`.
/// Uses an AABB envelope query then filters by Euclidean distance.
pub fn query_within(tree: &RTree<PoiLocation>, center: [f64; 2], radius: f64) -> Vec<usize> {
    let envelope = AABB::from_corners(
        [center[0] - radius, center[1] - radius],
        [center[0] + radius, center[1] + radius],
    );
    let r_sq = radius * radius;

    tree.locate_in_envelope(&envelope)
        .filter(|p| {
            let dx = p.position[0] - center[0];
            let dy = p.position[1] - center[1];
            dx * dx + dy * dy < r_sq
        })
        .map(|p| p.index)
        .collect()
}
