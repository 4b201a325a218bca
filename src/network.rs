//! Graph extraction from a skeleton voxel set.
//!
//! A skeleton voxel is a **node** when it does not have exactly two
//! skeleton neighbours (an endpoint has fewer, a junction has more); every
//! other skeleton voxel belongs to exactly one **link**, the maximal chain
//! of 2-neighbour voxels connecting two nodes.
//!
//! A degenerate case: a ring of skeleton voxels every one of which has
//! exactly two skeleton neighbours (so none qualifies as a node) is
//! resolved by promoting one arbitrary voxel of the ring to a node, so the
//! "every link has two endpoint nodes" invariant still holds.

use std::collections::HashSet;

use crate::neighbours::NeighbourCalculator;
use crate::point::Point3;

/// A maximal chain of skeleton voxels with exactly two skeleton
/// neighbours, connecting two nodes (possibly the same node, for a loop).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    /// The node this link starts at.
    pub start: Point3,
    /// The node this link ends at.
    pub end: Point3,
    /// The ordered interior voxels of the chain, excluding `start` and
    /// `end`.
    pub voxels: Vec<Point3>,
    /// Euclidean length of the path `start -> voxels.. -> end`.
    pub length: f64,
}

impl Link {
    fn euclidean(a: Point3, b: Point3) -> f64 {
        let dx = (b.x - a.x) as f64;
        let dy = (b.y - a.y) as f64;
        let dz = (b.z - a.z) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn new(start: Point3, voxels: Vec<Point3>, end: Point3) -> Self {
        let mut length = 0.0;
        let mut prev = start;
        for &v in &voxels {
            length += Self::euclidean(prev, v);
            prev = v;
        }
        length += Self::euclidean(prev, end);
        Self {
            start,
            end,
            voxels,
            length,
        }
    }
}

/// The graph extracted from a skeleton: junction/endpoint nodes and the
/// links (chains) connecting them.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    /// Every node, in the order discovered.
    pub nodes: Vec<Point3>,
    /// Every link, in the order discovered.
    pub links: Vec<Link>,
}

/// Builds a [`Network`] from a skeleton voxel set.
pub struct NetworkBuilder<NC> {
    neighbours: NC,
}

impl<NC> NetworkBuilder<NC>
where
    NC: NeighbourCalculator<Point3>,
{
    /// Builds a network extractor using `neighbours` to determine which
    /// skeleton voxels are adjacent.
    pub fn new(neighbours: NC) -> Self {
        Self { neighbours }
    }

    fn skeleton_neighbours(&self, skeleton: &HashSet<Point3>, p: Point3) -> Vec<Point3> {
        self.neighbours
            .neighbours(p)
            .into_iter()
            .filter(|n| skeleton.contains(n))
            .collect()
    }

    /// Extracts nodes and links from `skeleton`.
    pub fn build(&self, skeleton: &[Point3]) -> Network {
        let skeleton_set: HashSet<Point3> = skeleton.iter().copied().collect();

        let mut nodes: Vec<Point3> = skeleton
            .iter()
            .copied()
            .filter(|&p| self.skeleton_neighbours(&skeleton_set, p).len() != 2)
            .collect();
        let node_set: HashSet<Point3> = nodes.iter().copied().collect();

        let mut visited_chain: HashSet<Point3> = HashSet::new();
        let mut direct_edges: HashSet<(Point3, Point3)> = HashSet::new();
        let mut links = Vec::new();

        let mut sorted_nodes = nodes.clone();
        sorted_nodes.sort();

        for node in sorted_nodes {
            for first in self.skeleton_neighbours(&skeleton_set, node) {
                if node_set.contains(&first) {
                    let key = if node <= first {
                        (node, first)
                    } else {
                        (first, node)
                    };
                    if direct_edges.insert(key) {
                        links.push(Link::new(node, Vec::new(), first));
                    }
                    continue;
                }
                if visited_chain.contains(&first) {
                    continue;
                }

                let mut voxels = vec![first];
                visited_chain.insert(first);
                let mut prev = node;
                let mut current = first;
                loop {
                    let next = self
                        .skeleton_neighbours(&skeleton_set, current)
                        .into_iter()
                        .find(|&n| n != prev)
                        .expect("chain voxel has exactly two skeleton neighbours");
                    if node_set.contains(&next) {
                        links.push(Link::new(node, voxels, next));
                        break;
                    }
                    voxels.push(next);
                    visited_chain.insert(next);
                    prev = current;
                    current = next;
                }
            }
        }

        // Resolve rings with no junction/endpoint: promote one voxel of
        // each remaining unvisited ring to a synthetic node.
        let mut ring_starts: Vec<Point3> = skeleton
            .iter()
            .copied()
            .filter(|p| !node_set.contains(p) && !visited_chain.contains(p))
            .collect();
        ring_starts.sort();

        for start in ring_starts {
            if visited_chain.contains(&start) {
                continue;
            }
            nodes.push(start);
            visited_chain.insert(start);

            let first = self
                .skeleton_neighbours(&skeleton_set, start)
                .into_iter()
                .next()
                .expect("ring voxel has exactly two skeleton neighbours");

            let mut voxels = Vec::new();
            let mut prev = start;
            let mut current = first;
            loop {
                if current == start {
                    links.push(Link::new(start, voxels, start));
                    break;
                }
                voxels.push(current);
                visited_chain.insert(current);
                let next = self
                    .skeleton_neighbours(&skeleton_set, current)
                    .into_iter()
                    .find(|&n| n != prev)
                    .expect("ring voxel has exactly two skeleton neighbours");
                prev = current;
                current = next;
            }
        }

        log::debug!(
            "network: {} nodes, {} links from {} skeleton voxels",
            nodes.len(),
            links.len(),
            skeleton.len()
        );

        Network { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbours::SixNeighbourCalculator;

    #[test]
    fn straight_line_has_two_endpoint_nodes_and_one_link() {
        let skeleton: Vec<Point3> = (0..5).map(|x| Point3::new(x, 0, 0)).collect();
        let network = NetworkBuilder::new(SixNeighbourCalculator).build(&skeleton);

        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.links.len(), 1);
        let link = &network.links[0];
        assert_eq!(link.voxels.len(), 3);
        assert!((link.length - 4.0).abs() < 1e-9);
    }

    #[test]
    fn single_isolated_voxel_is_its_own_node_with_no_links() {
        let skeleton = vec![Point3::new(0, 0, 0)];
        let network = NetworkBuilder::new(SixNeighbourCalculator).build(&skeleton);
        assert_eq!(network.nodes, vec![Point3::new(0, 0, 0)]);
        assert!(network.links.is_empty());
    }

    #[test]
    fn y_junction_has_three_links_from_one_node() {
        // A junction at origin with three arms of length 2 each.
        let mut skeleton = vec![Point3::new(0, 0, 0)];
        for x in 1..=2 {
            skeleton.push(Point3::new(x, 0, 0));
        }
        for y in 1..=2 {
            skeleton.push(Point3::new(0, y, 0));
        }
        for z in 1..=2 {
            skeleton.push(Point3::new(0, 0, z));
        }

        let network = NetworkBuilder::new(SixNeighbourCalculator).build(&skeleton);
        assert_eq!(network.nodes.len(), 4);
        assert_eq!(network.links.len(), 3);
        for link in &network.links {
            assert_eq!(link.voxels.len(), 1);
        }
    }

    #[test]
    fn every_non_node_voxel_belongs_to_exactly_one_link() {
        let mut skeleton = vec![Point3::new(0, 0, 0)];
        for x in 1..=2 {
            skeleton.push(Point3::new(x, 0, 0));
        }
        for y in 1..=2 {
            skeleton.push(Point3::new(0, y, 0));
        }
        let network = NetworkBuilder::new(SixNeighbourCalculator).build(&skeleton);

        let node_set: HashSet<Point3> = network.nodes.iter().copied().collect();
        let mut seen = HashSet::new();
        for link in &network.links {
            for &v in &link.voxels {
                assert!(!node_set.contains(&v));
                assert!(seen.insert(v), "voxel {v:?} belongs to more than one link");
            }
        }
    }

    #[test]
    fn a_closed_ring_gets_a_single_synthetic_node() {
        // A 4-voxel square ring in the z=0 plane, 4-connected via 6-neighbours.
        let skeleton = vec![
            Point3::new(0, 0, 0),
            Point3::new(1, 0, 0),
            Point3::new(1, 1, 0),
            Point3::new(0, 1, 0),
        ];
        let network = NetworkBuilder::new(SixNeighbourCalculator).build(&skeleton);
        assert_eq!(network.nodes.len(), 1);
        assert_eq!(network.links.len(), 1);
        assert_eq!(network.links[0].voxels.len(), 3);
    }
}
