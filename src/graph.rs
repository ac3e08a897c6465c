//! The island graph: which islands see each other, and which links would cross.

use std::collections::HashMap;

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use unordered_pair::UnorderedPair;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::GraphError;
use crate::genome::{BridgeCount, Chromosome};
use crate::location::Location;

/// Index of an island in [`IslandGraph::islands`].
pub type IslandId = usize;
/// Index of a link in [`IslandGraph::links`].
pub type LinkId = usize;

/// One island's view of a neighbor it can see along a straight, unobstructed line.
///
/// Links come in pairs: if island A holds a link to B in direction `d`, B holds one to A in direction `d.invert()`, sharing the same [`LinkId`] and bridge count.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NeighborLink {
    /// The island seen.
    pub neighbor: IslandId,
    /// Which way the neighbor lies.
    pub direction: Direction,
    /// The shared link.
    pub link: LinkId,
    /// Bridges currently on this link, as of the last [`IslandGraph::apply_layout`].
    pub bridges: BridgeCount,
}

/// A numbered node of the puzzle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Island {
    id: IslandId,
    value: u8,
    location: Location,
    complete: bool,
    neighbors: Vec<NeighborLink>,
}

impl Island {
    /// Position in [`IslandGraph::islands`], row-major over the grid.
    pub fn id(&self) -> IslandId {
        self.id
    }

    /// How many bridge-ends this island requires.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Where the island sits on the grid.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether the bridges currently on this island add up to its value.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Every island in line of sight, at most one per direction.
    pub fn neighbors(&self) -> &[NeighborLink] {
        &self.neighbors
    }

    /// The neighbor lying in `direction`, if any.
    pub fn neighbor_towards(&self, direction: Direction) -> Option<&NeighborLink> {
        self.neighbors.iter().find(|n| n.direction == direction)
    }
}

/// An undirected pair of mutually visible islands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Link {
    origin: IslandId,
    target: IslandId,
    // always forward, from origin to target
    direction: Direction,
    capacity: BridgeCount,
}

impl Link {
    /// The endpoint from which [`direction`](Self::direction) leads to the other.
    pub fn origin(&self) -> IslandId {
        self.origin
    }

    /// The endpoint reached by walking [`direction`](Self::direction) from the origin.
    pub fn target(&self) -> IslandId {
        self.target
    }

    /// Forward direction from origin to target, so [`Right`](Direction::Right) or [`Down`](Direction::Down).
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The most bridges this link may carry: two, unless one endpoint has value 1.
    pub fn capacity(&self) -> BridgeCount {
        self.capacity
    }
}

/// The islands of one puzzle and every bridge that could be built between them.
///
/// Built by a [`GridBuilder`](crate::builder::GridBuilder); topology never changes afterward, only bridge counts and completion flags.
#[derive(Clone, Debug)]
pub struct IslandGraph {
    cells: Array2<Cell>,
    island_at: Array2<Option<IslandId>>,
    islands: Vec<Island>,
    links: Vec<Link>,
    link_index: HashMap<UnorderedPair<IslandId>, LinkId>,
    crossings: Vec<UnorderedPair<LinkId>>,
}

impl IslandGraph {
    pub(crate) fn from_cells(cells: Array2<Cell>) -> Result<Self, GraphError> {
        let mut islands = Vec::new();
        let island_at = Array2::from_shape_fn(cells.raw_dim(), |ind| {
            cells[ind].island_value().map(|value| {
                let id = islands.len();
                islands.push(Island {
                    id,
                    value,
                    location: Location::from(ind),
                    complete: false,
                    neighbors: Vec::new(),
                });
                id
            })
        });

        if islands.is_empty() {
            return Err(GraphError::NoIslands);
        }

        let mut graph = Self {
            cells,
            island_at,
            islands,
            links: Vec::new(),
            link_index: HashMap::new(),
            crossings: Vec::new(),
        };
        graph.rebuild_links();

        if let Some(isolated) = graph.islands.iter().find(|island| island.neighbors.is_empty()) {
            return Err(GraphError::IsolatedIsland { id: isolated.id, location: isolated.location });
        }
        graph.check_links()?;

        Ok(graph)
    }

    /// Rediscover every link from scratch, dropping any prior links first.
    pub(crate) fn rebuild_links(&mut self) {
        self.links.clear();
        self.link_index.clear();
        self.islands.iter_mut().for_each(|island| island.neighbors.clear());

        for id in 0..self.islands.len() {
            let location = self.islands[id].location;
            // every link is seen from both ends; keep the sighting from its lower endpoint
            for direction in Direction::FORWARD_VARIANTS {
                let Some(other) = self.neighbor_in_direction(location, *direction) else {
                    continue;
                };

                let link_id = self.links.len();
                let value = self.islands[id].value.min(self.islands[other].value);
                self.links.push(Link {
                    origin: id,
                    target: other,
                    direction: *direction,
                    capacity: BridgeCount::from_count(value.min(2)).unwrap_or(BridgeCount::Double),
                });
                self.link_index.insert(UnorderedPair(id, other), link_id);

                self.islands[id].neighbors.push(NeighborLink {
                    neighbor: other,
                    direction: *direction,
                    link: link_id,
                    bridges: BridgeCount::None,
                });
                self.islands[other].neighbors.push(NeighborLink {
                    neighbor: id,
                    direction: direction.invert(),
                    link: link_id,
                    bridges: BridgeCount::None,
                });
            }
        }

        self.islands.iter_mut().for_each(|island| island.neighbors.sort_by_key(|n| n.direction));
        self.crossings = self.find_crossings();
    }

    /// Walk from `location` in `direction` until the first non-empty cell.
    ///
    /// Returns the island found there, or `None` on hitting a bridge marker or the edge of the grid.
    fn neighbor_in_direction(&self, location: Location, direction: Direction) -> Option<IslandId> {
        let mut current = direction.attempt_from(location);
        loop {
            match self.cells.get(current.as_index())? {
                Cell::Empty => current = direction.attempt_from(current),
                Cell::Island { .. } => return self.island_at.get(current.as_index()).copied().flatten(),
                Cell::Bridge { .. } => return None,
            }
        }
    }

    /// Every pair of a horizontal and a vertical link whose segments intersect.
    fn find_crossings(&self) -> Vec<UnorderedPair<LinkId>> {
        let (horizontal, vertical): (Vec<_>, Vec<_>) = self.links.iter()
            .enumerate()
            .partition(|(_, link)| link.direction.is_horizontal());

        horizontal.iter()
            .cartesian_product(vertical.iter())
            .filter(|((_, h), (_, v))| {
                let (h_from, h_to) = (self.islands[h.origin].location, self.islands[h.target].location);
                let (v_from, v_to) = (self.islands[v.origin].location, self.islands[v.target].location);
                // strict inequalities: links meeting at a shared island do not cross
                h_from.col() < v_from.col() && v_from.col() < h_to.col()
                    && v_from.row() < h_from.row() && h_from.row() < v_to.row()
            })
            .map(|((h_id, _), (v_id, _))| UnorderedPair(*h_id, *v_id))
            .collect_vec()
    }

    /// Verify that every neighbor link is mirrored by its neighbor.
    pub fn check_links(&self) -> Result<(), GraphError> {
        for island in &self.islands {
            for link in &island.neighbors {
                let mirrored = self.islands.get(link.neighbor)
                    .and_then(|other| other.neighbor_towards(link.direction.invert()))
                    .is_some_and(|back| back.neighbor == island.id && back.link == link.link && back.bridges == link.bridges);
                if !mirrored {
                    return Err(GraphError::InconsistentLink { from: island.id, to: link.neighbor, direction: link.direction });
                }
            }
        }

        Ok(())
    }

    /// Copy the bridge counts of `chromosome` onto the neighbor links and refresh every completion flag.
    pub fn apply_layout(&mut self, chromosome: &Chromosome) {
        for island in self.islands.iter_mut() {
            let Some(gene) = chromosome.gene(island.id) else {
                continue;
            };
            for neighbor in island.neighbors.iter_mut() {
                neighbor.bridges = gene.get(neighbor.direction);
            }
            island.complete = gene.connections() == u32::from(island.value);
        }
    }

    /// The grid with every active link of `chromosome` painted over the cells it spans.
    pub fn resolve_cells(&self, chromosome: &Chromosome) -> Array2<Cell> {
        let mut resolved = self.cells.clone();

        for link in &self.links {
            let count = chromosome.link_count(link);
            if !count.is_active() {
                continue;
            }

            let end = self.islands[link.target].location;
            let mut current = link.direction.attempt_from(self.islands[link.origin].location);
            while current != end {
                if let Some(cell) = resolved.get_mut(current.as_index()) {
                    *cell = Cell::Bridge { count, direction: link.direction };
                }
                current = link.direction.attempt_from(current);
            }
        }

        resolved
    }

    /// The grid as given, bridge markers included.
    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Every island, in row-major order.
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// The island with `id`.
    pub fn island(&self, id: IslandId) -> Option<&Island> {
        self.islands.get(id)
    }

    /// The island at `location`, if there is one.
    pub fn island_at(&self, location: Location) -> Option<IslandId> {
        self.island_at.get(location.as_index()).copied().flatten()
    }

    /// Every link, indexed by [`LinkId`].
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The link joining `a` and `b` in either order.
    pub fn link_between(&self, a: IslandId, b: IslandId) -> Option<LinkId> {
        self.link_index.get(&UnorderedPair(a, b)).copied()
    }

    /// Pairs of links which may not both carry bridges.
    pub fn crossings(&self) -> &[UnorderedPair<LinkId>] {
        &self.crossings
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GridBuilder;
    use crate::cell::Cell;
    use crate::direction::Direction;
    use crate::error::GraphError;
    use crate::genome::{BridgeCount, Chromosome};
    use crate::location::Location;

    #[test]
    fn links_are_mutual() {
        let graph = GridBuilder::from_rows(&[
            vec![2, 0, 3],
            vec![0, 0, 0],
            vec![1, 0, 2],
        ]).build().unwrap();

        assert_eq!(graph.islands().len(), 4);
        assert_eq!(graph.links().len(), 4);
        assert!(graph.check_links().is_ok());

        let corner = graph.island(0).unwrap();
        assert_eq!(corner.neighbors().len(), 2);
        assert_eq!(corner.neighbor_towards(Direction::Right).unwrap().neighbor, 1);
        assert_eq!(corner.neighbor_towards(Direction::Down).unwrap().neighbor, 2);
        assert!(corner.neighbor_towards(Direction::Up).is_none());

        let bottom_right = graph.island_at(Location(2, 2)).unwrap();
        assert_eq!(graph.island(bottom_right).unwrap().neighbor_towards(Direction::Left).unwrap().neighbor, 2);
    }

    #[test]
    fn capacity_follows_smaller_value() {
        let graph = GridBuilder::from_rows(&[vec![1, 0, 3, 0, 2]]).build().unwrap();
        assert_eq!(graph.links()[0].capacity(), BridgeCount::Single);
        assert_eq!(graph.links()[1].capacity(), BridgeCount::Double);
    }

    #[test]
    fn bridge_marker_blocks_sight() {
        let result = GridBuilder::from_rows(&[
            vec![0, 1, 0],
            vec![1, -3, 1],
            vec![0, 1, 0],
        ]).build();

        // every island faces the marker and nothing else
        assert!(matches!(result, Err(GraphError::IsolatedIsland { .. })));
    }

    #[test]
    fn nearest_island_wins() {
        let graph = GridBuilder::from_rows(&[vec![1, 0, 2, 0, 1]]).build().unwrap();
        assert!(graph.link_between(0, 1).is_some());
        assert!(graph.link_between(1, 2).is_some());
        assert!(graph.link_between(0, 2).is_none());
    }

    #[test]
    fn detects_crossings() {
        let graph = GridBuilder::from_rows(&[
            vec![0, 1, 0],
            vec![1, 0, 1],
            vec![0, 1, 0],
        ]).build().unwrap();

        assert_eq!(graph.links().len(), 2);
        assert_eq!(graph.crossings().len(), 1);
    }

    #[test]
    fn shared_corner_is_not_a_crossing() {
        let graph = GridBuilder::from_rows(&[
            vec![2, 0, 2],
            vec![0, 0, 0],
            vec![2, 0, 2],
        ]).build().unwrap();

        assert!(graph.crossings().is_empty());
    }

    #[test]
    fn rebuild_does_not_duplicate() {
        let mut graph = GridBuilder::from_rows(&[vec![2, 0, 2]]).build().unwrap();
        graph.rebuild_links();
        graph.rebuild_links();

        assert_eq!(graph.links().len(), 1);
        assert_eq!(graph.island(0).unwrap().neighbors().len(), 1);
        assert_eq!(graph.island(1).unwrap().neighbors().len(), 1);
    }

    #[test]
    fn apply_layout_marks_completion() {
        let mut graph = GridBuilder::from_rows(&[vec![2, 0, 1, 0, 1]]).build().unwrap();
        let mut chromosome = Chromosome::empty(3);
        chromosome.set_link(&graph.links()[0], BridgeCount::Single);
        graph.apply_layout(&chromosome);

        assert!(!graph.island(0).unwrap().is_complete());
        assert!(graph.island(1).unwrap().is_complete());
        assert!(!graph.island(2).unwrap().is_complete());
        assert_eq!(graph.island(0).unwrap().neighbors()[0].bridges, BridgeCount::Single);
        assert!(graph.check_links().is_ok());
    }

    #[test]
    fn resolved_cells_show_bridges() {
        let graph = GridBuilder::from_rows(&[
            vec![2, 0, 0, 1],
            vec![0, 0, 0, 0],
            vec![1, 0, 0, 0],
        ]).build().unwrap();

        let mut chromosome = Chromosome::empty(3);
        chromosome.set_link(&graph.links()[0], BridgeCount::Single);
        chromosome.set_link(&graph.links()[1], BridgeCount::Single);

        let cells = graph.resolve_cells(&chromosome);
        let codes = cells.map(Cell::code);
        assert_eq!(codes.row(0).to_vec(), vec![2, -3, -3, 1]);
        assert_eq!(codes.column(0).to_vec(), vec![2, -1, 1]);
    }
}
