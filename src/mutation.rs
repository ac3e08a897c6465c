//! Per-bit mutation of packed genes.

use rand::Rng;

use crate::genome::{BridgeCount, Chromosome};
use crate::graph::IslandGraph;

/// The two bits a direction occupies in a packed gene.
const FLIPPABLE: [BridgeCount; 2] = [BridgeCount::Single, BridgeCount::Double];

/// Flip bits of `chromosome` in place, each with probability `probability`.
///
/// Only the bits of directions with a neighbor are considered. Flipping the bit that is already set clears the
/// direction; flipping the other one replaces the count with that bit's count. A flip which would exceed the link's
/// capacity is skipped. Every applied flip is mirrored onto the neighbor.
///
/// Returns the number of flips applied.
pub fn mutate<R: Rng>(graph: &IslandGraph, chromosome: &mut Chromosome, probability: f64, rng: &mut R) -> usize {
    let mut applied = 0;

    for island in graph.islands() {
        for neighbor in island.neighbors() {
            let link = &graph.links()[neighbor.link];
            for bit in FLIPPABLE {
                if !rng.gen_bool(probability) {
                    continue;
                }

                let flipped = match chromosome.link_count(link) == bit {
                    true => BridgeCount::None,
                    false => bit,
                };
                if flipped > link.capacity() {
                    continue;
                }

                chromosome.set_link(link, flipped);
                applied += 1;
            }
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::mutate;
    use crate::builder::GridBuilder;
    use crate::direction::Direction;
    use crate::genome::{BridgeCount, Chromosome};

    #[test]
    fn zero_probability_is_identity() {
        let graph = GridBuilder::from_rows(&[vec![2, 0, 2], vec![0, 0, 0], vec![2, 0, 2]]).build().unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        let original = Chromosome::random(&graph, &mut rng);
        let mut mutated = original.clone();

        assert_eq!(mutate(&graph, &mut mutated, 0.0, &mut rng), 0);
        assert_eq!(mutated, original);
    }

    #[test]
    fn respects_capacity() {
        let graph = GridBuilder::from_rows(&[vec![1, 0, 1]]).build().unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut chromosome = Chromosome::empty(2);

        for _ in 0..50 {
            mutate(&graph, &mut chromosome, 1.0, &mut rng);
            assert!(chromosome.link_count(&graph.links()[0]) <= BridgeCount::Single);
        }
    }

    #[test]
    fn certain_flips_toggle() {
        let graph = GridBuilder::from_rows(&[vec![2, 0, 2]]).build().unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut chromosome = Chromosome::empty(2);

        // None -> Single -> Double -> Single -> Double
        assert_eq!(mutate(&graph, &mut chromosome, 1.0, &mut rng), 4);
        assert_eq!(chromosome.gene(0).unwrap().get(Direction::Right), BridgeCount::Double);
        assert_eq!(chromosome.gene(1).unwrap().get(Direction::Left), BridgeCount::Double);
    }

    #[test]
    fn never_touches_unlinked_directions() {
        let graph = GridBuilder::from_rows(&[
            vec![3, 0, 4, 0, 2],
            vec![0, 0, 0, 0, 0],
            vec![4, 0, 8, 0, 3],
            vec![0, 0, 0, 0, 0],
            vec![2, 0, 4, 0, 2],
        ]).build().unwrap();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut chromosome = Chromosome::random(&graph, &mut rng);

        for _ in 0..100 {
            mutate(&graph, &mut chromosome, 0.3, &mut rng);
            assert_eq!(chromosome.inconsistencies(&graph), 0);
            for island in graph.islands() {
                let gene = chromosome.gene(island.id()).unwrap();
                assert!(gene.active().all(|(d, _)| island.neighbor_towards(d).is_some()));
            }
        }
    }
}
