#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::GridBuilder;
    use crate::error::{GraphError, SolveError};
    use crate::fitness::evaluate;
    use crate::location::Location;
    use crate::parameters::Parameters;
    use crate::solver::{HashiSolver, SolverState};

    fn run(solver: &mut HashiSolver, parameters: &Parameters) -> SolverState {
        while solver.update(parameters) {}
        solver.state()
    }

    #[test]
    fn solve_two_islands() {
        let parameters = Parameters { population_size: 20, max_generations: 10, ..Default::default() };
        let mut solver = HashiSolver::seeded(17, parameters);
        assert!(solver.initialize(&[vec![1, 0, 1]]));
        assert_eq!(solver.state(), SolverState::Ready);

        assert_eq!(run(&mut solver, &parameters), SolverState::Solved);
        assert!(solver.generation() <= 10);
        assert_eq!(solver.best_percentage(), 100.0);

        let view = solver.view().unwrap();
        assert!(view.all_complete());
        assert_eq!(view.cells.row(0).to_vec(), vec![
            crate::Cell::from_code(1).unwrap(),
            crate::Cell::from_code(-3).unwrap(),
            crate::Cell::from_code(1).unwrap(),
        ]);
    }

    #[test]
    fn solve_line_without_wisdom() {
        let parameters = Parameters { population_size: 30, max_generations: 200, with_wisdom: false, ..Default::default() };
        let mut solver = HashiSolver::seeded(3, parameters);
        assert!(solver.initialize(&[vec![1, 0, 2, 0, 1]]));

        assert_eq!(run(&mut solver, &parameters), SolverState::Solved);
        let graph = solver.graph().unwrap();
        let best = solver.best().unwrap();
        assert!(evaluate(graph, &best.chromosome).unwrap().is_solution());
    }

    #[test]
    fn wisdom_solves_forced_square() {
        // every island's value equals its link count, so one repair is a solution
        let parameters = Parameters {
            population_size: 10,
            max_generations: 5,
            with_wisdom: true,
            gens_per_wisdom: 1,
            mutation_prob: 0.0,
            crossover_prob: 0.0,
            ..Default::default()
        };
        let mut solver = HashiSolver::seeded(99, parameters);
        assert!(solver.initialize(&[
            vec![2, 0, 2],
            vec![0, 0, 0],
            vec![2, 0, 2],
        ]));

        assert!(!solver.update(&parameters));
        assert_eq!(solver.state(), SolverState::Solved);
        assert_eq!(solver.generation(), 1);
    }

    #[test]
    fn solve_larger_puzzle() {
        let parameters = Parameters { population_size: 200, max_generations: 3000, gens_per_wisdom: 5, ..Default::default() };
        let mut solver = HashiSolver::seeded(2024, parameters);
        assert!(solver.initialize(&[
            vec![3, 0, 4, 0, 3],
            vec![0, 0, 0, 0, 0],
            vec![4, 0, 2, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![3, 0, 0, 0, 3],
        ]));

        assert_eq!(run(&mut solver, &parameters), SolverState::Solved);
        assert!(solver.view().unwrap().all_complete());
    }

    #[test]
    fn island_of_value_zero() {
        let mut builder = GridBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()));
        builder.add_island(Location(0, 0), 0).add_island(Location(2, 0), 1);
        assert_eq!(builder.build().unwrap_err(), GraphError::IslandValueOutOfRange { location: Location(0, 0), value: 0 });
    }

    #[test]
    fn island_without_line_of_sight() {
        let mut solver = HashiSolver::seeded(0, Parameters::default());
        assert!(!solver.initialize(&[vec![1, 0], vec![0, 1]]));
        assert_eq!(solver.state(), SolverState::Uninitialized);
        assert!(matches!(solver.last_error(), Some(SolveError::Graph(GraphError::IsolatedIsland { id: 0, .. }))));
    }

    #[test]
    fn lone_island_is_isolated() {
        assert!(matches!(GridBuilder::from_rows(&[vec![0, 4, 0]]).build(), Err(GraphError::IsolatedIsland { .. })));
    }

    #[test]
    fn update_before_initialize() {
        let mut solver = HashiSolver::seeded(0, Parameters::default());
        assert!(!solver.update(&Parameters::default()));
        assert_eq!(solver.last_error(), Some(&SolveError::NotInitialized));
        assert!(!solver.reset());
        assert!(solver.view().is_none());
    }

    #[test]
    fn invalid_parameters_stop_updates() {
        let mut solver = HashiSolver::seeded(0, Parameters::default());
        assert!(solver.initialize(&[vec![1, 0, 1]]));

        let broken = Parameters { crossover_prob: 2.0, ..Default::default() };
        assert!(!solver.update(&broken));
        assert!(matches!(solver.last_error(), Some(SolveError::Configuration(_))));
        assert_eq!(solver.generation(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let parameters = Parameters { population_size: 15, max_generations: 50, ..Default::default() };
        let grid = [vec![3, 0, 3], vec![0, 0, 0], vec![3, 0, 3]];

        let mut solver = HashiSolver::seeded(5, parameters);
        assert!(solver.initialize(&grid));
        for _ in 0..3 {
            solver.update(&parameters);
        }

        assert!(solver.reset());
        let links = solver.graph().unwrap().links().to_vec();
        assert!(solver.reset());

        assert_eq!(solver.state(), SolverState::Ready);
        assert_eq!(solver.generation(), 0);
        assert_eq!(solver.population().len(), 15);
        assert_eq!(solver.graph().unwrap().links(), &links[..]);
    }

    #[test]
    fn population_size_is_kept() {
        let parameters = Parameters { population_size: 12, max_generations: 20, ..Default::default() };
        let mut solver = HashiSolver::seeded(8, parameters);
        assert!(solver.initialize(&[vec![3, 0, 3], vec![0, 0, 0], vec![3, 0, 3]]));
        assert_eq!(solver.population().len(), 12);

        while solver.update(&parameters) {
            assert_eq!(solver.population().len(), 12);
        }
        assert_eq!(solver.population().len(), 12);

        // a new size takes effect on the next generation
        let mut solver = HashiSolver::seeded(8, parameters);
        assert!(solver.initialize(&[vec![3, 0, 3], vec![0, 0, 0], vec![3, 0, 3]]));
        let larger = Parameters { population_size: 25, ..parameters };
        solver.update(&larger);
        assert_eq!(solver.population().len(), 25);
    }

    #[test]
    fn wisdom_keeps_population_paired() {
        let parameters = Parameters {
            population_size: 30,
            with_wisdom: true,
            gens_per_wisdom: 2,
            max_generations: 40,
            ..Default::default()
        };
        let mut solver = HashiSolver::seeded(11, parameters);
        assert!(solver.initialize(&[
            vec![3, 0, 4, 0, 2],
            vec![0, 0, 0, 0, 0],
            vec![4, 0, 8, 0, 3],
            vec![0, 0, 0, 0, 0],
            vec![2, 0, 4, 0, 2],
        ]));

        loop {
            let running = solver.update(&parameters);
            let graph = solver.graph().unwrap();
            for member in solver.population() {
                assert_eq!(member.chromosome.inconsistencies(graph), 0);
                for island in graph.islands() {
                    for (direction, count) in member.chromosome.gene(island.id()).unwrap().active() {
                        let neighbor = island.neighbor_towards(direction).unwrap();
                        assert!(count <= graph.links()[neighbor.link].capacity());
                    }
                }
            }
            if !running {
                break;
            }
        }
        assert!(solver.state().is_terminal());
    }

    #[test]
    fn elites_survive_unchanged() {
        let parameters = Parameters {
            population_size: 20,
            elitism_perc: 0.25,
            mutation_prob: 0.5,
            with_wisdom: false,
            max_generations: 100,
            ..Default::default()
        };
        let mut solver = HashiSolver::seeded(21, parameters);
        assert!(solver.initialize(&[
            vec![3, 0, 4, 0, 2],
            vec![0, 0, 0, 0, 0],
            vec![4, 0, 8, 0, 3],
            vec![0, 0, 0, 0, 0],
            vec![2, 0, 4, 0, 2],
        ]));

        for _ in 0..10 {
            let elites: Vec<Vec<u8>> = solver.population()[..5].iter().map(|c| c.chromosome.to_bytes()).collect();
            if !solver.update(&parameters) {
                break;
            }
            let after: Vec<Vec<u8>> = solver.population().iter().map(|c| c.chromosome.to_bytes()).collect();
            for elite in &elites {
                assert!(after.contains(elite));
            }
        }
    }

    #[test]
    fn exhausts_at_limit() {
        // 4 and 1 can share at most one bridge
        let parameters = Parameters { population_size: 10, max_generations: 3, ..Default::default() };
        let mut solver = HashiSolver::seeded(1, parameters);
        assert!(solver.initialize(&[vec![4, 0, 1]]));

        assert!(solver.update(&parameters));
        assert!(solver.update(&parameters));
        assert!(!solver.update(&parameters));
        assert_eq!(solver.state(), SolverState::Exhausted);
        assert_eq!(solver.generation(), 3);

        // terminal states do no work
        assert!(!solver.update(&parameters));
        assert_eq!(solver.generation(), 3);
        assert!(solver.best_percentage() < 100.0);
    }

    #[test]
    fn equal_seeds_run_alike() {
        let parameters = Parameters { population_size: 30, max_generations: 15, ..Default::default() };
        let grid = [vec![3, 0, 4, 0, 2], vec![0, 0, 0, 0, 0], vec![2, 0, 4, 0, 1]];

        let mut first = HashiSolver::seeded(77, parameters);
        let mut second = HashiSolver::seeded(77, parameters);
        assert!(first.initialize(&grid));
        assert!(second.initialize(&grid));
        for _ in 0..15 {
            assert_eq!(first.update(&parameters), second.update(&parameters));
        }

        assert_eq!(first.population(), second.population());
        assert_eq!(first.best(), second.best());
    }
}
