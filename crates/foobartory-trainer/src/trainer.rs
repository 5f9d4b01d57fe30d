//! The generational loop: breed, race, score.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use rand::Rng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use foobartory_factory::{Factory, WorldConfig, generate_moniker};
use foobartory_strategy::{Policy, PolicyDecider, StopFlag, run_until_goal};
use foobartory_types::FactoryStatus;

use crate::config::TrainerConfig;
use crate::error::TrainerError;
use crate::fitness::{fitness, roulette_index};

/// One population member: a named policy plus the isolated factory it
/// drives for the current generation.
struct Individual<P> {
    /// Lineage name; elites keep theirs across generations.
    name: String,
    policy: P,
    factory: Arc<Factory>,
    stop: StopFlag,
    /// Cached score from the last completed generation.
    fitness: f64,
}

impl<P: Policy> Individual<P> {
    fn new(name: String, policy: P, world: &Arc<WorldConfig>) -> Self {
        Self {
            name,
            policy,
            factory: Arc::new(Factory::new(Arc::clone(world))),
            stop: StopFlag::default(),
            fitness: 0.0,
        }
    }

    fn won(&self) -> bool {
        self.factory.robot_count() >= self.factory.config().robot_goal
    }
}

/// Final state of one individual after its generation ran.
#[derive(Debug, Clone)]
pub struct IndividualReport {
    /// Lineage name.
    pub name: String,
    /// Score assigned this generation.
    pub fitness: f64,
    /// Whether the robot-count goal was reached.
    pub won: bool,
    /// Final factory snapshot.
    pub status: FactoryStatus,
    /// Cumulative simulated milliseconds spent.
    pub elapsed_ms: u64,
}

/// Outcome of one generation, sorted by descending fitness.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// 1-based generation counter.
    pub generation: u64,
    /// All individuals' final states, best first.
    pub results: Vec<IndividualReport>,
}

/// Breeds and races populations of policies over generations.
pub struct Trainer<P> {
    config: TrainerConfig,
    world: Arc<WorldConfig>,
    population: Vec<Individual<P>>,
    generation: u64,
    rng: SmallRng,
}

impl<P: Policy> Trainer<P> {
    /// Create a trainer with an empty population.
    pub const fn new(config: TrainerConfig, world: Arc<WorldConfig>, rng: SmallRng) -> Self {
        Self {
            config,
            world,
            population: Vec::new(),
            generation: 0,
            rng,
        }
    }

    /// Seed the next generation with a previously saved policy; the
    /// population is then expanded from it with low-rate mutants.
    pub fn seed(&mut self, policy: P) {
        let name = generate_moniker(&mut self.rng);
        info!(name = %name, "seed policy registered");
        self.population
            .push(Individual::new(name, policy, &self.world));
    }

    /// Generations completed so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Breed the next generation, race it against the shared deadline,
    /// and score every individual.
    ///
    /// The race ends at the first individual victory or when the
    /// deadline fires, whichever comes first. All decision loops are
    /// then told to stop; in-flight operations finish on their own
    /// before scoring.
    pub async fn run_generation(&mut self) -> GenerationReport {
        self.breed();
        info!(
            generation = self.generation,
            population = self.population.len(),
            "running generation"
        );

        let mut runs: FuturesUnordered<_> = self
            .population
            .iter()
            .map(|individual| {
                let factory = Arc::clone(&individual.factory);
                let decider = PolicyDecider::new(Arc::new(individual.policy.clone()));
                let stop = Arc::clone(&individual.stop);
                tokio::spawn(run_until_goal(factory, decider, stop))
            })
            .collect();

        let deadline =
            tokio::time::sleep(Duration::from_millis(self.config.generation_deadline_ms));
        tokio::pin!(deadline);

        tokio::select! {
            () = &mut deadline => {
                debug!(generation = self.generation, "generation deadline reached");
            }
            _ = runs.next() => {
                debug!(generation = self.generation, "first individual finished");
            }
        }

        for individual in &self.population {
            individual.stop.store(true, Ordering::SeqCst);
        }
        while let Some(joined) = runs.next().await {
            if let Err(error) = joined {
                warn!(%error, "individual run task failed");
            }
        }

        self.score()
    }

    /// Persist the best-scored policy of the current population.
    pub fn save_best(&self, path: &Path) -> Result<(), TrainerError> {
        let best = self
            .population
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .ok_or(TrainerError::EmptyPopulation)?;
        info!(name = %best.name, fitness = best.fitness, "saving best policy");
        best.policy
            .save(path)
            .map_err(|error| TrainerError::Persistence {
                source: Box::new(error),
            })
    }

    fn score(&mut self) -> GenerationReport {
        let goal = self.world.robot_goal;
        for individual in &mut self.population {
            let status = individual.factory.status();
            let elapsed_ms = individual.factory.clock().cumulative_ms();
            individual.fitness = fitness(&status, goal, elapsed_ms);
        }

        let mut results: Vec<IndividualReport> = self
            .population
            .iter()
            .map(|individual| IndividualReport {
                name: individual.name.clone(),
                fitness: individual.fitness,
                won: individual.won(),
                status: individual.factory.status(),
                elapsed_ms: individual.factory.clock().cumulative_ms(),
            })
            .collect();
        results.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        for result in results.iter().take(self.config.report_size) {
            info!(
                name = %result.name,
                fitness = result.fitness,
                won = result.won,
                robots = result.status.robot_count,
                balance = %result.status.balance,
                elapsed_ms = result.elapsed_ms,
                "generation result"
            );
        }

        GenerationReport {
            generation: self.generation,
            results,
        }
    }

    /// Build the next population in place.
    ///
    /// Empty population: fresh random policies. Exactly one member (a
    /// loaded seed): the seed plus low-rate mutants of it. Otherwise:
    /// elites survive with their lineage names, the rest are bred by
    /// roulette-selected parents, crossover, and mutation.
    fn breed(&mut self) {
        self.generation = self.generation.saturating_add(1);

        if self.population.is_empty() {
            let fresh: Vec<Individual<P>> = (0..self.config.population_size)
                .map(|_| {
                    let policy = P::random(&mut self.rng);
                    let name = generate_moniker(&mut self.rng);
                    Individual::new(name, policy, &self.world)
                })
                .collect();
            self.population = fresh;
            return;
        }

        if self.population.len() == 1 {
            let Some(seed) = self.population.first() else {
                return;
            };
            let seed_name = seed.name.clone();
            let seed_policy = seed.policy.clone();

            let mut expanded = Vec::with_capacity(self.config.population_size);
            expanded.push(Individual::new(
                seed_name,
                seed_policy.clone(),
                &self.world,
            ));
            while expanded.len() < self.config.population_size {
                let mut policy = seed_policy.clone();
                let mutations =
                    policy.mutate(self.config.seed_expansion_mutation_rate, &mut self.rng);
                let name = generate_moniker(&mut self.rng);
                debug!(name = %name, mutations, "seed expansion mutant");
                expanded.push(Individual::new(name, policy, &self.world));
            }
            self.population = expanded;
            return;
        }

        self.population
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let elite_count =
            (((self.population.len() as f64) * self.config.elite_fraction).floor() as usize).max(1);
        let elites: Vec<&Individual<P>> = self.population.iter().take(elite_count).collect();
        let elite_fitness: Vec<f64> = elites.iter().map(|elite| elite.fitness).collect();
        let total_fitness: f64 = elite_fitness.iter().sum();

        let mut next = Vec::with_capacity(self.config.population_size);
        for elite in &elites {
            next.push(Individual::new(
                elite.name.clone(),
                elite.policy.clone(),
                &self.world,
            ));
        }

        while next.len() < self.config.population_size {
            let Some(parent_a) = pick_parent(&elites, &elite_fitness, total_fitness, &mut self.rng)
            else {
                break;
            };
            let mut parent_b = parent_a;
            if elites.len() > 1 {
                // Bounded retry: lineage names are not guaranteed unique.
                for _ in 0..32 {
                    if let Some(candidate) =
                        pick_parent(&elites, &elite_fitness, total_fitness, &mut self.rng)
                    {
                        if candidate.name != parent_a.name {
                            parent_b = candidate;
                            break;
                        }
                    }
                }
            }

            let mut policy = parent_a.policy.clone();
            policy.crossover(&parent_b.policy);
            let mutations = policy.mutate(self.config.mutation_rate, &mut self.rng);
            let name = generate_moniker(&mut self.rng);
            debug!(
                child = %name,
                parent_a = %parent_a.name,
                parent_b = %parent_b.name,
                mutations,
                "bred child"
            );
            next.push(Individual::new(name, policy, &self.world));
        }

        self.population = next;
    }
}

/// Roulette-wheel pick over the elites; falls back to a uniform pick
/// when the total fitness is degenerate.
fn pick_parent<'a, P: Policy>(
    elites: &[&'a Individual<P>],
    fitnesses: &[f64],
    total: f64,
    rng: &mut SmallRng,
) -> Option<&'a Individual<P>> {
    if elites.is_empty() {
        return None;
    }
    let index = if total > 0.0 {
        let pick = rng.random_range(0.0..total);
        roulette_index(fitnesses, pick).unwrap_or(0)
    } else {
        rng.random_range(0..elites.len())
    };
    elites.get(index).copied()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
