use outbreak::geometry::{Bounds, Vector};
use outbreak::individual::{HealthStatus, Individual};
use outbreak::parameters::Constants;
use outbreak::population::Population;
use outbreak::random::RandomSource;

fn allowed_transition(before: HealthStatus, after: HealthStatus) -> bool {
    use HealthStatus::{Dead, Healthy, Recovered, Sick};
    matches!(
        (before, after),
        (Healthy, Healthy | Sick)
            | (Sick, Sick | Recovered | Dead)
            | (Recovered, Recovered)
            | (Dead, Dead)
    )
}

fn short_illness() -> Constants {
    Constants {
        sick_duration: 20,
        vulnerable_probability: 0.3,
        ..Constants::default()
    }
}

#[test]
fn counts_always_sum_to_population_size() {
    let random = RandomSource::new(11);
    let mut population = Population::new(
        300,
        0.2,
        5,
        Bounds::new(300.0, 200.0),
        short_illness(),
        &random,
    )
    .unwrap();
    assert_eq!(population.counts().total(), 300);
    for _ in 0..100 {
        population.advance();
        assert_eq!(population.counts().total(), 300);
    }
}

#[test]
fn transitions_are_monotone() {
    let random = RandomSource::new(5);
    let mut population = Population::new(
        200,
        0.0,
        4,
        Bounds::new(200.0, 200.0),
        short_illness(),
        &random,
    )
    .unwrap();

    let mut previous: Vec<HealthStatus> = population
        .individuals()
        .iter()
        .map(Individual::status)
        .collect();
    let mut times_infected = vec![0usize; population.len()];

    for _ in 0..80 {
        population.advance();
        for (index, individual) in population.individuals().iter().enumerate() {
            let status = individual.status();
            assert!(
                allowed_transition(previous[index], status),
                "individual {index} went from {:?} to {status:?}",
                previous[index]
            );
            if previous[index] == HealthStatus::Healthy && status != HealthStatus::Healthy {
                times_infected[index] += 1;
            }
            previous[index] = status;
        }
    }
    assert!(times_infected.iter().all(|count| *count <= 1));
}

#[test]
fn quarantined_and_dead_individuals_stay_put() {
    let random = RandomSource::new(3);
    let constants = Constants {
        sick_duration: 10,
        vulnerable_probability: 0.5,
        ..Constants::default()
    };
    let mut population =
        Population::new(150, 0.4, 10, Bounds::new(250.0, 250.0), constants, &random).unwrap();

    let start: Vec<Vector> = population
        .individuals()
        .iter()
        .map(Individual::position)
        .collect();
    let mut death_positions: Vec<Option<Vector>> = vec![None; population.len()];

    for _ in 0..60 {
        population.advance();
        for (index, individual) in population.individuals().iter().enumerate() {
            if individual.is_quarantined() {
                assert_eq!(individual.position(), start[index]);
            }
            if individual.status() == HealthStatus::Dead {
                let position = death_positions[index].get_or_insert(individual.position());
                assert_eq!(individual.position(), *position);
            }
        }
    }
}

#[test]
fn ten_people_small_arena() {
    for seed in 0..5 {
        let random = RandomSource::new(seed);
        let mut population = Population::new(
            10,
            0.0,
            1,
            Bounds::new(100.0, 100.0),
            Constants::default(),
            &random,
        )
        .unwrap();
        assert_eq!(population.radius(), 12.0);
        assert_eq!(population.counts().sick, 1);
        // Index zero satisfies 0 / 10 <= 0.
        assert!(population.get(0).unwrap().is_quarantined());
        assert!(population.individuals()[1..]
            .iter()
            .all(|individual| !individual.is_quarantined()));

        for _ in 0..200 {
            let sick_before: Vec<bool> = population
                .individuals()
                .iter()
                .map(|individual| individual.status() != HealthStatus::Healthy)
                .collect();
            let summary = population.advance();

            let newly_sick = population
                .individuals()
                .iter()
                .zip(&sick_before)
                .filter(|(individual, was_sick)| {
                    !**was_sick && individual.status() == HealthStatus::Sick
                })
                .count();
            assert_eq!(summary.new_infections, newly_sick);
            assert_eq!(population.counts().total(), 10);
        }
    }
}

#[test]
fn single_patient_zero_resolves_after_sick_duration() {
    for vulnerable_probability in [0.0, 1.0] {
        let constants = Constants {
            sick_duration: 12,
            vulnerable_probability,
            ..Constants::default()
        };
        let random = RandomSource::new(1);
        let mut population =
            Population::new(1, 0.0, 1, Bounds::new(600.0, 400.0), constants, &random).unwrap();
        let patient = population.get(0).unwrap();
        assert_eq!(patient.status(), HealthStatus::Sick);
        let expected = if patient.is_vulnerable() {
            HealthStatus::Dead
        } else {
            HealthStatus::Recovered
        };

        for tick in 1..12 {
            population.advance();
            assert_eq!(population.get(0).unwrap().status(), HealthStatus::Sick);
            assert_eq!(population.get(0).unwrap().sick_timer(), tick);
        }
        let summary = population.advance();
        assert_eq!(population.get(0).unwrap().status(), expected);

        let counts = population.counts();
        assert_eq!(counts.sick, 0);
        if expected == HealthStatus::Dead {
            assert_eq!(counts.dead, 1);
            assert_eq!(summary.deaths, 1);
        } else {
            assert_eq!(counts.recovered, 1);
            assert_eq!(summary.recoveries, 1);
        }
    }
}

#[test]
fn contact_infects_with_fresh_timer() {
    let constants = Constants::default();
    let bounds = Bounds::new(100.0, 100.0);
    let individuals = vec![
        Individual::new(
            0,
            5.0,
            Vector::new(50.0, 50.0),
            Vector::new(0.0, 1.0),
            HealthStatus::Healthy,
            false,
            false,
        ),
        Individual::new(
            1,
            5.0,
            Vector::new(55.0, 50.0),
            Vector::new(0.0, -1.0),
            HealthStatus::Sick,
            false,
            false,
        ),
        Individual::new(
            2,
            5.0,
            Vector::new(58.0, 50.0),
            Vector::new(0.0, 1.0),
            HealthStatus::Recovered,
            false,
            false,
        ),
    ];
    let mut population = Population::from_individuals(individuals, bounds, constants).unwrap();
    let summary = population.advance();

    assert_eq!(summary.new_infections, 1);
    let infected = population.get(0).unwrap();
    assert_eq!(infected.status(), HealthStatus::Sick);
    assert_eq!(infected.sick_timer(), 0);
    assert_eq!(population.get(2).unwrap().status(), HealthStatus::Recovered);
}
