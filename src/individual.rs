//! A single simulated person.
//!
//! An `Individual` moves in a straight line at constant speed, bounces off the walls of the
//! arena, and carries one [`HealthStatus`]. The only way out of `Healthy` is contact with a sick
//! individual; the only way out of `Sick` is the sick timer running out, after which the
//! individual is `Recovered` or, if vulnerable, `Dead`. Both of those are final.

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::define_rng;
use crate::geometry::{Bounds, Edges, Vector, Wall};
use crate::parameters::Constants;
use crate::random::RandomSource;

define_rng!(PlacementRng);

/// Identifies an individual for the lifetime of a run. Equal to its index in the population.
pub type IndividualId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Sick,
    Recovered,
    Dead,
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Sick,
        HealthStatus::Recovered,
        HealthStatus::Dead,
    ];

    /// The color a renderer uses for individuals in this state.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "#00d1b2",
            HealthStatus::Sick => "tomato",
            HealthStatus::Recovered => "violet",
            HealthStatus::Dead => "white",
        }
    }

    /// `Recovered` and `Dead` are never left once entered.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, HealthStatus::Recovered | HealthStatus::Dead)
    }
}

/// What one call to [`Individual::tick`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Number of healthy individuals this one made sick.
    pub infected: usize,
    /// The final state this individual entered, if its sickness ended on this tick.
    pub resolved: Option<HealthStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    id: IndividualId,
    position: Vector,
    radius: f64,
    velocity: Vector,
    status: HealthStatus,
    quarantined: bool,
    vulnerable: bool,
    sick_timer: u32,
}

impl Individual {
    /// Builds an individual at an explicit position and velocity.
    #[must_use]
    pub fn new(
        id: IndividualId,
        radius: f64,
        position: Vector,
        velocity: Vector,
        status: HealthStatus,
        quarantined: bool,
        vulnerable: bool,
    ) -> Individual {
        Individual {
            id,
            position,
            radius,
            velocity,
            status,
            quarantined,
            vulnerable,
            sick_timer: 0,
        }
    }

    /// Places a new individual uniformly at random so that its whole circle lies inside
    /// `bounds`, heading in a uniformly random direction at `speed`.
    ///
    /// The caller guarantees `bounds.fits(radius)`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn spawn(
        id: IndividualId,
        radius: f64,
        bounds: &Bounds,
        speed: f64,
        status: HealthStatus,
        quarantined: bool,
        vulnerable: bool,
        random: &RandomSource,
    ) -> Individual {
        let x = random.sample_range(PlacementRng, radius..bounds.width - radius);
        let y = random.sample_range(PlacementRng, radius..bounds.height - radius);
        let heading: f64 = random.sample_range(PlacementRng, 0.0..360.0);
        let velocity = Vector::from_heading(heading) * speed;
        Individual::new(
            id,
            radius,
            Vector::new(x, y),
            velocity,
            status,
            quarantined,
            vulnerable,
        )
    }

    #[must_use]
    pub fn id(&self) -> IndividualId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[must_use]
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    #[must_use]
    pub fn is_quarantined(&self) -> bool {
        self.quarantined
    }

    #[must_use]
    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable
    }

    /// Ticks spent sick in the current or most recent sickness.
    #[must_use]
    pub fn sick_timer(&self) -> u32 {
        self.sick_timer
    }

    #[must_use]
    pub fn bounding_edges(&self) -> Edges {
        Edges::around(self.position, self.radius)
    }

    /// Reflects the velocity about the unit normal `normal`.
    pub fn reflect(&mut self, normal: Vector) {
        self.velocity = self.velocity.reflect(normal);
    }

    /// Reflects off every wall the individual has reached. Walls are checked independently, so
    /// an individual in a corner bounces off both walls on the same tick.
    pub fn check_wall_collision(&mut self, bounds: &Bounds) {
        let edges = self.bounding_edges();
        for wall in Wall::ALL {
            if wall.is_crossed_by(&edges, bounds) {
                self.reflect(wall.normal());
            }
        }
    }

    /// Whether the circles of two distinct individuals overlap. Identity is decided by id,
    /// so a copy of an individual never collides with the original.
    #[must_use]
    pub fn is_colliding(&self, other: &Individual) -> bool {
        other.id != self.id && self.position.distance(other.position) < self.radius * 2.0
    }

    /// Makes a healthy individual sick, starting a fresh sick timer.
    fn become_sick(&mut self) {
        self.status = HealthStatus::Sick;
        self.sick_timer = 0;
    }

    /// Infects `other` if it is healthy and touching this individual. Returns whether it was
    /// infected.
    fn transmit_to(&self, other: &mut Individual) -> bool {
        if other.status == HealthStatus::Healthy && self.is_colliding(other) {
            trace!("individual {} infected individual {}", self.id, other.id);
            other.become_sick();
            true
        } else {
            false
        }
    }

    /// Advances this individual by one tick.
    ///
    /// `others` is every other individual in the population, seen in its current state: anyone
    /// infected earlier in the same pass is already sick here. The steps, in order:
    ///
    /// 1. bounce off any wall that has been reached (velocity only);
    /// 2. if sick, infect every healthy individual in contact;
    /// 3. move, unless quarantined or dead;
    /// 4. if sick, count the tick;
    /// 5. if the sickness has lasted `sick_duration` ticks, die if vulnerable and recover
    ///    otherwise.
    pub fn tick<'a>(
        &mut self,
        others: impl IntoIterator<Item = &'a mut Individual>,
        bounds: &Bounds,
        constants: &Constants,
    ) -> TickReport {
        let mut report = TickReport::default();

        self.check_wall_collision(bounds);

        if self.status == HealthStatus::Sick {
            for other in others {
                if self.transmit_to(other) {
                    report.infected += 1;
                }
            }
        }

        if !self.quarantined && self.status != HealthStatus::Dead {
            self.position += self.velocity;
        }

        if self.status == HealthStatus::Sick {
            self.sick_timer += 1;
            if self.sick_timer >= constants.sick_duration {
                self.status = if self.vulnerable {
                    HealthStatus::Dead
                } else {
                    HealthStatus::Recovered
                };
                trace!(
                    "individual {} is {:?} after {} ticks",
                    self.id,
                    self.status,
                    self.sick_timer
                );
                report.resolved = Some(self.status);
            }
        }

        report
    }
}
