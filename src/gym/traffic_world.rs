use std::collections::HashMap;

use log::trace;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    agent::Agent,
    check_interval,
    env::{DiscreteActionSpace, Environment},
    error::{Error, Result},
    state::{Action, Light, Percept},
};

use super::planner;

/// An intersection on the grid, `(x, y)` with `y` growing southward
pub type Pos = (i32, i32);

/// Minimum Manhattan distance between start and destination, when the grid allows it
const MIN_DISTANCE: i32 = 4;
/// Attempts at drawing a start and destination that far apart
const MAX_PLACEMENT_ATTEMPTS: usize = 100;
/// Steps granted per unit of distance to the destination
const DEADLINE_FACTOR: i32 = 5;
/// Trials end here even when deadlines are not enforced
const HARD_TIME_LIMIT: i32 = -100;

/// Unit direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const NORTH: Heading = Heading { dx: 0, dy: -1 };
    pub const EAST: Heading = Heading { dx: 1, dy: 0 };
    pub const SOUTH: Heading = Heading { dx: 0, dy: 1 };
    pub const WEST: Heading = Heading { dx: -1, dy: 0 };
    pub const ALL: [Heading; 4] = [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST];

    pub fn left(self) -> Self {
        Self {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    pub fn right(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    pub fn opposite(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// Heading after taking `action`
    pub fn turn(self, action: Action) -> Self {
        match action {
            Action::Left => self.left(),
            Action::Right => self.right(),
            Action::Hold | Action::Forward => self,
        }
    }

    fn is_vertical(self) -> bool {
        self.dy != 0
    }
}

/// Configuration for the [`TrafficWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficWorldConfig {
    /// Number of intersections along x and y
    ///
    /// **Default**: `(8, 6)`
    pub grid_size: (i32, i32),
    /// Number of scripted cars sharing the road with the learning car
    ///
    /// **Default**: `3`
    pub num_dummies: usize,
    /// End the trial once the deadline runs out
    ///
    /// **Default**: `true`
    pub enforce_deadline: bool,
    /// Seed for traffic and placement; `None` draws one from entropy
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for TrafficWorldConfig {
    fn default() -> Self {
        Self {
            grid_size: (8, 6),
            num_dummies: 3,
            enforce_deadline: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
struct TrafficLight {
    /// North-south traffic has right of way
    ns_open: bool,
    period: u32,
    last_flip: u32,
}

impl TrafficLight {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            ns_open: rng.gen(),
            period: rng.gen_range(3..=5),
            last_flip: 0,
        }
    }

    fn update(&mut self, t: u32) {
        if t - self.last_flip >= self.period {
            self.ns_open = !self.ns_open;
            self.last_flip = t;
        }
    }

    fn light_for(&self, heading: Heading) -> Light {
        if self.ns_open == heading.is_vertical() {
            Light::Green
        } else {
            Light::Red
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Car {
    location: Pos,
    heading: Heading,
    /// The move the car is about to make, visible to cars sharing its intersection
    intent: Option<Action>,
}

/// Running totals for the current trial
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrialStats {
    pub steps: u32,
    pub total_reward: f64,
    pub penalties: u32,
}

/// A wrapping grid of signalled intersections with one learning car and some scripted traffic
///
/// Cars follow US right-of-way rules: forward needs a green light, a left turn additionally
/// yields to oncoming traffic that is not also turning left, and a right turn on red yields to
/// traffic from the left going forward. The learning car earns `2.0` for a legal move along its
/// route, `-0.5` for any other legal move, `0.0` for holding, `-1.0` for an illegal move, and a
/// `10.0` bonus for reaching the destination in time.
pub struct TrafficWorld {
    config: TrafficWorldConfig,
    lights: HashMap<Pos, TrafficLight>,
    primary: Car,
    dummies: Vec<Car>,
    destination: Pos,
    deadline: i32,
    t: u32,
    done: bool,
    reached: bool,
    stats: TrialStats,
    rng: StdRng,
}

impl TrafficWorld {
    /// **Errors** if the grid is smaller than 2x2 or cannot hold every car at its own intersection
    pub fn new(config: TrafficWorldConfig) -> Result<Self> {
        let (width, height) = config.grid_size;
        check_interval!(width, 2..)?;
        check_interval!(height, 2..)?;
        let cells = (width * height) as usize;
        if config.num_dummies >= cells {
            return Err(Error::InvalidWorld {
                reason: format!(
                    "{} dummy cars do not fit a {width}x{height} grid alongside the learning car",
                    config.num_dummies
                ),
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lights = (1..=width)
            .flat_map(|x| (1..=height).map(move |y| (x, y)))
            .map(|pos| (pos, TrafficLight::random(&mut rng)))
            .collect();
        let car = Car {
            location: (1, 1),
            heading: Heading::EAST,
            intent: None,
        };

        Ok(Self {
            lights,
            primary: car,
            dummies: vec![car; config.num_dummies],
            destination: (1, 1),
            deadline: 0,
            t: 0,
            done: true,
            reached: false,
            stats: TrialStats::default(),
            rng,
            config,
        })
    }

    /// Start a new trial with fresh placements
    ///
    /// **Returns** the destination of the learning car
    pub fn reset(&mut self) -> Pos {
        let mut start = self.random_location();
        let mut destination = self.random_location();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            if distance(start, destination) >= MIN_DISTANCE {
                break;
            }
            start = self.random_location();
            destination = self.random_location();
        }
        while destination == start {
            destination = self.random_location();
        }

        self.primary = Car {
            location: start,
            heading: self.random_heading(),
            intent: None,
        };
        for i in 0..self.dummies.len() {
            self.dummies[i] = Car {
                location: self.random_location(),
                heading: self.random_heading(),
                intent: None,
            };
        }
        for light in self.lights.values_mut() {
            light.last_flip = 0;
        }

        self.destination = destination;
        self.deadline = distance(start, destination) * DEADLINE_FACTOR;
        self.t = 0;
        self.done = false;
        self.reached = false;
        self.stats = TrialStats::default();
        destination
    }

    /// Advance the world by one timestep, letting `agent` drive the learning car
    pub fn step<A: Agent<Self>>(&mut self, agent: &mut A) {
        let t = self.t;
        for light in self.lights.values_mut() {
            light.update(t);
        }
        self.move_dummies();

        agent.update(self, t);
        self.stats.steps += 1;

        if self.deadline <= HARD_TIME_LIMIT {
            self.done = true;
        } else if self.config.enforce_deadline && self.deadline <= 0 {
            self.done = true;
        }
        self.deadline -= 1;
        self.t += 1;
    }

    pub fn location(&self) -> Pos {
        self.primary.location
    }

    pub fn heading(&self) -> Heading {
        self.primary.heading
    }

    pub fn destination(&self) -> Pos {
        self.destination
    }

    /// Whether the current trial has ended
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Whether the learning car reached its destination in the current trial
    pub fn reached(&self) -> bool {
        self.reached
    }

    /// Remaining steps, whether or not deadlines are enforced
    pub fn time_left(&self) -> i32 {
        self.deadline
    }

    pub fn stats(&self) -> TrialStats {
        self.stats
    }

    fn random_location(&mut self) -> Pos {
        let (width, height) = self.config.grid_size;
        (
            self.rng.gen_range(1..=width),
            self.rng.gen_range(1..=height),
        )
    }

    fn random_heading(&mut self) -> Heading {
        *Heading::ALL
            .choose(&mut self.rng)
            .expect("there are four headings")
    }

    /// The percept of the learning car (`None`) or of dummy `i`
    fn sense_for(&self, car: Option<usize>) -> Percept {
        let me = match car {
            Some(i) => self.dummies[i],
            None => self.primary,
        };
        let mut percept = Percept::clear(self.lights[&me.location].light_for(me.heading));

        let others = self
            .dummies
            .iter()
            .enumerate()
            .filter(|&(j, _)| Some(j) != car)
            .map(|(_, other)| other)
            .chain(car.is_some().then_some(&self.primary));

        for other in others.filter(|other| other.location == me.location) {
            if other.heading == me.heading.opposite() {
                percept.oncoming = other.intent;
            } else if other.heading == me.heading.left() {
                percept.right = other.intent;
            } else if other.heading == me.heading.right() {
                percept.left = other.intent;
            }
        }
        percept
    }

    /// Whether `action` is legal given what the car perceives
    pub fn allows(action: Action, percept: &Percept) -> bool {
        let green = percept.light == Light::Green;
        match action {
            Action::Hold => true,
            Action::Forward => green,
            Action::Left => green && matches!(percept.oncoming, None | Some(Action::Left)),
            Action::Right => green || percept.left != Some(Action::Forward),
        }
    }

    fn advance(&self, location: Pos, heading: Heading) -> Pos {
        let (width, height) = self.config.grid_size;
        (
            (location.0 - 1 + heading.dx).rem_euclid(width) + 1,
            (location.1 - 1 + heading.dy).rem_euclid(height) + 1,
        )
    }

    fn move_dummies(&mut self) {
        const MOVES: [Action; 3] = [Action::Forward, Action::Left, Action::Right];
        for i in 0..self.dummies.len() {
            self.dummies[i].intent = MOVES.choose(&mut self.rng).copied();
        }
        for i in 0..self.dummies.len() {
            let percept = self.sense_for(Some(i));
            let car = self.dummies[i];
            let Some(action) = car.intent else { continue };
            if Self::allows(action, &percept) {
                let heading = car.heading.turn(action);
                self.dummies[i].heading = heading;
                self.dummies[i].location = self.advance(car.location, heading);
            } else {
                trace!("dummy {i} held at {:?}: {action} not allowed", car.location);
            }
        }
    }
}

impl Environment for TrafficWorld {
    type Percept = Percept;
    type Action = Action;

    fn sense(&self) -> Percept {
        self.sense_for(None)
    }

    fn deadline(&self) -> Option<i32> {
        self.config.enforce_deadline.then_some(self.deadline)
    }

    fn act(&mut self, action: Action) -> f64 {
        let percept = self.sense();
        let Car {
            location, heading, ..
        } = self.primary;

        let mut reward = if !Self::allows(action, &percept) {
            self.stats.penalties += 1;
            -1.0
        } else if action.is_move() {
            let desired = planner::waypoint(location, heading, self.destination);
            let heading = heading.turn(action);
            self.primary.heading = heading;
            self.primary.location = self.advance(location, heading);
            if desired == Some(action) {
                2.0
            } else {
                -0.5
            }
        } else {
            0.0
        };
        self.primary.intent = Some(action);

        if self.primary.location == self.destination {
            if self.deadline >= 0 {
                reward += 10.0;
            }
            self.done = true;
            self.reached = true;
        }

        self.stats.total_reward += reward;
        reward
    }
}

impl DiscreteActionSpace for TrafficWorld {
    fn actions(&self) -> Vec<Action> {
        use strum::VariantArray;
        Action::VARIANTS.to_vec()
    }
}

/// Manhattan distance, ignoring wrap-around
pub fn distance(a: Pos, b: Pos) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}
