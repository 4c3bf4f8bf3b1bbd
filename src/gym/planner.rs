use crate::{env::RoutePlanner, state::Action};

use super::traffic_world::{Heading, Pos, TrafficWorld};

/// The move that brings a car at `location` facing `heading` closer to `destination`
///
/// Closes the east-west gap first, then north-south. Heading away from the target yields a right
/// turn, so a car loops around the block rather than reversing. `None` once the car has arrived.
pub fn waypoint(location: Pos, heading: Heading, destination: Pos) -> Option<Action> {
    if location == destination {
        return None;
    }
    let (dx, dy) = (destination.0 - location.0, destination.1 - location.1);
    let Heading { dx: hx, dy: hy } = heading;

    let action = if dx != 0 {
        if dx * hx > 0 {
            Action::Forward
        } else if dx * hx < 0 {
            Action::Right
        } else if dx * hy > 0 {
            Action::Left
        } else {
            Action::Right
        }
    } else if dy * hy > 0 {
        Action::Forward
    } else if dy * hy < 0 {
        Action::Right
    } else if dy * hx > 0 {
        Action::Right
    } else {
        Action::Left
    };
    Some(action)
}

/// Route planner for the [`TrafficWorld`]
#[derive(Debug, Clone, Default)]
pub struct GridPlanner {
    destination: Option<Pos>,
}

impl GridPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Pos> {
        self.destination
    }
}

impl RoutePlanner<TrafficWorld> for GridPlanner {
    type Destination = Pos;
    type Waypoint = Option<Action>;

    fn route_to(&mut self, destination: Pos) {
        self.destination = Some(destination);
    }

    fn next_waypoint(&self, env: &TrafficWorld) -> Option<Action> {
        self.destination
            .and_then(|dest| waypoint(env.location(), env.heading(), dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrived() {
        assert_eq!(waypoint((2, 2), Heading::NORTH, (2, 2)), None);
    }

    #[test]
    fn east_west_first() {
        let dest = (5, 1);
        assert_eq!(waypoint((2, 3), Heading::EAST, dest), Some(Action::Forward));
        assert_eq!(waypoint((2, 3), Heading::WEST, dest), Some(Action::Right));
        assert_eq!(waypoint((2, 3), Heading::SOUTH, dest), Some(Action::Left));
        assert_eq!(waypoint((2, 3), Heading::NORTH, dest), Some(Action::Right));
    }

    #[test]
    fn then_north_south() {
        let dest = (2, 1);
        assert_eq!(waypoint((2, 3), Heading::NORTH, dest), Some(Action::Forward));
        assert_eq!(waypoint((2, 3), Heading::SOUTH, dest), Some(Action::Right));
        assert_eq!(waypoint((2, 3), Heading::EAST, dest), Some(Action::Left));
        assert_eq!(waypoint((2, 3), Heading::WEST, dest), Some(Action::Right));
    }

    #[test]
    fn forward_and_left_point_toward_destination() {
        for (location, dest) in [((2, 3), (5, 1)), ((6, 2), (1, 5)), ((3, 5), (3, 1))] {
            for heading in Heading::ALL {
                let Some(action) = waypoint(location, heading, dest) else {
                    unreachable!()
                };
                if action == Action::Right {
                    continue;
                }
                let next = heading.turn(action);
                let closer = (dest.0 - location.0) * next.dx + (dest.1 - location.1) * next.dy;
                assert!(closer > 0, "{action} from {heading:?} at {location:?} leads away");
            }
        }
    }

    #[test]
    fn planner_without_route() {
        let mut world = TrafficWorld::new(Default::default()).unwrap();
        world.reset();
        let mut planner = GridPlanner::new();
        assert_eq!(planner.next_waypoint(&world), None);

        planner.route_to(world.destination());
        assert_eq!(planner.destination(), Some(world.destination()));
        assert!(planner.next_waypoint(&world).is_some());
    }
}
