use strum::{Display, EnumIter, VariantArray};

use crate::algo::tabular::Hashable;

/// Maps raw percepts and the planner's desired heading into a discrete table key
///
/// Implementations must be pure: equal inputs always produce equal states.
pub trait StateEncoder<P, W> {
    type State: Hashable;

    fn encode(&self, percept: &P, waypoint: &W) -> Self::State;
}

/// Traffic signal phase as seen by a car entering an intersection
#[derive(Debug, Display, EnumIter, VariantArray, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Light {
    Red,
    Green,
}

/// The moves available to a car at an intersection
#[derive(Debug, Display, EnumIter, VariantArray, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Hold,
    Forward,
    Left,
    Right,
}

impl Action {
    /// Whether the action moves the car off its intersection
    pub fn is_move(self) -> bool {
        self != Action::Hold
    }
}

/// What a car perceives at its intersection
///
/// Each traffic field holds the intended move of the car approaching from that side, or `None`
/// if there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percept {
    pub light: Light,
    pub oncoming: Option<Action>,
    pub left: Option<Action>,
    pub right: Option<Action>,
}

impl Percept {
    /// A percept with the given light and no other traffic
    pub fn clear(light: Light) -> Self {
        Self {
            light,
            oncoming: None,
            left: None,
            right: None,
        }
    }
}

/// Discretized driving state: the percept plus where the planner wants to go next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub light: Light,
    pub oncoming: Option<Action>,
    pub left: Option<Action>,
    pub right: Option<Action>,
    pub waypoint: Option<Action>,
}

/// Encoder for the traffic world, keeping every percept field and the waypoint
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionEncoder;

impl StateEncoder<Percept, Option<Action>> for IntersectionEncoder {
    type State = State;

    fn encode(&self, percept: &Percept, waypoint: &Option<Action>) -> State {
        let &Percept {
            light,
            oncoming,
            left,
            right,
        } = percept;
        State {
            light,
            oncoming,
            left,
            right,
            waypoint: *waypoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn encode_is_deterministic() {
        let percept = Percept {
            light: Light::Green,
            oncoming: Some(Action::Left),
            left: None,
            right: Some(Action::Forward),
        };
        let a = IntersectionEncoder.encode(&percept, &Some(Action::Right));
        let same = percept;
        let b = IntersectionEncoder.encode(&same, &Some(Action::Right));
        assert_eq!(a, b);
        assert_eq!(a.oncoming, Some(Action::Left));
        assert_eq!(a.waypoint, Some(Action::Right));
    }

    #[test]
    fn every_component_distinguishes_states() {
        let base = IntersectionEncoder.encode(&Percept::clear(Light::Red), &Some(Action::Forward));

        let mut green = Percept::clear(Light::Green);
        assert_ne!(IntersectionEncoder.encode(&green, &Some(Action::Forward)), base);
        green.light = Light::Red;
        green.right = Some(Action::Forward);
        assert_ne!(IntersectionEncoder.encode(&green, &Some(Action::Forward)), base);
        assert_ne!(IntersectionEncoder.encode(&Percept::clear(Light::Red), &None), base);
    }

    #[test]
    fn state_space_is_finite() {
        let traffic = || std::iter::once(None).chain(Action::iter().map(Some));
        let mut states = HashSet::new();
        for light in Light::iter() {
            for oncoming in traffic() {
                for left in traffic() {
                    for right in traffic() {
                        for waypoint in traffic() {
                            let percept = Percept {
                                light,
                                oncoming,
                                left,
                                right,
                            };
                            states.insert(IntersectionEncoder.encode(&percept, &waypoint));
                        }
                    }
                }
            }
        }
        assert_eq!(states.len(), 2 * 5 * 5 * 5 * 5);
    }

    #[test]
    fn action_display() {
        assert_eq!(Action::Hold.to_string(), "hold");
        assert_eq!(Light::Green.to_string(), "green");
        assert!(!Action::Hold.is_move());
        assert!(Action::Left.is_move());
    }
}
