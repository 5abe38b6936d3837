//! Append-only trajectory storage.
//!
//! Masses never change during a run, so they are stored once. Every captured
//! snapshot appends one [`BodyState`] per body to a flat arena plus one
//! simulated time. Snapshot `k` is the slice `states[k * n..(k + 1) * n]`.

use crate::body::Body;
use std::fmt;
use ultraviolet::DVec3;

/// The per-step varying part of a [`Body`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub pos: DVec3,
    pub vel: DVec3,
    pub acc: DVec3,
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        Self {
            pos: body.pos,
            vel: body.vel,
            acc: body.acc,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct History {
    masses: Vec<f64>,
    times: Vec<f64>,
    states: Vec<BodyState>,
}

impl History {
    /// Creates a history holding `bodies` as snapshot 0.
    pub(crate) fn new(bodies: &[Body], time: f64) -> Self {
        let mut history = Self {
            masses: bodies.iter().map(|body| body.mass).collect(),
            times: Vec::new(),
            states: Vec::new(),
        };
        history.capture(bodies, time);
        history
    }

    /// Appends a copy of `bodies` as the next snapshot.
    pub(crate) fn capture(&mut self, bodies: &[Body], time: f64) {
        debug_assert_eq!(bodies.len(), self.masses.len());
        self.states.extend(bodies.iter().map(BodyState::from));
        self.times.push(time);
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of bodies in every snapshot.
    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    pub fn get(&self, index: usize) -> Option<Snapshot<'_>> {
        (index < self.len()).then(|| self.snapshot(index))
    }

    fn snapshot(&self, index: usize) -> Snapshot<'_> {
        let n = self.masses.len();
        Snapshot {
            index,
            time: self.times[index],
            masses: &self.masses,
            states: &self.states[index * n..(index + 1) * n],
        }
    }

    pub fn first(&self) -> Option<Snapshot<'_>> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Snapshot<'_>> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Snapshot<'_>> + '_ {
        (0..self.len()).map(|index| self.snapshot(index))
    }

    /// Positions of one body over every snapshot.
    pub fn trajectory(&self, body: usize) -> Option<impl Iterator<Item = DVec3> + '_> {
        let n = self.masses.len();
        if body >= n {
            return None;
        }
        Some(self.states.iter().skip(body).step_by(n).map(|state| state.pos))
    }

    /// Raw arena, snapshot-major.
    pub fn states(&self) -> &[BodyState] {
        &self.states
    }
}

/// A frozen view of every body at one step.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    index: usize,
    time: f64,
    masses: &'a [f64],
    states: &'a [BodyState],
}

impl<'a> Snapshot<'a> {
    /// Step index, 0 for the initial configuration.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Simulated time in years.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &'a [BodyState] {
        self.states
    }

    pub fn masses(&self) -> &'a [f64] {
        self.masses
    }

    pub fn body(&self, index: usize) -> Option<Body> {
        let state = self.states.get(index)?;
        Some(Body {
            pos: state.pos,
            vel: state.vel,
            acc: state.acc,
            mass: self.masses[index],
        })
    }

    pub fn bodies(&self) -> impl ExactSizeIterator<Item = Body> + 'a {
        let (states, masses) = (self.states, self.masses);
        states.iter().zip(masses).map(|(state, &mass)| Body {
            pos: state.pos,
            vel: state.vel,
            acc: state.acc,
            mass,
        })
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies().map(|body| body.kinetic_energy()).sum()
    }

    /// Pairwise Newtonian potential energy for the gravitational constant `k`.
    /// Coincident pairs give an infinite result.
    pub fn potential_energy(&self, k: f64) -> f64 {
        let mut energy = 0.0;
        for i in 0..self.states.len() {
            for j in (i + 1)..self.states.len() {
                let r = (self.states[j].pos - self.states[i].pos).mag();
                energy -= k * self.masses[i] * self.masses[j] / r;
            }
        }
        energy
    }

    pub fn momentum(&self) -> DVec3 {
        self.bodies()
            .fold(DVec3::zero(), |total, body| total + body.momentum())
    }

    /// Mass-weighted mean position. `None` for an empty snapshot.
    pub fn center_of_mass(&self) -> Option<DVec3> {
        if self.states.is_empty() {
            return None;
        }
        let total: f64 = self.masses.iter().sum();
        let weighted = self
            .bodies()
            .fold(DVec3::zero(), |acc, body| acc + body.pos * body.mass);
        Some(weighted / total)
    }
}

pub(crate) struct Triple(pub DVec3);

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (j, body) in self.bodies().enumerate() {
            writeln!(
                f,
                "Step {}: Body {} mass={}, position={}, velocity={}, acceleration={}",
                self.index,
                j,
                body.mass,
                Triple(body.pos),
                Triple(body.vel),
                Triple(body.acc),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair() -> Vec<Body> {
        vec![
            Body::new(1.0, DVec3::new(-1.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0)).unwrap(),
            Body::new(3.0, DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, -1.0, 0.0)).unwrap(),
        ]
    }

    #[test]
    fn new_history_holds_initial_snapshot() {
        let history = History::new(&pair(), 0.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.body_count(), 2);

        let first = history.first().unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(first.body(1).unwrap(), pair()[1]);
        assert!(history.get(1).is_none());
    }

    #[test]
    fn captured_snapshot_is_isolated_from_later_changes() {
        let mut bodies = pair();
        let mut history = History::new(&bodies, 0.0);

        bodies[0].pos = DVec3::new(5.0, 5.0, 5.0);
        history.capture(&bodies, 1.0);

        assert_eq!(history.get(0).unwrap().body(0).unwrap().position(), DVec3::new(-1.0, 0.0, 0.0));
        assert_eq!(history.last().unwrap().body(0).unwrap().position(), DVec3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(history.last().unwrap().time(), 1.0);
    }

    #[test]
    fn trajectory_follows_one_body() {
        let mut bodies = pair();
        let mut history = History::new(&bodies, 0.0);
        bodies[1].pos.x = 2.0;
        history.capture(&bodies, 1.0);

        let xs: Vec<f64> = history.trajectory(1).unwrap().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert!(history.trajectory(2).is_none());
    }

    #[test]
    fn diagnostics() {
        let history = History::new(&pair(), 0.0);
        let snapshot = history.first().unwrap();

        assert_relative_eq!(snapshot.kinetic_energy(), 2.0);
        assert_relative_eq!(snapshot.momentum().y, -2.0);
        assert_relative_eq!(snapshot.potential_energy(1.0), -1.5);
        assert_relative_eq!(snapshot.center_of_mass().unwrap().x, 0.5);
    }

    #[test]
    fn display_lists_every_body() {
        let history = History::new(&pair(), 0.0);
        let text = history.first().unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Step 0: Body 0 mass=1, position=[-1, 0, 0], velocity=[0, 1, 0], acceleration=[0, 0, 0]"
        );
    }
}
