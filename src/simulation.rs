use crate::{
    body::Body,
    config::{CoincidencePolicy, SimulationConfig, TimeStepRule},
    error::{Error, Result},
    history::History,
};

use rayon::prelude::*;
use ultraviolet::DVec3;

use std::sync::atomic::{AtomicBool, Ordering};

/// Direct-summation N-body integrator with a fixed step and full trajectory history.
#[derive(Clone, Debug)]
pub struct Simulator {
    bodies: Vec<Body>,
    history: History,
    start: f64,
    end: f64,
    iterations: usize,
    /// Fixed step size, derived once at construction.
    dt: f64,
    rule: TimeStepRule,
    gravity: f64,
    coincidence: CoincidencePolicy,
    /// Whether to compute accelerations with Rayon.
    parallel: bool,
}

impl Simulator {
    /// Initializes a simulator with default settings over `[start, end]`.
    pub fn with_bodies(bodies: Vec<Body>, start: f64, end: f64, iterations: usize) -> Result<Self> {
        let config = SimulationConfig {
            start,
            end,
            iterations,
            ..SimulationConfig::default()
        };
        Self::with_config(bodies, &config)
    }

    /// Initializes a simulator from a full configuration.
    /// Captures the initial state as snapshot 0.
    pub fn with_config(mut bodies: Vec<Body>, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let dt = config.time_step();
        if !dt.is_finite() {
            return Err(Error::InvalidArgument(format!("time step must be finite, got {dt}")));
        }

        log::debug!(
            "simulator: {} bodies, dt = {dt} ({:?}), {} iterations",
            bodies.len(),
            config.time_step,
            config.iterations
        );

        // Bodies taken from another simulator still carry its accelerations.
        for body in &mut bodies {
            body.acc = DVec3::zero();
        }
        let history = History::new(&bodies, config.start);

        Ok(Self {
            bodies,
            history,
            start: config.start,
            end: config.end,
            iterations: config.iterations,
            dt,
            rule: config.time_step,
            gravity: config.gravity,
            coincidence: config.coincidence,
            parallel: config.parallel,
        })
    }

    /// Sets whether to use Rayon for the acceleration phase.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn time_step(&self) -> f64 {
        self.dt
    }

    pub fn time_step_rule(&self) -> TimeStepRule {
        self.rule
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Completed steps since construction.
    pub fn steps_taken(&self) -> usize {
        self.history.len() - 1
    }

    /// Simulated time of the latest snapshot.
    pub fn time(&self) -> f64 {
        self.start + self.steps_taken() as f64 * self.dt
    }

    /// `iterations` evenly spaced checkpoints from `start` to `end` inclusive.
    /// The step size never depends on this schedule.
    pub fn schedule(&self) -> Vec<f64> {
        if self.iterations == 1 {
            return vec![self.start];
        }
        let spacing = (self.end - self.start) / (self.iterations - 1) as f64;
        (0..self.iterations)
            .map(|i| self.start + i as f64 * spacing)
            .collect()
    }

    /// Advances the simulation by one step.
    /// Refreshes accelerations, moves every body, then records a snapshot.
    /// On error nothing is mutated.
    pub fn step(&mut self) -> Result<()> {
        self.compute_accelerations()?;
        self.iterate();

        let time = self.start + self.history.len() as f64 * self.dt;
        self.history.capture(&self.bodies, time);
        log::trace!("step {} done, t = {time}", self.steps_taken());
        Ok(())
    }

    /// Calls [`Simulator::step`] `iterations` times.
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.iterations {
            self.step()?;
        }
        log::info!("run finished after {} steps, t = {}", self.iterations, self.time());
        Ok(())
    }

    /// Like [`Simulator::run`], checking `cancel` before every step.
    /// Returns the number of steps taken.
    pub fn run_cancellable(&mut self, cancel: &AtomicBool) -> Result<usize> {
        for taken in 0..self.iterations {
            if cancel.load(Ordering::Relaxed) {
                log::info!("run cancelled after {taken} of {} steps", self.iterations);
                return Ok(taken);
            }
            self.step()?;
        }
        log::info!("run finished after {} steps, t = {}", self.iterations, self.time());
        Ok(self.iterations)
    }

    /// Recomputes every body's acceleration by direct pairwise summation.
    /// All accelerations are evaluated from the current positions before any is stored.
    pub fn compute_accelerations(&mut self) -> Result<()> {
        let step = self.history.len();
        let n = self.bodies.len();

        let accelerations: Vec<DVec3> = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|i| self.acceleration_on(i, step))
                .collect::<Result<_>>()?
        } else {
            (0..n)
                .map(|i| self.acceleration_on(i, step))
                .collect::<Result<_>>()?
        };

        for (body, acc) in self.bodies.iter_mut().zip(accelerations) {
            body.acc = acc;
        }
        Ok(())
    }

    fn acceleration_on(&self, i: usize, step: usize) -> Result<DVec3> {
        let pos = self.bodies[i].pos;
        let mut acc = DVec3::zero();

        for (j, other) in self.bodies.iter().enumerate() {
            if j == i {
                continue;
            }

            if other.pos == pos {
                match self.coincidence {
                    CoincidencePolicy::Error => {
                        return Err(Error::DegenerateConfiguration {
                            step,
                            first: i.min(j),
                            second: i.max(j),
                        });
                    }
                    CoincidencePolicy::Skip => {
                        if i < j {
                            log::warn!("step {step}: bodies {i} and {j} coincide, skipping pair");
                        }
                        continue;
                    }
                }
            }

            let d = other.pos - pos;
            let d_sq = d.mag_sq();
            acc += d * (self.gravity * other.mass / (d_sq * d_sq.sqrt()));
        }

        Ok(acc)
    }

    /// Updates the position and velocity of all bodies from their current acceleration.
    fn iterate(&mut self) {
        let dt = self.dt;
        self.bodies.iter_mut().for_each(|body| body.update(dt));
    }

    /// Text dump of every snapshot, one line per body.
    pub fn describe(&self) -> String {
        self.history.iter().map(|snapshot| snapshot.to_string()).collect()
    }
}
