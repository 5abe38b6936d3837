use crate::{
    body::Body,
    history::BodyState,
    simulation::Simulator,
};
use ultraviolet::DVec3;

pub const STATUS_OK: i32 = 0;
pub const STATUS_NULL_HANDLE: i32 = -1;
pub const STATUS_DEGENERATE: i32 = -2;
pub const STATUS_ERROR: i32 = -3;

fn status(result: crate::Result<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(crate::Error::DegenerateConfiguration { .. }) => STATUS_DEGENERATE,
        Err(_) => STATUS_ERROR,
    }
}

/// Builds a simulator from `n` bodies. `positions` and `velocities` hold `3 * n`
/// packed xyz values. Returns null on invalid input.
///
/// # Safety
/// `masses` must point to `n` values and `positions`/`velocities` to `3 * n`
/// values each, unless `n` is zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_Create(
    masses: *const f64,
    positions: *const f64,
    velocities: *const f64,
    n: usize,
    start: f64,
    end: f64,
    iterations: usize,
) -> *mut Simulator {
    if n > 0 && (masses.is_null() || positions.is_null() || velocities.is_null()) {
        return std::ptr::null_mut();
    }

    let empty: &[f64] = &[];
    let (masses, positions, velocities) = if n == 0 {
        (empty, empty, empty)
    } else {
        unsafe {
            (
                std::slice::from_raw_parts(masses, n),
                std::slice::from_raw_parts(positions, 3 * n),
                std::slice::from_raw_parts(velocities, 3 * n),
            )
        }
    };

    let bodies: crate::Result<Vec<Body>> = (0..n)
        .map(|i| {
            let p = &positions[3 * i..3 * i + 3];
            let v = &velocities[3 * i..3 * i + 3];
            Body::new(
                masses[i],
                DVec3::new(p[0], p[1], p[2]),
                DVec3::new(v[0], v[1], v[2]),
            )
        })
        .collect();

    match bodies.and_then(|bodies| Simulator::with_bodies(bodies, start, end, iterations)) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::warn!("Simulator_Create failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must come from [`Simulator_Create`] and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_Destroy(handle: *mut Simulator) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_Step(handle: *mut Simulator) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => status(sim.step()),
        None => STATUS_NULL_HANDLE,
    }
}

/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_Run(handle: *mut Simulator) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => status(sim.run()),
        None => STATUS_NULL_HANDLE,
    }
}

/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_GetBodyCount(handle: *const Simulator) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Live bodies, valid until the next step or destroy.
///
/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_GetBodies(handle: *const Simulator) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.bodies().as_ptr())
}

/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_GetSnapshotCount(handle: *const Simulator) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.history().len())
}

/// Body states of snapshot `index`, `Simulator_GetBodyCount` entries long.
/// Null if out of range. Valid until the next step or destroy.
///
/// # Safety
/// `handle` must be null or a live pointer from [`Simulator_Create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulator_GetSnapshot(
    handle: *const Simulator,
    index: usize,
) -> *const BodyState {
    unsafe { handle.as_ref() }
        .and_then(|sim| sim.history().get(index))
        .map_or(std::ptr::null(), |snapshot| snapshot.states().as_ptr())
}
