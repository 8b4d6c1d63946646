//! Forces applied on every tick, in registration order: link, many-body, center.
//!
//! Each force adds to body velocities; none of them moves a body directly. Integration is done
//! by [`crate::Simulation`].

mod center;
mod link;
mod many_body;

pub use center::CenterOptions;
pub use link::LinkOptions;
pub use many_body::ManyBodyOptions;

pub(crate) use link::LinkForce;

pub(crate) fn apply_many_body(
    bodies: &mut [crate::Body],
    opts: &ManyBodyOptions,
    alpha: f64,
    rng: &mut crate::rng::XorShift64Star,
) {
    many_body::apply(bodies, opts, alpha, rng);
}

pub(crate) fn apply_center(bodies: &mut [crate::Body], opts: &CenterOptions) {
    center::apply(bodies, opts);
}
