use crate::graph::Body;
use crate::quadtree::{Accumulate, QuadTree};
use crate::rng::XorShift64Star;

#[derive(Debug, Clone)]
pub struct ManyBodyOptions {
    /// Charge per body. Negative values repel.
    pub strength: f64,
    /// Barnes–Hut accuracy: cells whose width/distance ratio is below `theta` are aggregated.
    pub theta: f64,
    /// Distances below this are clamped to avoid exploding impulses between close bodies.
    pub distance_min: f64,
    /// Bodies farther apart than this do not interact.
    pub distance_max: f64,
}

impl Default for ManyBodyOptions {
    fn default() -> Self {
        Self {
            strength: -30.0,
            theta: 0.9,
            distance_min: 1.0,
            distance_max: f64::INFINITY,
        }
    }
}

pub(super) fn apply(
    bodies: &mut [Body],
    opts: &ManyBodyOptions,
    alpha: f64,
    rng: &mut XorShift64Star,
) {
    if bodies.len() < 2 || opts.strength == 0.0 {
        return;
    }
    let points: Vec<(f64, f64)> = bodies.iter().map(|b| (b.x, b.y)).collect();
    let strengths = vec![opts.strength; bodies.len()];
    let Some(tree) = QuadTree::build(&points, &strengths) else {
        return;
    };

    let theta = if opts.theta.is_finite() && opts.theta > 0.0 {
        opts.theta
    } else {
        0.9
    };
    let params = Accumulate {
        alpha,
        theta2: theta * theta,
        distance_min2: opts.distance_min.max(0.0).powi(2),
        distance_max2: opts.distance_max.powi(2),
    };
    for (i, b) in bodies.iter_mut().enumerate() {
        let (dvx, dvy) = tree.accumulate(i, &points, &strengths, params, rng);
        b.vx += dvx;
        b.vy += dvy;
    }
}
