use crate::graph::Body;

#[derive(Debug, Clone)]
pub struct CenterOptions {
    pub x: f64,
    pub y: f64,
    /// Fraction of the centroid offset removed per tick.
    pub strength: f64,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            strength: 1.0,
        }
    }
}

/// Applies the same corrective velocity to every body, so relative spacing is untouched.
pub(super) fn apply(bodies: &mut [Body], opts: &CenterOptions) {
    if bodies.is_empty() || opts.strength == 0.0 {
        return;
    }
    let n = bodies.len() as f64;
    let (mut sx, mut sy) = (0.0, 0.0);
    for b in bodies.iter() {
        sx += b.x;
        sy += b.y;
    }
    let ox = (sx / n - opts.x) * opts.strength;
    let oy = (sy / n - opts.y) * opts.strength;
    for b in bodies.iter_mut() {
        b.vx -= ox;
        b.vy -= oy;
    }
}
