use crate::graph::{Body, LinkRef};
use crate::rng::XorShift64Star;

#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Rest length of every link.
    pub distance: f64,
    /// Fixed spring strength. `None` uses `1 / min(degree(source), degree(target))`, which
    /// keeps hubs from being yanked around by their many neighbors.
    pub strength: Option<f64>,
    /// Number of relaxation passes per tick.
    pub iterations: usize,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            distance: 30.0,
            strength: None,
            iterations: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LinkForce {
    links: Vec<LinkRef>,
    strengths: Vec<f64>,
    // Share of the correction applied to the target (the rest goes to the source).
    bias: Vec<f64>,
    distance: f64,
    iterations: usize,
}

impl LinkForce {
    pub(crate) fn new(links: &[LinkRef], node_count: usize, opts: &LinkOptions) -> Self {
        let links: Vec<LinkRef> = links
            .iter()
            .copied()
            .filter(|l| l.source != l.target)
            .collect();

        let mut degree = vec![0usize; node_count];
        for l in &links {
            degree[l.source] += 1;
            degree[l.target] += 1;
        }

        let strengths = links
            .iter()
            .map(|l| match opts.strength {
                Some(s) => s,
                None => 1.0 / degree[l.source].min(degree[l.target]).max(1) as f64,
            })
            .collect();
        let bias = links
            .iter()
            .map(|l| {
                let (s, t) = (degree[l.source] as f64, degree[l.target] as f64);
                s / (s + t)
            })
            .collect();

        Self {
            links,
            strengths,
            bias,
            distance: opts.distance.max(0.0),
            iterations: opts.iterations.max(1),
        }
    }

    pub(crate) fn apply(&self, bodies: &mut [Body], alpha: f64, rng: &mut XorShift64Star) {
        for _ in 0..self.iterations {
            for (i, l) in self.links.iter().enumerate() {
                let (s, t) = (&bodies[l.source], &bodies[l.target]);
                let mut x = t.x + t.vx - s.x - s.vx;
                let mut y = t.y + t.vy - s.y - s.vy;
                if x == 0.0 {
                    x = rng.jiggle();
                }
                if y == 0.0 {
                    y = rng.jiggle();
                }
                let len = (x * x + y * y).sqrt();
                let k = (len - self.distance) / len * alpha * self.strengths[i];
                x *= k;
                y *= k;

                let b = self.bias[i];
                let t = &mut bodies[l.target];
                t.vx -= x * b;
                t.vy -= y * b;
                let s = &mut bodies[l.source];
                s.vx += x * (1.0 - b);
                s.vy += y * (1.0 - b);
            }
        }
    }
}
