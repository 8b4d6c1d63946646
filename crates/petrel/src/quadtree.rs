//! Barnes–Hut quadtree used by the many-body force.
//!
//! Cells are stored in a flat arena. Every cell carries the summed charge of the bodies below
//! it and their charge-weighted centroid, so distant cells can be treated as a single body.

use crate::rng::XorShift64Star;

const MAX_DEPTH: usize = 48;

#[derive(Debug, Clone)]
struct Cell {
    // Square extent: [x0, x0 + size) x [y0, y0 + size).
    size: f64,
    cx: f64,
    cy: f64,
    charge: f64,
    kind: CellKind,
}

#[derive(Debug, Clone)]
enum CellKind {
    Leaf(Vec<usize>),
    Branch([Option<u32>; 4]),
}

/// Parameters for one accumulation pass (all squared distances precomputed).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Accumulate {
    pub(crate) alpha: f64,
    pub(crate) theta2: f64,
    pub(crate) distance_min2: f64,
    pub(crate) distance_max2: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct QuadTree {
    cells: Vec<Cell>,
}

impl QuadTree {
    pub(crate) fn build(points: &[(f64, f64)], strengths: &[f64]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }
        let mut size = (max_x - min_x).max(max_y - min_y);
        if !(size.is_finite() && size > 0.0) {
            size = 1.0;
        }

        let mut tree = Self {
            cells: Vec::with_capacity(points.len() * 2),
        };
        let items: Vec<usize> = (0..points.len()).collect();
        tree.build_cell(min_x, min_y, size, items, points, strengths, 0);
        Some(tree)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_cell(
        &mut self,
        x0: f64,
        y0: f64,
        size: f64,
        items: Vec<usize>,
        points: &[(f64, f64)],
        strengths: &[f64],
        depth: usize,
    ) -> u32 {
        let idx = self.cells.len();
        self.cells.push(Cell {
            size,
            cx: 0.0,
            cy: 0.0,
            charge: 0.0,
            kind: CellKind::Leaf(Vec::new()),
        });

        let coincident = items
            .first()
            .map(|&first| items.iter().all(|&i| points[i] == points[first]))
            .unwrap_or(true);

        if items.len() <= 1 || coincident || depth >= MAX_DEPTH {
            let (cx, cy, charge) = centroid(items.iter().map(|&i| (points[i], strengths[i])));
            let cell = &mut self.cells[idx];
            cell.cx = cx;
            cell.cy = cy;
            cell.charge = charge;
            cell.kind = CellKind::Leaf(items);
            return idx as u32;
        }

        let half = size / 2.0;
        let (mx, my) = (x0 + half, y0 + half);
        let mut buckets: [Vec<usize>; 4] = Default::default();
        for i in items {
            let (x, y) = points[i];
            let q = usize::from(x >= mx) | (usize::from(y >= my) << 1);
            buckets[q].push(i);
        }

        let mut children: [Option<u32>; 4] = [None; 4];
        for (q, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let cx0 = if q & 1 == 1 { mx } else { x0 };
            let cy0 = if q & 2 == 2 { my } else { y0 };
            let child = self.build_cell(cx0, cy0, half, bucket, points, strengths, depth + 1);
            children[q] = Some(child);
        }

        let (cx, cy, charge) = centroid(children.iter().flatten().map(|&c| {
            let c = &self.cells[c as usize];
            ((c.cx, c.cy), c.charge)
        }));
        let cell = &mut self.cells[idx];
        cell.cx = cx;
        cell.cy = cy;
        cell.charge = charge;
        cell.kind = CellKind::Branch(children);
        idx as u32
    }

    /// Returns the velocity impulse exerted on body `i` by every other body.
    pub(crate) fn accumulate(
        &self,
        i: usize,
        points: &[(f64, f64)],
        strengths: &[f64],
        params: Accumulate,
        rng: &mut XorShift64Star,
    ) -> (f64, f64) {
        let mut out = (0.0, 0.0);
        if !self.cells.is_empty() {
            self.visit(0, i, points, strengths, params, rng, &mut out);
        }
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn visit(
        &self,
        cell: usize,
        i: usize,
        points: &[(f64, f64)],
        strengths: &[f64],
        params: Accumulate,
        rng: &mut XorShift64Star,
        out: &mut (f64, f64),
    ) {
        let c = &self.cells[cell];
        if c.charge == 0.0 {
            return;
        }
        let (xi, yi) = points[i];
        let mut dx = c.cx - xi;
        let mut dy = c.cy - yi;
        let mut l = dx * dx + dy * dy;

        // Far enough away: treat the whole cell as one body.
        if c.size * c.size / params.theta2 < l {
            if l < params.distance_max2 {
                if dx == 0.0 {
                    dx = rng.jiggle();
                    l += dx * dx;
                }
                if dy == 0.0 {
                    dy = rng.jiggle();
                    l += dy * dy;
                }
                if l < params.distance_min2 {
                    l = (params.distance_min2 * l).sqrt();
                }
                out.0 += dx * c.charge * params.alpha / l;
                out.1 += dy * c.charge * params.alpha / l;
            }
            return;
        }

        match &c.kind {
            CellKind::Branch(children) => {
                for child in children.iter().flatten() {
                    self.visit(*child as usize, i, points, strengths, params, rng, out);
                }
            }
            CellKind::Leaf(items) => {
                if l >= params.distance_max2 {
                    return;
                }
                for &j in items {
                    if j == i {
                        continue;
                    }
                    let (xj, yj) = points[j];
                    let mut dx = xj - xi;
                    let mut dy = yj - yi;
                    let mut l = dx * dx + dy * dy;
                    if dx == 0.0 {
                        dx = rng.jiggle();
                        l += dx * dx;
                    }
                    if dy == 0.0 {
                        dy = rng.jiggle();
                        l += dy * dy;
                    }
                    if l < params.distance_min2 {
                        l = (params.distance_min2 * l).sqrt();
                    }
                    let w = strengths[j] * params.alpha / l;
                    out.0 += dx * w;
                    out.1 += dy * w;
                }
            }
        }
    }
}

/// Charge-weighted centroid; falls back to the plain mean when all charges are zero.
fn centroid(items: impl Iterator<Item = ((f64, f64), f64)>) -> (f64, f64, f64) {
    let mut charge = 0.0;
    let mut weight = 0.0;
    let (mut wx, mut wy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);
    let mut n = 0usize;
    for ((x, y), q) in items {
        let w = q.abs();
        charge += q;
        weight += w;
        wx += w * x;
        wy += w * y;
        sx += x;
        sy += y;
        n += 1;
    }
    if weight > 0.0 {
        (wx / weight, wy / weight, charge)
    } else if n > 0 {
        (sx / n as f64, sy / n as f64, charge)
    } else {
        (0.0, 0.0, 0.0)
    }
}
