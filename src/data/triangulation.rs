use std::cmp::Ordering;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Delaunay triangulation of scattered (x, y) points
//
// Points are inserted in lexicographic order, so every new point lies
// outside the current hull and is joined to the hull edges it can see.
// Lawson edge flips then restore the empty-circumcircle property. The mesh
// always covers the whole convex hull.
// ---------------------------------------------------------------------------

/// Collinearity tolerance on the normalised cross product.
const COLLINEAR_EPS: f64 = 1e-12;

/// An edge is flipped only when the opposite vertex is clearly inside the
/// circumcircle; co-circular quads keep whichever diagonal they have.
const FLIP_EPS: f64 = 1e-12;

/// Triangulate `points` and return triangles as indices into `points`,
/// wound counter-clockwise.
///
/// Points are never reordered. Exact duplicates and non-finite points are
/// left out of the mesh (the first copy of a duplicate is used). Fewer
/// than three distinct points, or a collinear set, yields no triangles.
pub fn triangulate(points: &[[f64; 2]]) -> Vec<[usize; 3]> {
    let distinct = distinct_indices(points);
    if distinct.len() < 3 {
        return Vec::new();
    }

    let Some(pts) = normalise(points, &distinct) else {
        return Vec::new();
    };
    if is_collinear(&pts) {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..pts.len()).collect();
    order.sort_by(|&a, &b| cmp_point(pts[a], pts[b]));

    let Some((mut mesh, next)) = Mesh::seed(&pts, &order) else {
        return Vec::new();
    };
    for &p in &order[next..] {
        if !mesh.insert_outside(p) {
            log::debug!("point {} sees no hull edge; left out of the mesh", distinct[p]);
        }
    }

    // Final sweep over every edge guarantees the Delaunay property.
    let all_edges: Vec<(usize, usize)> = mesh.edges.keys().copied().collect();
    mesh.legalize(all_edges);

    mesh.triangles
        .into_iter()
        .map(|t| t.map(|v| distinct[v]))
        .collect()
}

// ---------------------------------------------------------------------------
// Mesh under construction
// ---------------------------------------------------------------------------

struct Mesh<'a> {
    pts: &'a [[f64; 2]],
    /// Counter-clockwise triangles.
    triangles: Vec<[usize; 3]>,
    /// Directed edge → triangle that holds it in counter-clockwise order.
    edges: HashMap<(usize, usize), usize>,
    /// Convex hull, counter-clockwise. May contain collinear vertices.
    hull: Vec<usize>,
}

impl<'a> Mesh<'a> {
    /// Fan the leading collinear run of `order` to the first point off its
    /// line. Returns the mesh and the position in `order` to continue from.
    fn seed(pts: &'a [[f64; 2]], order: &[usize]) -> Option<(Self, usize)> {
        let (c0, c1) = (order[0], order[1]);
        let k = (2..order.len())
            .find(|&j| cross(pts[c0], pts[c1], pts[order[j]]).abs() > COLLINEAR_EPS)?;
        let apex = order[k];
        let chain = &order[..k];
        let left = cross(pts[c0], pts[c1], pts[apex]) > 0.0;

        let mut mesh = Mesh {
            pts,
            triangles: Vec::new(),
            edges: HashMap::new(),
            hull: Vec::with_capacity(k + 1),
        };
        let mut pending = Vec::new();
        for w in chain.windows(2) {
            let t = if left {
                [w[0], w[1], apex]
            } else {
                [w[1], w[0], apex]
            };
            mesh.add_triangle(t);
            pending.extend([(w[0], apex), (w[1], apex)]);
        }

        if left {
            mesh.hull.extend_from_slice(chain);
            mesh.hull.push(apex);
        } else {
            mesh.hull.push(chain[0]);
            mesh.hull.push(apex);
            mesh.hull.extend(chain[1..].iter().rev());
        }

        mesh.legalize(pending);
        Some((mesh, k + 1))
    }

    fn add_triangle(&mut self, t: [usize; 3]) {
        let id = self.triangles.len();
        self.triangles.push(t);
        for e in directed_edges(t) {
            self.edges.insert(e, id);
        }
    }

    /// Join `p`, which lies outside the hull, to every hull edge it sees.
    fn insert_outside(&mut self, p: usize) -> bool {
        let h = self.hull.len();
        let sees = |threshold: f64| -> Vec<bool> {
            (0..h)
                .map(|i| {
                    let a = self.pts[self.hull[i]];
                    let b = self.pts[self.hull[(i + 1) % h]];
                    cross(a, b, self.pts[p]) < -threshold
                })
                .collect()
        };
        let mut visible = sees(COLLINEAR_EPS);
        if !visible.contains(&true) {
            visible = sees(0.0);
        }

        // Visible edges form one run; rotate the hull so it starts at 0.
        let Some(start) = (0..h).find(|&i| visible[i] && !visible[(i + h - 1) % h]) else {
            return false;
        };
        self.hull.rotate_left(start);
        visible.rotate_left(start);
        let run = visible.iter().take_while(|v| **v).count().min(h - 1);

        let mut pending = Vec::with_capacity(3 * run);
        for i in 0..run {
            let (u, v) = (self.hull[i], self.hull[i + 1]);
            self.add_triangle([v, u, p]);
            pending.extend([(u, v), (u, p), (v, p)]);
        }

        let mut hull = Vec::with_capacity(h - run + 2);
        hull.push(self.hull[0]);
        hull.push(p);
        hull.extend_from_slice(&self.hull[run..]);
        self.hull = hull;

        self.legalize(pending);
        true
    }

    /// Lawson flips until no edge in the work list is illegal.
    fn legalize(&mut self, mut stack: Vec<(usize, usize)>) {
        while let Some((a, b)) = stack.pop() {
            let (Some(&t1), Some(&t2)) = (self.edges.get(&(a, b)), self.edges.get(&(b, a))) else {
                continue;
            };
            let c = opposite(self.triangles[t1], a, b);
            let d = opposite(self.triangles[t2], b, a);
            let pts = self.pts;
            if in_circle(pts[a], pts[b], pts[c], pts[d]) <= FLIP_EPS {
                continue;
            }

            // Quad a, d, b, c is convex; swap diagonal ab for cd.
            let old = [self.triangles[t1], self.triangles[t2]];
            for e in old.into_iter().flat_map(directed_edges) {
                self.edges.remove(&e);
            }
            self.triangles[t1] = [a, d, c];
            self.triangles[t2] = [d, b, c];
            for (id, t) in [(t1, [a, d, c]), (t2, [d, b, c])] {
                for e in directed_edges(t) {
                    self.edges.insert(e, id);
                }
            }
            stack.extend([(a, d), (d, b), (b, c), (c, a)]);
        }
    }
}

fn directed_edges(t: [usize; 3]) -> [(usize, usize); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

/// Vertex of `t` that is neither `a` nor `b`.
fn opposite(t: [usize; 3], a: usize, b: usize) -> usize {
    t.into_iter().find(|&v| v != a && v != b).unwrap_or(t[0])
}

/// Indices of the first occurrence of every finite, distinct point.
fn distinct_indices(points: &[[f64; 2]]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len())
        .filter(|&i| points[i].iter().all(|v| v.is_finite()))
        .collect();
    order.sort_by(|&a, &b| cmp_point(points[a], points[b]).then(a.cmp(&b)));
    order.dedup_by(|later, first| points[*later] == points[*first]);
    order.sort_unstable();
    order
}

fn cmp_point(a: [f64; 2], b: [f64; 2]) -> Ordering {
    a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1]))
}

/// Map the selected points into the unit box, axis by axis.
fn normalise(points: &[[f64; 2]], indices: &[usize]) -> Option<Vec<[f64; 2]>> {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for &i in indices {
        for axis in 0..2 {
            min[axis] = min[axis].min(points[i][axis]);
            max[axis] = max[axis].max(points[i][axis]);
        }
    }
    let span = [max[0] - min[0], max[1] - min[1]];
    if span.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
        return None;
    }
    Some(
        indices
            .iter()
            .map(|&i| {
                [
                    (points[i][0] - min[0]) / span[0],
                    (points[i][1] - min[1]) / span[1],
                ]
            })
            .collect(),
    )
}

fn is_collinear(pts: &[[f64; 2]]) -> bool {
    let a = pts[0];
    // Farthest point from `a` gives the most stable reference direction.
    let b = pts
        .iter()
        .copied()
        .max_by(|p, q| dist_sq(a, *p).total_cmp(&dist_sq(a, *q)))
        .unwrap_or(a);
    pts.iter().all(|&c| cross(a, b, c).abs() <= COLLINEAR_EPS)
}

fn dist_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Positive when `d` lies inside the circumcircle of counter-clockwise `abc`.
fn in_circle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> f64 {
    let (adx, ady) = (a[0] - d[0], a[1] - d[1]);
    let (bdx, bdy) = (b[0] - d[0], b[1] - d[1]);
    let (cdx, cdy) = (c[0] - d[0], c[1] - d[1]);
    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Deterministic scattered points in `[0, scale)²` (64-bit LCG).
    fn scattered(n: usize, seed: u64, scale: f64) -> Vec<[f64; 2]> {
        let mut s = seed;
        let mut next = || {
            s = s
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (s >> 11) as f64 / (1u64 << 53) as f64 * scale
        };
        (0..n).map(|_| [next(), next()]).collect()
    }

    fn covered(tris: &[[usize; 3]]) -> BTreeSet<usize> {
        tris.iter().flat_map(|t| t.iter().copied()).collect()
    }

    fn mesh_area(pts: &[[f64; 2]], tris: &[[usize; 3]]) -> f64 {
        tris.iter()
            .map(|t| cross(pts[t[0]], pts[t[1]], pts[t[2]]) / 2.0)
            .sum()
    }

    /// Strict convex hull (monotone chain), counter-clockwise.
    fn convex_hull(pts: &[[f64; 2]]) -> Vec<[f64; 2]> {
        let mut sorted = pts.to_vec();
        sorted.sort_by(|a, b| cmp_point(*a, *b));
        let mut hull: Vec<[f64; 2]> = Vec::new();
        for pass in 0..2 {
            let start = hull.len();
            for &p in &sorted {
                while hull.len() >= start + 2
                    && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
                {
                    hull.pop();
                }
                hull.push(p);
            }
            hull.pop();
            if pass == 0 {
                sorted.reverse();
            }
        }
        hull
    }

    fn polygon_area(poly: &[[f64; 2]]) -> f64 {
        (0..poly.len())
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % poly.len()]);
                a[0] * b[1] - b[0] * a[1]
            })
            .sum::<f64>()
            / 2.0
    }

    #[test]
    fn test_square_with_centre_point() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, 0.4]];
        let tris = triangulate(&pts);
        // 2n - 2 - h triangles for n points with h on the hull.
        assert_eq!(tris.len(), 4);
        assert_eq!(covered(&tris), (0..5).collect());
    }

    #[test]
    fn test_flat_boundary_triangle_is_kept() {
        let pts = [[0.0, 0.0], [0.5, 0.001], [1.0, 0.0], [0.5, 1.0]];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 3);
        assert!((mesh_area(&pts, &tris) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mesh_fills_convex_hull() {
        let pts = scattered(1000, 2137, std::f64::consts::PI);
        let tris = triangulate(&pts);
        let hull = convex_hull(&pts);
        assert_eq!(tris.len(), 2 * pts.len() - 2 - hull.len());
        let (mesh, expected) = (mesh_area(&pts, &tris), polygon_area(&hull));
        assert!((mesh - expected).abs() < 1e-9 * expected, "{mesh} vs {expected}");
        assert_eq!(covered(&tris), (0..pts.len()).collect());
    }

    #[test]
    fn test_empty_circumcircle_property() {
        // Corners pin the data box to [0, 1]², so normalising is the identity.
        let mut pts = scattered(120, 7, 1.0);
        pts.extend([[0.0, 0.0], [1.0, 1.0]]);
        let tris = triangulate(&pts);
        for t in &tris {
            for (i, p) in pts.iter().enumerate() {
                if t.contains(&i) {
                    continue;
                }
                assert!(
                    in_circle(pts[t[0]], pts[t[1]], pts[t[2]], *p) <= 1e-9,
                    "point {i} lies inside circumcircle of {t:?}"
                );
            }
        }
    }

    #[test]
    fn test_triangles_are_counter_clockwise() {
        let pts = scattered(50, 42, 1.0);
        for t in triangulate(&pts) {
            assert!(cross(pts[t[0]], pts[t[1]], pts[t[2]]) > 0.0);
        }
    }

    #[test]
    fn test_regular_grid_is_fully_meshed() {
        let pts: Vec<[f64; 2]> = (0..6)
            .flat_map(|i| (0..6).map(move |j| [i as f64, j as f64 * 100.0]))
            .collect();
        let tris = triangulate(&pts);
        assert_eq!(covered(&tris), (0..pts.len()).collect());
        // 36 points, 20 of them on the boundary (collinear ones included).
        assert_eq!(tris.len(), 2 * 36 - 2 - 20);
        assert!((mesh_area(&pts, &tris) - 2500.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_leading_run_is_fanned() {
        // First four points in sweep order share a line.
        let pts = [
            [0.0, 0.0],
            [0.0, 1.0],
            [0.0, 2.0],
            [0.0, 3.0],
            [2.0, 1.5],
            [1.0, -1.0],
        ];
        let tris = triangulate(&pts);
        assert_eq!(covered(&tris), (0..pts.len()).collect());
        let hull = convex_hull(&pts);
        assert!((mesh_area(&pts, &tris) - polygon_area(&hull)).abs() < 1e-9);
    }

    #[test]
    fn test_duplicates_use_first_occurrence() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
        let tris = triangulate(&pts);
        assert_eq!(tris.len(), 1);
        assert_eq!(covered(&tris), [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn test_degenerate_inputs_give_no_triangles() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[[0.0, 0.0], [1.0, 1.0]]).is_empty());
        assert!(triangulate(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).is_empty());
        assert!(triangulate(&[[1.0, 0.0], [1.0, 1.0], [1.0, 5.0]]).is_empty());
        assert!(triangulate(&[[0.0, 0.0], [f64::NAN, 1.0], [1.0, 1.0]]).is_empty());
    }
}
