//! Clustering of overlapping window hits into final detections.
use super::types::BoundingBox;

/// Union-find over hit indices with path compression and union by rank.
#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

fn similar(a: &BoundingBox, b: &BoundingBox, eps: f32) -> bool {
    let delta = eps * (a.width.min(b.width) + a.height.min(b.height)) as f32 * 0.5;
    let close = |p: u32, q: u32| (p as f32 - q as f32).abs() <= delta;
    close(a.x, b.x) && close(a.y, b.y) && close(a.right(), b.right()) && close(a.bottom(), b.bottom())
}

/// Merge hits whose edges all lie within `eps` of the smaller box size.
///
/// Each cluster is replaced by its mean rectangle and kept only when it holds
/// more than `min_neighbors` hits. Clusters lying inside a stronger cluster
/// are dropped. With `min_neighbors == 0` the hits are returned as they are.
pub fn group_rectangles(hits: &[BoundingBox], min_neighbors: usize, eps: f32) -> Vec<BoundingBox> {
    if min_neighbors == 0 || hits.is_empty() {
        return hits.to_vec();
    }

    let mut sets = DisjointSet::new(hits.len());
    for i in 0..hits.len() {
        for j in i + 1..hits.len() {
            if similar(&hits[i], &hits[j], eps) {
                sets.union(i, j);
            }
        }
    }

    // Accumulate per root in first-seen order.
    let mut cluster_of_root = vec![usize::MAX; hits.len()];
    let mut sums: Vec<[u64; 4]> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for (i, hit) in hits.iter().enumerate() {
        let root = sets.find(i);
        if cluster_of_root[root] == usize::MAX {
            cluster_of_root[root] = sums.len();
            sums.push([0; 4]);
            counts.push(0);
        }
        let c = cluster_of_root[root];
        sums[c][0] += hit.x as u64;
        sums[c][1] += hit.y as u64;
        sums[c][2] += hit.width as u64;
        sums[c][3] += hit.height as u64;
        counts[c] += 1;
    }

    let averaged: Vec<BoundingBox> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &n)| {
            let mean = |v: u64| (v as f64 / n as f64).round() as u32;
            BoundingBox::new(mean(s[0]), mean(s[1]), mean(s[2]), mean(s[3]))
        })
        .collect();

    let mut out = Vec::new();
    for (i, r1) in averaged.iter().enumerate() {
        let n1 = counts[i];
        if n1 <= min_neighbors {
            continue;
        }
        let swallowed = averaged.iter().enumerate().any(|(j, r2)| {
            let n2 = counts[j];
            if j == i || n2 <= min_neighbors {
                return false;
            }
            let dx = (r2.width as f32 * eps).round() as i64;
            let dy = (r2.height as f32 * eps).round() as i64;
            let inside = r1.x as i64 >= r2.x as i64 - dx
                && r1.y as i64 >= r2.y as i64 - dy
                && r1.right() as i64 <= r2.right() as i64 + dx
                && r1.bottom() as i64 <= r2.bottom() as i64 + dy;
            inside && (n2 > n1.max(3) || n1 < 3)
        });
        if !swallowed {
            out.push(*r1);
        }
    }
    out
}
