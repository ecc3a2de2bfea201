//! Seeded 2D simplex noise and a stateless per-column hash.

/// 2D simplex noise field. Two fields built from different seeds are
/// independent.
#[derive(Debug, Clone)]
pub struct NoiseField {
    /// Permutation table, doubled for wrapping.
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self {
            perm: build_permutation(seed),
        }
    }

    /// Sample at `(x, z)`. Returns a value in [-1, 1].
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        const F2: f64 = 0.5 * (1.7320508075688772 - 1.0);
        const G2: f64 = (3.0 - 1.7320508075688772) / 6.0;

        let s = (x + z) * F2;
        let i = (x + s).floor();
        let j = (z + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = z - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let p = &self.perm;

        let g0 = p[ii + p[jj] as usize] as usize;
        let g1 = p[ii + i1 + p[jj + j1] as usize] as usize;
        let g2 = p[ii + 1 + p[jj + 1] as usize] as usize;

        let n = 70.0 * (corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2, x2, y2));
        n.clamp(-1.0, 1.0)
    }
}

fn corner(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let t = t * t;
    t * t * grad(gi, x, y)
}

fn grad(hash: usize, x: f64, y: f64) -> f64 {
    const GRAD: [[f64; 2]; 8] = [
        [1.0, 1.0],
        [-1.0, 1.0],
        [1.0, -1.0],
        [-1.0, -1.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
    ];
    let g = &GRAD[hash % GRAD.len()];
    g[0] * x + g[1] * y
}

/// Seeded Fisher-Yates shuffle of 0..=255 driven by an LCG.
fn build_permutation(seed: u64) -> [u8; 512] {
    let mut p = [0u8; 256];
    for (i, val) in p.iter_mut().enumerate() {
        *val = i as u8;
    }

    let mut rng = seed;
    for i in (1..256).rev() {
        rng = rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (rng >> 33) as usize % (i + 1);
        p.swap(i, j);
    }

    let mut perm = [0u8; 512];
    for (i, val) in perm.iter_mut().enumerate() {
        *val = p[i & 255];
    }
    perm
}

/// Hash a column and seed into a well-mixed u32.
pub fn column_hash(x: i32, z: i32, seed: u64) -> u32 {
    let mut state = (x as u32)
        .wrapping_mul(0x9E3779B9)
        .wrapping_add((z as u32).wrapping_mul(0x6C62272E))
        .wrapping_add((seed as u32).wrapping_mul(0x2545F491))
        .wrapping_add(((seed >> 32) as u32).wrapping_mul(0x517CC1B7));

    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;
    state
}

/// Map a hash to [0, 1).
pub fn hash_to_unit(hash: u32) -> f64 {
    (hash >> 8) as f64 / 16_777_216.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_deterministic() {
        let a = NoiseField::new(7);
        let b = NoiseField::new(7);
        for i in 0..50 {
            let (x, z) = (i as f64 * 0.37, i as f64 * -0.81);
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn test_noise_in_range() {
        let field = NoiseField::new(42);
        for x in -40..40 {
            for z in -40..40 {
                let v = field.sample(x as f64 / 7.3, z as f64 / 7.3);
                assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..20).any(|i| {
            let x = i as f64 * 0.53 + 0.1;
            a.sample(x, 0.3) != b.sample(x, 0.3)
        });
        assert!(differs);
    }

    #[test]
    fn test_column_hash_spread() {
        let a = column_hash(0, 0, 42);
        assert_eq!(a, column_hash(0, 0, 42));
        assert_ne!(a, column_hash(1, 0, 42));
        assert_ne!(a, column_hash(0, 1, 42));
        assert_ne!(a, column_hash(0, 0, 43));
    }

    #[test]
    fn test_hash_to_unit_range() {
        assert_eq!(hash_to_unit(0), 0.0);
        assert!(hash_to_unit(u32::MAX) < 1.0);
    }
}
