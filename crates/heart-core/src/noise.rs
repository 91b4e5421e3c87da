//! 4D simplex gradient noise.
//!
//! The permutation table is shuffled from a seeded `StdRng`, so two fields
//! built with the same seed return identical values everywhere.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A smooth scalar field over four coordinates with values in [-1, 1].
pub trait NoiseField {
    fn sample(&self, x: f32, y: f32, z: f32, w: f32) -> f32;

    #[inline]
    fn sample_vec(&self, p: Vec3, w: f32) -> f32 {
        self.sample(p.x, p.y, p.z, w)
    }
}

/// Returns the same value everywhere. Handy for pinning the per-frame math in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantNoise(pub f32);

impl NoiseField for ConstantNoise {
    #[inline]
    fn sample(&self, _x: f32, _y: f32, _z: f32, _w: f32) -> f32 {
        self.0
    }
}

// Skewing factors for 4D: (sqrt(5) - 1) / 4 and (5 - sqrt(5)) / 20
const F4: f32 = 0.309_016_98;
const G4: f32 = 0.138_196_6;

const GRAD4: [[f32; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, -1.0],
    [0.0, 1.0, -1.0, 1.0],
    [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0],
    [0.0, -1.0, 1.0, -1.0],
    [0.0, -1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, -1.0, 1.0],
    [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0, 1.0],
    [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, -1.0],
    [1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 0.0],
    [1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0, 0.0],
];

#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table: Vec<u8> = (0..=255u8).collect();
        table.shuffle(&mut rng);
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    #[inline]
    fn corner(&self, gi: usize, x: f32, y: f32, z: f32, w: f32) -> f32 {
        let t = 0.6 - x * x - y * y - z * z - w * w;
        if t < 0.0 {
            return 0.0;
        }
        let g = &GRAD4[gi % 32];
        let t2 = t * t;
        t2 * t2 * (g[0] * x + g[1] * y + g[2] * z + g[3] * w)
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise").finish_non_exhaustive()
    }
}

impl NoiseField for SimplexNoise {
    fn sample(&self, x: f32, y: f32, z: f32, w: f32) -> f32 {
        // Skew into the simplex grid and find the containing cell
        let s = (x + y + z + w) * F4;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let l = (w + s).floor();
        let t = (i + j + k + l) * G4;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);
        let w0 = w - (l - t);

        // Rank the offsets to pick the traversal order through the simplex
        let (mut rx, mut ry, mut rz, mut rw) = (0u8, 0u8, 0u8, 0u8);
        if x0 > y0 { rx += 1 } else { ry += 1 }
        if x0 > z0 { rx += 1 } else { rz += 1 }
        if x0 > w0 { rx += 1 } else { rw += 1 }
        if y0 > z0 { ry += 1 } else { rz += 1 }
        if y0 > w0 { ry += 1 } else { rw += 1 }
        if z0 > w0 { rz += 1 } else { rw += 1 }

        let step = |rank: u8, threshold: u8| usize::from(rank >= threshold);
        let (i1, j1, k1, l1) = (step(rx, 3), step(ry, 3), step(rz, 3), step(rw, 3));
        let (i2, j2, k2, l2) = (step(rx, 2), step(ry, 2), step(rz, 2), step(rw, 2));
        let (i3, j3, k3, l3) = (step(rx, 1), step(ry, 1), step(rz, 1), step(rw, 1));

        let off = |o: usize, n: f32| o as f32 - n * G4;
        let (x1, y1, z1, w1) = (x0 - off(i1, 1.0), y0 - off(j1, 1.0), z0 - off(k1, 1.0), w0 - off(l1, 1.0));
        let (x2, y2, z2, w2) = (x0 - off(i2, 2.0), y0 - off(j2, 2.0), z0 - off(k2, 2.0), w0 - off(l2, 2.0));
        let (x3, y3, z3, w3) = (x0 - off(i3, 3.0), y0 - off(j3, 3.0), z0 - off(k3, 3.0), w0 - off(l3, 3.0));
        let (x4, y4, z4, w4) = (x0 - off(1, 4.0), y0 - off(1, 4.0), z0 - off(1, 4.0), w0 - off(1, 4.0));

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let kk = (k as i32 & 255) as usize;
        let ll = (l as i32 & 255) as usize;
        let hash = |a: usize, b: usize, c: usize, d: usize| {
            self.p(ii + a + self.p(jj + b + self.p(kk + c + self.p(ll + d))))
        };

        let n0 = self.corner(hash(0, 0, 0, 0), x0, y0, z0, w0);
        let n1 = self.corner(hash(i1, j1, k1, l1), x1, y1, z1, w1);
        let n2 = self.corner(hash(i2, j2, k2, l2), x2, y2, z2, w2);
        let n3 = self.corner(hash(i3, j3, k3, l3), x3, y3, z3, w3);
        let n4 = self.corner(hash(1, 1, 1, 1), x4, y4, z4, w4);

        (27.0 * (n0 + n1 + n2 + n3 + n4)).clamp(-1.0, 1.0)
    }
}
