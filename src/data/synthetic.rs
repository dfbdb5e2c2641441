use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::loader::MatchingFile;
use crate::model::{Correspondence, Point2};

/// Random demo data: `count` uniformly placed points per image, identity
/// correspondences and uniform energies in `[0, 1)`.
///
/// The same seed always yields the same data.
pub fn synthesize(count: usize, size0: (u32, u32), size1: (u32, u32), seed: Option<u64>) -> MatchingFile {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let points0 = random_points(&mut rng, count, size0);
    let points1 = random_points(&mut rng, count, size1);
    let energy = (0..count).map(|_| rng.gen::<f64>()).collect();
    let correspondences = (0..count as i64).map(|m| Correspondence::new(m, m)).collect();

    tracing::debug!(count, seed, "Synthesized matching data");
    MatchingFile {
        points0,
        points1,
        correspondences,
        energy,
        ..MatchingFile::default()
    }
}

fn random_points(rng: &mut StdRng, count: usize, (width, height): (u32, u32)) -> Vec<Point2> {
    (0..count)
        .map(|_| {
            Point2::new(
                rng.gen_range(0..width.max(1)) as i32,
                rng.gen_range(0..height.max(1)) as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_inside_images() {
        let data = synthesize(50, (20, 10), (5, 40), Some(7));
        assert_eq!(data.points0.len(), 50);
        assert!(data.points0.iter().all(|p| (0..20).contains(&p.x) && (0..10).contains(&p.y)));
        assert!(data.points1.iter().all(|p| (0..5).contains(&p.x) && (0..40).contains(&p.y)));
        assert!(data.energy.iter().all(|e| (0.0..1.0).contains(e)));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = synthesize(10, (100, 50), (100, 50), Some(42));
        let b = synthesize(10, (100, 50), (100, 50), Some(42));
        assert_eq!(a, b);
        assert_eq!(a.correspondences[3], Correspondence::new(3, 3));
    }
}
