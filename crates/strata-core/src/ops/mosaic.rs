//! Randomized mosaic clustering.
//!
//! A set of seed positions is drawn at random; every pixel joins the cluster
//! of its nearest seed and is repainted with that cluster's average color.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{Result, StrataError};
use crate::image::Image;
use crate::pixel::Pixel;

/// Build a mosaic of `image` around `seeds` random seed positions.
///
/// Seeds are distinct positions drawn uniformly from `rng`, retrying on
/// collision. Each pixel belongs to the seed at the smallest Euclidean
/// distance; on a tie the seed drawn first wins. Cluster colors are the
/// channel-wise integer-truncated mean of the cluster's source pixels.
///
/// Fails with [`StrataError::InvalidSeedCount`] unless
/// `1 <= seeds <= pixel_count` (checked before `rng` is touched).
///
/// The output depends on `rng`; seed it explicitly for reproducible results.
pub fn mosaic<R>(image: &Image, seeds: usize, rng: &mut R) -> Result<Image>
where
    R: Rng + ?Sized,
{
    let pixel_count = image.pixel_count();
    if seeds < 1 || seeds > pixel_count {
        return Err(StrataError::InvalidSeedCount { seeds, pixel_count });
    }

    let seed_positions = choose_seeds(image, seeds, rng);
    paint_clusters(image, &seed_positions)
}

/// Repaint every pixel with the mean color of its nearest seed's cluster.
///
/// `seeds` must be non-empty, in draw order.
fn paint_clusters(image: &Image, seeds: &[(u32, u32)]) -> Result<Image> {
    let (width, height) = image.dimensions();
    let mut assignment = Vec::with_capacity(image.pixel_count());
    let mut sums = vec![[0u64; 3]; seeds.len()];
    let mut counts = vec![0u64; seeds.len()];

    for pixel in image.pixels() {
        let cluster = nearest_seed(pixel.position(), seeds);
        for (acc, channel) in sums[cluster].iter_mut().zip(pixel.rgb()) {
            *acc += u64::from(channel);
        }
        counts[cluster] += 1;
        assignment.push(cluster);
    }

    // Every seed is nearest to itself, so no cluster is empty.
    let averages: Vec<[u8; 3]> = sums
        .into_iter()
        .zip(&counts)
        .map(|(sum, &count)| sum.map(|total| (total / count.max(1)) as u8))
        .collect();

    let pixels = image
        .pixels()
        .zip(assignment)
        .map(|(pixel, cluster)| {
            let [r, g, b] = averages[cluster];
            Pixel::from_rgb(pixel.x(), pixel.y(), r, g, b)
        })
        .collect();

    image.with_pixels(width, height, pixels)
}

/// Draw `count` distinct positions, in draw order.
fn choose_seeds<R>(image: &Image, count: usize, rng: &mut R) -> Vec<(u32, u32)>
where
    R: Rng + ?Sized,
{
    let (width, height) = image.dimensions();
    let mut taken = HashSet::with_capacity(count);
    let mut seeds = Vec::with_capacity(count);
    while seeds.len() < count {
        let candidate = (rng.gen_range(0..width), rng.gen_range(0..height));
        if taken.insert(candidate) {
            seeds.push(candidate);
        }
    }
    seeds
}

/// Index of the seed closest to `(x, y)`; the earliest seed wins ties.
fn nearest_seed((x, y): (u32, u32), seeds: &[(u32, u32)]) -> usize {
    let mut best = 0;
    let mut best_distance = u64::MAX;
    for (index, &(sx, sy)) in seeds.iter().enumerate() {
        let dx = u64::from(sx.abs_diff(x));
        let dy = u64::from(sy.abs_diff(y));
        // Squared distance orders exactly like Euclidean distance.
        let distance = dx * dx + dy * dy;
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}
