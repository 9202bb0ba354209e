/// Euclidean distance between two points of equal dimension.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared(a, b).sqrt()
}

pub(crate) fn squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Returns the index of the centroid closest to `point` and its distance.
///
/// Ties go to the lowest index. Returns `None` if `centroids` is empty.
pub fn nearest<C: AsRef<[f64]>>(point: &[f64], centroids: &[C]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared(point, c.as_ref());
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, d)| (i, d.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_345() {
        assert!((euclidean(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_prefers_lowest_index_on_tie() {
        let centroids = [[1.0, 0.0], [-1.0, 0.0], [0.0, 5.0]];
        let (idx, dist) = nearest(&[0.0, 0.0], &centroids).unwrap();
        assert_eq!(idx, 0);
        assert!((dist - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_empty() {
        let centroids: [[f64; 2]; 0] = [];
        assert!(nearest(&[0.0, 0.0], &centroids).is_none());
    }
}
