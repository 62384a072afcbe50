use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Squared Euclidean distance, accumulated in `f32`.
///
/// Callers guarantee equal lengths; extra trailing entries of the longer
/// slice are ignored.
#[must_use]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    sum_squared_diff(a.iter().zip(b))
}

/// [`squared_euclidean`] between an indexed row and a query.
pub(crate) fn squared_euclidean_row(row: ArrayView1<'_, f32>, query: &[f32]) -> f32 {
    sum_squared_diff(row.iter().zip(query))
}

fn sum_squared_diff<'a, 'b>(pairs: impl Iterator<Item = (&'a f32, &'b f32)>) -> f32 {
    pairs
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Total order on distances. Every NaN, whatever its sign bit, sorts after
/// `+inf`.
#[must_use]
pub fn compare_distance(a: f32, b: f32) -> Ordering {
    ordering_key(a).total_cmp(&ordering_key(b))
}

/// `total_cmp` puts sign-negative NaN (e.g. `inf - inf` on x86) below
/// `-inf`, so fold every NaN onto the positive one.
fn ordering_key(distance: f32) -> f32 {
    if distance.is_nan() {
        distance.abs()
    } else {
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_matches_hand_computation() {
        assert_eq!(squared_euclidean(&[1.0, 0.0], &[0.0, 0.0]), 1.0);
        assert_eq!(squared_euclidean(&[1.0, 0.0], &[10.0, 0.0]), 81.0);
        assert_eq!(squared_euclidean(&[1.0, 2.0, 3.0], &[4.0, 6.0, 3.0]), 25.0);
    }

    #[test]
    fn identical_vectors_are_at_zero() {
        let v = [0.25, -1.5, 3.0];
        assert_eq!(squared_euclidean(&v, &v), 0.0);
    }

    #[test]
    fn nan_sorts_last() {
        assert_eq!(compare_distance(1.0, f32::NAN), Ordering::Less);
        assert_eq!(compare_distance(2.0, 1.0), Ordering::Greater);
        assert_eq!(compare_distance(1.0, 1.0), Ordering::Equal);
    }

    #[test]
    fn negative_nan_sorts_last_too() {
        let negative_nan = -f32::NAN;
        assert!(negative_nan.is_nan() && negative_nan.is_sign_negative());

        assert_eq!(compare_distance(negative_nan, 0.0), Ordering::Greater);
        assert_eq!(compare_distance(negative_nan, f32::INFINITY), Ordering::Greater);
        assert_eq!(compare_distance(f32::NEG_INFINITY, negative_nan), Ordering::Less);
        assert_eq!(compare_distance(negative_nan, f32::NAN), Ordering::Equal);

        let inf_minus_inf = f32::INFINITY - f32::INFINITY;
        assert_eq!(compare_distance(inf_minus_inf, 1.0e30), Ordering::Greater);
    }
}
