//! stats::ranks — rank transform shared by rank-based statistics.
//!
//! Ranks are 1-based positions in an ascending **stable** sort. With
//! [`RankMethod::Ordinal`] ties keep distinct ranks in storage order; with
//! [`RankMethod::Average`] each tie group receives the mean of the positions
//! it spans.

use crate::stats::options::RankMethod;

/// Rank a slice of finite values.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Finite observations; the slice is not modified.
/// - `method`: [`RankMethod`]
///   Tie handling.
///
/// Returns
/// -------
/// `Vec<f64>`
///   `ranks[i]` is the rank of `data[i]`, in 1..=n.
pub fn rank(data: &[f64], method: RankMethod) -> Vec<f64> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0.0; data.len()];
    match method {
        RankMethod::Ordinal => {
            for (pos, &idx) in order.iter().enumerate() {
                ranks[idx] = (pos + 1) as f64;
            }
        }
        RankMethod::Average => {
            let mut start = 0;
            while start < order.len() {
                let mut end = start + 1;
                while end < order.len() && data[order[end]] == data[order[start]] {
                    end += 1;
                }
                // positions start+1 ..= end share their mean
                let shared = (start + 1 + end) as f64 / 2.0;
                for &idx in &order[start..end] {
                    ranks[idx] = shared;
                }
                start = end;
            }
        }
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify both tie policies on a series with one tie group.
    //
    // Given
    // -----
    // - [30, 10, 20, 10].
    //
    // Expect
    // ------
    // - Ordinal: the first 10 (index 1) ranks 1, the second (index 3)
    //   ranks 2 → [4, 1, 3, 2].
    // - Average: both 10s rank 1.5 → [4, 1.5, 3, 1.5].
    fn rank_ordinal_and_average_ties() {
        // Arrange
        let data = [30.0, 10.0, 20.0, 10.0];

        // Act
        let ordinal = rank(&data, RankMethod::Ordinal);
        let average = rank(&data, RankMethod::Average);

        // Assert
        assert_eq!(ordinal, vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(average, vec![4.0, 1.5, 3.0, 1.5]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty slice ranks to an empty vector under both policies.
    //
    // Expect
    // ------
    // - No ranks and no panic.
    fn rank_empty_slice_is_empty() {
        // Act
        let ordinal = rank(&[], RankMethod::Ordinal);
        let average = rank(&[], RankMethod::Average);

        // Assert
        assert!(ordinal.is_empty());
        assert!(average.is_empty());
    }
}
