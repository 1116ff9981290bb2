use aurora_model::JobUpdateStrategy;

use crate::error::BatchError;

/// Zero-indexed batch that `updating_instances` falls into, given explicit batch sizes.
///
/// Batches are consumed in order until the running remainder reaches zero. Past the end of
/// the list the last size repeats, so a count beyond the sum of all sizes lands in an
/// overflow batch: `len - 1 + ceil(remainder / last)`.
///
/// The list must be non-empty and every size positive.
pub fn current_batch(updating_instances: i32, batch_sizes: &[i32]) -> Result<usize, BatchError> {
    let Some(&last) = batch_sizes.last() else {
        return Err(BatchError::Empty);
    };
    if let Some((index, &size)) = batch_sizes.iter().enumerate().find(|(_, s)| **s <= 0) {
        return Err(BatchError::NonPositiveSize { index, size });
    }

    let mut remaining = i64::from(updating_instances);
    for (i, &size) in batch_sizes.iter().enumerate() {
        remaining -= i64::from(size);
        if remaining <= 0 {
            return Ok(i);
        }
    }

    // remaining > 0 here
    let last = i64::from(last);
    let overflow = (remaining + last - 1) / last;
    Ok(batch_sizes.len() - 1 + overflow as usize)
}

/// Like [`current_batch`], with sizes taken from an update strategy.
///
/// A fixed batch strategy is a one-element list that repeats. Queue updates (and updates
/// without a strategy) do not progress in batches.
pub fn strategy_current_batch(
    strategy: Option<&JobUpdateStrategy>,
    updating_instances: i32,
) -> Result<usize, BatchError> {
    let sizes = match strategy {
        Some(JobUpdateStrategy::Batch { group_size, .. }) => std::slice::from_ref(group_size),
        Some(JobUpdateStrategy::VariableBatch { group_sizes, .. }) => group_sizes.as_slice(),
        Some(s @ JobUpdateStrategy::Queue { .. }) => return Err(BatchError::NotBatched(s.kind())),
        None => return Err(BatchError::NotBatched("default")),
    };
    current_batch(updating_instances, sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes() {
        let sizes = [5, 5, 5];
        assert_eq!(current_batch(3, &sizes), Ok(0));
        assert_eq!(current_batch(5, &sizes), Ok(0));
        assert_eq!(current_batch(6, &sizes), Ok(1));
        assert_eq!(current_batch(15, &sizes), Ok(2));
    }

    #[test]
    fn overflow_repeats_last_size() {
        let sizes = [5, 5, 5];
        assert_eq!(current_batch(17, &sizes), Ok(3));
        assert_eq!(current_batch(20, &sizes), Ok(3));
        assert_eq!(current_batch(21, &sizes), Ok(4));
    }

    #[test]
    fn non_uniform_sizes() {
        let sizes = [1, 2, 3];
        assert_eq!(current_batch(1, &sizes), Ok(0));
        assert_eq!(current_batch(2, &sizes), Ok(1));
        assert_eq!(current_batch(3, &sizes), Ok(1));
        assert_eq!(current_batch(4, &sizes), Ok(2));
        assert_eq!(current_batch(6, &sizes), Ok(2));
        // 6 named, then batches of 3
        assert_eq!(current_batch(7, &sizes), Ok(3));
        assert_eq!(current_batch(10, &sizes), Ok(4));
    }

    #[test]
    fn zero_updating_is_first_batch() {
        assert_eq!(current_batch(0, &[4]), Ok(0));
    }

    #[test]
    fn rejects_empty_list() {
        assert_eq!(current_batch(3, &[]), Err(BatchError::Empty));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(
            current_batch(3, &[2, 0, 1]),
            Err(BatchError::NonPositiveSize { index: 1, size: 0 })
        );
        assert_eq!(
            current_batch(3, &[-1]),
            Err(BatchError::NonPositiveSize { index: 0, size: -1 })
        );
    }

    #[test]
    fn fixed_batch_strategy_repeats_group_size() {
        let s = JobUpdateStrategy::Batch {
            group_size: 2,
            autopause_after_batch: false,
        };
        assert_eq!(strategy_current_batch(Some(&s), 2), Ok(0));
        assert_eq!(strategy_current_batch(Some(&s), 5), Ok(2));
    }

    #[test]
    fn queue_strategy_is_not_batched() {
        let s = JobUpdateStrategy::Queue { group_size: 3 };
        assert_eq!(
            strategy_current_batch(Some(&s), 1),
            Err(BatchError::NotBatched("queue"))
        );
        assert_eq!(
            strategy_current_batch(None, 1),
            Err(BatchError::NotBatched("default"))
        );
    }
}
