use rand::Rng;

use crate::error::SampleError;
use crate::types::Item;

/// `max_repeat` value disabling the repeat cap: sampling with replacement.
pub const NO_REPEAT_CAP: i64 = -1;

/// Draws up to `result_count` values from `items` according to their weights.
///
/// With `max_repeat > 0` each literal item entry may be drawn at most that
/// often: the pool is first expanded to `max_repeat` copies of the input
/// sequence, and every draw removes the selected entry. Sibling copies keep
/// the entry drawable until the cap is reached. With `max_repeat <= 0` the
/// pool is left untouched and draws are made with replacement.
///
/// The result is shorter than `result_count` when a capped pool runs dry;
/// that is the documented short-result condition, not an error.
pub fn sample<R: Rng>(
    items: &[Item],
    result_count: u64,
    max_repeat: i64,
    rng: &mut R,
) -> Result<Vec<String>, SampleError> {
    let mut pool = expand(items, max_repeat);

    let mut picked = Vec::new();
    for _ in 0..result_count {
        if pool.is_empty() {
            break;
        }
        let index = select_index(&pool, rng)?;
        picked.push(pool[index].value.clone());
        if max_repeat > 0 {
            // Order after removal is irrelevant: only the weights shape the
            // distribution.
            pool.swap_remove(index);
        }
    }
    Ok(picked)
}

fn expand(items: &[Item], max_repeat: i64) -> Vec<Item> {
    if max_repeat <= 1 {
        return items.to_vec();
    }
    let copies = usize::try_from(max_repeat).unwrap_or(usize::MAX);
    let mut pool = Vec::with_capacity(items.len().saturating_mul(copies));
    for _ in 0..copies {
        pool.extend_from_slice(items);
    }
    pool
}

/// Picks one index by inverse-CDF walk over the pool's weights.
fn select_index<R: Rng>(pool: &[Item], rng: &mut R) -> Result<usize, SampleError> {
    let mut total: i64 = 0;
    for item in pool {
        total = total
            .checked_add(item.weight)
            .ok_or(SampleError::WeightOverflow)?;
    }
    if total == 0 {
        return Err(SampleError::Unselectable);
    }

    let mut point = rng.gen_range(0..total);
    for (index, item) in pool.iter().enumerate() {
        if point < item.weight {
            return Ok(index);
        }
        point -= item.weight;
    }

    // point < total and the weights sum to total, so the walk must land.
    unreachable!("draw point left the pool");
}
