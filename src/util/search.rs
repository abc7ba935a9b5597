/// Given a predicate that is monotone over the integers in [lower, upper]
/// (false up to some index, true from that index on), finds the smallest
/// index at which it holds, by bisection.
///
/// Callers must ensure the predicate is false at `lower` and true at
/// `upper`; both endpoints are treated as already evaluated.
pub fn min_index_satisfying<F, E>(lower: u64, upper: u64, pred: F) -> Result<u64, E>
where
    F: Fn(u64) -> Result<bool, E>,
{
    let mut lo = lower;
    let mut hi = upper;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if pred(mid)? {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ok(hi)
}
