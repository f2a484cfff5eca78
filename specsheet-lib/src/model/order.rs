//! Order-sequence helpers shared by rows and columns.

/// Moves the element at `from` to `to`, shifting the elements between them
/// by one. Both indices must be in bounds.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Returns `true` if `order` holds each id of `live` exactly once.
pub fn is_permutation_of<'a, T, I>(order: &[T], live: I) -> bool
where
    T: Eq + std::hash::Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = std::collections::HashSet::with_capacity(order.len());
    if !order.iter().all(|id| seen.insert(id)) {
        return false;
    }
    let mut count = 0;
    for id in live {
        if !seen.contains(id) {
            return false;
        }
        count += 1;
    }
    count == order.len()
}
