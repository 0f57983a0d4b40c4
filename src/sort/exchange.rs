use std::cmp::Ordering;

/// Bubble passes over adjacent pairs. Only strict inversions are exchanged,
/// so equal keys never cross each other. At most `n` passes; a pass without
/// exchanges ends the sort early.
pub(super) fn sort<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n {
        let mut exchanged = false;
        for j in 0..n - pass - 1 {
            if compare(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                exchanged = true;
            }
        }
        if !exchanged {
            break;
        }
    }
    items
}
