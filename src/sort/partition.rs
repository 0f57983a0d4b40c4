use std::cmp::Ordering;

/// Quicksort with the middle element of each slice as pivot.
///
/// Items are split three ways against the pivot under `compare`; each group
/// keeps its input order and only the outer groups recurse. Descending
/// order comes from the comparator, so the same recursion serves both
/// directions.
pub(super) fn sort<T, F>(items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let pivot = items.len() / 2;
    let sides: Vec<Ordering> = items
        .iter()
        .map(|item| compare(item, &items[pivot]))
        .collect();

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for (item, side) in items.into_iter().zip(sides) {
        match side {
            Ordering::Less => less.push(item),
            Ordering::Equal => equal.push(item),
            Ordering::Greater => greater.push(item),
        }
    }

    let mut sorted = sort(less, compare);
    sorted.append(&mut equal);
    sorted.append(&mut sort(greater, compare));
    sorted
}
