use std::{collections::VecDeque, hash::Hash};

use crate::HashSet;

/// Generate a shortest paths map on a graph according to a neighbors
/// function.
///
/// Yields every reachable node once along with its edge count from the
/// nearest start node, in nondecreasing order of distance.
pub fn dijkstra_map<'a, T, I>(
    mut neighbors: impl FnMut(&T) -> I + 'a,
    starts: impl IntoIterator<Item = T>,
) -> impl Iterator<Item = (T, usize)> + 'a
where
    T: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = T>,
{
    let mut edge: VecDeque<(T, usize)> =
        starts.into_iter().map(|s| (s, 0)).collect();
    let mut seen = HashSet::default();

    std::iter::from_fn(move || {
        // Candidates are in a queue and consumed first-in, first-out. This
        // should guarantee that the first time a node is popped from the queue
        // it shows the shortest path length from start to that node.

        while let Some((node, len)) = edge.pop_front() {
            if seen.insert(node.clone()) {
                for n in neighbors(&node) {
                    if !seen.contains(&n) {
                        edge.push_back((n, len + 1));
                    }
                }
                return Some((node, len));
            }
        }
        None
    })
}

/// Combinator for limiting flood fill to a given distance.
///
/// ```
/// # use util::{dijkstra_map, within_range};
/// let ring = |&n: &i32| [(n + 1) % 10, (n + 9) % 10];
/// let near: Vec<i32> = dijkstra_map(ring, [0])
///     .take_while(within_range(2))
///     .map(|(n, _)| n)
///     .collect();
/// assert_eq!(near, vec![0, 1, 9]);
/// ```
pub fn within_range<T>(n: usize) -> impl FnMut(&(T, usize)) -> bool {
    move |&(_, k)| k < n
}
