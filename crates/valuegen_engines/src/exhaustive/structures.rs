//! Exhaustive collections over a source sequence.
//!
//! Sources are memoised in a [`CachedSeq`] and addressed by index; every
//! structure is an index product walked shell by shell, so each distinct
//! collection over a source of distinct values appears exactly once.

use std::collections::{BTreeMap, BTreeSet};
use std::iter::{from_fn, once};

use super::diagonal::{CachedSeq, DiagonalRows, Extent, ShellProduct, TupleOrder};
use crate::iter::filter_bounded;
use crate::provider::Values;

/// Tuples of `n` source elements under `order`.
fn tuples<T: Clone + 'static>(n: usize, xs: CachedSeq<T>, order: TupleOrder) -> Values<Vec<T>> {
    let extents = vec![xs.extent(); n];
    Box::new(
        ShellProduct::new(extents, order)
            .filter_map(move |ix| ix.iter().map(|&i| xs.get(i)).collect()),
    )
}

fn sorted<T: Ord + 'static>(lists: Values<Vec<T>>) -> Values<Vec<T>> {
    Box::new(lists.map(|mut list| {
        list.sort();
        list
    }))
}

/// Rows of tuples of length `n, n + 1, ...`, walked diagonally.
///
/// A row is opened only while the source can still fill it: `needed(len)`
/// is the number of source elements a tuple of length `len` requires.
fn by_length<T: Clone + 'static>(
    n: usize,
    xs: CachedSeq<T>,
    order: TupleOrder,
    needed: fn(usize) -> usize,
) -> Values<Vec<T>> {
    Box::new(DiagonalRows::new(move |k| {
        let len = n + k;
        let required = needed(len);
        (required == 0 || xs.has(required - 1)).then(|| tuples(len, xs.clone(), order))
    }))
}

/// Lists need one element once they are nonempty; subsets need as many as their size.
fn any_element(len: usize) -> usize {
    usize::from(len > 0)
}

fn distinct_elements(len: usize) -> usize {
    len
}

pub(super) fn lists_at_least<T: Clone + 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    by_length(n, CachedSeq::new(xs), TupleOrder::Free, any_element)
}

pub(super) fn lists<T: Clone + 'static>(xs: Values<T>) -> Values<Vec<T>> {
    lists_at_least(0, xs)
}

pub(super) fn lists_with_length<T: Clone + 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    tuples(n, CachedSeq::new(xs), TupleOrder::Free)
}

/// Lists containing `x`, split at its first occurrence.
///
/// Every such list is uniquely `ys ++ [x] ++ zs` with `ys` free of `x`, so
/// pairing lists over `xs \ {x}` with lists over `{x} ∪ xs` reaches each
/// once.
pub(super) fn lists_with_element<T: Clone + PartialEq + 'static>(
    x: T,
    xs: Values<T>,
) -> Values<Vec<T>> {
    let source = CachedSeq::new(xs);
    let excluded = x.clone();
    let rest = CachedSeq::new(filter_bounded(source.iter(), move |y| y != &excluded));
    let heads = CachedSeq::new(lists(rest.iter()));
    let tails = CachedSeq::new(lists(Box::new(once(x.clone()).chain(rest.iter()))));
    let extents = vec![heads.extent(), tails.extent()];
    Box::new(ShellProduct::new(extents, TupleOrder::Free).filter_map(move |ix| {
        let mut list = heads.get(ix[0])?;
        list.push(x.clone());
        list.extend(tails.get(ix[1])?);
        Some(list)
    }))
}

pub(super) fn bags_at_least<T: Clone + Ord + 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    sorted(by_length(n, CachedSeq::new(xs), TupleOrder::NonDecreasing, any_element))
}

pub(super) fn bags_with_length<T: Clone + Ord + 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    sorted(tuples(n, CachedSeq::new(xs), TupleOrder::NonDecreasing))
}

pub(super) fn subsets_at_least<T: Clone + Ord + 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    sorted(by_length(n, CachedSeq::new(xs), TupleOrder::Increasing, distinct_elements))
}

pub(super) fn subsets_with_length<T: Clone + Ord + 'static>(
    n: usize,
    xs: Values<T>,
) -> Values<Vec<T>> {
    sorted(tuples(n, CachedSeq::new(xs), TupleOrder::Increasing))
}

/// Steps `ranks` to its lexicographic successor; `false` at the last one.
fn next_permutation(ranks: &mut [usize]) -> bool {
    let Some(i) = ranks.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let pivot = ranks[i];
    let Some(j) = ranks.iter().rposition(|&r| r > pivot) else {
        return false;
    };
    ranks.swap(i, j);
    ranks[i + 1..].reverse();
    true
}

/// Distinct orderings of `xs`, lexicographic in first-occurrence rank.
pub(super) fn permutations<T: Clone + PartialEq + 'static>(xs: Vec<T>) -> Values<Vec<T>> {
    let mut ranks: Vec<usize> = xs
        .iter()
        .map(|x| xs.iter().position(|y| y == x).unwrap_or_default())
        .collect();
    ranks.sort_unstable();
    let mut pending = Some(ranks);
    Box::new(from_fn(move || {
        let current = pending.take()?;
        let mut following = current.clone();
        if next_permutation(&mut following) {
            pending = Some(following);
        }
        Some(current.iter().map(|&r| xs[r].clone()).collect())
    }))
}

pub(super) fn maps<K: Clone + Ord + 'static, V: Clone + 'static>(
    keys: Vec<K>,
    values: Values<V>,
) -> Values<BTreeMap<K, V>> {
    let keys: Vec<K> = keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    Box::new(
        lists_with_length(keys.len(), values)
            .map(move |vs| keys.iter().cloned().zip(vs).collect()),
    )
}

pub(super) fn pairs<A: Clone + 'static, B: Clone + 'static>(
    xs: Values<A>,
    ys: Values<B>,
) -> Values<(A, B)> {
    let (xs, ys) = (CachedSeq::new(xs), CachedSeq::new(ys));
    let extents = vec![xs.extent(), ys.extent()];
    Box::new(
        ShellProduct::new(extents, TupleOrder::Free)
            .filter_map(move |ix| Some((xs.get(ix[0])?, ys.get(ix[1])?))),
    )
}

pub(super) fn triples<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static>(
    xs: Values<A>,
    ys: Values<B>,
    zs: Values<C>,
) -> Values<(A, B, C)> {
    let (xs, ys, zs) = (CachedSeq::new(xs), CachedSeq::new(ys), CachedSeq::new(zs));
    let extents = vec![xs.extent(), ys.extent(), zs.extent()];
    Box::new(
        ShellProduct::new(extents, TupleOrder::Free)
            .filter_map(move |ix| Some((xs.get(ix[0])?, ys.get(ix[1])?, zs.get(ix[2])?))),
    )
}

/// Every choice of one element per component; components must be nonempty.
pub(super) fn cartesian_product<T: Clone + 'static>(lists: Vec<Vec<T>>) -> Values<Vec<T>> {
    let components: Vec<CachedSeq<T>> = lists
        .into_iter()
        .map(|list| CachedSeq::new(Box::new(list.into_iter())))
        .collect();
    let extents = components.iter().map(CachedSeq::extent).collect();
    Box::new(ShellProduct::new(extents, TupleOrder::Free).filter_map(move |ix| {
        ix.iter()
            .zip(&components)
            .map(|(&i, component)| component.get(i))
            .collect()
    }))
}

/// The list repeated forever; `xs` must be nonempty.
pub(super) fn uniform_sample<T: Clone + 'static>(xs: Vec<T>) -> Values<T> {
    Box::new(xs.into_iter().cycle())
}

pub(super) fn with_none<T: 'static>(xs: Values<T>) -> Values<Option<T>> {
    Box::new(once(None).chain(xs.map(Some)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn naturals() -> Values<u32> {
        Box::new(0..)
    }

    fn small(n: u32) -> Values<u32> {
        Box::new(0..n)
    }

    #[test]
    fn test_lists_of_finite_source() {
        let firsts: Vec<Vec<u32>> = lists(small(2)).take(15).collect();
        assert_eq!(firsts[0], Vec::<u32>::new());
        let distinct: HashSet<&Vec<u32>> = firsts.iter().collect();
        assert_eq!(distinct.len(), firsts.len());
        assert!(firsts.contains(&vec![1, 0]));
        assert_eq!(lists(small(0)).collect::<Vec<_>>(), vec![Vec::<u32>::new()]);
    }

    #[test]
    fn test_lists_reach_every_small_list() {
        let firsts: HashSet<Vec<u32>> = lists(naturals()).take(3000).collect();
        for a in 0..3 {
            for b in 0..3 {
                assert!(firsts.contains(&vec![a, b]), "missing [{a}, {b}]");
            }
        }
        assert!(firsts.contains(&vec![0, 0, 0]));
    }

    #[test]
    fn test_lists_with_element_once_each() {
        let all: Vec<Vec<u32>> = lists_with_element(1, small(2))
            .take_while(|list| list.len() <= 3)
            .take(200)
            .collect();
        assert!(all.iter().all(|list| list.contains(&1)));
        let distinct: HashSet<&Vec<u32>> = all.iter().collect();
        assert_eq!(distinct.len(), all.len());
        assert_eq!(all[0], vec![1]);
    }

    #[test]
    fn test_subsets_of_finite_source_end() {
        let all: Vec<Vec<u32>> = subsets_at_least(0, small(4)).collect();
        assert_eq!(all.len(), 16);
        let distinct: HashSet<&Vec<u32>> = all.iter().collect();
        assert_eq!(distinct.len(), 16);
        assert_eq!(subsets_with_length(2, small(4)).count(), 6);
        assert_eq!(subsets_with_length(5, small(4)).count(), 0);
    }

    #[test]
    fn test_bags_of_finite_source() {
        assert_eq!(bags_with_length(2, small(3)).count(), 6);
        let firsts: Vec<Vec<u32>> = bags_at_least(1, small(2)).take(10).collect();
        assert!(firsts.iter().all(|bag| !bag.is_empty()));
        assert!(firsts.iter().all(|bag| bag.windows(2).all(|w| w[0] <= w[1])));
        assert_eq!(bags_at_least(1, small(0)).count(), 0);
    }

    #[test]
    fn test_permutations_distinct() {
        let all: Vec<Vec<char>> = permutations(vec!['b', 'a', 'b']).collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], vec!['b', 'b', 'a']);
        assert_eq!(permutations(vec![1, 2, 3]).count(), 6);
        assert_eq!(permutations(Vec::<u8>::new()).count(), 1);
    }

    #[test]
    fn test_cartesian_product() {
        let all: Vec<Vec<u8>> = cartesian_product(vec![vec![1, 2], vec![3], vec![4, 5]]).collect();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], vec![1, 3, 4]);
        assert_eq!(cartesian_product(Vec::<Vec<u8>>::new()).count(), 1);
    }

    #[test]
    fn test_maps_and_with_none() {
        let all: Vec<BTreeMap<char, u32>> = maps(vec!['b', 'a'], small(2)).collect();
        assert_eq!(all.len(), 4);
        let firsts: Vec<Option<u32>> = with_none(small(2)).collect();
        assert_eq!(firsts, vec![None, Some(0), Some(1)]);
    }
}
