//! Random collections over a source sequence.
//!
//! Elements are pulled from the source in order; when a finite source runs
//! dry partway through a structure, the output sequence ends.

use std::collections::{BTreeMap, BTreeSet};
use std::iter::{from_fn, repeat_with};

use rand::distributions::Bernoulli;
use tracing::debug;

use super::cursor::Cursor;
use crate::error::{GenerationError, GenerationResult};
use crate::iter::PATIENCE;
use crate::provider::Values;

/// Lists whose lengths come from `length`.
fn lists_by<T: 'static>(
    mut length: impl FnMut() -> usize + 'static,
    mut xs: Values<T>,
) -> Values<Vec<T>> {
    Box::new(
        from_fn(move || {
            let n = length();
            let list: Vec<T> = xs.by_ref().take(n).collect();
            (list.len() == n).then_some(list)
        })
        .fuse(),
    )
}

/// Length `n + natural geometric(scale - n)`, mean `scale`.
fn length_at_least(c: Cursor, scale: i32, n: usize) -> impl FnMut() -> usize + 'static {
    let mean = f64::from(scale) - n as f64;
    move || n + c.natural_geometric(mean) as usize
}

pub(super) fn lists<T: 'static>(c: Cursor, scale: i32, xs: Values<T>) -> Values<Vec<T>> {
    lists_by(length_at_least(c, scale, 0), xs)
}

pub(super) fn lists_at_least<T: 'static>(
    c: Cursor,
    scale: i32,
    n: usize,
    xs: Values<T>,
) -> Values<Vec<T>> {
    lists_by(length_at_least(c, scale, n), xs)
}

pub(super) fn lists_with_length<T: 'static>(n: usize, xs: Values<T>) -> Values<Vec<T>> {
    lists_by(move || n, xs)
}

/// Random lists with `x` inserted at a uniform position.
pub(super) fn lists_with_element<T: Clone + 'static>(
    c: Cursor,
    scale: i32,
    x: T,
    xs: Values<T>,
) -> Values<Vec<T>> {
    let position = c.clone();
    Box::new(lists(c, scale, xs).map(move |mut list| {
        let at = position.gen_range(0..=list.len());
        list.insert(at, x.clone());
        list
    }))
}

pub(super) fn sorted<T: Ord + 'static>(lists: Values<Vec<T>>) -> Values<Vec<T>> {
    Box::new(lists.map(|mut list| {
        list.sort();
        list
    }))
}

pub(super) fn subsets<T: Ord + 'static>(c: Cursor, scale: i32, xs: Values<T>) -> Values<Vec<T>> {
    Box::new(
        lists(c, scale, xs).map(|list| list.into_iter().collect::<BTreeSet<_>>().into_iter().collect()),
    )
}

/// Pulls from `xs` until `set` holds `n` elements.
///
/// Gives up after [`PATIENCE`] consecutive repeats, so a source with fewer
/// than `n` distinct values counts as exhausted instead of spinning forever.
fn top_up<T: Ord>(set: &mut BTreeSet<T>, n: usize, xs: &mut Values<T>) -> Option<()> {
    let mut repeats = 0;
    while set.len() < n {
        if set.insert(xs.next()?) {
            repeats = 0;
        } else {
            repeats += 1;
            if repeats == PATIENCE {
                debug!(wanted = n, found = set.len(), "too few distinct values, ending subsets");
                return None;
            }
        }
    }
    Some(())
}

/// Subsets of a random list of length at least `n`, topped up to `n` distinct elements.
pub(super) fn subsets_at_least<T: Ord + 'static>(
    c: Cursor,
    scale: i32,
    n: usize,
    mut xs: Values<T>,
) -> Values<Vec<T>> {
    let mut length = length_at_least(c, scale, n);
    Box::new(
        from_fn(move || {
            let target = length();
            let mut set = BTreeSet::new();
            for _ in 0..target {
                set.insert(xs.next()?);
            }
            top_up(&mut set, n, &mut xs)?;
            Some(set.into_iter().collect())
        })
        .fuse(),
    )
}

/// Subsets of exactly `n` distinct elements, pulling until enough are seen.
pub(super) fn subsets_with_length<T: Ord + 'static>(n: usize, mut xs: Values<T>) -> Values<Vec<T>> {
    Box::new(
        from_fn(move || {
            let mut set = BTreeSet::new();
            top_up(&mut set, n, &mut xs)?;
            Some(set.into_iter().collect())
        })
        .fuse(),
    )
}

/// Uniform shuffles of `xs`.
pub(super) fn permutations<T: Clone + 'static>(c: Cursor, xs: Vec<T>) -> Values<Vec<T>> {
    Box::new(repeat_with(move || {
        let mut shuffled = xs.clone();
        c.shuffle(&mut shuffled);
        shuffled
    }))
}

pub(super) fn maps<K: Clone + Ord + 'static, V: 'static>(
    keys: Vec<K>,
    mut values: Values<V>,
) -> Values<BTreeMap<K, V>> {
    let keys: BTreeSet<K> = keys.into_iter().collect();
    Box::new(from_fn(move || {
        let mut map = BTreeMap::new();
        for key in &keys {
            map.insert(key.clone(), values.next()?);
        }
        Some(map)
    }))
}

pub(super) fn pairs<A: 'static, B: 'static>(mut xs: Values<A>, mut ys: Values<B>) -> Values<(A, B)> {
    Box::new(from_fn(move || Some((xs.next()?, ys.next()?))))
}

pub(super) fn triples<A: 'static, B: 'static, C: 'static>(
    mut xs: Values<A>,
    mut ys: Values<B>,
    mut zs: Values<C>,
) -> Values<(A, B, C)> {
    Box::new(from_fn(move || Some((xs.next()?, ys.next()?, zs.next()?))))
}

/// Uniform element of every component; each component must be nonempty.
pub(super) fn cartesian_product<T: Clone + 'static>(c: Cursor, lists: Vec<Vec<T>>) -> Values<Vec<T>> {
    Box::new(from_fn(move || {
        lists.iter().map(|list| c.choose(list).cloned()).collect()
    }))
}

/// Uniform draws with replacement; `xs` must be nonempty.
pub(super) fn uniform_sample<T: Clone + 'static>(c: Cursor, xs: Vec<T>) -> Values<T> {
    Box::new(from_fn(move || c.choose(&xs).cloned()))
}

/// `None` with probability `1/scale`, otherwise the next source value.
pub(super) fn with_none<T: 'static>(
    c: Cursor,
    scale: i32,
    mut xs: Values<T>,
) -> GenerationResult<Values<Option<T>>> {
    let odds = u32::try_from(scale)
        .map_err(|_| GenerationError::InvalidArgument(format!("with_none odds {scale}")))?;
    let none = Bernoulli::from_ratio(1, odds)
        .map_err(|e| GenerationError::InvalidArgument(format!("with_none odds {scale}: {e}")))?;
    Ok(Box::new(from_fn(move || {
        if c.sample(&none) {
            Some(None)
        } else {
            xs.next().map(Some)
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED};

    fn cursor() -> Cursor {
        Cursor::new(IsaacRng::from_words(&EXAMPLE_SEED))
    }

    fn naturals() -> Values<u32> {
        Box::new(0..)
    }

    #[test]
    fn test_lists_end_with_finite_source() {
        let source: Values<u32> = Box::new(0..10);
        let lists: Vec<_> = lists(cursor(), 4, source).collect();
        let pulled: usize = lists.iter().map(Vec::len).sum();
        assert!(pulled <= 10);
    }

    #[test]
    fn test_lengths_respect_floor() {
        for list in lists_at_least(cursor(), 6, 3, naturals()).take(500) {
            assert!(list.len() >= 3);
        }
        for list in lists_with_length(4, naturals()).take(50) {
            assert_eq!(list.len(), 4);
        }
    }

    #[test]
    fn test_with_element_contains_element() {
        for list in lists_with_element(cursor(), 3, 99u32, naturals()).take(500) {
            assert!(list.contains(&99));
        }
    }

    #[test]
    fn test_subsets_are_sorted_and_distinct() {
        let bits: Values<u32> = Box::new(std::iter::repeat([0u32, 1, 2]).flatten());
        for set in subsets_at_least(cursor(), 5, 2, bits).take(200) {
            assert!(set.len() >= 2);
            assert!(set.windows(2).all(|w| w[0] < w[1]));
        }
        for set in subsets_with_length(3, naturals()).take(20) {
            assert_eq!(set.len(), 3);
        }
    }

    #[test]
    fn test_subsets_end_when_distinct_values_run_out() {
        let bits: Values<u32> = Box::new(std::iter::repeat([0u32, 1]).flatten());
        assert_eq!(subsets_with_length(3, bits).count(), 0);

        let bits: Values<u32> = Box::new(std::iter::repeat([0u32, 1]).flatten());
        assert_eq!(subsets_at_least(cursor(), 5, 3, bits).count(), 0);

        let bits: Values<u32> = Box::new(std::iter::repeat([0u32, 1]).flatten());
        let pairs: Vec<_> = subsets_with_length(2, bits).take(5).collect();
        assert_eq!(pairs, vec![vec![0, 1]; 5]);
    }

    #[test]
    fn test_cartesian_product_and_sample_stay_in_components() {
        let picks = cartesian_product(cursor(), vec![vec!['a', 'b'], vec!['x']]);
        for pick in picks.take(100) {
            assert!(pick == ['a', 'x'] || pick == ['b', 'x']);
        }
        let drawn: BTreeSet<_> = uniform_sample(cursor(), vec![1, 2, 3]).take(300).collect();
        assert_eq!(drawn, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_with_none_rejects_unusable_odds() {
        assert!(matches!(
            with_none(cursor(), 0, naturals()),
            Err(GenerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_permutations_preserve_elements() {
        for mut p in permutations(cursor(), vec![3, 1, 2, 2]).take(100) {
            p.sort();
            assert_eq!(p, vec![1, 2, 2, 3]);
        }
    }

    #[test]
    fn test_maps_cover_distinct_keys() {
        let map = maps(vec!['b', 'a', 'b'], naturals()).next().unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!['a', 'b']);
    }

    #[test]
    fn test_with_none_frequency() {
        let nones = with_none(cursor(), 4, naturals())
            .unwrap()
            .take(8000)
            .filter(Option::is_none)
            .count();
        assert!((1700..2300).contains(&nones), "{nones}");
    }
}
