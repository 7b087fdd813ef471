//! Fair enumeration of (possibly infinite) products.
//!
//! This module provides:
//! - [`CachedSeq`]: shared lazy memo of a source sequence with indexed access
//! - [`shell_tuples`]: index tuples of a fixed total size
//! - [`ShellProduct`]: all index tuples of a product, shell by shell
//! - [`DiagonalRows`]: diagonal walk over a family of row sequences
//!
//! Shells are visited in increasing total index size `d = 0, 1, 2, ...` and
//! tuples within a shell in lexicographic order, so every tuple of a product
//! of infinite components is reached after finitely many steps.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::provider::Values;

/// Something with a (possibly unknown) number of indexable elements.
pub trait Extent {
    /// Whether index `index` exists; may pull from an underlying source.
    fn has(&self, index: usize) -> bool;
}

/// Extent of an infinite index space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Extent for Unbounded {
    #[inline]
    fn has(&self, _index: usize) -> bool {
        true
    }
}

struct Cache<T> {
    source: Values<T>,
    items: Vec<T>,
    done: bool,
}

/// Shared lazy memo of a source sequence.
///
/// Clones share the memo, so a source consumed through one clone is never
/// pulled twice.
///
/// # Examples
///
/// ```
/// use valuegen_engines::exhaustive::diagonal::CachedSeq;
///
/// let xs = CachedSeq::new(Box::new(10..13));
/// assert_eq!(xs.get(2), Some(12));
/// assert_eq!(xs.get(0), Some(10));
/// assert_eq!(xs.get(3), None);
/// assert_eq!(xs.known_len(), Some(3));
/// ```
pub struct CachedSeq<T> {
    cache: Rc<RefCell<Cache<T>>>,
}

impl<T> Clone for CachedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Rc::clone(&self.cache),
        }
    }
}

impl<T> fmt::Debug for CachedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("CachedSeq")
            .field("cached", &cache.items.len())
            .field("done", &cache.done)
            .finish()
    }
}

impl<T: Clone + 'static> CachedSeq<T> {
    /// Wraps `source` without pulling from it.
    pub fn new(source: Values<T>) -> Self {
        Self {
            cache: Rc::new(RefCell::new(Cache {
                source,
                items: Vec::new(),
                done: false,
            })),
        }
    }

    /// Element at `index`, pulling from the source as far as needed.
    pub fn get(&self, index: usize) -> Option<T> {
        let mut cache = self.cache.borrow_mut();
        while cache.items.len() <= index && !cache.done {
            match cache.source.next() {
                Some(x) => cache.items.push(x),
                None => cache.done = true,
            }
        }
        cache.items.get(index).cloned()
    }

    /// Length, once the source is known to have ended.
    pub fn known_len(&self) -> Option<usize> {
        let cache = self.cache.borrow();
        cache.done.then_some(cache.items.len())
    }

    /// Sequence of the elements from the start, sharing this memo.
    pub fn iter(&self) -> Values<T> {
        let seq = self.clone();
        let mut index = 0;
        Box::new(std::iter::from_fn(move || {
            let x = seq.get(index)?;
            index += 1;
            Some(x)
        }))
    }

    /// This memo as a product component.
    pub fn extent(&self) -> Rc<dyn Extent> {
        Rc::new(self.clone())
    }
}

impl<T: Clone + 'static> Extent for CachedSeq<T> {
    fn has(&self, index: usize) -> bool {
        if self.cache.borrow().items.len() > index {
            return true;
        }
        self.get(index).is_some()
    }
}

/// Constraint between consecutive indices of a tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TupleOrder {
    /// No constraint (lists, products).
    Free,
    /// `i[k] <= i[k + 1]` (bags).
    NonDecreasing,
    /// `i[k] < i[k + 1]` (subsets).
    Increasing,
}

/// All tuples with `tuple[k] <= bounds[k]`, total `d` and the given order,
/// in lexicographic order.
///
/// # Examples
///
/// ```
/// use valuegen_engines::exhaustive::diagonal::{shell_tuples, TupleOrder};
///
/// assert_eq!(
///     shell_tuples(2, &[2, 2], TupleOrder::Free),
///     vec![vec![0, 2], vec![1, 1], vec![2, 0]]
/// );
/// assert_eq!(shell_tuples(3, &[3, 3], TupleOrder::Increasing), vec![vec![0, 3], vec![1, 2]]);
/// ```
pub fn shell_tuples(d: usize, bounds: &[usize], order: TupleOrder) -> Vec<Vec<usize>> {
    let mut reach = vec![0usize; bounds.len() + 1];
    for k in (0..bounds.len()).rev() {
        reach[k] = reach[k + 1].saturating_add(bounds[k]);
    }
    let mut out = Vec::new();
    let mut prefix = Vec::with_capacity(bounds.len());
    fill(d, bounds, &reach, order, &mut prefix, &mut out);
    out
}

/// Smallest total the remaining `count` slots can reach after `last`.
fn least_rest(order: TupleOrder, last: usize, count: usize) -> usize {
    match order {
        TupleOrder::Free => 0,
        TupleOrder::NonDecreasing => last.saturating_mul(count),
        TupleOrder::Increasing => {
            let first = last + 1;
            first
                .saturating_mul(count)
                .saturating_add(count * count.saturating_sub(1) / 2)
        }
    }
}

fn fill(
    remaining: usize,
    bounds: &[usize],
    reach: &[usize],
    order: TupleOrder,
    prefix: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    let position = prefix.len();
    if position == bounds.len() {
        if remaining == 0 {
            out.push(prefix.clone());
        }
        return;
    }
    let low = match (order, prefix.last()) {
        (TupleOrder::NonDecreasing, Some(&last)) => last,
        (TupleOrder::Increasing, Some(&last)) => last + 1,
        _ => 0,
    };
    let high = bounds[position].min(remaining);
    let rest = bounds.len() - position - 1;
    for i in low..=high {
        if reach[position + 1] < remaining - i {
            continue;
        }
        if least_rest(order, i, rest) > remaining - i {
            break;
        }
        prefix.push(i);
        fill(remaining - i, bounds, reach, order, prefix, out);
        prefix.pop();
    }
}

/// Index tuples of a product, shell by shell.
///
/// Each shell `d` contains the tuples whose indices sum to `d`. The walk ends
/// once every component is known to be finite and `d` passes the largest
/// possible index sum; a product with an empty component is empty, and the
/// product of no components is the single empty tuple.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use valuegen_engines::exhaustive::diagonal::{ShellProduct, TupleOrder, Unbounded};
///
/// let first: Vec<Vec<usize>> =
///     ShellProduct::new(vec![Rc::new(Unbounded), Rc::new(Unbounded)], TupleOrder::Free)
///         .take(6)
///         .collect();
/// assert_eq!(
///     first,
///     vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![0, 2], vec![1, 1], vec![2, 0]]
/// );
/// ```
pub struct ShellProduct {
    extents: Vec<Rc<dyn Extent>>,
    order: TupleOrder,
    shell: usize,
    pending: std::vec::IntoIter<Vec<usize>>,
    finished: bool,
}

impl ShellProduct {
    /// Product of the given components.
    pub fn new(extents: Vec<Rc<dyn Extent>>, order: TupleOrder) -> Self {
        Self {
            extents,
            order,
            shell: 0,
            pending: Vec::new().into_iter(),
            finished: false,
        }
    }

    /// Largest index sum a valid tuple can have when every component is finite.
    fn largest_sum(&self, lengths: &[usize]) -> Option<usize> {
        match self.order {
            TupleOrder::Free | TupleOrder::NonDecreasing => {
                Some(lengths.iter().map(|len| len - 1).sum())
            }
            TupleOrder::Increasing => {
                let top = lengths.iter().copied().min().unwrap_or(0);
                let k = lengths.len();
                (k <= top).then(|| (0..k).map(|j| top - 1 - j).sum())
            }
        }
    }

    /// Opens shell `self.shell`, or marks the walk finished.
    fn open_shell(&mut self) {
        let d = self.shell;
        if self.extents.is_empty() {
            self.finished = d > 0;
            if !self.finished {
                self.pending = vec![Vec::new()].into_iter();
            }
            return;
        }
        let mut bounds = Vec::with_capacity(self.extents.len());
        let mut lengths = Vec::with_capacity(self.extents.len());
        for extent in &self.extents {
            if extent.has(d) {
                bounds.push(d);
                continue;
            }
            // Lengths are at most `d`; find the exact one.
            let len = (0..d).rev().find(|&i| extent.has(i)).map_or(0, |i| i + 1);
            if len == 0 {
                self.finished = true;
                return;
            }
            bounds.push(len - 1);
            lengths.push(len);
        }
        if lengths.len() == self.extents.len() {
            match self.largest_sum(&lengths) {
                Some(largest) if d <= largest => {}
                _ => {
                    self.finished = true;
                    return;
                }
            }
        }
        self.pending = shell_tuples(d, &bounds, self.order).into_iter();
    }
}

impl Iterator for ShellProduct {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if let Some(tuple) = self.pending.next() {
                return Some(tuple);
            }
            if self.finished {
                return None;
            }
            self.open_shell();
            self.shell += 1;
        }
    }
}

/// Diagonal walk over a family of rows.
///
/// Row `k` is requested from the factory when shell `k` begins; shell `d`
/// then pulls one element from each open row `0..=d` in order. The walk ends
/// when the factory has returned `None` and every opened row is drained. A
/// factory that never ends must eventually produce nonempty rows, or the
/// walk searches forever.
///
/// # Examples
///
/// ```
/// use valuegen_engines::exhaustive::diagonal::DiagonalRows;
/// use valuegen_engines::Values;
///
/// let rows = DiagonalRows::new(|k| {
///     (k < 3).then(|| Box::new((0..2).map(move |i| (k, i))) as Values<(usize, i32)>)
/// });
/// assert_eq!(
///     rows.collect::<Vec<_>>(),
///     vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
/// );
/// ```
pub struct DiagonalRows<T> {
    factory: Box<dyn FnMut(usize) -> Option<Values<T>>>,
    rows: Vec<Option<Values<T>>>,
    factory_done: bool,
    shell: usize,
    row: usize,
}

impl<T: 'static> DiagonalRows<T> {
    /// Walk over the rows produced by `factory(0)`, `factory(1)`, ...
    pub fn new(factory: impl FnMut(usize) -> Option<Values<T>> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            rows: Vec::new(),
            factory_done: false,
            shell: 0,
            row: 0,
        }
    }
}

impl<T: 'static> Iterator for DiagonalRows<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if self.row == 0 && !self.factory_done && self.rows.len() == self.shell {
                match (self.factory)(self.shell) {
                    Some(row) => self.rows.push(Some(row)),
                    None => self.factory_done = true,
                }
            }
            if self.rows.is_empty() {
                return None;
            }
            let last = self.shell.min(self.rows.len() - 1);
            if self.row > last {
                if self.factory_done && self.rows.iter().all(Option::is_none) {
                    return None;
                }
                self.shell += 1;
                self.row = 0;
                continue;
            }
            let r = self.row;
            self.row += 1;
            if let Some(row) = self.rows[r].as_mut() {
                match row.next() {
                    Some(x) => return Some(x),
                    None => self.rows[r] = None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naturals() -> Values<u32> {
        Box::new(0..)
    }

    #[test]
    fn test_shell_tuples_orders() {
        assert_eq!(
            shell_tuples(2, &[2, 2], TupleOrder::NonDecreasing),
            vec![vec![0, 2], vec![1, 1]]
        );
        assert!(shell_tuples(1, &[5, 5, 5], TupleOrder::Increasing).is_empty());
        assert_eq!(
            shell_tuples(3, &[3, 3, 3], TupleOrder::Increasing),
            vec![vec![0, 1, 2]]
        );
        assert_eq!(shell_tuples(3, &[1, 1], TupleOrder::Free), Vec::<Vec<usize>>::new());
        assert_eq!(shell_tuples(0, &[], TupleOrder::Free), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_two_dimensional_completeness() {
        // After (d + 1)(d + 2) / 2 tuples every pair with i + j <= d has appeared.
        for d in [0usize, 1, 5, 20] {
            let count = (d + 1) * (d + 2) / 2;
            let seen: Vec<Vec<usize>> =
                ShellProduct::new(vec![Rc::new(Unbounded), Rc::new(Unbounded)], TupleOrder::Free)
                    .take(count)
                    .collect();
            for i in 0..=d {
                for j in 0..=d - i {
                    assert!(seen.contains(&vec![i, j]), "missing ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn test_finite_product_ends() {
        let xs = CachedSeq::new(Box::new(0..3u8));
        let ys = CachedSeq::new(Box::new(0..2u8));
        let all: Vec<_> = ShellProduct::new(vec![xs.extent(), ys.extent()], TupleOrder::Free).collect();
        assert_eq!(all.len(), 6);
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
    }

    #[test]
    fn test_mixed_finite_and_infinite() {
        let xs = CachedSeq::new(Box::new(0..2u8));
        let ys = CachedSeq::new(naturals());
        let firsts: Vec<_> = ShellProduct::new(vec![xs.extent(), ys.extent()], TupleOrder::Free)
            .take(9)
            .collect();
        assert!(firsts.iter().all(|t| t[0] < 2));
        assert!(firsts.contains(&vec![1, 3]));
    }

    #[test]
    fn test_empty_component() {
        let xs = CachedSeq::new(Box::new(std::iter::empty::<u8>()));
        let ys = CachedSeq::new(naturals());
        assert_eq!(
            ShellProduct::new(vec![ys.extent(), xs.extent()], TupleOrder::Free).count(),
            0
        );
        assert_eq!(ShellProduct::new(Vec::new(), TupleOrder::Free).count(), 1);
    }

    #[test]
    fn test_subsets_of_small_set() {
        let xs = CachedSeq::new(Box::new(0..4u8));
        let extents = vec![xs.extent(), xs.extent()];
        let pairs: Vec<_> = ShellProduct::new(extents, TupleOrder::Increasing).collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|t| t[0] < t[1]));
        let too_many = vec![xs.extent(); 5];
        assert_eq!(ShellProduct::new(too_many, TupleOrder::Increasing).count(), 0);
    }

    #[test]
    fn test_diagonal_rows_infinite_family() {
        let rows = DiagonalRows::new(|k| Some(Box::new((0u32..).map(move |i| (k, i))) as Values<_>));
        let firsts: Vec<(usize, u32)> = rows.take(6).collect();
        assert_eq!(firsts, vec![(0, 0), (0, 1), (1, 0), (0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_diagonal_rows_skip_empty_rows() {
        let rows = DiagonalRows::new(|k| {
            (k < 4).then(|| Box::new((0..k % 2).map(move |i| (k, i))) as Values<_>)
        });
        assert_eq!(rows.collect::<Vec<(usize, usize)>>(), vec![(1, 0), (3, 0)]);
    }

    #[test]
    fn test_cached_seq_shares_memo() {
        let pulls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&pulls);
        let source: Values<u32> = Box::new((0..).inspect(move |_| *counter.borrow_mut() += 1));
        let xs = CachedSeq::new(source);
        let ys = xs.clone();
        assert_eq!(xs.get(4), Some(4));
        assert_eq!(ys.iter().take(5).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(*pulls.borrow(), 5);
    }
}
