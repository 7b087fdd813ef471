//! Sequence adapters shared by both engines.

use tracing::debug;

use crate::error::GenerationError;
use crate::provider::Values;

/// The empty sequence.
#[inline]
pub fn empty<T: 'static>() -> Values<T> {
    Box::new(std::iter::empty())
}

/// The infinite constant sequence of `x`.
#[inline]
pub fn constant<T: Clone + 'static>(x: T) -> Values<T> {
    Box::new(std::iter::repeat(x))
}

/// The one-element sequence of `x`.
#[inline]
pub fn single<T: 'static>(x: T) -> Values<T> {
    Box::new(std::iter::once(x))
}

/// Unwraps a source advertised as null-free.
///
/// Yields `Ok` for each present value. The first `None` yields
/// [`GenerationError::NullTaint`] carrying its position and ends the
/// sequence; nothing past the offending draw is pulled.
///
/// # Examples
///
/// ```
/// use valuegen_engines::iter::require_present;
/// use valuegen_engines::GenerationError;
///
/// let source = Box::new(vec![Some(1), Some(2), None, Some(4)].into_iter());
/// let drawn: Vec<_> = require_present(source).collect();
/// assert_eq!(
///     drawn,
///     vec![Ok(1), Ok(2), Err(GenerationError::NullTaint { position: 2 })]
/// );
/// ```
pub fn require_present<T: 'static>(
    xs: Values<Option<T>>,
) -> Values<Result<T, GenerationError>> {
    let mut source = xs.enumerate();
    let mut tainted = false;
    Box::new(std::iter::from_fn(move || {
        if tainted {
            return None;
        }
        let (position, x) = source.next()?;
        match x {
            Some(x) => Some(Ok(x)),
            None => {
                tainted = true;
                Some(Err(GenerationError::NullTaint { position }))
            }
        }
    }))
}

/// Alternates between two sequences, continuing with the survivor once one ends.
pub fn interleave<T: 'static>(xs: Values<T>, ys: Values<T>) -> Values<T> {
    let mut sources = [xs.fuse(), ys.fuse()];
    let mut turn = 0;
    Box::new(std::iter::from_fn(move || {
        for _ in 0..2 {
            let next = sources[turn].next();
            turn = 1 - turn;
            if next.is_some() {
                return next;
            }
        }
        None
    }))
}

/// Consecutive fruitless pulls after which a search over a source gives up.
///
/// A source that yields this many unwanted values in a row is treated as
/// having run dry, so searches for distinct or matching values terminate on
/// sources that can never satisfy them.
pub const PATIENCE: usize = 1 << 12;

/// Elements of `xs` accepted by `keep`.
///
/// Ends once [`PATIENCE`] consecutive elements are rejected, or with `xs`.
///
/// # Examples
///
/// ```
/// use valuegen_engines::iter::filter_bounded;
///
/// let evens = filter_bounded(Box::new(0..), |x| x % 2 == 0);
/// assert_eq!(evens.take(3).collect::<Vec<u32>>(), vec![0, 2, 4]);
///
/// let never = filter_bounded(Box::new(std::iter::repeat(1)), |&x| x != 1);
/// assert_eq!(never.count(), 0);
/// ```
pub fn filter_bounded<T: 'static>(
    xs: Values<T>,
    mut keep: impl FnMut(&T) -> bool + 'static,
) -> Values<T> {
    let mut source = xs.fuse();
    let mut dry = false;
    Box::new(std::iter::from_fn(move || {
        if dry {
            return None;
        }
        for _ in 0..PATIENCE {
            let x = source.next()?;
            if keep(&x) {
                return Some(x);
            }
        }
        debug!(patience = PATIENCE, "filter rejected every recent element, ending");
        dry = true;
        None
    }))
}
