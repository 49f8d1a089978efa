//! Sources of random indices, as consumed by [`List::shuffle`].
//!
//! [`List::shuffle`]: crate::List::shuffle

use crate::error::{Error, Result};

/// A source of uniformly distributed indices.
///
/// Implementors only provide [`sample`](RandomSource::sample); callers go
/// through [`random_index`](RandomSource::random_index), which checks the
/// range and the returned value.
///
/// Any `FnMut(usize, usize) -> usize` closure is a `RandomSource`:
///
/// ```
/// use ds_list::{List, RandomSource};
///
/// // Always picking `min` leaves a shuffled list in order.
/// let mut first = |min: usize, _max: usize| min;
/// assert_eq!(first.random_index(3, 7), Ok(3));
///
/// let list = List::from([1, 2, 3]);
/// assert_eq!(list.shuffled(&mut first).unwrap(), list);
/// ```
pub trait RandomSource {
    /// Draw a value in `min..max`. Only called with `min < max`.
    fn sample(&mut self, min: usize, max: usize) -> usize;

    /// Draw a value in `min..max`, where `max` is exclusive.
    ///
    /// An empty range `min..min` yields `min` without drawing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `max < min`, or if the source
    /// produced a value outside `min..max`.
    fn random_index(&mut self, min: usize, max: usize) -> Result<usize> {
        if max < min {
            return Err(Error::InvalidInput(format!(
                "random range {}..{} has max < min",
                min, max
            )));
        }
        if min == max {
            return Ok(min);
        }
        let value = self.sample(min, max);
        if (min..max).contains(&value) {
            Ok(value)
        } else {
            Err(Error::InvalidInput(format!(
                "random source returned {} outside {}..{}",
                value, min, max
            )))
        }
    }
}

impl<F> RandomSource for F
where
    F: FnMut(usize, usize) -> usize,
{
    fn sample(&mut self, min: usize, max: usize) -> usize {
        self(min, max)
    }
}

#[cfg(feature = "rand")]
pub use self::uniform::Uniform;

#[cfg(feature = "rand")]
mod uniform {
    use super::RandomSource;
    use rand::rngs::{StdRng, ThreadRng};
    use rand::{Rng, SeedableRng};

    /// A [`RandomSource`] drawing uniformly from a [`rand::Rng`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::{List, Uniform};
    ///
    /// let list = List::from_iter(0..10);
    /// let a = list.shuffled(&mut Uniform::seeded(42)).unwrap();
    /// let b = list.shuffled(&mut Uniform::seeded(42)).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.sorted(), list);
    /// ```
    #[derive(Debug, Clone)]
    pub struct Uniform<R> {
        rng: R,
    }

    impl<R: Rng> Uniform<R> {
        /// A source drawing from any `rng`.
        ///
        /// # Examples
        ///
        /// ```
        /// use ds_list::{RandomSource, Uniform};
        /// use rand::rngs::StdRng;
        /// use rand::SeedableRng;
        ///
        /// let mut source = Uniform::new(StdRng::seed_from_u64(5));
        /// let index = source.random_index(10, 20).unwrap();
        /// assert!((10..20).contains(&index));
        /// ```
        pub fn new(rng: R) -> Self {
            Self { rng }
        }
    }

    impl Uniform<ThreadRng> {
        /// A source backed by the thread-local generator.
        pub fn thread() -> Self {
            Self::new(rand::rng())
        }
    }

    impl Uniform<StdRng> {
        /// A reproducible source seeded with `seed`.
        pub fn seeded(seed: u64) -> Self {
            Self::new(StdRng::seed_from_u64(seed))
        }
    }

    impl<R: Rng> RandomSource for Uniform<R> {
        fn sample(&mut self, min: usize, max: usize) -> usize {
            self.rng.random_range(min..max)
        }
    }
}
