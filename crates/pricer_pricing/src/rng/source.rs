//! Standard normal stream abstraction.

/// A stream of independent standard normal variates.
///
/// The simulator draws every variate it needs from one `NormalSource` in a
/// fixed order, so two sources yielding the same sequence produce identical
/// ensembles. Implementations need not be thread-safe; draws are taken
/// before any parallel work starts.
///
/// # Examples
/// ```
/// use pricer_pricing::rng::NormalSource;
///
/// /// Replays a fixed cycle of shocks.
/// struct Cycle {
///     values: Vec<f64>,
///     next: usize,
/// }
///
/// impl NormalSource for Cycle {
///     fn next_normal(&mut self) -> f64 {
///         let z = self.values[self.next % self.values.len()];
///         self.next += 1;
///         z
///     }
/// }
///
/// let mut source = Cycle { values: vec![1.0, -1.0], next: 0 };
/// let mut buffer = [0.0; 3];
/// source.fill_normal(&mut buffer);
/// assert_eq!(buffer, [1.0, -1.0, 1.0]);
/// ```
pub trait NormalSource {
    /// Draws one standard normal variate.
    fn next_normal(&mut self) -> f64;

    /// Fills `buffer` with consecutive variates.
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_normal();
        }
    }
}

impl<S: NormalSource + ?Sized> NormalSource for &mut S {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }

    #[inline]
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        (**self).fill_normal(buffer)
    }
}
