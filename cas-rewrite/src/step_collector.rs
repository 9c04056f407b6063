/// A type that collects the steps of a rewrite.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which discards every step. Use it
/// when the steps are not needed, so that the rewriter does not have to keep copies of the
/// intermediate trees.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
