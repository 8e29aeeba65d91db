pub trait Mean {
    /// Arithmetic mean of the remaining items, `None` for an empty iterator.
    fn mean(self) -> Option<f64>;
}

impl<I> Mean for I
where
    I: Iterator<Item = f64>,
{
    fn mean(self) -> Option<f64> {
        let (sum, count) = self.fold((0., 0_u64), |(sum, count), next| (sum + next, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}
