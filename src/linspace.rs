use num::Float;

/// Evenly spaced samples over a closed interval, like `numpy.linspace`.
pub(crate) struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = if n > 1 {
            // n - 1 is at most the number of universe points, well within F's range
            let num_steps = F::from(n - 1).unwrap_or_else(F::one);
            (max - min) / num_steps
        } else {
            F::zero()
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = F::from(self.index)?;
        self.index += 1;

        Some(self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 10., 11).collect();

    assert_eq!(points.len(), 11);
    assert_eq!(points[0], 0.);
    assert_eq!(points[5], 5.);
    assert_eq!(points[10], 10.);

    let single: Vec<f64> = Linspace::new(3., 3., 1).collect();

    assert_eq!(single, vec![3.]);
    assert_eq!(Linspace::<f64>::new(0., 1., 0).count(), 0);
}
