use num::Float;

/// Similar to numpy.interp for a single point: linear interpolation of `x`
/// over the sample coordinates `xp`/`fp`, saturating at the edge values
/// outside `[xp[0], xp[n - 1]]`. `xp` must be increasing.
pub(crate) fn interp<F: Float>(x: F, xp: &[F], fp: &[F]) -> F {
    debug_assert_eq!(xp.len(), fp.len());

    let (Some(&first), Some(&last)) = (xp.first(), xp.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= first {
        return fp[0];
    }
    if x >= last {
        return fp[fp.len() - 1];
    }

    // First sample strictly greater than x; guaranteed to be in 1..len
    let i = xp.partition_point(|&p| p <= x);
    let (x1, x2) = (xp[i - 1], xp[i]);
    let (y1, y2) = (fp[i - 1], fp[i]);

    if x == x1 {
        return y1;
    }

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let out: Vec<f64> = [0., 1., 1.5, 2.72, 3.24].iter().map(|&x| interp(x, &xs, &ys)).collect();

    assert_eq!(out, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let out: Vec<f64> = [2.5, -1., 7.5].iter().map(|&x| interp(x, &xs, &ys)).collect();

    assert_eq!(out, vec![4., 0., 2.]);
}

#[test]
fn test_interp_empty() {
    assert_eq!(interp::<f64>(1., &[], &[]), 0.);
}
