use std::iter::Sum;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// How a rule's firing strength shapes its consequent set.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Clip the set at the firing strength (Mamdani)
    #[default]
    Min,
    /// Scale the set by the firing strength (Larsen)
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: &[F]) -> impl Iterator<Item = F> + '_ {
        membership.iter().map(move |&m| match self {
            Self::Min => F::min(strength, m),
            Self::Prod => strength * m,
        })
    }
}

/// Folds an implied set into the running aggregate with an elementwise max.
pub(crate) fn aggregate<F: Float>(agg: &mut [F], implied: impl IntoIterator<Item = F>) {
    for (a, m) in agg.iter_mut().zip(implied) {
        *a = F::max(*a, m);
    }
}

/// Method for defuzzificating the aggregated membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Weighted mean of the sample points
    #[default]
    Centroid,
    /// Point splitting the area under the membership function in half
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// `membership` must be sampled at `universe` and have a non-zero sum.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> F {
        debug_assert_eq!(universe.len(), membership.len());

        let two = F::one() + F::one();

        match self {
            Self::Centroid => {
                let num = universe.iter().zip(membership).map(|(&u, &m)| u * m).sum::<F>();
                let den = membership.iter().copied().sum::<F>();

                num / den
            },
            Self::Bisector => {
                if universe.len() < 2 {
                    return universe.first().copied().unwrap_or_else(F::nan);
                }

                // Trapezoidal area of each segment between neighbouring samples
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, &area) in areas.iter().enumerate() {
                    cum_area = cum_area + area;

                    if cum_area >= target {
                        let xp = [universe[i], universe[i + 1]];
                        let fp = [cum_area - area, cum_area];

                        return interp(target, &fp, &xp);
                    }
                }

                universe[universe.len() - 1]
            },
            Self::MeanOfMaximum | Self::SmallestOfMaximum | Self::LargestOfMaximum => {
                let maximum = membership.iter().copied().fold(F::neg_infinity(), F::max);
                let mut at_max = universe
                    .iter()
                    .zip(membership)
                    .filter_map(|(&u, &m)| (m == maximum).then_some(u));

                match self {
                    Self::SmallestOfMaximum => at_max.next().unwrap_or_else(F::nan),
                    Self::LargestOfMaximum => at_max.last().unwrap_or_else(F::nan),
                    _ => {
                        let (len, sum) = at_max.fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                        sum / len
                    },
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: [f64; 11] = [0., 1., 2., 3., 4., 5., 6., 7., 8., 9., 10.];

    #[test]
    fn implication_clips_or_scales() {
        let cool = [0., 0., 0., 0.5, 1., 0.5, 0.];

        assert_eq!(
            ImplicationOp::Min.call(0.6, &cool).collect::<Vec<_>>(),
            vec![0., 0., 0., 0.5, 0.6, 0.5, 0.]
        );
        assert_eq!(
            ImplicationOp::Prod.call(0.5, &cool).collect::<Vec<_>>(),
            vec![0., 0., 0., 0.25, 0.5, 0.25, 0.]
        );
        assert!(ImplicationOp::Min.call(0., &cool).all(|m| m == 0.));
    }

    #[test]
    fn aggregate_takes_max() {
        let mut agg = vec![0., 0.2, 0.7, 0.];

        aggregate(&mut agg, [0.5, 0.1, 0.9, 0.]);

        assert_eq!(agg, vec![0.5, 0.2, 0.9, 0.]);
    }

    #[test]
    fn centroid_of_symmetric_set_is_its_peak() {
        let membership = [0., 0., 0., 0.5, 0.5, 0.5, 0., 0., 0., 0., 0.];

        assert_eq!(DefuzzificationOp::Centroid.call(&UNIVERSE, &membership), 4.);
    }

    #[test]
    fn centroid_weighted_mean() {
        let membership = [0., 0., 0., 0., 0., 0., 0., 0., 0., 0.5, 1.];
        let expected = (9. * 0.5 + 10. * 1.) / 1.5;

        assert_eq!(DefuzzificationOp::Centroid.call(&UNIVERSE, &membership), expected);
    }

    #[test]
    fn bisector_splits_area() {
        let flat = [1.; 11];

        assert_eq!(DefuzzificationOp::Bisector.call(&UNIVERSE, &flat), 5.);

        let membership = [0., 0., 0., 0.5, 1., 0.5, 0., 0., 0., 0., 0.];

        assert_eq!(DefuzzificationOp::Bisector.call(&UNIVERSE, &membership), 4.);
    }

    #[test]
    fn bisector_of_short_universes() {
        assert_eq!(DefuzzificationOp::Bisector.call(&[3.], &[1.]), 3.);
        assert!(DefuzzificationOp::Bisector.call::<f64>(&[], &[]).is_nan());
    }

    #[test]
    fn maxima() {
        let membership = [0., 0., 0.3, 0.6, 0.6, 0.6, 0.2, 0., 0., 0., 0.];

        assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&UNIVERSE, &membership), 4.);
        assert_eq!(DefuzzificationOp::SmallestOfMaximum.call(&UNIVERSE, &membership), 3.);
        assert_eq!(DefuzzificationOp::LargestOfMaximum.call(&UNIVERSE, &membership), 5.);
    }

    #[test]
    fn ops_deserialize_from_snake_case() {
        #[derive(Deserialize)]
        struct Settings {
            implication: ImplicationOp,
            defuzzification: DefuzzificationOp,
        }

        let settings: Settings = toml::from_str("implication = \"prod\"\ndefuzzification = \"mean_of_maximum\"").unwrap();

        assert_eq!(settings.implication, ImplicationOp::Prod);
        assert_eq!(settings.defuzzification, DefuzzificationOp::MeanOfMaximum);
    }
}
