use super::{BoxedScale, Scale, unit};
use crate::error::{Error, Result};
use crate::value::{ScaleValue, ValueType};

/// A weighted mixture of scales sharing one output type.
///
/// The cumulative proportions split `[0, 1]` into bins `[l_i, u_i)`, the
/// last one closed on the right. An input `u` picks the bin that contains
/// it, is rescaled to the local coordinate `(u − l_i) / (u_i − l_i)`, and
/// is handed to that bin's component. Inputs within one machine epsilon of
/// `0` or `1` go to the first or last bin, and a local coordinate that
/// reaches `1` is nudged just below it.
///
/// # Examples
///
/// ```
/// use quasisweep::scale::{Constant, Mixture, Scale};
///
/// let mix = Mixture::builder()
///     .component(0.2, Constant::new('a'.to_string()))
///     .component(0.5, Constant::new('b'.to_string()))
///     .component(0.3, Constant::new('c'.to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(mix.transform(0.0), "a");
/// assert_eq!(mix.transform(0.5), "b");
/// assert_eq!(mix.transform(1.0), "c");
/// ```
#[derive(Debug)]
pub struct Mixture<T> {
    components: Vec<BoxedScale<T>>,
    proportions: Vec<f64>,
    /// `k + 1` cumulative edges, `0.0` first and exactly `1.0` last.
    edges: Vec<f64>,
}

impl<T: ScaleValue> Mixture<T> {
    /// Starts a builder with normalization enabled and `atol = 1e-8`.
    #[must_use]
    pub fn builder() -> MixtureBuilder<T> {
        MixtureBuilder {
            components: Vec::new(),
            normalize: true,
            atol: MixtureBuilder::<T>::DEFAULT_ATOL,
        }
    }

    /// Builds a normalized mixture from `(proportion, scale)` pairs.
    ///
    /// # Errors
    ///
    /// See [`MixtureBuilder::build`].
    pub fn new(components: Vec<(f64, BoxedScale<T>)>) -> Result<Self> {
        MixtureBuilder {
            components,
            normalize: true,
            atol: MixtureBuilder::<T>::DEFAULT_ATOL,
        }
        .build()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always `false`: a mixture has at least one component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the proportions after normalization.
    #[must_use]
    pub fn proportions(&self) -> &[f64] {
        &self.proportions
    }

    /// Returns the `k + 1` cumulative bin edges.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the bin selected by `u` and the local coordinate within it.
    ///
    /// The local coordinate lies in `[0, 1)`.
    #[must_use]
    pub fn bin_of(&self, u: f64) -> (usize, f64) {
        let last = self.components.len() - 1;
        let u = unit(u);
        let bin = if u <= f64::EPSILON {
            0
        } else if u >= 1.0 - f64::EPSILON {
            last
        } else {
            self.edges[1..].partition_point(|&edge| edge <= u).min(last)
        };
        let (lower, upper) = (self.edges[bin], self.edges[bin + 1]);
        let local = ((u - lower) / (upper - lower)).clamp(0.0, 1.0 - f64::EPSILON);
        (bin, local)
    }
}

impl<T: ScaleValue> Scale for Mixture<T> {
    type Output = T;

    fn transform(&self, u: f64) -> T {
        let (bin, local) = self.bin_of(u);
        self.components[bin].transform(local)
    }

    /// The type every component shares, or the static type of `T` when
    /// components disagree.
    fn output_type(&self) -> ValueType {
        let first = self.components[0].output_type();
        if self.components.iter().all(|c| c.output_type() == first) {
            first
        } else {
            T::VALUE_TYPE
        }
    }
}

/// Builder for [`Mixture`] scales.
#[derive(Debug)]
pub struct MixtureBuilder<T> {
    components: Vec<(f64, BoxedScale<T>)>,
    normalize: bool,
    atol: f64,
}

impl<T: ScaleValue> MixtureBuilder<T> {
    /// Default tolerance for the sum-to-one check.
    pub const DEFAULT_ATOL: f64 = 1e-8;

    /// Appends a component with the given proportion.
    #[must_use]
    pub fn component<S>(mut self, proportion: f64, scale: S) -> Self
    where
        S: Scale<Output = T> + 'static,
    {
        self.components.push((proportion, Box::new(scale)));
        self
    }

    /// Whether to rescale proportions to sum to one (default `true`).
    #[must_use]
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the tolerance for the sum-to-one check when normalization is off.
    #[must_use]
    pub fn atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Validates the proportions and builds the mixture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMixture`] without components,
    /// [`Error::InvalidProportion`] for a proportion that is not finite and
    /// strictly positive, [`Error::ProportionSum`] when normalization is off
    /// and the proportions do not sum to one within `atol`, and
    /// [`Error::ZeroWidthBin`] when a bin collapses to zero width.
    pub fn build(self) -> Result<Mixture<T>> {
        if self.components.is_empty() {
            return Err(Error::EmptyMixture);
        }
        for (index, &(value, _)) in self.components.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidProportion { index, value });
            }
        }

        let sum: f64 = self.components.iter().map(|(p, _)| p).sum();
        if !self.normalize && ((sum - 1.0).abs() > self.atol || self.atol.is_nan()) {
            return Err(Error::ProportionSum {
                sum,
                atol: self.atol,
            });
        }

        let (proportions, components): (Vec<f64>, Vec<BoxedScale<T>>) = self
            .components
            .into_iter()
            .map(|(p, scale)| (if self.normalize { p / sum } else { p }, scale))
            .unzip();

        let mut edges = Vec::with_capacity(proportions.len() + 1);
        edges.push(0.0);
        let mut acc = 0.0;
        for p in &proportions {
            acc += p;
            edges.push(acc);
        }
        // Absorb round-off: the last bin always closes at exactly 1.
        if let Some(last) = edges.last_mut() {
            *last = 1.0;
        }
        if let Some(bin) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::ZeroWidthBin(bin));
        }

        trace_debug!(components = proportions.len(), "built mixture scale");
        Ok(Mixture {
            components,
            proportions,
            edges,
        })
    }
}
