//! Reduction of window values to one aggregate.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::WindowError;

type ReduceFn = dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync;

/// Function applied to the (possibly interpolated) window values.
///
/// Built-in reductions propagate NaN: a window that still contains a missing
/// value reduces to NaN.
#[derive(Clone, Default)]
pub enum Reduction {
    /// Sum of values (the usual choice for precipitation or water balance).
    #[default]
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Minimum value.
    Min,
    /// Maximum value.
    Max,
    /// Median value.
    Median,
    /// Caller-supplied reduction.
    Custom {
        /// Label reported in result metadata.
        name: String,
        /// The reduction itself.
        func: Arc<ReduceFn>,
    },
}

impl Reduction {
    /// Wraps a closure as a named reduction.
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Label used in metadata and configuration files.
    pub fn name(&self) -> &str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Custom { name, .. } => name,
        }
    }

    /// Applies the reduction.
    ///
    /// # Errors
    ///
    /// Only custom reductions fail; the message is returned verbatim.
    pub fn reduce(&self, values: &[f64]) -> Result<f64, String> {
        let has_nan = values.iter().any(|v| v.is_nan());
        let out = match self {
            Self::Sum => values.iter().sum::<f64>(),
            Self::Mean if values.is_empty() => f64::NAN,
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Self::Min if has_nan || values.is_empty() => f64::NAN,
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max if has_nan || values.is_empty() => f64::NAN,
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Median if has_nan => f64::NAN,
            Self::Median => sindex_stats::median(values),
            Self::Custom { func, .. } => return func(values),
        };
        Ok(out)
    }
}

impl fmt::Debug for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reduction({})", self.name())
    }
}

impl PartialEq for Reduction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom { func: a, .. }, Self::Custom { func: b, .. }) => Arc::ptr_eq(a, b),
            (Self::Custom { .. }, _) | (_, Self::Custom { .. }) => false,
            _ => self.name() == other.name(),
        }
    }
}

impl FromStr for Reduction {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mean" => Ok(Self::Mean),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "median" => Ok(Self::Median),
            other => Err(WindowError::UnknownName {
                what: "reduction",
                name: other.to_string(),
            }),
        }
    }
}
