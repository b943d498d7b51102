//! Grid element trait for generic cell values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a grid cell.
///
/// Implemented for every `Copy` numeric type via the blanket impl below;
/// the bound exists so `Grid<T>` can zero-fill, compare, and convert cell
/// values without naming a concrete type.
pub trait GridElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Convert self to f64, if representable
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

impl<T> GridElement for T where
    T: Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
}
