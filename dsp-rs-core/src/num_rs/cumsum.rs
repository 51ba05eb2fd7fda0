use ndarray::{Array1, ArrayView1};
use num_traits::NumAssign;

/// Best effort parallel behaviour with numpy's cumsum method.
///
/// Returns the cumulative sum of the elements of `a`; `out[0] = a[0]` and
/// `out[i] = out[i - 1] + a[i]`.
///
/// ```
/// use ndarray::array;
/// use dsp_rs_core::num_rs::cumsum;
///
/// let a = array![1., 2., 3., 4.];
/// assert_eq!(cumsum((&a).into()), array![1., 3., 6., 10.]);
/// ```
pub fn cumsum<T>(a: ArrayView1<T>) -> Array1<T>
where
    T: NumAssign + Copy,
{
    let mut acc = T::zero();
    a.iter()
        .map(|&ai| {
            acc += ai;
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use ndarray::array;

    #[test]
    fn empty_input_yields_empty_output() {
        let a = Array1::<f64>::zeros(0);
        assert!(cumsum((&a).into()).is_empty());
    }

    #[test]
    fn integers_accumulate() {
        let a = array![3i32, -1, 4, -1, 5];
        assert_eq!(cumsum((&a).into()), array![3, 2, 6, 5, 10]);
    }
}
