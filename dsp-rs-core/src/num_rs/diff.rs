use itertools::Itertools;
use ndarray::{Array1, ArrayView1};
use num_traits::Num;

/// Best effort parallel behaviour with numpy's diff method (`n = 1`).
///
/// Returns `a[i + 1] - a[i]`. When `prepend` is given it is placed in front of
/// `a` before differencing, so the output keeps the input length and
/// `out[0] = a[0] - prepend`.
///
/// ```
/// use ndarray::array;
/// use dsp_rs_core::num_rs::diff;
///
/// let a = array![1., 2., 4., 7.];
/// assert_eq!(diff((&a).into(), None), array![1., 2., 3.]);
/// assert_eq!(diff((&a).into(), Some(0.)), array![1., 1., 2., 3.]);
/// ```
pub fn diff<T>(a: ArrayView1<T>, prepend: Option<T>) -> Array1<T>
where
    T: Num + Copy,
{
    prepend
        .into_iter()
        .chain(a.iter().copied())
        .tuple_windows()
        .map(|(a0, a1)| a1 - a0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use ndarray::array;

    #[test]
    fn single_element_without_prepend_is_empty() {
        let a = array![5.0f64];
        assert!(diff((&a).into(), None).is_empty());
    }

    #[test]
    fn prepend_keeps_length() {
        let a = array![5i32, 3, 3, 10];
        assert_eq!(diff((&a).into(), Some(0)), array![5, -2, 0, 7]);
    }

    #[test]
    fn empty_input_with_prepend_is_empty() {
        let a = Array1::<f32>::zeros(0);
        assert!(diff((&a).into(), Some(0.0)).is_empty());
    }
}
