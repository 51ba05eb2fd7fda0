use crate::{Error, Result};
use alloc::string::ToString;
use ndarray::{s, Array1, ArrayView1};
use num_traits::NumAssign;

/// Convolution mode determines behavior near edges and output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Full convolution, output size is `in1.len() + in2.len() - 1`
    #[default]
    Full,
    /// Valid convolution, output size is `max(in1.len(), in2.len()) - min(in1.len(), in2.len()) + 1`
    Valid,
    /// Same convolution, output size is `max(in1.len(), in2.len())`
    Same,
}

impl ConvolveMode {
    /// Output length of a convolution of inputs with lengths `n` and `m`.
    ///
    /// `None` when either length is zero, since such a convolution is undefined.
    pub fn output_len(self, n: usize, m: usize) -> Option<usize> {
        if n == 0 || m == 0 {
            return None;
        }
        Some(match self {
            ConvolveMode::Full => n + m - 1,
            ConvolveMode::Valid => n.max(m) - n.min(m) + 1,
            ConvolveMode::Same => n.max(m),
        })
    }
}

/// Best effort parallel behaviour with numpy's convolve method. We take `v` as the convolution
/// kernel.
///
/// Returns the discrete, linear convolution of two one-dimensional sequences, computed as the
/// direct double sum `out[i + j] += a[i] * v[j]`.
///
/// # Parameters
/// * `a` : (N,) [[array_like]]([ndarray::Array1])  
///   Signal to be (linearly) convolved.
/// * `v` : (M,) [[array_like]]([ndarray::Array1])  
///   Second one-dimensional input array.
/// * `mode` : [ConvolveMode]  
///   [ConvolveMode::Full]:  
///   By default, mode is 'full'.  This returns the convolution at each point of overlap, with an
///   output shape of (N+M-1,). At the end-points of the convolution, the signals do not overlap
///   completely, and boundary effects may be seen.
///
///   [ConvolveMode::Same]:  
///   Mode 'same' returns output of length ``max(M, N)``.  Boundary effects are still visible.
///
///   [ConvolveMode::Valid]:  
///   Mode 'valid' returns output of length ``max(M, N) - min(M, N) + 1``.  The convolution
///   product is only given for points where the signals overlap completely.  Values outside the
///   signal boundary have no effect.
///
/// # Errors
/// Either input being empty is an [Error::InvalidArg], as in numpy.
///
/// # Examples
/// With [ConvolveMode::Full]:
/// ```
/// use ndarray::array;
/// use dsp_rs_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![0., 1., 2.5, 4., 1.5];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, expected);
/// ```
/// With [ConvolveMode::Same]:
/// ```
/// use ndarray::array;
/// use dsp_rs_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![1., 2.5, 4.];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Same).unwrap();
/// assert_eq!(result, expected);
/// ```
/// With [ConvolveMode::Valid]:
/// ```
/// use ndarray::array;
/// use dsp_rs_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![2.5];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Valid).unwrap();
/// assert_eq!(result, expected);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: NumAssign + Copy,
{
    if a.is_empty() {
        return Err(Error::InvalidArg {
            arg: "a".to_string(),
            reason: "a cannot be empty".to_string(),
        });
    }
    if v.is_empty() {
        return Err(Error::InvalidArg {
            arg: "v".to_string(),
            reason: "v cannot be empty".to_string(),
        });
    }

    let (n, m) = (a.len(), v.len());
    let (Some(full_len), Some(len)) = (ConvolveMode::Full.output_len(n, m), mode.output_len(n, m))
    else {
        return Err(Error::InvalidArg {
            arg: "a".to_string(),
            reason: "a and v cannot be empty".to_string(),
        });
    };
    let mut full = Array1::<T>::zeros(full_len);
    for (i, &ai) in a.iter().enumerate() {
        for (j, &vj) in v.iter().enumerate() {
            full[i + j] += ai * vj;
        }
    }

    let start = match mode {
        ConvolveMode::Full => return Ok(full),
        ConvolveMode::Same => (n.min(m) - 1) / 2,
        ConvolveMode::Valid => n.min(m) - 1,
    };
    Ok(full.slice(s![start..start + len]).to_owned())
}
