//! Discrete differentiation kernels shared by the edge and noise metrics.
//!
//! Both metrics are built on separable convolutions: the Sobel operator for
//! first derivatives and a binomially smoothed second-difference for the
//! Laplacian-style response. Borders are handled by clamping sample
//! coordinates to the image edge (replicate), which keeps the response
//! deterministic without shrinking the output.

/// Apply a separable filter: `kx` along rows, then `ky` along columns.
///
/// Kernel lengths must be odd. Returns an empty vector for an empty input.
pub(crate) fn separable_filter(
    data: &[f32],
    width: usize,
    height: usize,
    kx: &[f32],
    ky: &[f32],
) -> Vec<f32> {
    if width == 0 || height == 0 || data.len() < width * height {
        return Vec::new();
    }

    let rx = (kx.len() / 2) as isize;
    let ry = (ky.len() / 2) as isize;

    // Horizontal pass
    let mut horizontal = vec![0.0f32; width * height];
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0f32;
            for (i, &c) in kx.iter().enumerate() {
                let sx = (x as isize + i as isize - rx).clamp(0, width as isize - 1) as usize;
                acc += c * row[sx];
            }
            horizontal[y * width + x] = acc;
        }
    }

    // Vertical pass
    let mut out = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (i, &c) in ky.iter().enumerate() {
                let sy = (y as isize + i as isize - ry).clamp(0, height as isize - 1) as usize;
                acc += c * horizontal[sy * width + x];
            }
            out[y * width + x] = acc;
        }
    }

    out
}

/// Sobel first-derivative responses in the row (gx) and column (gy) directions
pub(crate) fn sobel_gradients(data: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    let deriv = [-1.0, 0.0, 1.0];
    let smooth = [1.0, 2.0, 1.0];
    let gx = separable_filter(data, width, height, &deriv, &smooth);
    let gy = separable_filter(data, width, height, &smooth, &deriv);
    (gx, gy)
}

/// Laplacian-style second-derivative response at the given window size.
///
/// The response is the sum of the second derivatives along both axes, each
/// computed separably with a `[1, -2, 1]` second difference convolved with a
/// binomial smoothing row. Window size 3 reduces to the classic 3x3 operator
/// and size 5 to the `[1, 0, -2, 0, 1]` / `[1, 4, 6, 4, 1]` pair. Even or
/// undersized windows are rounded up to the next odd size >= 3.
pub(crate) fn laplacian_response(
    data: &[f32],
    width: usize,
    height: usize,
    window_size: usize,
) -> Vec<f32> {
    let window = normalize_window(window_size);
    let deriv = second_derivative_kernel(window);
    let smooth = binomial_row(window);

    let dxx = separable_filter(data, width, height, &deriv, &smooth);
    let dyy = separable_filter(data, width, height, &smooth, &deriv);

    dxx.iter().zip(dyy.iter()).map(|(a, b)| a + b).collect()
}

/// Round a requested window up to the next odd size >= 3
pub(crate) fn normalize_window(window_size: usize) -> usize {
    let w = window_size.max(3);
    if w % 2 == 0 {
        w + 1
    } else {
        w
    }
}

/// Row of Pascal's triangle with `len` entries (binomial smoothing kernel)
fn binomial_row(len: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..len {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Second-difference kernel of the given odd length: `[1, -2, 1]` convolved
/// with a binomial row of length `len - 2`
fn second_derivative_kernel(len: usize) -> Vec<f32> {
    convolve(&[1.0, -2.0, 1.0], &binomial_row(len - 2))
}

fn convolve(a: &[f32], b: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; a.len() + b.len() - 1];
    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i + j] += av * bv;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_rows() {
        assert_eq!(binomial_row(1), vec![1.0]);
        assert_eq!(binomial_row(3), vec![1.0, 2.0, 1.0]);
        assert_eq!(binomial_row(5), vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn test_second_derivative_kernels() {
        assert_eq!(second_derivative_kernel(3), vec![1.0, -2.0, 1.0]);
        assert_eq!(second_derivative_kernel(5), vec![1.0, 0.0, -2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_window_normalization() {
        assert_eq!(normalize_window(0), 3);
        assert_eq!(normalize_window(3), 3);
        assert_eq!(normalize_window(4), 5);
        assert_eq!(normalize_window(5), 5);
    }

    #[test]
    fn test_sobel_on_horizontal_ramp() {
        // f(x, y) = x: interior gx is 8 (derivative 2, smoothing weight 4)
        let width = 8;
        let height = 8;
        let data: Vec<f32> = (0..width * height).map(|i| (i % width) as f32).collect();

        let (gx, gy) = sobel_gradients(&data, width, height);
        assert!((gx[3 * width + 3] - 8.0).abs() < 1e-5);
        assert!(gy[3 * width + 3].abs() < 1e-5);
    }

    #[test]
    fn test_laplacian_of_constant_is_zero() {
        let data = vec![7.5f32; 64];
        let resp = laplacian_response(&data, 8, 8, 5);
        assert!(resp.iter().all(|&r| r.abs() < 1e-5));
    }

    #[test]
    fn test_empty_input() {
        let (gx, gy) = sobel_gradients(&[], 0, 0);
        assert!(gx.is_empty());
        assert!(gy.is_empty());
        assert!(laplacian_response(&[], 0, 0, 5).is_empty());
    }
}
