//! Separable 2D FFT over row-major buffers and the quadrant shift.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Forward 2D DFT of a row-major `width x height` buffer, in place.
///
/// Rows are transformed first, then columns through a transposed copy, and
/// the result is transposed back so the output keeps the input layout. The
/// transform is not normalized (the DC term equals the sum of all samples).
pub fn fft_2d(width: usize, height: usize, buffer: &mut [Complex<f64>]) {
    debug_assert_eq!(buffer.len(), width * height);
    if width == 0 || height == 0 {
        return;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft_row = planner.plan_fft_forward(width);
    let mut scratch = vec![Complex::default(); fft_row.get_inplace_scratch_len()];
    for row in buffer.chunks_exact_mut(width) {
        fft_row.process_with_scratch(row, &mut scratch);
    }

    let mut columns = transpose(width, height, buffer);
    let fft_col = planner.plan_fft_forward(height);
    scratch.resize(fft_col.get_inplace_scratch_len(), Complex::default());
    for col in columns.chunks_exact_mut(height) {
        fft_col.process_with_scratch(col, &mut scratch);
    }

    let restored = transpose(height, width, &columns);
    buffer.copy_from_slice(&restored);
}

fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut transposed = vec![T::default(); matrix.len()];
    for (row, values) in matrix.chunks_exact(width).enumerate() {
        for (col, &v) in values.iter().enumerate() {
            transposed[col * height + row] = v;
        }
    }
    transposed
}

fn roll_2d<T: Copy + Default>(
    width: usize,
    height: usize,
    matrix: &[T],
    shift_x: usize,
    shift_y: usize,
) -> Vec<T> {
    let mut out = vec![T::default(); matrix.len()];
    for (row, values) in matrix.chunks_exact(width).enumerate() {
        let dst_row = (row + shift_y) % height;
        let dst = &mut out[dst_row * width..(dst_row + 1) * width];
        // element `col` lands at `(col + shift_x) % width`
        let split = width - shift_x % width;
        dst[shift_x % width..].copy_from_slice(&values[..split]);
        dst[..shift_x % width].copy_from_slice(&values[split..]);
    }
    out
}

/// Move the zero-frequency sample from `(0, 0)` to `(height / 2, width / 2)`.
///
/// This is a cyclic rotation by half the grid in both axes; for even sizes it
/// swaps opposite quadrants.
pub fn fftshift<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    debug_assert_eq!(matrix.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    roll_2d(width, height, matrix, width / 2, height / 2)
}

/// Inverse of [`fftshift`], also for odd sizes.
pub fn ifftshift<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    debug_assert_eq!(matrix.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    roll_2d(width, height, matrix, width - width / 2, height - height / 2)
}
