//! Fourier-domain splicing of per-pose volumes.
//!
//! Each resampled pose is transformed to k-space, the spectra are
//! reordered so the untouched pose fills the band containing the
//! acquisition midpoint, and contiguous bands along the phase-encode
//! axis are stitched into one composite spectrum whose inverse transform
//! is the corrupted volume.

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use num_complex::Complex;
use rustfft::FftPlanner;

use kmotion_core::{CoreError, Volume};

use crate::error::{MotionError, Result};

/// Slot index that receives the untouched (identity) spectrum.
///
/// `k` is the smallest 1-based index into `times` whose value is
/// strictly greater than 0.5; when no event lies past the midpoint, the
/// last slot is used. The band straddling the acquisition midpoint then
/// comes from the pose the scanner would have sampled near the center of
/// its phase-encode ordering.
pub fn center_band_index(times: &[f64]) -> usize {
    times
        .iter()
        .position(|&t| t > 0.5)
        .map(|i| i + 1)
        .unwrap_or(times.len())
}

/// Band boundaries along the spliced axis.
///
/// One boundary per event at `round(t * len)`, clamped into `[0, len]`,
/// plus the final boundary `len`. For monotonic in-range times the
/// resulting bands partition `[0, len)` exactly.
pub fn band_boundaries(times: &[f64], len: usize) -> Vec<usize> {
    let mut boundaries: Vec<usize> = times
        .iter()
        .map(|&t| (t * len as f64).round().clamp(0.0, len as f64) as usize)
        .collect();
    boundaries.push(len);
    boundaries
}

/// Assemble the corrupted volume from per-pose volumes and event times.
///
/// `volumes[0]` must be the untouched input; `volumes[1..]` are the
/// resampled poses in event order. The phase-encode axis is the volume's
/// Z axis. Non-monotonic (jittered) times degrade by truncation: a
/// backward band copies nothing while the cursor still advances, and any
/// axis positions left uncovered stay zero.
pub fn splice_spectra<B: Backend>(volumes: &[Volume<B>], times: &[f64]) -> Result<Volume<B>> {
    let reference = volumes
        .first()
        .ok_or_else(|| MotionError::spectrum_mismatch("no volumes to splice"))?;
    if volumes.len() != times.len() + 1 {
        return Err(MotionError::spectrum_mismatch(format!(
            "{} volumes for {} event times; expected one more volume than times",
            volumes.len(),
            times.len()
        )));
    }

    let [nz, ny, nx] = reference.shape();
    let plane = ny * nx;

    let mut spectra = Vec::with_capacity(volumes.len());
    for volume in volumes {
        if volume.shape() != reference.shape() {
            return Err(CoreError::ShapeMismatch {
                expected: reference.shape(),
                actual: volume.shape(),
            }
            .into());
        }
        let host = volume.data().clone().into_data().convert::<f32>();
        let values = host.to_vec::<f32>().expect("f32 volume data");
        spectra.push(fourier_transform(&values, nz, ny, nx));
    }

    // Move the untouched spectrum into the midpoint band; both poses are
    // kept, only their band assignment changes.
    spectra.swap(0, center_band_index(times));

    let boundaries = band_boundaries(times, nz);
    let mut composite = vec![Complex::new(0.0f32, 0.0); nz * plane];
    let mut start = 0usize;
    for (spectrum, &end) in spectra.iter().zip(&boundaries) {
        if end > start {
            composite[start * plane..end * plane]
                .copy_from_slice(&spectrum[start * plane..end * plane]);
        }
        start = end;
    }

    let magnitudes = inverse_fourier_transform(composite, nz, ny, nx);
    let data = Tensor::from_data(
        TensorData::new(magnitudes, [nz, ny, nx]),
        &reference.data().device(),
    );
    Ok(Volume::new(
        data,
        *reference.origin(),
        *reference.spacing(),
        *reference.direction(),
    ))
}

/// Centered 3-D DFT of a real-valued `[Z, Y, X]` buffer.
fn fourier_transform(values: &[f32], nz: usize, ny: usize, nx: usize) -> Vec<Complex<f32>> {
    let mut buffer: Vec<Complex<f32>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft3d(&mut buffer, nz, ny, nx);
    fftshift3(&buffer, nz, ny, nx)
}

/// Inverse of [`fourier_transform`]; returns voxel magnitudes.
fn inverse_fourier_transform(spectrum: Vec<Complex<f32>>, nz: usize, ny: usize, nx: usize) -> Vec<f32> {
    let mut buffer = ifftshift3(&spectrum, nz, ny, nx);
    ifft3d(&mut buffer, nz, ny, nx);
    buffer.iter().map(|c| c.norm()).collect()
}

/// In-place 3-D FFT of a flat `[Z, Y, X]` row-major buffer.
fn fft3d(buffer: &mut [Complex<f32>], nz: usize, ny: usize, nx: usize) {
    let mut planner = FftPlanner::new();

    // X lines are contiguous
    let fft_x = planner.plan_fft_forward(nx);
    for row in buffer.chunks_exact_mut(nx) {
        fft_x.process(row);
    }

    let fft_y = planner.plan_fft_forward(ny);
    let mut line = vec![Complex::new(0.0f32, 0.0); ny];
    for z in 0..nz {
        for x in 0..nx {
            for y in 0..ny {
                line[y] = buffer[(z * ny + y) * nx + x];
            }
            fft_y.process(&mut line);
            for y in 0..ny {
                buffer[(z * ny + y) * nx + x] = line[y];
            }
        }
    }

    let fft_z = planner.plan_fft_forward(nz);
    let mut line = vec![Complex::new(0.0f32, 0.0); nz];
    for y in 0..ny {
        for x in 0..nx {
            for z in 0..nz {
                line[z] = buffer[(z * ny + y) * nx + x];
            }
            fft_z.process(&mut line);
            for z in 0..nz {
                buffer[(z * ny + y) * nx + x] = line[z];
            }
        }
    }
}

/// In-place normalized inverse 3-D FFT of a flat `[Z, Y, X]` buffer.
fn ifft3d(buffer: &mut [Complex<f32>], nz: usize, ny: usize, nx: usize) {
    let mut planner = FftPlanner::new();

    let ifft_x = planner.plan_fft_inverse(nx);
    for row in buffer.chunks_exact_mut(nx) {
        ifft_x.process(row);
    }

    let ifft_y = planner.plan_fft_inverse(ny);
    let mut line = vec![Complex::new(0.0f32, 0.0); ny];
    for z in 0..nz {
        for x in 0..nx {
            for y in 0..ny {
                line[y] = buffer[(z * ny + y) * nx + x];
            }
            ifft_y.process(&mut line);
            for y in 0..ny {
                buffer[(z * ny + y) * nx + x] = line[y];
            }
        }
    }

    let ifft_z = planner.plan_fft_inverse(nz);
    let mut line = vec![Complex::new(0.0f32, 0.0); nz];
    for y in 0..ny {
        for x in 0..nx {
            for z in 0..nz {
                line[z] = buffer[(z * ny + y) * nx + x];
            }
            ifft_z.process(&mut line);
            for z in 0..nz {
                buffer[(z * ny + y) * nx + x] = line[z];
            }
        }
    }

    let scale = 1.0 / (nz * ny * nx) as f32;
    for value in buffer.iter_mut() {
        *value *= scale;
    }
}

/// Roll every axis by `n / 2`, moving the zero frequency to the center.
fn fftshift3(buffer: &[Complex<f32>], nz: usize, ny: usize, nx: usize) -> Vec<Complex<f32>> {
    roll3(buffer, nz, ny, nx, nz / 2, ny / 2, nx / 2)
}

/// Inverse of [`fftshift3`]; identical for even lengths.
fn ifftshift3(buffer: &[Complex<f32>], nz: usize, ny: usize, nx: usize) -> Vec<Complex<f32>> {
    roll3(buffer, nz, ny, nx, nz - nz / 2, ny - ny / 2, nx - nx / 2)
}

fn roll3(
    buffer: &[Complex<f32>],
    nz: usize,
    ny: usize,
    nx: usize,
    sz: usize,
    sy: usize,
    sx: usize,
) -> Vec<Complex<f32>> {
    let mut out = vec![Complex::new(0.0f32, 0.0); buffer.len()];
    for z in 0..nz {
        let zs = (z + sz) % nz;
        for y in 0..ny {
            let ys = (y + sy) % ny;
            let src_row = (z * ny + y) * nx;
            let dst_row = (zs * ny + ys) * nx;
            for x in 0..nx {
                out[dst_row + (x + sx) % nx] = buffer[src_row + x];
            }
        }
    }
    out
}
