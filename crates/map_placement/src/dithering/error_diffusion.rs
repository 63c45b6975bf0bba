//! Serpentine Floyd-Steinberg error diffusion.
use crate::dithering::Discretizer;
use crate::field::{BinaryMask, ScalarField};

const FORWARD: f32 = 7.0 / 16.0;
const BELOW_BACK: f32 = 3.0 / 16.0;
const BELOW: f32 = 5.0 / 16.0;
const BELOW_FORWARD: f32 = 1.0 / 16.0;

/// Error-diffusion dithering.
///
/// Even rows are scanned left to right, odd rows right to left, with the diffusion
/// kernel mirrored on reversed rows. Each cell is quantized to 1 iff its adjusted value
/// is strictly greater than 0.5, so an exact 0.5 goes to 0. Cells on the first or last
/// column and on the last row drop their quantization error instead of diffusing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDiffusionDithering;

impl ErrorDiffusionDithering {
    /// Quantized field with values in {0, 1}.
    pub fn quantize(&self, density: &ScalarField) -> ScalarField {
        let (w, h) = density.size();
        let mut out = density.clone();
        let buf = out.as_mut_slice();

        for y in 0..h {
            let reversed = y % 2 == 1;
            for step in 0..w {
                let x = if reversed { w - 1 - step } else { step };
                let i = y * w + x;
                let old = buf[i];
                let new = if old > 0.5 { 1.0 } else { 0.0 };
                buf[i] = new;

                if y + 1 >= h || x == 0 || x + 1 >= w {
                    continue;
                }
                let err = old - new;
                let (fwd, back) = if reversed { (x - 1, x + 1) } else { (x + 1, x - 1) };
                let below = (y + 1) * w;
                buf[y * w + fwd] += err * FORWARD;
                buf[below + back] += err * BELOW_BACK;
                buf[below + x] += err * BELOW;
                buf[below + fwd] += err * BELOW_FORWARD;
            }
        }

        out
    }
}

impl Discretizer for ErrorDiffusionDithering {
    fn discretize(&self, density: &ScalarField) -> BinaryMask {
        self.quantize(density).threshold(0.5)
    }
}
