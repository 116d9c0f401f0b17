/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl<T> CbCrInverseTransform<T> {
    pub(crate) fn new(y_coef: T, cr_coef: T, cb_coef: T, g_coeff_1: T, g_coeff_2: T) -> Self {
        CbCrInverseTransform {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1,
            g_coeff_2,
        }
    }
}

impl CbCrInverseTransform<f32> {
    /// Integral transformation adds an error not less than 1%
    pub(crate) fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        let precision_scale: i32 = 1i32 << (precision as i32);
        let cr_coef = (self.cr_coef * precision_scale as f32).round() as i32;
        let cb_coef = (self.cb_coef * precision_scale as f32).round() as i32;
        let y_coef = (self.y_coef * precision_scale as f32).round() as i32;
        let g_coef_1 = (self.g_coeff_1 * precision_scale as f32).round() as i32;
        let g_coef_2 = (self.g_coeff_2 * precision_scale as f32).round() as i32;
        CbCrInverseTransform::<i32> {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1: g_coef_1,
            g_coeff_2: g_coef_2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

/// The only matrix the stage converts with.
pub(crate) const BT601: YuvBias = YuvBias {
    kr: 0.299f32,
    kb: 0.114f32,
};

/// Full range Y ∈ [0, 2^bit_depth - 1], chroma centered by the chrominance offset
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct YuvChromaRange {
    pub range_y: u32,
    pub range_uv: u32,
}

pub(crate) const fn full_range(depth: u32) -> YuvChromaRange {
    YuvChromaRange {
        range_y: (1 << depth) - 1,
        range_uv: (1 << depth) - 1,
    }
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub(crate) fn get_inverse_transform(
    range_rgb: u32,
    range: YuvChromaRange,
    bias: YuvBias,
) -> CbCrInverseTransform<f32> {
    let YuvBias { kr, kb } = bias;
    let range_uv = range_rgb as f32 / range.range_uv as f32;
    let y_coef = range_rgb as f32 / range.range_y as f32;
    let cr_coeff = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coeff = (2f32 * (1f32 - kb)) * range_uv;
    let kg = 1.0f32 - kr - kb;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    CbCrInverseTransform::new(y_coef, cr_coeff, cb_coeff, g_coeff_1, g_coeff_2)
}

/// Byte positions inside one packed AYUV pixel.
///
/// Microsoft AYUV keeps the pixel as a little endian `A Y U V` dword, so in
/// memory the bytes run `V U Y A`.
pub(crate) mod ayuv {
    pub const CHANNELS: usize = 4;
    pub const V: usize = 0;
    pub const U: usize = 1;
    pub const Y: usize = 2;
}

/// Byte positions inside one 24-bit DIB pixel, blue first.
pub(crate) mod rgb24 {
    pub const CHANNELS: usize = 3;
    pub const B: usize = 0;
    pub const G: usize = 1;
    pub const R: usize = 2;
}
