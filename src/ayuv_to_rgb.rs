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
use crate::converter::PixelConverter;
use crate::images::AyuvImage;
use crate::numerics::{debias_chroma, qrshr};
use crate::parameters::ConversionParameters;
use crate::yuv_error::check_packed_destination;
use crate::yuv_support::{
    ayuv, full_range, get_inverse_transform, rgb24, CbCrInverseTransform, BT601,
};
use crate::YuvError;

const PRECISION: i32 = 13;

#[inline]
fn convert_row(src: &[u8], dst: &mut [u8], ts: &CbCrInverseTransform<i32>, chroma_offset: i32) {
    for (src, dst) in src
        .chunks_exact(ayuv::CHANNELS)
        .zip(dst.chunks_exact_mut(rgb24::CHANNELS))
    {
        let y_value = src[ayuv::Y] as i32 * ts.y_coef;
        let cb_value = debias_chroma(src[ayuv::U], chroma_offset);
        let cr_value = debias_chroma(src[ayuv::V], chroma_offset);

        let r = qrshr::<PRECISION, 8>(y_value + ts.cr_coef * cr_value);
        let b = qrshr::<PRECISION, 8>(y_value + ts.cb_coef * cb_value);
        let g =
            qrshr::<PRECISION, 8>(y_value - ts.g_coeff_1 * cr_value - ts.g_coeff_2 * cb_value);

        dst[rgb24::R] = r as u8;
        dst[rgb24::G] = g as u8;
        dst[rgb24::B] = b as u8;
    }
}

/// Converts packed AYUV to a tightly packed 24-bit DIB (blue first), 8-bit depth precision.
///
/// Conversion is always BT.601 full range. Alpha is dropped.
///
/// # Arguments
///
/// * `image`: Source AYUV image, see [AyuvImage]
/// * `dst`: Destination, at least `width * height * 3` bytes
/// * `flip`: Write source row `r` into destination row `height - 1 - r`
/// * `chroma_offset`: Value subtracted from U and V before the matrix
///
/// returns: Result<(), [YuvError]>
///
pub fn ayuv_to_bgr24(
    image: &AyuvImage,
    dst: &mut [u8],
    flip: bool,
    chroma_offset: i32,
) -> Result<(), YuvError> {
    image.check_constraints()?;
    let dst_len = check_packed_destination(dst, image.width, image.height, rgb24::CHANNELS)?;

    let ts = get_inverse_transform(255, full_range(8), BT601).to_integers(PRECISION as u32);

    let dst_stride = image.width as usize * rgb24::CHANNELS;
    let height = image.height as usize;

    for (row, dst) in dst[..dst_len].chunks_exact_mut(dst_stride).enumerate() {
        let src_row = if flip { height - 1 - row } else { row };
        convert_row(image.row(src_row), dst, &ts, chroma_offset);
    }

    Ok(())
}

/// Default [PixelConverter]: packed AYUV in, RGB24 DIB out.
#[derive(Debug, Clone, Default)]
pub struct AyuvToRgb24Converter {
    width: u32,
    height: u32,
    parameters: ConversionParameters,
}

impl AyuvToRgb24Converter {
    pub fn new(parameters: ConversionParameters) -> Self {
        Self {
            width: 0,
            height: 0,
            parameters,
        }
    }

    pub fn parameters(&self) -> ConversionParameters {
        self.parameters
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl PixelConverter for AyuvToRgb24Converter {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_parameters(&mut self, parameters: ConversionParameters) {
        self.parameters = parameters;
    }

    fn required_destination_len(&self) -> usize {
        self.width as usize * self.height as usize * rgb24::CHANNELS
    }

    fn convert(&self, src: &[u8], dst: &mut [u8]) -> Result<(), YuvError> {
        if self.width == 0 && self.height == 0 {
            return Err(YuvError::NotConfigured);
        }
        let image = AyuvImage::packed(src, self.width, self.height);
        ayuv_to_bgr24(
            &image,
            dst,
            self.parameters.invert_output,
            self.parameters.chrominance_offset,
        )
    }
}
