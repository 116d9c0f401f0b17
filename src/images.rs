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
use crate::yuv_error::{check_overflow_v3, MismatchedSize};
use crate::yuv_support::ayuv;
use crate::YuvError;

#[derive(Debug, Clone)]
/// Non-mutable view of a packed 4:4:4 AYUV image
pub struct AyuvImage<'a> {
    pub ayuv: &'a [u8],
    /// Stride here always means bytes per row.
    pub ayuv_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a> AyuvImage<'a> {
    /// Wraps a tightly packed AYUV frame.
    pub fn packed(ayuv: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            ayuv,
            ayuv_stride: width.saturating_mul(ayuv::CHANNELS as u32),
            width,
            height,
        }
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        if self.width == 0 || self.height == 0 {
            return Err(YuvError::ZeroBaseSize);
        }
        let row_bytes = check_overflow_v3(self.width as usize, ayuv::CHANNELS, 1)?;
        if (self.ayuv_stride as usize) < row_bytes {
            return Err(YuvError::SourceSizeMismatch(MismatchedSize {
                expected: row_bytes,
                received: self.ayuv_stride as usize,
            }));
        }
        let expected = check_overflow_v3(self.ayuv_stride as usize, self.height as usize, 1)?;
        if self.ayuv.len() < expected {
            return Err(YuvError::SourceSizeMismatch(MismatchedSize {
                expected,
                received: self.ayuv.len(),
            }));
        }
        Ok(())
    }

    /// Row `y` without the stride padding.
    #[inline]
    pub(crate) fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.ayuv_stride as usize;
        &self.ayuv[start..start + self.width as usize * ayuv::CHANNELS]
    }
}
