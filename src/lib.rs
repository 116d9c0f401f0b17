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
#![forbid(unsafe_code)]
//! Colour conversion stage turning packed AYUV 4:4:4 frames into 24-bit RGB.
//!
//! The stage negotiates its media types with a pipeline host through
//! [`PipelineStage`]: the output type is always derived from the committed
//! input type, its row order follows the `invert` parameter, and output buffers
//! are sized through the host's [`MemAllocator`]. Frame conversion is delegated
//! to a [`PixelConverter`] owned by the stage.
//!
//! ```
//! use ayuv_rgb_stage::{
//!     AllocatorProperties, MediaType, PipelineStage, PoolAllocator, Yuv444ToRgbStage,
//! };
//!
//! let mut stage = Yuv444ToRgbStage::new();
//! let input = MediaType::ayuv(320, 240);
//! stage.check_input_type(&input).unwrap();
//! stage.set_input_type(&input).unwrap();
//!
//! let output = stage.output_type(0).unwrap();
//! stage.check_transform(&input, &output).unwrap();
//! stage.set_output_type(&output).unwrap();
//!
//! let mut pool = PoolAllocator::new();
//! stage
//!     .decide_buffer_size(&mut pool, &AllocatorProperties::default())
//!     .unwrap();
//! pool.commit().unwrap();
//!
//! let frame = vec![128u8; 320 * 240 * 4];
//! let written = stage.transform(&frame, pool.buffer_mut(0).unwrap()).unwrap();
//! assert_eq!(written, 320 * 240 * 3);
//! ```
mod allocator;
mod ayuv_to_rgb;
mod converter;
mod geometry;
mod images;
mod media_type;
mod negotiation;
mod numerics;
mod parameters;
mod stage;
mod stage_error;
mod yuv_error;
mod yuv_support;

pub use allocator::{compute_allocator_properties, AllocatorProperties, MemAllocator, PoolAllocator};
pub use ayuv_to_rgb::{ayuv_to_bgr24, AyuvToRgb24Converter};
pub use converter::PixelConverter;
pub use geometry::{desired_row_order, FrameGeometry, RowOrder};
pub use images::AyuvImage;
pub use media_type::{
    dib_size, width_bytes, BitmapInfoHeader, Compression, FormatKind, MajorType, MediaSubtype,
    MediaType, Rect, VideoInfoHeader, AYUV_FOURCC,
};
pub use negotiation::{AcceptedType, FormatNegotiator};
pub use parameters::{
    ConversionParameters, ParameterKind, ParameterSpec, ParameterStore, CHROMINANCE_OFFSET,
    INVERT, PARAMETERS,
};
pub use stage::{PipelineStage, Yuv444ToRgbStage};
pub use stage_error::{Result, StageError};
pub use yuv_error::{MismatchedSize, YuvError};
