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
use crate::allocator::{compute_allocator_properties, AllocatorProperties, MemAllocator};
use crate::ayuv_to_rgb::AyuvToRgb24Converter;
use crate::converter::PixelConverter;
use crate::media_type::MediaType;
use crate::negotiation::{AcceptedType, FormatNegotiator};
use crate::parameters::{ConversionParameters, ParameterStore};
use crate::stage_error::{Result, StageError};
use crate::yuv_error::MismatchedSize;
use crate::yuv_support::rgb24;
use tracing::{debug, trace, warn};

/// Callbacks a pipeline host drives on a transform stage.
///
/// The host calls them from one thread, in negotiation order
/// (`check_input_type`, `set_input_type`, `output_type`, `check_transform`,
/// `set_output_type`, `decide_buffer_size`) before the first `transform` of a
/// format generation.
pub trait PipelineStage {
    fn acceptable_input_types(&self) -> &'static [AcceptedType];

    /// Accepts or rejects a proposed input type.
    fn check_input_type(&self, candidate: &MediaType) -> Result<()>;

    /// Commits the input type.
    fn set_input_type(&mut self, media_type: &MediaType) -> Result<()>;

    /// Output type candidate at `position`, [`StageError::NoMoreTypes`] past the end.
    fn output_type(&self, position: i32) -> Result<MediaType>;

    /// Checks an input/output type pair.
    fn check_transform(&self, input: &MediaType, output: &MediaType) -> Result<()>;

    /// Commits the output type.
    fn set_output_type(&mut self, media_type: &MediaType) -> Result<()>;

    /// Negotiates output buffer properties for the committed output type.
    fn decide_buffer_size(
        &mut self,
        allocator: &mut dyn MemAllocator,
        requested: &AllocatorProperties,
    ) -> Result<AllocatorProperties>;

    /// Converts one frame from `input` into `output` and returns the number of
    /// bytes written.
    fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;
}

/// Packed AYUV to RGB24 colour conversion stage.
///
/// Owns its [`PixelConverter`]; the converter is dropped with the stage.
#[derive(Debug)]
pub struct Yuv444ToRgbStage<C: PixelConverter = AyuvToRgb24Converter> {
    negotiator: FormatNegotiator,
    parameters: ConversionParameters,
    converter: C,
}

impl Yuv444ToRgbStage {
    pub fn new() -> Self {
        Self::with_converter(AyuvToRgb24Converter::default())
    }
}

impl Default for Yuv444ToRgbStage {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PixelConverter> Yuv444ToRgbStage<C> {
    /// Builds the stage around `converter` and pushes the default parameters
    /// into it.
    pub fn with_converter(converter: C) -> Self {
        let mut stage = Self {
            negotiator: FormatNegotiator::new(),
            parameters: ConversionParameters::default(),
            converter,
        };
        stage.converter.set_parameters(stage.parameters);
        stage
    }

    pub fn parameters(&self) -> ConversionParameters {
        self.parameters
    }

    pub fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// True when the committed output type disagrees with the current `invert`
    /// setting and the host has to renegotiate the output.
    pub fn needs_reconnect(&self) -> bool {
        !self
            .negotiator
            .committed_output_agrees(self.parameters.invert_output)
    }
}

impl<C: PixelConverter> PipelineStage for Yuv444ToRgbStage<C> {
    fn acceptable_input_types(&self) -> &'static [AcceptedType] {
        self.negotiator.acceptable_input_types()
    }

    fn check_input_type(&self, candidate: &MediaType) -> Result<()> {
        self.negotiator.check_input_type(candidate)
    }

    fn set_input_type(&mut self, media_type: &MediaType) -> Result<()> {
        self.negotiator
            .on_input_committed(media_type, &mut self.converter)
            .map(|_| ())
    }

    fn output_type(&self, position: i32) -> Result<MediaType> {
        self.negotiator
            .derive_output_type(position, self.parameters.invert_output)
    }

    fn check_transform(&self, input: &MediaType, output: &MediaType) -> Result<()> {
        self.negotiator
            .validate_type_pair(input, output, self.parameters.invert_output)
    }

    fn set_output_type(&mut self, media_type: &MediaType) -> Result<()> {
        self.negotiator
            .set_output_type(media_type, self.parameters.invert_output)
    }

    fn decide_buffer_size(
        &mut self,
        allocator: &mut dyn MemAllocator,
        requested: &AllocatorProperties,
    ) -> Result<AllocatorProperties> {
        let output = self
            .negotiator
            .output_type()
            .ok_or(StageError::NotConnected("output type is not committed"))?;
        let actual = compute_allocator_properties(output, requested, allocator)?;

        let frame_len = self.converter.required_destination_len();
        if actual.buffer_size < frame_len {
            warn!(
                frame_len,
                granted = actual.buffer_size,
                "output buffers cannot hold a converted frame"
            );
            return Err(StageError::AllocationTooSmall(MismatchedSize {
                expected: frame_len,
                received: actual.buffer_size,
            }));
        }
        Ok(actual)
    }

    fn transform(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let geometry = self
            .negotiator
            .input_geometry()
            .ok_or(StageError::NotConnected("input type is not committed"))?;
        self.converter.convert(input, output)?;
        trace!("converted AYUV frame to RGB24");
        Ok(geometry.pixel_count() * rgb24::CHANNELS)
    }
}

impl<C: PixelConverter> ParameterStore for Yuv444ToRgbStage<C> {
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        let parameters = self
            .parameters
            .updated(name, value)
            .inspect_err(|e| warn!(name, value, "parameter update rejected: {e}"))?;
        let previous = std::mem::replace(&mut self.parameters, parameters);
        self.converter.set_parameters(parameters);
        if previous.invert_output != parameters.invert_output && self.needs_reconnect() {
            warn!(
                invert = parameters.invert_output,
                "committed output row order no longer matches, output must be renegotiated"
            );
        }
        debug!(
            invert = parameters.invert_output,
            chrominance_offset = parameters.chrominance_offset,
            "conversion parameters updated"
        );
        Ok(())
    }

    fn get_parameter(&self, name: &str) -> Result<String> {
        self.parameters.get_parameter(name)
    }
}
