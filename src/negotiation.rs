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
use crate::geometry::{desired_row_order, FrameGeometry, RowOrder};
use crate::media_type::{Compression, FormatKind, MajorType, MediaSubtype, MediaType};
use crate::stage_error::{Result, StageError};
use crate::yuv_support::rgb24;
use tracing::debug;

/// One entry of the input whitelist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AcceptedType {
    pub major: MajorType,
    pub subtype: MediaSubtype,
    pub format_kind: FormatKind,
}

impl AcceptedType {
    pub fn matches(&self, candidate: &MediaType) -> bool {
        candidate.major == self.major
            && candidate.subtype == self.subtype
            && candidate.format_kind == self.format_kind
    }
}

static ACCEPTED_INPUT_TYPES: &[AcceptedType] = &[AcceptedType {
    major: MajorType::Video,
    subtype: MediaSubtype::Ayuv,
    format_kind: FormatKind::VideoInfo,
}];

#[derive(Debug, Clone)]
struct CommittedInput {
    media_type: MediaType,
    geometry: FrameGeometry,
}

/// Decides which media types the stage accepts and derives its output type.
///
/// Holds the committed input type (and its geometry) and, once the host has
/// settled on one, the committed output type. Committing a new input starts a
/// new format generation and forgets the output.
#[derive(Debug, Clone, Default)]
pub struct FormatNegotiator {
    input: Option<CommittedInput>,
    output: Option<MediaType>,
}

impl FormatNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acceptable_input_types(&self) -> &'static [AcceptedType] {
        ACCEPTED_INPUT_TYPES
    }

    /// Checks a candidate input type against the whitelist.
    pub fn check_input_type(&self, candidate: &MediaType) -> Result<()> {
        if !ACCEPTED_INPUT_TYPES.iter().any(|t| t.matches(candidate)) {
            return Err(StageError::TypeNotAccepted(
                "input is not packed AYUV video with a VIDEOINFOHEADER",
            ));
        }
        if candidate.format.is_none() {
            return Err(StageError::TypeNotAccepted("input has no format block"));
        }
        Ok(())
    }

    /// Records the accepted input type and resizes the converter to match.
    pub fn on_input_committed<C: PixelConverter + ?Sized>(
        &mut self,
        media_type: &MediaType,
        converter: &mut C,
    ) -> Result<FrameGeometry> {
        self.check_input_type(media_type)?;
        let bmi = media_type
            .bitmap_header()
            .ok_or(StageError::TypeNotAccepted("input has no format block"))?;
        let geometry = FrameGeometry::from_header(bmi.width, bmi.height)?;

        converter.set_dimensions(geometry.width(), geometry.rows());
        debug!(
            width = geometry.width(),
            height = geometry.signed_height(),
            pixels = geometry.pixel_count(),
            "input type committed"
        );

        self.input = Some(CommittedInput {
            media_type: media_type.clone(),
            geometry,
        });
        self.output = None;
        Ok(geometry)
    }

    /// Builds the output type offered at `position`.
    ///
    /// Only position `0` exists: the committed input type with the bitmap
    /// header rewritten for uncompressed RGB24 and the row order set by
    /// [`desired_row_order`]. Higher positions return [`StageError::NoMoreTypes`].
    pub fn derive_output_type(&self, position: i32, invert: bool) -> Result<MediaType> {
        if position < 0 {
            return Err(StageError::InvalidArgument(format!(
                "media type position {position} is negative"
            )));
        }
        if position > 0 {
            return Err(StageError::NoMoreTypes);
        }
        let input = self
            .input
            .as_ref()
            .ok_or(StageError::NotConnected("input type is not committed"))?;

        let sample_size = input
            .geometry
            .pixel_count()
            .checked_mul(rgb24::CHANNELS)
            .ok_or(StageError::InvalidGeometry {
                width: input.geometry.width() as i32,
                height: input.geometry.signed_height(),
            })?;

        let mut media_type = input.media_type.clone();
        let vih = media_type
            .video_info_mut()
            .ok_or(StageError::NotConnected("input type has no format block"))?;
        vih.bmi.bit_count = 24;
        vih.bmi.size_image = u32::try_from(sample_size).unwrap_or(u32::MAX);
        vih.bmi.compression = Compression::Rgb;
        vih.bmi.height = output_height(vih.bmi.height, invert);
        let height = vih.bmi.height;

        media_type.subtype = MediaSubtype::Rgb24;
        media_type.sample_size = sample_size;
        media_type.fixed_size_samples = true;
        media_type.temporal_compression = false;

        debug!(sample_size, height, invert, "output type derived");
        Ok(media_type)
    }

    /// Checks that `output` is something this stage can produce from `input`.
    pub fn validate_type_pair(
        &self,
        input: &MediaType,
        output: &MediaType,
        invert: bool,
    ) -> Result<()> {
        let result = validate_pair(input, output, invert);
        if let Err(StageError::TypeNotAccepted(reason)) = &result {
            debug!(reason, "type pair rejected");
        }
        result
    }

    /// Records the output type the host settled on.
    pub fn set_output_type(&mut self, output: &MediaType, invert: bool) -> Result<()> {
        let input = self
            .input
            .as_ref()
            .ok_or(StageError::NotConnected("input type is not committed"))?;
        self.validate_type_pair(&input.media_type, output, invert)?;
        self.output = Some(output.clone());
        Ok(())
    }

    /// False when a committed output type no longer passes validation for
    /// `invert`, i.e. the host has to renegotiate the output.
    pub fn committed_output_agrees(&self, invert: bool) -> bool {
        match (&self.input, &self.output) {
            (Some(input), Some(output)) => validate_pair(&input.media_type, output, invert).is_ok(),
            _ => true,
        }
    }

    pub fn input_geometry(&self) -> Option<FrameGeometry> {
        self.input.as_ref().map(|input| input.geometry)
    }

    pub fn input_type(&self) -> Option<&MediaType> {
        self.input.as_ref().map(|input| &input.media_type)
    }

    pub fn output_type(&self) -> Option<&MediaType> {
        self.output.as_ref()
    }
}

/// Output height for an input height: magnitude kept, sign from
/// [`desired_row_order`]. Applying it to a height that already carries the
/// target sign leaves it unchanged.
fn output_height(input_height: i32, invert: bool) -> i32 {
    desired_row_order(RowOrder::from_height(input_height), invert)
        .signed_height(input_height.unsigned_abs())
}

fn validate_pair(input: &MediaType, output: &MediaType, invert: bool) -> Result<()> {
    if output.major != MajorType::Video {
        return Err(StageError::TypeNotAccepted("output major type is not video"));
    }
    if output.subtype != MediaSubtype::Rgb24 {
        return Err(StageError::TypeNotAccepted("output subtype is not RGB24"));
    }
    if let (Some(input_bmi), Some(output_bmi)) = (input.bitmap_header(), output.bitmap_header()) {
        let expected = desired_row_order(RowOrder::from_height(input_bmi.height), invert);
        if RowOrder::from_height(output_bmi.height) != expected {
            return Err(StageError::TypeNotAccepted(
                "output row order does not match the inversion setting",
            ));
        }
        if output_bmi.width != input_bmi.width
            || output_bmi.height.unsigned_abs() != input_bmi.height.unsigned_abs()
        {
            return Err(StageError::TypeNotAccepted(
                "output frame size differs from the input",
            ));
        }
    }
    if output.format_kind != FormatKind::VideoInfo {
        return Err(StageError::TypeNotAccepted(
            "output format block is not a VIDEOINFOHEADER",
        ));
    }
    if output.format.is_none() {
        return Err(StageError::TypeNotAccepted("output has no format block"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ayuv_to_rgb::AyuvToRgb24Converter;
    use crate::parameters::ConversionParameters;
    use proptest::prelude::*;

    fn committed(width: i32, height: i32) -> FormatNegotiator {
        let mut negotiator = FormatNegotiator::new();
        let mut converter = AyuvToRgb24Converter::new(ConversionParameters::default());
        negotiator
            .on_input_committed(&MediaType::ayuv(width, height), &mut converter)
            .unwrap();
        negotiator
    }

    fn output_bmi_height(mt: &MediaType) -> i32 {
        mt.bitmap_header().unwrap().height
    }

    #[test]
    fn whitelist_has_one_entry() {
        let negotiator = FormatNegotiator::new();
        let accepted = negotiator.acceptable_input_types();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].major, MajorType::Video);
        assert_eq!(accepted[0].subtype, MediaSubtype::Ayuv);
    }

    #[test]
    fn check_input_type_rejects_other_layouts() {
        let negotiator = FormatNegotiator::new();
        assert!(negotiator
            .check_input_type(&MediaType::ayuv(640, 480))
            .is_ok());
        assert!(matches!(
            negotiator.check_input_type(&MediaType::rgb24(640, 480)),
            Err(StageError::TypeNotAccepted(_))
        ));

        let mut audio = MediaType::ayuv(640, 480);
        audio.major = MajorType::Audio;
        assert!(negotiator.check_input_type(&audio).is_err());

        let mut no_block = MediaType::ayuv(640, 480);
        no_block.format = None;
        assert!(negotiator.check_input_type(&no_block).is_err());
    }

    #[test]
    fn commit_configures_converter() {
        let mut negotiator = FormatNegotiator::new();
        let mut converter = AyuvToRgb24Converter::new(ConversionParameters::default());
        let geometry = negotiator
            .on_input_committed(&MediaType::ayuv(352, -288), &mut converter)
            .unwrap();
        assert_eq!(geometry.pixel_count(), 352 * 288);
        assert_eq!(converter.dimensions(), (352, 288));
        assert_eq!(negotiator.input_geometry(), Some(geometry));
    }

    #[test]
    fn commit_rejects_bad_geometry() {
        let mut negotiator = FormatNegotiator::new();
        let mut converter = AyuvToRgb24Converter::default();
        assert_eq!(
            negotiator.on_input_committed(&MediaType::ayuv(0, 480), &mut converter),
            Err(StageError::InvalidGeometry {
                width: 0,
                height: 480
            })
        );
        assert!(negotiator.input_geometry().is_none());
        assert_eq!(converter.dimensions(), (0, 0));
    }

    #[test]
    fn output_positions() {
        let negotiator = committed(640, 480);
        assert!(matches!(
            negotiator.derive_output_type(-1, true),
            Err(StageError::InvalidArgument(_))
        ));
        assert!(negotiator.derive_output_type(0, true).is_ok());
        assert_eq!(
            negotiator.derive_output_type(1, true),
            Err(StageError::NoMoreTypes)
        );
        assert_eq!(
            negotiator.derive_output_type(7, true),
            Err(StageError::NoMoreTypes)
        );
    }

    #[test]
    fn output_before_commit() {
        let negotiator = FormatNegotiator::new();
        assert!(matches!(
            negotiator.derive_output_type(0, true),
            Err(StageError::NotConnected(_))
        ));
    }

    #[test]
    fn derived_output_fields() {
        let mut input = MediaType::ayuv(640, 480);
        input.video_info_mut().unwrap().avg_time_per_frame = 333_667;
        let mut negotiator = FormatNegotiator::new();
        negotiator
            .on_input_committed(&input, &mut AyuvToRgb24Converter::default())
            .unwrap();

        let output = negotiator.derive_output_type(0, true).unwrap();
        assert_eq!(output.major, MajorType::Video);
        assert_eq!(output.subtype, MediaSubtype::Rgb24);
        assert_eq!(output.format_kind, FormatKind::VideoInfo);
        assert_eq!(output.sample_size, 921_600);
        let vih = output.video_info().unwrap();
        assert_eq!(vih.avg_time_per_frame, 333_667);
        assert_eq!(vih.bmi.bit_count, 24);
        assert_eq!(vih.bmi.size_image, 921_600);
        assert_eq!(vih.bmi.compression, Compression::Rgb);
        assert_eq!(vih.bmi.width, 640);
    }

    #[test]
    fn row_order_follows_invert() {
        let negotiator = committed(640, 480);
        let inverted = negotiator.derive_output_type(0, true).unwrap();
        assert_eq!(output_bmi_height(&inverted), -480);
        let straight = negotiator.derive_output_type(0, false).unwrap();
        assert_eq!(output_bmi_height(&straight), 480);

        let top_down = committed(640, -480);
        let inverted = top_down.derive_output_type(0, true).unwrap();
        assert_eq!(output_bmi_height(&inverted), 480);
        let straight = top_down.derive_output_type(0, false).unwrap();
        assert_eq!(output_bmi_height(&straight), -480);
    }

    #[test]
    fn derivation_is_idempotent() {
        let negotiator = committed(720, 576);
        let first = negotiator.derive_output_type(0, true).unwrap();
        let second = negotiator.derive_output_type(0, true).unwrap();
        assert_eq!(first, second);
        assert_eq!(output_height(-576, false), -576);
        assert_eq!(output_height(576, false), 576);
    }

    #[test]
    fn pair_rejects_wrong_subtype() {
        let negotiator = committed(640, 480);
        let input = MediaType::ayuv(640, 480);
        let mut output = negotiator.derive_output_type(0, true).unwrap();
        assert!(negotiator.validate_type_pair(&input, &output, true).is_ok());

        output.subtype = MediaSubtype::Other(*b"RGB4");
        assert_eq!(
            negotiator.validate_type_pair(&input, &output, true),
            Err(StageError::TypeNotAccepted("output subtype is not RGB24"))
        );
        output.subtype = MediaSubtype::Ayuv;
        assert!(negotiator.validate_type_pair(&input, &output, true).is_err());
    }

    #[test]
    fn pair_rejects_wrong_major_and_format() {
        let negotiator = committed(640, 480);
        let input = MediaType::ayuv(640, 480);
        let good = negotiator.derive_output_type(0, true).unwrap();

        let mut output = good.clone();
        output.major = MajorType::Other;
        assert!(negotiator.validate_type_pair(&input, &output, true).is_err());

        let mut output = good.clone();
        output.format_kind = FormatKind::VideoInfo2;
        assert!(negotiator.validate_type_pair(&input, &output, true).is_err());

        let mut output = good;
        output.format = None;
        assert!(negotiator.validate_type_pair(&input, &output, true).is_err());
    }

    #[test]
    fn pair_checks_row_order() {
        let negotiator = committed(640, 480);
        let input = MediaType::ayuv(640, 480);

        let mut same_order = MediaType::rgb24(640, 480);
        let flipped = MediaType::rgb24(640, -480);
        assert!(negotiator.validate_type_pair(&input, &flipped, true).is_ok());
        assert_eq!(
            negotiator.validate_type_pair(&input, &same_order, true),
            Err(StageError::TypeNotAccepted(
                "output row order does not match the inversion setting"
            ))
        );
        assert!(negotiator.validate_type_pair(&input, &same_order, false).is_ok());
        assert!(negotiator.validate_type_pair(&input, &flipped, false).is_err());

        same_order.video_info_mut().unwrap().bmi.height = 240;
        assert!(negotiator.validate_type_pair(&input, &same_order, false).is_err());
    }

    #[test]
    fn pair_rejects_other_frame_size() {
        let negotiator = committed(640, 480);
        let input = MediaType::ayuv(640, 480);
        let size_error = Err(StageError::TypeNotAccepted(
            "output frame size differs from the input",
        ));

        assert_eq!(
            negotiator.validate_type_pair(&input, &MediaType::rgb24(640, -240), true),
            size_error
        );
        assert_eq!(
            negotiator.validate_type_pair(&input, &MediaType::rgb24(320, -480), true),
            size_error
        );
        assert_eq!(
            negotiator.validate_type_pair(&input, &MediaType::rgb24(640, 240), false),
            size_error
        );
        assert!(negotiator
            .validate_type_pair(&input, &MediaType::rgb24(640, -480), true)
            .is_ok());
    }

    #[test]
    fn committed_output_tracks_invert() {
        let mut negotiator = committed(640, 480);
        assert!(negotiator.committed_output_agrees(false));
        let output = negotiator.derive_output_type(0, true).unwrap();
        negotiator.set_output_type(&output, true).unwrap();
        assert!(negotiator.committed_output_agrees(true));
        assert!(!negotiator.committed_output_agrees(false));
    }

    #[test]
    fn new_input_forgets_output() {
        let mut negotiator = committed(640, 480);
        let output = negotiator.derive_output_type(0, true).unwrap();
        negotiator.set_output_type(&output, true).unwrap();
        assert_eq!(negotiator.output_type(), Some(&output));

        negotiator
            .on_input_committed(
                &MediaType::ayuv(320, 240),
                &mut AyuvToRgb24Converter::default(),
            )
            .unwrap();
        assert!(negotiator.output_type().is_none());
    }

    #[test]
    fn set_output_validates() {
        let mut negotiator = committed(640, 480);
        assert!(negotiator
            .set_output_type(&MediaType::rgb24(640, 480), true)
            .is_err());
        assert!(negotiator.output_type().is_none());
        assert!(FormatNegotiator::new()
            .set_output_type(&MediaType::rgb24(640, -480), true)
            .is_err());
    }

    proptest! {
        #[test]
        fn output_sample_size_is_three_bytes_per_pixel(
            width in 1i32..4096,
            height in 1i32..4096,
            top_down: bool,
            invert: bool,
        ) {
            let height = if top_down { -height } else { height };
            let negotiator = committed(width, height);
            let output = negotiator.derive_output_type(0, invert).unwrap();
            let pixels = width as usize * height.unsigned_abs() as usize;
            prop_assert_eq!(output.sample_size, pixels * 3);

            let expected = desired_row_order(RowOrder::from_height(height), invert);
            let again = negotiator.derive_output_type(0, invert).unwrap();
            prop_assert_eq!(RowOrder::from_height(output_bmi_height(&output)), expected);
            prop_assert_eq!(output_bmi_height(&again), output_bmi_height(&output));
            prop_assert!(negotiator
                .validate_type_pair(&MediaType::ayuv(width, height), &output, invert)
                .is_ok());
        }
    }
}
