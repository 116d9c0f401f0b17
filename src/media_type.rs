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
//! Media type descriptors exchanged with the host during negotiation.
//!
//! A [`MediaType`] describes what flows over one connection: major kind,
//! subtype, sample size and, for video, a [`VideoInfoHeader`] format block
//! whose bitmap header carries the frame geometry.

/// Major kind of a media stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MajorType {
    Video,
    Audio,
    Other,
}

/// Pixel layout of a video stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MediaSubtype {
    /// Packed 4:4:4 YUV with an alpha byte, 32 bits per pixel.
    Ayuv,
    /// Packed 24-bit RGB, blue first.
    Rgb24,
    /// Any other layout, identified by its FourCC.
    Other([u8; 4]),
}

/// Structure of the format block attached to a media type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormatKind {
    VideoInfo,
    VideoInfo2,
    None,
}

/// Bitmap compression tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed RGB.
    Rgb,
    FourCc([u8; 4]),
}

pub const AYUV_FOURCC: [u8; 4] = *b"AYUV";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BitmapInfoHeader {
    pub width: i32,
    /// Positive for bottom-up images, negative for top-down ones.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: Compression,
    pub size_image: u32,
}

impl BitmapInfoHeader {
    /// Bytes needed by the image, rows padded to 32 bits.
    pub fn dib_size(&self) -> usize {
        dib_size(self.width, self.height, self.bit_count)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VideoInfoHeader {
    pub source: Rect,
    pub target: Rect,
    pub bit_rate: u32,
    pub bit_error_rate: u32,
    /// Frame duration in 100 ns units.
    pub avg_time_per_frame: i64,
    pub bmi: BitmapInfoHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    pub major: MajorType,
    pub subtype: MediaSubtype,
    pub format_kind: FormatKind,
    pub fixed_size_samples: bool,
    pub temporal_compression: bool,
    pub sample_size: usize,
    pub format: Option<VideoInfoHeader>,
}

impl MediaType {
    fn uncompressed_video(
        subtype: MediaSubtype,
        width: i32,
        height: i32,
        bit_count: u16,
        compression: Compression,
    ) -> Self {
        let size = dib_size(width, height, bit_count);
        MediaType {
            major: MajorType::Video,
            subtype,
            format_kind: FormatKind::VideoInfo,
            fixed_size_samples: true,
            temporal_compression: false,
            sample_size: size,
            format: Some(VideoInfoHeader {
                source: Rect::default(),
                target: Rect::default(),
                bit_rate: 0,
                bit_error_rate: 0,
                avg_time_per_frame: 0,
                bmi: BitmapInfoHeader {
                    width,
                    height,
                    planes: 1,
                    bit_count,
                    compression,
                    size_image: u32::try_from(size).unwrap_or(u32::MAX),
                },
            }),
        }
    }

    /// Packed AYUV video of the given size.
    pub fn ayuv(width: i32, height: i32) -> Self {
        Self::uncompressed_video(
            MediaSubtype::Ayuv,
            width,
            height,
            32,
            Compression::FourCc(AYUV_FOURCC),
        )
    }

    /// Uncompressed RGB24 video of the given size.
    pub fn rgb24(width: i32, height: i32) -> Self {
        Self::uncompressed_video(MediaSubtype::Rgb24, width, height, 24, Compression::Rgb)
    }

    pub fn video_info(&self) -> Option<&VideoInfoHeader> {
        self.format.as_ref()
    }

    pub fn video_info_mut(&mut self) -> Option<&mut VideoInfoHeader> {
        self.format.as_mut()
    }

    /// Bitmap header of the format block, when there is one.
    pub fn bitmap_header(&self) -> Option<&BitmapInfoHeader> {
        self.format.as_ref().map(|vih| &vih.bmi)
    }

    pub fn is_video(&self) -> bool {
        self.major == MajorType::Video
    }
}

/// Row size in bytes for `bits` bits per row, padded to a 32-bit boundary.
pub const fn width_bytes(bits: u64) -> u64 {
    ((bits + 31) & !31) / 8
}

/// Size of a bitmap image the way DIB headers define it.
pub fn dib_size(width: i32, height: i32, bit_count: u16) -> usize {
    let row = width_bytes(width.unsigned_abs() as u64 * bit_count as u64);
    let total = row.saturating_mul(height.unsigned_abs() as u64);
    usize::try_from(total).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_dword_aligned() {
        assert_eq!(width_bytes(24), 4);
        assert_eq!(width_bytes(32), 4);
        assert_eq!(width_bytes(3 * 24), 12);
        assert_eq!(width_bytes(5 * 24), 16);
    }

    #[test]
    fn dib_size_ignores_row_order() {
        assert_eq!(dib_size(640, 480, 24), 921_600);
        assert_eq!(dib_size(640, -480, 24), 921_600);
        assert_eq!(dib_size(5, 2, 24), 32);
        assert_eq!(dib_size(1920, 1080, 32), 8_294_400);
    }

    #[test]
    fn ayuv_constructor() {
        let mt = MediaType::ayuv(320, -240);
        assert!(mt.is_video());
        assert_eq!(mt.subtype, MediaSubtype::Ayuv);
        assert_eq!(mt.format_kind, FormatKind::VideoInfo);
        assert_eq!(mt.sample_size, 320 * 240 * 4);
        let bmi = mt.bitmap_header().unwrap();
        assert_eq!(bmi.bit_count, 32);
        assert_eq!(bmi.height, -240);
        assert_eq!(bmi.compression, Compression::FourCc(AYUV_FOURCC));
    }

    #[test]
    fn rgb24_constructor() {
        let mt = MediaType::rgb24(1920, 1080);
        assert_eq!(mt.subtype, MediaSubtype::Rgb24);
        assert_eq!(mt.sample_size, 6_220_800);
        let bmi = mt.bitmap_header().unwrap();
        assert_eq!(bmi.compression, Compression::Rgb);
        assert_eq!(bmi.size_image, 6_220_800);
        assert_eq!(bmi.dib_size(), 6_220_800);
    }
}
