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
use crate::stage_error::{Result, StageError};

/// Vertical order of the rows in a frame buffer.
///
/// Bitmap headers encode it in the sign of the height: positive is a bottom-up
/// image, negative a top-down one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RowOrder {
    BottomUp,
    TopDown,
}

impl RowOrder {
    pub fn from_height(height: i32) -> Self {
        if height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        }
    }

    /// `1` for bottom-up, `-1` for top-down.
    pub const fn sign(self) -> i32 {
        match self {
            RowOrder::BottomUp => 1,
            RowOrder::TopDown => -1,
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            RowOrder::BottomUp => RowOrder::TopDown,
            RowOrder::TopDown => RowOrder::BottomUp,
        }
    }

    /// Applies this order to a row count.
    pub fn signed_height(self, rows: u32) -> i32 {
        rows.min(i32::MAX as u32) as i32 * self.sign()
    }
}

/// Row order the output must carry for a given input row order.
///
/// An inverting stage reports the opposite order of its input, a non-inverting
/// one keeps it.
pub const fn desired_row_order(input: RowOrder, invert: bool) -> RowOrder {
    if invert {
        input.reversed()
    } else {
        input
    }
}

/// Negotiated frame size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    width: u32,
    rows: u32,
    row_order: RowOrder,
}

impl FrameGeometry {
    /// Builds the geometry from bitmap header fields. Width must be positive and
    /// height non-zero; the sign of the height is the row order.
    pub fn from_header(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height == 0 || height == i32::MIN {
            return Err(StageError::InvalidGeometry { width, height });
        }
        Ok(Self {
            width: width as u32,
            rows: height.unsigned_abs(),
            row_order: RowOrder::from_height(height),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row count, always positive.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Height with the row order sign applied.
    pub fn signed_height(&self) -> i32 {
        self.row_order.signed_height(self.rows)
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.rows as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_row_order_all_combinations() {
        assert_eq!(
            desired_row_order(RowOrder::BottomUp, true),
            RowOrder::TopDown
        );
        assert_eq!(
            desired_row_order(RowOrder::TopDown, true),
            RowOrder::BottomUp
        );
        assert_eq!(
            desired_row_order(RowOrder::BottomUp, false),
            RowOrder::BottomUp
        );
        assert_eq!(
            desired_row_order(RowOrder::TopDown, false),
            RowOrder::TopDown
        );
    }

    #[test]
    fn row_order_from_height() {
        assert_eq!(RowOrder::from_height(480), RowOrder::BottomUp);
        assert_eq!(RowOrder::from_height(-480), RowOrder::TopDown);
        assert_eq!(RowOrder::TopDown.signed_height(480), -480);
        assert_eq!(RowOrder::BottomUp.signed_height(480), 480);
    }

    #[test]
    fn geometry_from_header() {
        let geometry = FrameGeometry::from_header(640, -480).unwrap();
        assert_eq!(geometry.width(), 640);
        assert_eq!(geometry.rows(), 480);
        assert_eq!(geometry.row_order(), RowOrder::TopDown);
        assert_eq!(geometry.signed_height(), -480);
        assert_eq!(geometry.pixel_count(), 307_200);
    }

    #[test]
    fn geometry_rejects_degenerate_sizes() {
        for (width, height) in [(0, 480), (-640, 480), (640, 0), (1, i32::MIN)] {
            assert_eq!(
                FrameGeometry::from_header(width, height),
                Err(StageError::InvalidGeometry { width, height })
            );
        }
    }
}
