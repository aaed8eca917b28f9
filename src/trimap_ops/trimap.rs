//! Trimap composition from a flood-filled background mask.
//!
//! The background mask is dilated and eroded with the same radius:
//!
//! - eroded background set → definite background (`0`)
//! - dilated background unset → definite foreground (`255`)
//! - otherwise → unknown (`128`)
//!
//! The unknown band is exactly `dilated && !eroded`, so its width grows
//! with the radius.

use log::{debug, warn};

use super::mask::{interleave, Mask};
use super::morphology::{morph, Boundary, MorphologyOp, MorphologyOptions, MorphologyVariant};
use crate::error::Error;
use crate::utils::{validate_channels, validate_matching_dimensions};
use crate::Image;
use image::Luma;

/// Trimap class of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TrimapClass {
    Background = 0,
    Unknown = 128,
    Foreground = 255,
}

impl TrimapClass {
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Parses a stored trimap value.
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            128 => Some(Self::Unknown),
            255 => Some(Self::Foreground),
            _ => None,
        }
    }
}

/// Pixel counts per trimap class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimapCounts {
    pub background: usize,
    pub unknown: usize,
    pub foreground: usize,
}

/// Options for [`generate_trimap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimapOptions {
    /// Morphology radius; the unknown band spans up to `2 * kernel_radius` pixels.
    pub kernel_radius: u32,
    pub variant: MorphologyVariant,
    pub boundary: Boundary,
}

impl Default for TrimapOptions {
    fn default() -> Self {
        Self {
            kernel_radius: 30,
            variant: MorphologyVariant::default(),
            boundary: Boundary::default(),
        }
    }
}

impl TrimapOptions {
    pub fn new(kernel_radius: u32) -> Self {
        Self {
            kernel_radius,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: MorphologyVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn morphology(&self) -> MorphologyOptions {
        MorphologyOptions::new(self.kernel_radius)
            .with_variant(self.variant)
            .with_boundary(self.boundary)
    }
}

/// Three-valued `width x height` map: 0, 128 or 255 per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Trimap {
    /// Composes a trimap from a dilated and an eroded background mask.
    ///
    /// # Errors
    ///
    /// `Error::DimensionMismatch` if the masks differ in size.
    pub fn from_masks(dilated: &Mask, eroded: &Mask) -> Result<Self, Error> {
        validate_matching_dimensions(dilated.dimensions(), eroded.dimensions())?;
        let data = dilated
            .iter()
            .zip(eroded.iter())
            .map(|(dilated, eroded)| classify(dilated, eroded).value())
            .collect();
        let (width, height) = dilated.dimensions();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw values, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Class at `(x, y)`; `None` outside the trimap.
    pub fn class_at(&self, x: u32, y: u32) -> Option<TrimapClass> {
        if x < self.width && y < self.height {
            TrimapClass::from_value(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn counts(&self) -> TrimapCounts {
        self.data
            .iter()
            .fold(TrimapCounts::default(), |mut counts, &value| {
                match TrimapClass::from_value(value) {
                    Some(TrimapClass::Background) => counts.background += 1,
                    Some(TrimapClass::Unknown) => counts.unknown += 1,
                    Some(TrimapClass::Foreground) => counts.foreground += 1,
                    None => {}
                }
                counts
            })
    }

    pub fn has_foreground(&self) -> bool {
        self.data.contains(&TrimapClass::Foreground.value())
    }

    pub fn has_unknown(&self) -> bool {
        self.data.contains(&TrimapClass::Unknown.value())
    }

    /// No foreground and no unknown pixel: nothing left for a matting step.
    pub fn is_degenerate(&self) -> bool {
        !self.has_foreground() && !self.has_unknown()
    }

    /// Grayscale image whose intensity is the trimap value.
    pub fn to_luma(&self) -> Image<Luma<u8>> {
        let width = self.width as usize;
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([self.data[y as usize * width + x as usize]])
        })
    }

    /// Interleaved buffer with the value on every color channel and an
    /// opaque alpha where the layout has one.
    pub fn to_interleaved(&self, channels: usize) -> Result<Vec<u8>, Error> {
        validate_channels(channels)?;
        Ok(interleave(
            self.data.iter().copied(),
            self.data.len(),
            channels,
        ))
    }
}

#[inline]
fn classify(dilated: bool, eroded: bool) -> TrimapClass {
    if eroded {
        TrimapClass::Background
    } else if !dilated {
        TrimapClass::Foreground
    } else {
        TrimapClass::Unknown
    }
}

/// 背景マスクからトライマップを生成する
///
/// 同じ半径で膨張と収縮を行い、両者の差分を未知領域とします。
///
/// # 引数
///
/// * `background` - 塗りつぶしで得た背景マスク
/// * `options` - カーネル半径、フィルタの種類、境界の扱い
///
/// # 戻り値
///
/// * 各画素が 0、128、255 のいずれかのトライマップ
///
/// # エラー
///
/// * `Error::InvalidKernelRadius` - 半径が0の場合
pub fn generate_trimap(background: &Mask, options: &TrimapOptions) -> Result<Trimap, Error> {
    compose_trimap(background, options).map(|(_, _, trimap)| trimap)
}

/// Dilated mask, eroded mask and the trimap built from them.
pub(crate) fn compose_trimap(
    background: &Mask,
    options: &TrimapOptions,
) -> Result<(Mask, Mask, Trimap), Error> {
    let morphology = options.morphology();
    let dilated = morph(background, MorphologyOp::Dilate, &morphology)?;
    let eroded = morph(background, MorphologyOp::Erode, &morphology)?;
    let trimap = Trimap::from_masks(&dilated, &eroded)?;
    log_summary(&trimap);
    Ok((dilated, eroded, trimap))
}

/// インターリーブされた塗りつぶし結果からトライマップを生成する
///
/// 各画素のチャンネル0が0以外なら背景として扱います。
///
/// # 引数
///
/// * `data` - `width * height * channels` バイトの塗りつぶし結果
/// * `width` - 画像の幅
/// * `height` - 画像の高さ
/// * `channels` - 1画素あたりのチャンネル数（1〜4）
/// * `kernel_radius` - 膨張・収縮の半径
/// * `variant` - 素朴な実装か分離可能な実装か
///
/// # 戻り値
///
/// * 入力と同じレイアウトのトライマップ（アルファチャンネルは255）
///
/// # エラー
///
/// * `Error::EmptyImage` - 幅または高さが0の場合
/// * `Error::InvalidChannelCount` - チャンネル数が範囲外の場合
/// * `Error::BufferLengthMismatch` - バッファ長が一致しない場合
/// * `Error::InvalidKernelRadius` - 半径が0の場合
pub fn trimap_from_flood_fill(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    kernel_radius: u32,
    variant: MorphologyVariant,
) -> Result<Vec<u8>, Error> {
    let background = Mask::from_interleaved(data, width, height, channels)?;
    let options = TrimapOptions::new(kernel_radius).with_variant(variant);
    generate_trimap(&background, &options)?.to_interleaved(channels)
}

fn log_summary(trimap: &Trimap) {
    let counts = trimap.counts();
    debug!(
        "trimap {}x{}: {} background, {} unknown, {} foreground",
        trimap.width(),
        trimap.height(),
        counts.background,
        counts.unknown,
        counts.foreground
    );
    if trimap.is_degenerate() {
        warn!(
            "trimap {}x{} has no foreground or unknown pixels",
            trimap.width(),
            trimap.height()
        );
    }
}
