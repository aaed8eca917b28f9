//! Binary dilation and erosion with a square structuring element.
//!
//! A radius `k` covers the `(2k + 1) x (2k + 1)` square centered on each
//! pixel (Chebyshev distance `<= k`). Dilation sets a pixel when any pixel
//! of its window is set; erosion keeps it only when every pixel is.
//!
//! Two implementations are provided and must agree bit for bit:
//!
//! - [`naive`] scans the full 2D window, `O(w * h * k^2)`. It is the oracle.
//! - [`separable`] runs a horizontal then a vertical 1D pass, `O(w * h * k)`.

pub mod naive;
pub mod separable;

use log::debug;

use crate::error::Error;
use crate::trimap_ops::mask::Mask;

pub use naive::{dilate_naive, erode_naive};
pub use separable::{dilate_separable, erode_separable};

/// Morphological operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphologyOp {
    Dilate,
    Erode,
}

/// Which implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphologyVariant {
    /// Full 2D window scan.
    Naive,
    /// Horizontal pass followed by a vertical pass.
    #[default]
    Separable,
}

/// How neighbors outside the image take part in the window.
///
/// Dilation gives the same result under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Out-of-bounds neighbors are left out of the window. A fully set
    /// mask stays fully set under erosion.
    #[default]
    Clamp,
    /// Out-of-bounds neighbors count as unset, so erosion clears every
    /// pixel closer than `k` to the image edge.
    Unset,
}

/// Radius, implementation and boundary policy for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyOptions {
    pub radius: u32,
    pub variant: MorphologyVariant,
    pub boundary: Boundary,
}

impl Default for MorphologyOptions {
    fn default() -> Self {
        Self {
            radius: 1,
            variant: MorphologyVariant::default(),
            boundary: Boundary::default(),
        }
    }
}

impl MorphologyOptions {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
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
}

/// Runs `op` on `mask` with the given options.
///
/// # Errors
///
/// `Error::InvalidKernelRadius` if `options.radius` is zero.
pub fn morph(mask: &Mask, op: MorphologyOp, options: &MorphologyOptions) -> Result<Mask, Error> {
    let MorphologyOptions {
        radius,
        variant,
        boundary,
    } = *options;
    debug!(
        "{:?} {}x{} radius {} ({:?}, {:?})",
        op,
        mask.width(),
        mask.height(),
        radius,
        variant,
        boundary
    );
    match (variant, op) {
        (MorphologyVariant::Naive, MorphologyOp::Dilate) => dilate_naive(mask, radius, boundary),
        (MorphologyVariant::Naive, MorphologyOp::Erode) => erode_naive(mask, radius, boundary),
        (MorphologyVariant::Separable, MorphologyOp::Dilate) => {
            dilate_separable(mask, radius, boundary)
        }
        (MorphologyVariant::Separable, MorphologyOp::Erode) => {
            erode_separable(mask, radius, boundary)
        }
    }
}

/// Dilation and erosion on [`Mask`] with the default boundary policy.
pub trait Morphology {
    fn dilate(&self, radius: u32, variant: MorphologyVariant) -> Result<Mask, Error>;

    fn erode(&self, radius: u32, variant: MorphologyVariant) -> Result<Mask, Error>;

    fn morph(&self, op: MorphologyOp, options: &MorphologyOptions) -> Result<Mask, Error>;
}

impl Morphology for Mask {
    fn dilate(&self, radius: u32, variant: MorphologyVariant) -> Result<Mask, Error> {
        morph(
            self,
            MorphologyOp::Dilate,
            &MorphologyOptions::new(radius).with_variant(variant),
        )
    }

    fn erode(&self, radius: u32, variant: MorphologyVariant) -> Result<Mask, Error> {
        morph(
            self,
            MorphologyOp::Erode,
            &MorphologyOptions::new(radius).with_variant(variant),
        )
    }

    fn morph(&self, op: MorphologyOp, options: &MorphologyOptions) -> Result<Mask, Error> {
        morph(self, op, options)
    }
}

/// インターリーブされたバッファのチャンネル0に格納されたマスクを膨張する
///
/// # 引数
///
/// * `data` - `width * height * channels` バイトのマスク
/// * `width` - 画像の幅
/// * `height` - 画像の高さ
/// * `channels` - 1画素あたりのチャンネル数（1〜4）
/// * `radius` - カーネル半径
/// * `variant` - 素朴な実装か分離可能な実装か
///
/// # 戻り値
///
/// * 同じレイアウトのマスク（立っている画素の色チャンネルは255、アルファは常に255）
///
/// # エラー
///
/// * 入力の検証に失敗した場合、または半径が0の場合
pub fn dilate_interleaved(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    radius: u32,
    variant: MorphologyVariant,
) -> Result<Vec<u8>, Error> {
    let mask = Mask::from_interleaved(data, width, height, channels)?;
    mask.dilate(radius, variant)?.to_interleaved(channels)
}

/// インターリーブされたバッファのマスクを収縮する
///
/// 引数と戻り値は [`dilate_interleaved`] と同じです。
pub fn erode_interleaved(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    radius: u32,
    variant: MorphologyVariant,
) -> Result<Vec<u8>, Error> {
    let mask = Mask::from_interleaved(data, width, height, channels)?;
    mask.erode(radius, variant)?.to_interleaved(channels)
}
