use super::flood_fill::{flood_fill_background, FloodFillOptions};
use super::mask::Mask;
use super::pixel_buffer::PixelBuffer;
use super::trimap::{compose_trimap, Trimap, TrimapOptions};
use crate::error::Error;
use crate::utils::validate_kernel_radius;
use crate::Image;
use image::Pixel;

/// End-to-end configuration: flood fill followed by trimap composition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrimapConfig {
    pub flood_fill: FloodFillOptions,
    pub trimap: TrimapOptions,
}

impl TrimapConfig {
    pub fn with_flood_fill(mut self, flood_fill: FloodFillOptions) -> Self {
        self.flood_fill = flood_fill;
        self
    }

    pub fn with_trimap(mut self, trimap: TrimapOptions) -> Self {
        self.trimap = trimap;
        self
    }

    /// Checks the options that do not depend on the image.
    pub fn validate(&self) -> Result<(), Error> {
        validate_kernel_radius(self.trimap.kernel_radius)
    }

    /// 塗りつぶしからトライマップまでを一括で実行する
    ///
    /// 画素に触れる前に設定を検証します。
    ///
    /// # 引数
    ///
    /// * `image` - 入力画像
    ///
    /// # 戻り値
    ///
    /// * 背景マスク、膨張・収縮マスク、トライマップをまとめた [`TrimapResult`]
    ///
    /// # エラー
    ///
    /// * `Error::InvalidKernelRadius` - 半径が0の場合
    /// * `Error::ReferenceChannelMismatch` - 固定の参照色のチャンネル数が画像と異なる場合
    pub fn generate(&self, image: &PixelBuffer<'_>) -> Result<TrimapResult, Error> {
        self.validate()?;
        let background = flood_fill_background(image, &self.flood_fill)?;
        let (dilated, eroded, trimap) = compose_trimap(&background, &self.trimap)?;
        Ok(TrimapResult {
            background,
            dilated,
            eroded,
            trimap,
        })
    }
}

/// Every intermediate buffer produced by [`TrimapConfig::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimapResult {
    /// Flood-fill output.
    pub background: Mask,
    pub dilated: Mask,
    pub eroded: Mask,
    pub trimap: Trimap,
}

/// Trimap generation directly on `image` buffers with 8-bit subpixels.
pub trait TrimapExt {
    /// 画像からトライマップを生成する
    ///
    /// # 引数
    ///
    /// * `config` - 塗りつぶしとトライマップの設定
    ///
    /// # 戻り値
    ///
    /// * 途中のマスクを含む [`TrimapResult`]
    ///
    /// # エラー
    ///
    /// * [`TrimapConfig::generate`] と同じ
    fn generate_trimap(&self, config: &TrimapConfig) -> Result<TrimapResult, Error>;
}

impl<P> TrimapExt for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn generate_trimap(&self, config: &TrimapConfig) -> Result<TrimapResult, Error> {
        let buffer = PixelBuffer::from_image(self)?;
        config.generate(&buffer)
    }
}
