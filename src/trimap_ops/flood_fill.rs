//! Border-seeded flood fill that marks reachable background pixels.
//!
//! Every border pixel that satisfies the similarity predicate seeds the
//! fill, which then spreads through 4-connected neighbors that also
//! satisfy it. The result is the reachability set, so the traversal order
//! never changes the output.
//!
//! The work list lives on the heap; there is no recursion.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::error::Error;
use crate::trimap_ops::mask::Mask;
use crate::trimap_ops::pixel_buffer::PixelBuffer;
use crate::trimap_ops::similarity::{
    ChannelDistance, LuminanceDistance, ReferenceColor, SimilarityMetric, SimilarityPredicate,
};
use crate::Image;
use image::Pixel;

/// Order in which the work list is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// LIFO stack.
    #[default]
    DepthFirst,
    /// FIFO queue.
    BreadthFirst,
}

/// Options for [`flood_fill_background`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodFillOptions {
    /// Maximum distance from the reference color still counted as background.
    pub threshold: u8,
    pub reference: ReferenceColor,
    pub metric: SimilarityMetric,
    pub order: TraversalOrder,
}

impl Default for FloodFillOptions {
    fn default() -> Self {
        Self {
            threshold: 16,
            reference: ReferenceColor::default(),
            metric: SimilarityMetric::default(),
            order: TraversalOrder::default(),
        }
    }
}

impl FloodFillOptions {
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_reference(mut self, reference: ReferenceColor) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }
}

/// Work list abstraction so both traversal orders share one loop.
enum WorkList {
    Stack(Vec<usize>),
    Queue(VecDeque<usize>),
}

impl WorkList {
    fn new(order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::DepthFirst => Self::Stack(Vec::new()),
            TraversalOrder::BreadthFirst => Self::Queue(VecDeque::new()),
        }
    }

    #[inline]
    fn push(&mut self, index: usize) {
        match self {
            Self::Stack(stack) => stack.push(index),
            Self::Queue(queue) => queue.push_back(index),
        }
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        match self {
            Self::Stack(stack) => stack.pop(),
            Self::Queue(queue) => queue.pop_front(),
        }
    }
}

/// 画像の縁から `predicate` を満たす画素をたどって背景を塗りつぶす
///
/// 受理された縁の画素から、受理された画素だけを通る4近傍の経路が
/// 存在する画素がマスクに立ちます。
///
/// # 引数
///
/// * `image` - 入力画像
/// * `predicate` - 背景とみなす画素の判定
/// * `order` - 作業リストの取り出し順（結果には影響しない）
///
/// # 戻り値
///
/// * 画像と同じサイズの背景マスク
pub fn flood_fill<S>(image: &PixelBuffer<'_>, predicate: &S, order: TraversalOrder) -> Mask
where
    S: SimilarityPredicate + ?Sized,
{
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    let mut visited = vec![false; w * h];
    let mut work = WorkList::new(order);

    // Marking on push keeps every index in the work list at most once.
    let try_visit = |index: usize, visited: &mut Vec<bool>, work: &mut WorkList| {
        if !visited[index] && predicate.is_background(image.pixel_at(index)) {
            visited[index] = true;
            work.push(index);
        }
    };

    for x in 0..w {
        try_visit(x, &mut visited, &mut work);
        try_visit((h - 1) * w + x, &mut visited, &mut work);
    }
    for y in 1..h.saturating_sub(1) {
        try_visit(y * w, &mut visited, &mut work);
        try_visit(y * w + w - 1, &mut visited, &mut work);
    }

    let mut seeds = 0usize;
    let mut filled = 0usize;
    if log::log_enabled!(log::Level::Debug) {
        seeds = visited.iter().filter(|&&v| v).count();
    }

    while let Some(index) = work.pop() {
        filled += 1;
        let (x, y) = (index % w, index / w);
        if x > 0 {
            try_visit(index - 1, &mut visited, &mut work);
        }
        if x + 1 < w {
            try_visit(index + 1, &mut visited, &mut work);
        }
        if y > 0 {
            try_visit(index - w, &mut visited, &mut work);
        }
        if y + 1 < h {
            try_visit(index + w, &mut visited, &mut work);
        }
    }

    debug!(
        "flood_fill {}x{}: {} border seeds, {} of {} pixels background",
        width,
        height,
        seeds,
        filled,
        w * h
    );

    Mask::from_parts(width, height, visited)
}

/// 組み込みの類似度で背景を塗りつぶす
///
/// # 引数
///
/// * `image` - 入力画像
/// * `options` - しきい値、参照色、類似度、走査順
///
/// # 戻り値
///
/// * 背景マスク
///
/// # エラー
///
/// * `Error::ReferenceChannelMismatch` - 固定の参照色のチャンネル数が画像と異なる場合
pub fn flood_fill_background(
    image: &PixelBuffer<'_>,
    options: &FloodFillOptions,
) -> Result<Mask, Error> {
    let reference = options.reference.resolve(image)?;
    let mask = match options.metric {
        SimilarityMetric::Channel => {
            let predicate = ChannelDistance::new(reference, options.threshold);
            flood_fill(image, &predicate, options.order)
        }
        SimilarityMetric::Luminance => {
            let predicate = LuminanceDistance::new(&reference, options.threshold);
            flood_fill(image, &predicate, options.order)
        }
    };

    if mask.is_full() {
        warn!(
            "flood fill marked the whole {}x{} image as background (threshold {})",
            image.width(),
            image.height(),
            options.threshold
        );
    }

    Ok(mask)
}

/// インターリーブされたバイト列に対して塗りつぶしを行う
///
/// # 引数
///
/// * `pixels` - `width * height * channels` バイトの画素データ
/// * `width` - 画像の幅
/// * `height` - 画像の高さ
/// * `channels` - 1画素あたりのチャンネル数（1〜4）
/// * `options` - 塗りつぶしの設定
///
/// # 戻り値
///
/// * 背景マスク
///
/// # エラー
///
/// * `Error::EmptyImage` - 幅または高さが0の場合
/// * `Error::InvalidChannelCount` - チャンネル数が範囲外の場合
/// * `Error::BufferLengthMismatch` - バッファ長が一致しない場合
/// * `Error::ReferenceChannelMismatch` - 固定の参照色のチャンネル数が異なる場合
pub fn flood_fill_interleaved(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    options: &FloodFillOptions,
) -> Result<Mask, Error> {
    let image = PixelBuffer::new(pixels, width, height, channels)?;
    flood_fill_background(&image, options)
}

/// Flood fill directly on `image` buffers with 8-bit subpixels.
pub trait FloodFillExt {
    /// Background mask using the built-in metrics.
    fn flood_fill_background(&self, options: &FloodFillOptions) -> Result<Mask, Error>;

    /// Background mask using a caller-supplied predicate.
    fn flood_fill_with<S>(&self, predicate: &S, order: TraversalOrder) -> Result<Mask, Error>
    where
        S: SimilarityPredicate + ?Sized;
}

impl<P> FloodFillExt for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn flood_fill_background(&self, options: &FloodFillOptions) -> Result<Mask, Error> {
        let buffer = PixelBuffer::from_image(self)?;
        flood_fill_background(&buffer, options)
    }

    fn flood_fill_with<S>(&self, predicate: &S, order: TraversalOrder) -> Result<Mask, Error>
    where
        S: SimilarityPredicate + ?Sized,
    {
        let buffer = PixelBuffer::from_image(self)?;
        Ok(flood_fill(&buffer, predicate, order))
    }
}
