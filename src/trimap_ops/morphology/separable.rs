use super::{Boundary, MorphologyOp};
use crate::error::Error;
use crate::trimap_ops::mask::Mask;
use crate::utils::validate_kernel_radius;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// 分離可能フィルタで膨張処理を行う
///
/// 正方形の構造要素を水平方向と垂直方向の1次元最大値フィルタに分解します。
/// 結果は [`super::dilate_naive`] とビット単位で一致します。
///
/// # 引数
///
/// * `mask` - 入力マスク
/// * `radius` - カーネル半径（窓幅は `2 * radius + 1`）
/// * `boundary` - 画像外の画素の扱い
///
/// # エラー
///
/// * 半径が0の場合
///
/// # パフォーマンス
///
/// 計算量は `O(width * height * radius)` です。
pub fn dilate_separable(mask: &Mask, radius: u32, boundary: Boundary) -> Result<Mask, Error> {
    validate_kernel_radius(radius)?;
    Ok(apply(mask, radius as usize, boundary, MorphologyOp::Dilate))
}

/// 分離可能フィルタで収縮処理を行う
///
/// 水平方向と垂直方向の1次元最小値フィルタを順に適用します。
/// 結果は [`super::erode_naive`] とビット単位で一致します。
///
/// # 引数
///
/// * `mask` - 入力マスク
/// * `radius` - カーネル半径（窓幅は `2 * radius + 1`）
/// * `boundary` - 画像外の画素の扱い
///
/// # エラー
///
/// * 半径が0の場合
pub fn erode_separable(mask: &Mask, radius: u32, boundary: Boundary) -> Result<Mask, Error> {
    validate_kernel_radius(radius)?;
    Ok(apply(mask, radius as usize, boundary, MorphologyOp::Erode))
}

/// 水平パスが完了してから垂直パスを開始する
fn apply(mask: &Mask, radius: usize, boundary: Boundary, op: MorphologyOp) -> Mask {
    let (width, height) = mask.dimensions();
    let (w, h) = (width as usize, height as usize);
    let src = mask.as_slice();

    // 水平パス
    let mut horizontal = vec![false; w * h];
    for_each_row(&mut horizontal, w, |y, row| {
        let line = &src[y * w..(y + 1) * w];
        for (x, out) in row.iter_mut().enumerate() {
            *out = window_1d(line, x, radius, boundary, op);
        }
    });

    // 垂直パス（各出力行は中間結果の 2k+1 行から計算する）
    let mut output = vec![false; w * h];
    for_each_row(&mut output, w, |y, row| {
        let (lo, hi) = window_bounds(y, radius, h);
        if op == MorphologyOp::Erode && boundary == Boundary::Unset && hi - lo < 2 * radius {
            // 窓が画像外にはみ出すので収縮結果は全て false
            return;
        }
        row.copy_from_slice(&horizontal[lo * w..(lo + 1) * w]);
        for sy in lo + 1..=hi {
            let line = &horizontal[sy * w..(sy + 1) * w];
            for (out, &v) in row.iter_mut().zip(line) {
                match op {
                    MorphologyOp::Dilate => *out |= v,
                    MorphologyOp::Erode => *out &= v,
                }
            }
        }
    });

    Mask::from_parts(width, height, output)
}

/// 1次元の窓で最大値（膨張）または最小値（収縮）を求める
#[inline]
fn window_1d(
    line: &[bool],
    center: usize,
    radius: usize,
    boundary: Boundary,
    op: MorphologyOp,
) -> bool {
    let (lo, hi) = window_bounds(center, radius, line.len());
    let window = &line[lo..=hi];
    match op {
        MorphologyOp::Dilate => window.iter().any(|&v| v),
        MorphologyOp::Erode => {
            let clipped = hi - lo < 2 * radius;
            if clipped && boundary == Boundary::Unset {
                false
            } else {
                window.iter().all(|&v| v)
            }
        }
    }
}

/// 画像内に収まる窓の範囲 `[lo, hi]` を返す
#[inline]
pub(super) fn window_bounds(center: usize, radius: usize, len: usize) -> (usize, usize) {
    (
        center.saturating_sub(radius),
        center.saturating_add(radius).min(len - 1),
    )
}

#[cfg(feature = "rayon")]
fn for_each_row<F>(buffer: &mut [bool], width: usize, f: F)
where
    F: Fn(usize, &mut [bool]) + Send + Sync,
{
    buffer
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(not(feature = "rayon"))]
fn for_each_row<F>(buffer: &mut [bool], width: usize, f: F)
where
    F: Fn(usize, &mut [bool]),
{
    buffer
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mask_from_rows;

    #[test]
    fn window_bounds_clips_to_line() {
        assert_eq!(window_bounds(0, 2, 10), (0, 2));
        assert_eq!(window_bounds(5, 2, 10), (3, 7));
        assert_eq!(window_bounds(9, 2, 10), (7, 9));
        assert_eq!(window_bounds(1, 100, 3), (0, 2));
    }

    #[test]
    fn window_1d_respects_boundary_for_erosion() {
        let line = [true, true, true, true];
        assert!(window_1d(&line, 0, 1, Boundary::Clamp, MorphologyOp::Erode));
        assert!(!window_1d(&line, 0, 1, Boundary::Unset, MorphologyOp::Erode));
        assert!(window_1d(&line, 1, 1, Boundary::Unset, MorphologyOp::Erode));
    }

    #[test]
    fn dilate_single_pixel_with_radius_two() {
        let mask = mask_from_rows(&[".......", ".......", "...#...", ".......", "......."]);
        let expected = mask_from_rows(&[".#####.", ".#####.", ".#####.", ".#####.", ".#####."]);
        assert_eq!(dilate_separable(&mask, 2, Boundary::Clamp).unwrap(), expected);
    }

    #[test]
    fn erode_unset_clears_thin_image() {
        let mask = Mask::filled(10, 2, true).unwrap();
        assert!(erode_separable(&mask, 1, Boundary::Unset).unwrap().is_empty());
        assert!(erode_separable(&mask, 1, Boundary::Clamp).unwrap().is_full());
    }

    #[test]
    fn zero_radius_fails() {
        let mask = Mask::new(2, 2).unwrap();
        assert_eq!(
            dilate_separable(&mask, 0, Boundary::Clamp),
            Err(Error::InvalidKernelRadius(0))
        );
    }
}
