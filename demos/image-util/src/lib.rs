use std::path::Path;

use anyhow::Context;
use heatplate::FrameBuffer;
use image::{Rgb, RgbImage};
use log::info;
use ndarray::Array2;

/// Black, red, yellow, white ramp over `t` in `[0, 1]`.
fn hot(t: f64) -> Rgb<u8> {
    let t = t.max(0.0).min(1.0);
    let channel = |lo: f64| ((t - lo) * 3.0).max(0.0).min(1.0);

    let c = |x: f64| (x * 255.0) as u8;
    Rgb([c(channel(0.0)), c(channel(1.0 / 3.0)), c(channel(2.0 / 3.0))])
}

/// Writes `x` as a heatmap, rows top to bottom, scaled to the fixed range `(lo, hi)`.
pub fn save_heatmap(
    dir: &Path,
    prefix: &str,
    index: usize,
    x: &Array2<f64>,
    (lo, hi): (f64, f64),
) -> anyhow::Result<()> {
    let (rows, cols) = x.dim();
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut img = RgbImage::new(cols as u32, rows as u32);

    for ((i, j), &v) in x.indexed_iter() {
        img.put_pixel(j as u32, i as u32, hot((v - lo) / span));
    }

    let path = dir.join(format!("{}_{:06}.png", prefix, index));
    img.save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Plays back every frame in order with the colour scale of the first frame.
pub fn render_frames(dir: &Path, prefix: &str, frames: &FrameBuffer) -> anyhow::Result<()> {
    let scale = match frames.color_scale() {
        Some(scale) => scale,
        None => return Ok(()),
    };

    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for (index, frame) in frames.iter().enumerate() {
        info!("{}", frames.label(index));
        save_heatmap(dir, prefix, index, frame.values(), scale)?;
    }

    Ok(())
}
