/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! image comparison module of ODIN
//! computes structural similarity scores of 8bit image pairs, renders their divergence (RGB/HSV deltas and
//! threshold masks) and aggregates the resulting per-pair result directories

use std::path::Path;
use image::{self, DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage};
use tracing_subscriber::{EnvFilter, fmt};

mod errors;
pub use errors::{Result,OdinImgDiffError};

pub mod field;
pub use field::Field;

pub mod ssim;
pub use ssim::{SsimParams, LocalStats, local_stats, ssim_single_channel, ssim_multi_channel, similarity_score};

pub mod divergence;
pub use divergence::{Divergence, DivergenceParams, render_divergence};

pub mod result;
pub use result::{ComparisonResult, write_result, read_result};

pub mod aggregate;
pub use aggregate::{ScoreFilter, DiffKind, DiffFlags, AggregationOptions, AggregationSelection, filter_results};

pub mod materialize;
pub use materialize::{MaterializeAction, materialize};

/// initialize the tracing subscriber of our executables. Log output goes to stderr and is filtered
/// by RUST_LOG (defaulting to 'info')
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter( filter).with_writer( std::io::stderr).try_init();
}

/* #region image preconditions ****************************************************************************/

/// number of channels of supported (8bit, 1-4 channel) image layouts
pub fn channel_count (img: &DynamicImage)->Result<usize> {
    match img {
        DynamicImage::ImageLuma8(_) => Ok(1),
        DynamicImage::ImageLumaA8(_) => Ok(2),
        DynamicImage::ImageRgb8(_) => Ok(3),
        DynamicImage::ImageRgba8(_) => Ok(4),
        other => Err( OdinImgDiffError::UnsupportedImageFormat( format!("{:?}", other.color())))
    }
}

pub fn check_equal_dimensions (img1: &DynamicImage, img2: &DynamicImage)->Result<()> {
    if img1.dimensions() != img2.dimensions() {
        Err( OdinImgDiffError::DimensionMismatch( format!("{:?} vs {:?}", img1.dimensions(), img2.dimensions())) )
    } else {
        Ok(())
    }
}

/// check that both images can be compared at all: same dimensions, same (supported) channel count
pub fn check_comparable (img1: &DynamicImage, img2: &DynamicImage)->Result<usize> {
    check_equal_dimensions( img1, img2)?;
    let n1 = channel_count( img1)?;
    let n2 = channel_count( img2)?;
    if n1 != n2 {
        Err( OdinImgDiffError::ChannelCountMismatch( n1, n2))
    } else {
        Ok(n1)
    }
}

/// load two images that are going to be compared
pub fn open_diff_image_pair<P> (path1: P, path2: P)->Result<(DynamicImage,DynamicImage)> where P: AsRef<Path> {
    let img1 = image::open(path1)?;
    let img2 = image::open(path2)?;
    check_equal_dimensions( &img1, &img2)?;
    Ok( (img1, img2) )
}

/* #endregion image preconditions */

/* #region channel access *********************************************************************************/

/// split a supported image into one gray image per channel (alpha included)
pub fn split_channels (img: &DynamicImage)->Result<Vec<GrayImage>> {
    let n = channel_count( img)?;
    let (w,h) = img.dimensions();
    let raw = img.as_bytes();

    let channels = (0..n).map( |c| {
        GrayImage::from_fn( w, h, |x,y| {
            let i = (y as usize * w as usize + x as usize) * n + c;
            Luma([raw[i]])
        })
    }).collect();

    Ok(channels)
}

/// the 3 channel RGB rendition of a supported image. Gray values are replicated and alpha is dropped
pub fn rgb_rendition (img: &DynamicImage)->Result<RgbImage> {
    let n = channel_count( img)?;
    let (w,h) = img.dimensions();
    let raw = img.as_bytes();

    Ok( RgbImage::from_fn( w, h, |x,y| {
        let i = (y as usize * w as usize + x as usize) * n;
        match n {
            1 | 2 => Rgb([raw[i], raw[i], raw[i]]),
            _ => Rgb([raw[i], raw[i+1], raw[i+2]])
        }
    }))
}

/* #endregion channel access */

/* #region HSV conversion *********************************************************************************/

/// h in degrees [0..360), s and v in [0..1]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

/// 8bit HSV with h in [0..180) (half degrees) and s,v in [0..255]
pub fn rgb_to_hsv8 (rgb: &Rgb<u8>)->Rgb<u8> {
    let [r,g,b] = rgb.0;
    let (h,s,v) = rgb_to_hsv( r, g, b);

    let h = (h / 2.0).round() as u32 % 180;
    let s = (s * 255.0).round() as u8;
    let v = (v * 255.0).round() as u8;

    Rgb([h as u8, s, v])
}

pub fn rgb_image_to_hsv8 (img: &RgbImage)->RgbImage {
    let (w,h) = img.dimensions();
    RgbImage::from_fn( w, h, |x,y| rgb_to_hsv8( img.get_pixel(x,y)))
}

/* #endregion HSV conversion */
