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

//! structural similarity (SSIM) of 8bit images according to Wang et al. 2004
//!
//! ```text
//!                 (2*mu_x*mu_y + c1)(2*sigma_xy + c2)
//!  SSIM(x,y) = ------------------------------------------------
//!              (mu_x^2 + mu_y^2 + c1)(sigma_x^2 + sigma_y^2 + c2)
//! ```
//!
//! window size, sigma and stabilization constants follow the recommendations in
//! https://live.ece.utexas.edu/publications/2021/Hitchiker_SSIM_Access.pdf and are only valid for a bit depth of 8

use image::{DynamicImage, GrayImage};
use serde::{Serialize,Deserialize};
use tracing::debug;
use crate::{channel_count, split_channels, check_equal_dimensions, check_comparable, field::Field, errors::{Result,OdinImgDiffError}};

/// C1 = (K1*L)^2 with K1 = 0.01 and L = 255
pub const SSIM_C1: f64 = 6.5025;
/// C2 = (K2*L)^2 with K2 = 0.03 and L = 255
pub const SSIM_C2: f64 = 58.5225;
pub const SSIM_WINDOW_SIZE: usize = 11;
pub const SSIM_SIGMA: f64 = 1.5;

/// the (frozen) SSIM parameters. Only tests should ever use anything but the default
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SsimParams {
    pub window_size: usize,
    pub sigma: f64,
    pub c1: f64,
    pub c2: f64,
}

impl Default for SsimParams {
    fn default()->Self {
        SsimParams { window_size: SSIM_WINDOW_SIZE, sigma: SSIM_SIGMA, c1: SSIM_C1, c2: SSIM_C2 }
    }
}

/// local (Gaussian window) statistics of two fields
pub struct LocalStats {
    pub mu_x: Field,
    pub mu_y: Field,
    pub sigma_x2: Field,
    pub sigma_y2: Field,
    pub sigma_xy: Field,
}

pub fn local_stats (x: &Field, y: &Field, params: &SsimParams)->Result<LocalStats> {
    x.check_dimensions(y)?;
    let blur = |f: &Field| f.gaussian_blur( params.window_size, params.sigma);

    let mu_x = blur(x);
    let mu_y = blur(y);

    let sigma_x2 = blur( &x.mul(x)?).sub( &mu_x.mul(&mu_x)?)?;
    let sigma_y2 = blur( &y.mul(y)?).sub( &mu_y.mul(&mu_y)?)?;
    let sigma_xy = blur( &x.mul(y)?).sub( &mu_x.mul(&mu_y)?)?;

    Ok( LocalStats { mu_x, mu_y, sigma_x2, sigma_y2, sigma_xy } )
}

/// the per-pixel SSIM field of two equally sized numeric fields
pub fn ssim_map (x: &Field, y: &Field, params: &SsimParams)->Result<Field> {
    let LocalStats { mu_x, mu_y, sigma_x2, sigma_y2, sigma_xy } = local_stats( x, y, params)?;
    let (w,h) = x.dimensions();
    let (c1,c2) = (params.c1, params.c2);

    let mut map = Field::new( w, h);
    for y in 0..h {
        for x in 0..w {
            let mx = mu_x.get(x,y);
            let my = mu_y.get(x,y);

            let num = (2.0 * mx * my + c1) * (2.0 * sigma_xy.get(x,y) + c2);
            let den = (mx*mx + my*my + c1) * (sigma_x2.get(x,y) + sigma_y2.get(x,y) + c2);
            map.set( x, y, num / den);
        }
    }

    Ok(map)
}

/// mean SSIM of two single channel images with identical dimensions
pub fn ssim_single_channel (img1: &DynamicImage, img2: &DynamicImage, params: &SsimParams)->Result<f64> {
    for img in [img1, img2] {
        let n = channel_count(img)?;
        if n != 1 { return Err( OdinImgDiffError::InvalidChannelCount(n)) }
    }
    check_equal_dimensions( img1, img2)?;

    ssim_luma8( &img1.to_luma8(), &img2.to_luma8(), params)
}

pub fn ssim_luma8 (img1: &GrayImage, img2: &GrayImage, params: &SsimParams)->Result<f64> {
    let x = Field::from_luma8( img1);
    let y = Field::from_luma8( img2);

    Ok( ssim_map( &x, &y, params)?.mean() )
}

/// unweighted mean of per-channel SSIM for images with 1-4 channels
pub fn ssim_multi_channel (img1: &DynamicImage, img2: &DynamicImage, params: &SsimParams)->Result<f64> {
    let n = check_comparable( img1, img2)?;

    let channels1 = split_channels( img1)?;
    let channels2 = split_channels( img2)?;

    let mut total = 0.0;
    for (i, (c1,c2)) in channels1.iter().zip( channels2.iter()).enumerate() {
        let s = ssim_luma8( c1, c2, params)?;
        debug!("SSIM channel {i}: {s}");
        total += s;
    }

    Ok( total / n as f64 )
}

/// the similarity percentage of two images (100 * mean SSIM). Note this is not clamped
pub fn similarity_score (img1: &DynamicImage, img2: &DynamicImage, params: &SsimParams)->Result<f64> {
    Ok( 100.0 * ssim_multi_channel( img1, img2, params)? )
}
