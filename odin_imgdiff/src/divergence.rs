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

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use serde::{Serialize,Deserialize};
use tracing::debug;
use crate::{check_comparable, rgb_rendition, rgb_image_to_hsv8, errors::Result};

/// HSV delta magnitude above which a pixel is considered to be divergent
pub const MASK_THRESHOLD: f64 = 25.0;

pub const MASK_SET: u8 = 255;
pub const MASK_CLEAR: u8 = 0;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DivergenceParams {
    pub mask_threshold: f64
}

impl Default for DivergenceParams {
    fn default()->Self {
        DivergenceParams { mask_threshold: MASK_THRESHOLD }
    }
}

/// the visual artifacts of an image comparison
pub struct Divergence {
    pub absdiff_rgb: RgbImage,
    pub absdiff_hsv: RgbImage,
    pub mask: GrayImage,
}

impl Divergence {
    /// number of set mask pixels
    pub fn divergent_pixels (&self)->usize {
        self.mask.pixels().filter( |p| p.0[0] == MASK_SET).count()
    }
}

pub fn render_divergence (img1: &DynamicImage, img2: &DynamicImage, params: &DivergenceParams)->Result<Divergence> {
    check_comparable( img1, img2)?;

    let rgb1 = rgb_rendition( img1)?;
    let rgb2 = rgb_rendition( img2)?;
    let absdiff_rgb = absdiff_rgb8( &rgb1, &rgb2);

    let hsv1 = rgb_image_to_hsv8( &rgb1);
    let hsv2 = rgb_image_to_hsv8( &rgb2);
    let absdiff_hsv = absdiff_rgb8( &hsv1, &hsv2);

    let mask = threshold_mask( &absdiff_hsv, params.mask_threshold);

    let divergence = Divergence { absdiff_rgb, absdiff_hsv, mask };
    debug!("{} divergent pixels", divergence.divergent_pixels());

    Ok(divergence)
}

/// per-pixel per-channel absolute difference of two images with the same dimensions
pub fn absdiff_rgb8 (img1: &RgbImage, img2: &RgbImage)->RgbImage {
    let (w,h) = img1.dimensions();
    RgbImage::from_fn( w, h, |x,y| {
        let a = img1.get_pixel(x,y).0;
        let b = img2.get_pixel(x,y).0;
        Rgb([ a[0].abs_diff(b[0]), a[1].abs_diff(b[1]), a[2].abs_diff(b[2]) ])
    })
}

/// set all pixels whose 3-channel delta magnitude exceeds the threshold (exclusive)
pub fn threshold_mask (delta: &RgbImage, threshold: f64)->GrayImage {
    let (w,h) = delta.dimensions();
    GrayImage::from_fn( w, h, |x,y| {
        if delta_norm( delta.get_pixel(x,y)) > threshold { Luma([MASK_SET]) } else { Luma([MASK_CLEAR]) }
    })
}

#[inline]
pub fn delta_norm (d: &Rgb<u8>)->f64 {
    let [a,b,c] = d.0;
    let (a,b,c) = (a as f64, b as f64, c as f64);
    (a*a + b*b + c*c).sqrt()
}
