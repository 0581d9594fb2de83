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
#![allow(unused)]

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use odin_imgdiff::{render_divergence, rgb_to_hsv8, rgb_rendition, DivergenceParams, OdinImgDiffError};

// run with "cargo test --test test_divergence -- --nocapture"

fn gray (w: u32, h: u32, v: u8)->DynamicImage {
    DynamicImage::ImageLuma8( GrayImage::from_pixel( w, h, Luma([v])))
}

fn rgb (w: u32, h: u32, px: [u8;3])->DynamicImage {
    DynamicImage::ImageRgb8( RgbImage::from_pixel( w, h, Rgb(px)))
}

#[test]
fn test_hsv8_ranges() {
    assert_eq!( rgb_to_hsv8( &Rgb([255,0,0])), Rgb([0,255,255]));
    assert_eq!( rgb_to_hsv8( &Rgb([0,255,0])), Rgb([60,255,255]));
    assert_eq!( rgb_to_hsv8( &Rgb([0,0,255])), Rgb([120,255,255]));
    assert_eq!( rgb_to_hsv8( &Rgb([100,100,100])), Rgb([0,0,100]));
    assert_eq!( rgb_to_hsv8( &Rgb([0,0,0])), Rgb([0,0,0]));

    // hues close to 360deg wrap around to 0
    let Rgb([h,_,_]) = rgb_to_hsv8( &Rgb([255,0,1]));
    assert!( h < 180);
}

#[test]
fn test_identical_images() {
    let img = DynamicImage::ImageRgb8( RgbImage::from_fn( 8, 8, |x,y| Rgb([(x*30) as u8, (y*30) as u8, 77])));
    let d = render_divergence( &img, &img, &DivergenceParams::default()).unwrap();

    assert!( d.absdiff_rgb.pixels().all( |p| p.0 == [0,0,0]));
    assert!( d.absdiff_hsv.pixels().all( |p| p.0 == [0,0,0]));
    assert!( d.mask.pixels().all( |p| p.0[0] == 0));
    assert_eq!( d.divergent_pixels(), 0);
}

#[test]
fn test_absdiff_rgb() {
    let a = rgb( 2, 2, [10,20,30]);
    let b = rgb( 2, 2, [30,20,5]);
    let d = render_divergence( &a, &b, &DivergenceParams::default()).unwrap();

    assert_eq!( d.absdiff_rgb.dimensions(), (2,2));
    assert!( d.absdiff_rgb.pixels().all( |p| p.0 == [20,0,25]));
}

#[test]
fn test_mask_boundary() {
    let params = DivergenceParams::default();

    // gray values only differ in V, the HSV delta magnitude is the gray value difference
    let d = render_divergence( &gray( 4, 4, 100), &gray( 4, 4, 125), &params).unwrap();
    assert!( d.absdiff_hsv.pixels().all( |p| p.0 == [0,0,25]));
    assert!( d.mask.pixels().all( |p| p.0[0] == 0));

    let d = render_divergence( &gray( 4, 4, 100), &gray( 4, 4, 126), &params).unwrap();
    assert!( d.mask.pixels().all( |p| p.0[0] == 255));
    assert_eq!( d.divergent_pixels(), 16);
}

#[test]
fn test_mask_threshold_override() {
    let json = serde_json::to_string( &DivergenceParams::default()).unwrap();
    println!("default divergence parameters: {json}");
    assert_eq!( json, r#"{"mask_threshold":25.0}"#);

    let params: DivergenceParams = serde_json::from_str( r#"{"mask_threshold":30.0}"#).unwrap();
    assert_eq!( params, DivergenceParams { mask_threshold: 30.0 });
    let d = render_divergence( &rgb( 3, 3, [100,100,100]), &rgb( 3, 3, [126,126,126]), &params).unwrap();
    assert!( d.mask.pixels().all( |p| p.0[0] == 0));
}

#[test]
fn test_partial_mask() {
    let a = GrayImage::from_pixel( 4, 1, Luma([50]));
    let mut b = a.clone();
    b.put_pixel( 2, 0, Luma([200]));

    let d = render_divergence( &DynamicImage::ImageLuma8(a), &DynamicImage::ImageLuma8(b), &DivergenceParams::default()).unwrap();
    let mask: Vec<u8> = d.mask.pixels().map( |p| p.0[0]).collect();
    println!("mask: {mask:?}");
    assert_eq!( mask, vec![0,0,255,0]);
}

#[test]
fn test_gray_rendition() {
    let img = gray( 2, 2, 42);
    let r = rgb_rendition( &img).unwrap();
    assert!( r.pixels().all( |p| p.0 == [42,42,42]));

    let d = render_divergence( &img, &gray( 2, 2, 40), &DivergenceParams::default()).unwrap();
    assert!( d.absdiff_rgb.pixels().all( |p| p.0 == [2,2,2]));
}

#[test]
fn test_alpha_is_ignored() {
    let a = DynamicImage::ImageRgba8( RgbaImage::from_pixel( 3, 3, Rgba([10,200,30,255])));
    let b = DynamicImage::ImageRgba8( RgbaImage::from_pixel( 3, 3, Rgba([10,200,30,0])));

    let d = render_divergence( &a, &b, &DivergenceParams::default()).unwrap();
    assert!( d.absdiff_rgb.pixels().all( |p| p.0 == [0,0,0]));
    assert_eq!( d.divergent_pixels(), 0);
}

#[test]
fn test_mismatched_inputs() {
    let params = DivergenceParams::default();

    assert!( matches!( render_divergence( &gray( 4, 4, 0), &rgb( 4, 4, [0,0,0]), &params), Err(OdinImgDiffError::ChannelCountMismatch(1,3))));
    assert!( matches!( render_divergence( &gray( 4, 4, 0), &gray( 4, 5, 0), &params), Err(OdinImgDiffError::DimensionMismatch(_))));
}
