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

use image::GrayImage;
use crate::errors::{Result,OdinImgDiffError};

/// a 2D row-major matrix of f64 values that is used for intermediate (per pixel) computation results
/// such as local means, variances and SSIM maps
#[derive(Debug,Clone,PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    data: Vec<f64>
}

impl Field {
    pub fn new (width: usize, height: usize)->Self {
        let data = vec![ 0.0; width*height ];
        Field{width,height,data}
    }

    pub fn filled (width: usize, height: usize, v: f64)->Self {
        let data = vec![ v; width*height ];
        Field{width,height,data}
    }

    /// convert 8bit samples into their native [0..255] f64 values (no normalization)
    pub fn from_luma8 (img: &GrayImage)->Self {
        let (w,h) = img.dimensions();
        let data: Vec<f64> = img.as_raw().iter().map( |v| *v as f64).collect();
        Field{ width: w as usize, height: h as usize, data }
    }

    pub fn dimensions(&self)->(usize,usize) {
        (self.width, self.height)
    }

    #[inline(always)]
    pub fn get(&self, x:usize, y: usize)->f64 { self.data[ y*self.width + x] }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, v: f64) { self.data[ y*self.width + x] = v; }

    pub fn values(&self)->&[f64] { &self.data }

    /// arithmetic mean over all elements (NaN for empty fields)
    pub fn mean (&self)->f64 {
        let sum: f64 = self.data.iter().sum();
        sum / self.data.len() as f64
    }

    /// element-wise combination of two fields with the same dimensions
    pub fn zip_with<F> (&self, other: &Field, f: F)->Result<Self> where F: Fn(f64,f64)->f64 {
        self.check_dimensions( other)?;
        let data = self.data.iter().zip( other.data.iter()).map( |(a,b)| f(*a,*b)).collect();
        Ok( Field{ width: self.width, height: self.height, data } )
    }

    pub fn mul (&self, other: &Field)->Result<Self> {
        self.zip_with( other, |a,b| a*b)
    }

    pub fn sub (&self, other: &Field)->Result<Self> {
        self.zip_with( other, |a,b| a-b)
    }

    pub fn check_dimensions (&self, other: &Field)->Result<()> {
        if self.dimensions() != other.dimensions() {
            Err( OdinImgDiffError::DimensionMismatch( format!("{:?} vs {:?}", self.dimensions(), other.dimensions())))
        } else {
            Ok(())
        }
    }

    /// separable convolution with a normalized 1D kernel that is applied horizontally and then vertically,
    /// using reflect-101 border handling (`gfedcb|abcdefgh|gfedcba`)
    pub fn convolve_separable (&self, kernel: &[f64])->Self {
        let (w,h) = self.dimensions();
        let half = (kernel.len() / 2) as isize;

        let mut tmp = Field::new( w, h);
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0.0;
                for (k,kv) in kernel.iter().enumerate() {
                    let sx = reflect_101( x as isize + k as isize - half, w);
                    sum += self.get( sx, y) * kv;
                }
                tmp.set( x, y, sum);
            }
        }

        let mut out = Field::new( w, h);
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0.0;
                for (k,kv) in kernel.iter().enumerate() {
                    let sy = reflect_101( y as isize + k as isize - half, h);
                    sum += tmp.get( x, sy) * kv;
                }
                out.set( x, y, sum);
            }
        }

        out
    }

    /// local (Gaussian weighted) mean of each element
    pub fn gaussian_blur (&self, size: usize, sigma: f64)->Self {
        self.convolve_separable( &gaussian_kernel( size, sigma))
    }
}

/// normalized 1D Gaussian kernel of odd `size` - the 2D kernel is the outer product of this with itself
pub fn gaussian_kernel (size: usize, sigma: f64)->Vec<f64> {
    let center = (size as f64 - 1.0) / 2.0;
    let scaler = -1.0 / (2.0 * sigma * sigma);

    let mut kernel: Vec<f64> = (0..size).map( |i| {
        let d = i as f64 - center;
        (scaler * d * d).exp()
    }).collect();

    let sum: f64 = kernel.iter().sum();
    for k in kernel.iter_mut() { *k /= sum; }

    kernel
}

/// map a (possibly out of range) index into [0..n) by mirroring at the borders without repeating the border element
#[inline]
pub fn reflect_101 (i: isize, n: usize)->usize {
    if n == 1 { return 0 }

    let n = n as isize;
    let period = 2 * (n - 1);
    let mut j = i.rem_euclid( period);
    if j >= n { j = period - j; }

    j as usize
}
