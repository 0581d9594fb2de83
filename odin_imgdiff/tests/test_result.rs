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

use std::{fs, path::Path};
use image::{DynamicImage, Rgb, RgbImage};
use odin_imgdiff::{
    render_divergence, similarity_score, write_result, read_result, result::quoted,
    ComparisonResult, DivergenceParams, OdinImgDiffError, SsimParams
};

// run with "cargo test --test test_result -- --nocapture"

fn test_pair ()->(DynamicImage,DynamicImage) {
    let a = RgbImage::from_fn( 16, 16, |x,y| Rgb([(x*16) as u8, (y*16) as u8, 128]));
    let b = RgbImage::from_fn( 16, 16, |x,y| Rgb([(x*16) as u8, (y*15) as u8, 100]));
    (DynamicImage::ImageRgb8(a), DynamicImage::ImageRgb8(b))
}

#[test]
fn test_info_line() {
    let r = ComparisonResult::new( "before", "after", 87.5);
    let line = r.info_line();
    println!("info line: {line}");
    assert_eq!( line, "\"before_rgb.png\" \"after_rgb.png\" 87.5\n");

    assert_eq!( ComparisonResult::new("a","b",100.0).info_line(), "\"a_rgb.png\" \"b_rgb.png\" 100\n");
}

#[test]
fn test_info_round_trip() {
    for r in [
        ComparisonResult::new( "plain", "other", 99.12345678901234),
        ComparisonResult::new( "with space", "with \"quotes\" and \\", -3.25),
        ComparisonResult::new( "x", "y", 1e-300),
    ] {
        let parsed = ComparisonResult::parse_info( &r.info_line()).unwrap();
        println!("{:?} -> {:?}", r, parsed);
        assert_eq!( parsed, r);
    }
}

#[test]
fn test_parse_variants() {
    let r = ComparisonResult::parse_info( "a_rgb.png b_rgb.png 42 and some trailing text").unwrap();
    assert_eq!( r, ComparisonResult::new( "a", "b", 42.0));

    let r = ComparisonResult::parse_info( "  \"a_rgb.png\"\tb_rgb.png\n50.5\n").unwrap();
    assert_eq!( r, ComparisonResult::new( "a", "b", 50.5));

    assert_eq!( quoted( "a\"b"), "\"a\\\"b\"");
}

#[test]
fn test_parse_without_rgb_suffix() {
    let r = ComparisonResult::parse_info( "\"a\" \"b\" 50").unwrap();
    assert_eq!( (r.name1.as_str(), r.name2.as_str()), ("a", "b"));
    assert_eq!( (r.input_filename1(), r.input_filename2()), ("a".to_string(), "b".to_string()));

    let r = ComparisonResult::parse_info( "\"c.png\" \"d_rgb.png\" 50").unwrap();
    println!("{r:?}");
    assert_eq!( (r.name1.as_str(), r.name2.as_str()), ("c.png", "d"));
    assert_eq!( (r.input_filename1(), r.input_filename2()), ("c.png".to_string(), "d_rgb.png".to_string()));
    assert_eq!( r.info_line(), "\"c.png\" \"d_rgb.png\" 50\n");
}

#[test]
fn test_parse_malformed() {
    for s in [
        "",
        "\"a_rgb.png\" \"b_rgb.png\"",
        "\"a_rgb.png\" \"b_rgb.png\" high",
        "\"a_rgb.png\" \"b_rgb.png 12",
        "\"\" \"b_rgb.png\" 12",
    ] {
        match ComparisonResult::parse_info( s) {
            Err(OdinImgDiffError::MalformedResultFile(msg)) => println!("{s:?} -> {msg}"),
            other => panic!("{s:?} should be malformed, got {other:?}")
        }
    }
}

#[test]
fn test_from_paths() {
    let r = ComparisonResult::from_paths( &"some/dir/left.png", &"other/right.png", 12.0).unwrap();
    assert_eq!( r.name1, "left");
    assert_eq!( r.name2, "right");
    assert_eq!( r.dir_name(), "left-right");
    assert_eq!( r.input_filename1(), "left_rgb.png");

    for (p1,p2) in [("/", "b.png"), ("a.png", "some/dir/..")] {
        match ComparisonResult::from_paths( &p1, &p2, 1.0) {
            Err(OdinImgDiffError::InvalidInputPath(msg)) => println!("{p1:?},{p2:?} -> {msg}"),
            other => panic!("{p1:?},{p2:?} should be rejected, got {other:?}")
        }
    }
}

#[test]
fn test_write_and_read_result() {
    let tmp = tempfile::tempdir().unwrap();
    let (img1,img2) = test_pair();

    let score = similarity_score( &img1, &img2, &SsimParams::default()).unwrap();
    let divergence = render_divergence( &img1, &img2, &DivergenceParams::default()).unwrap();
    let result = ComparisonResult::new( "img1", "img2", score);

    let dir = write_result( &result, &img1, &img2, &divergence, tmp.path()).unwrap();
    assert_eq!( dir, tmp.path().join("img1-img2"));

    let mut files: Vec<String> = fs::read_dir( &dir).unwrap()
        .map( |e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    files.sort();
    println!("result files: {files:?}");
    assert_eq!( files, vec!["absdiff_hsv.png", "absdiff_rgb.png", "img1_rgb.png", "img2_rgb.png", "info.txt", "threshold_mask.png"]);

    let back = read_result( &dir).unwrap();
    assert_eq!( back, result);

    let saved = image::open( dir.join("img1_rgb.png")).unwrap();
    assert_eq!( saved.to_rgb8(), img1.to_rgb8());

    let mask = image::open( dir.join("threshold_mask.png")).unwrap();
    assert_eq!( mask.color(), image::ColorType::L8);
}

#[test]
fn test_rerun_replaces_result() {
    let tmp = tempfile::tempdir().unwrap();
    let (img1,img2) = test_pair();
    let divergence = render_divergence( &img1, &img2, &DivergenceParams::default()).unwrap();

    let dir = write_result( &ComparisonResult::new( "a", "b", 10.0), &img1, &img2, &divergence, tmp.path()).unwrap();
    fs::write( dir.join("stale.txt"), "left over").unwrap();

    let dir = write_result( &ComparisonResult::new( "a", "b", 20.0), &img1, &img2, &divergence, tmp.path()).unwrap();
    assert!( !dir.join("stale.txt").exists());
    assert_eq!( read_result( &dir).unwrap().score, 20.0);
}

#[test]
fn test_missing_result_file() {
    let tmp = tempfile::tempdir().unwrap();
    assert!( matches!( read_result( tmp.path()), Err(OdinImgDiffError::MissingOrUnreadableResultFile(_))));

    fs::write( tmp.path().join("info.txt"), "garbage").unwrap();
    assert!( matches!( read_result( tmp.path()), Err(OdinImgDiffError::MalformedResultFile(_))));
}
