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

use std::{fs, io::ErrorKind, path::Path};
use odin_common::fs::{copy_recursive, ensure_dir, filestem};

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_filestem() {
    assert_eq!( filestem( &"some/dir/image.png"), Some("image"));
    assert_eq!( filestem( &"image"), Some("image"));
    assert_eq!( filestem( &"archive.tar.gz"), Some("archive.tar"));
}

#[test]
fn test_ensure_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a/b/c");

    ensure_dir( &dir).unwrap();
    assert!( dir.is_dir());
    ensure_dir( &dir).unwrap(); // existing dirs are fine

    let file = tmp.path().join("file.txt");
    fs::write( &file, "x").unwrap();
    assert!( ensure_dir( file.join("sub")).is_err());
}

#[test]
fn test_copy_recursive() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all( src.join("nested")).unwrap();
    fs::write( src.join("top.txt"), "top").unwrap();
    fs::write( src.join("nested").join("inner.txt"), "inner").unwrap();

    let tgt = tmp.path().join("tgt");
    fs::create_dir_all( &tgt).unwrap();
    fs::write( tgt.join("top.txt"), "old").unwrap();

    copy_recursive( &src, &tgt).unwrap();
    assert_eq!( fs::read_to_string( tgt.join("top.txt")).unwrap(), "top");
    assert_eq!( fs::read_to_string( tgt.join("nested/inner.txt")).unwrap(), "inner");

    copy_recursive( src.join("top.txt"), tmp.path().join("copy.txt")).unwrap();
    assert_eq!( fs::read_to_string( tmp.path().join("copy.txt")).unwrap(), "top");

    match copy_recursive( src.join("missing.txt"), tmp.path().join("never.txt")) {
        Err(e) => {
            println!("expected error: {e}");
            assert_eq!( e.kind(), ErrorKind::NotFound);
        }
        Ok(_) => panic!("copying a missing file should fail")
    }
}
