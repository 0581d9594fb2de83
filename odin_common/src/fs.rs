/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::macros::io_error;

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// copy a file or a directory tree, replacing existing target files
pub fn copy_recursive (src: impl AsRef<Path>, tgt: impl AsRef<Path>)->io::Result<()> {
    let src = src.as_ref();
    let tgt = tgt.as_ref();

    if src.is_dir() {
        ensure_dir(tgt)?;
        for entry in fs::read_dir(src)? {
            let path = entry?.path();
            if let Some(fname) = path.file_name() {
                copy_recursive( &path, tgt.join(fname))?;
            }
        }
        Ok(())

    } else if src.is_file() {
        fs::copy( src, tgt)?;
        Ok(())

    } else {
        Err( io_error!(ErrorKind::NotFound, "no such file or directory {:?}", src))
    }
}
