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

use std::{fmt, fs, path::{Path,PathBuf}};
use tracing::{debug,warn};
use odin_common::fs::copy_recursive;
use crate::{aggregate::AggregationSelection, errors::{Result,OdinImgDiffError}};

pub const COMMAND_FILE: &str = "command.txt";

/// a filesystem mutation that was (or in a dry run would be) performed
#[derive(Debug,Clone,PartialEq)]
pub enum MaterializeAction {
    CreateDir(PathBuf),
    Copy { src: PathBuf, dst: PathBuf },
    WriteCommand(PathBuf),
}

impl fmt::Display for MaterializeAction {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            MaterializeAction::CreateDir(dir) => write!(f, "Create directory {}", dir.display()),
            MaterializeAction::Copy{src,dst} => write!(f, "Copy {} to {}", src.display(), dst.display()),
            MaterializeAction::WriteCommand(path) => write!(f, "Write {}", path.display()),
        }
    }
}

/// copy the selected files of each result directory into `<output_dir>/<result dir name>` and record the
/// command line in `<output_dir>/command.txt`. A dry run does not touch the filesystem and only returns
/// the actions that would be performed
pub fn materialize<P> (selection: &AggregationSelection, output_dir: P, dry_run: bool, command_line: &[String])->Result<Vec<MaterializeAction>>
    where P: AsRef<Path>
{
    let output_dir = output_dir.as_ref();
    let mut actions = Vec::new();

    for (src_dir, files) in selection {
        let Some(dir_name) = src_dir.file_name() else {
            warn!("ignoring result directory without name {:?}", src_dir);
            continue
        };
        let dst_dir = output_dir.join( dir_name);

        if !dst_dir.is_dir() {
            if !dry_run {
                fs::create_dir_all( &dst_dir).map_err( |e| destination_failure( &dst_dir, e))?;
            }
            actions.push( MaterializeAction::CreateDir( dst_dir.clone()));
        }

        for fname in files {
            let src = src_dir.join( fname);
            let dst = dst_dir.join( fname);

            if !src.exists() {
                warn!("skipping missing source file {:?}", src);
                continue
            }

            if !dry_run {
                copy_recursive( &src, &dst)?;
                debug!("copied {:?} -> {:?}", src, dst);
            }
            actions.push( MaterializeAction::Copy{ src, dst });
        }
    }

    if !dry_run {
        fs::create_dir_all( output_dir).map_err( |e| destination_failure( output_dir, e))?;

        let path = output_dir.join( COMMAND_FILE);
        fs::write( &path, format!("Command used: {}", command_line.join(" ")))?;
        actions.push( MaterializeAction::WriteCommand( path));
    }

    Ok(actions)
}

fn destination_failure (dir: &Path, e: std::io::Error)->OdinImgDiffError {
    OdinImgDiffError::DestinationCreateFailure( format!("{dir:?}: {e}"))
}
