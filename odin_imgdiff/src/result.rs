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

use std::{fs, path::{Path,PathBuf}};
use image::{DynamicImage, ImageFormat};
use tracing::{debug,warn};
use odin_common::fs::filestem;
use crate::{divergence::Divergence, errors::{Result,OdinImgDiffError}};

pub const INFO_FILE: &str = "info.txt";
pub const ABSDIFF_RGB_FILE: &str = "absdiff_rgb.png";
pub const ABSDIFF_HSV_FILE: &str = "absdiff_hsv.png";
pub const THRESHOLD_MASK_FILE: &str = "threshold_mask.png";

/// suffix of the input image copies within a result directory
pub const INPUT_SUFFIX: &str = "_rgb.png";

/// the outcome of comparing two images, identified by the file stems of the inputs.
/// `file1` and `file2` are the input copies as recorded in info.txt
#[derive(Debug,Clone,PartialEq)]
pub struct ComparisonResult {
    pub name1: String,
    pub name2: String,
    pub file1: String,
    pub file2: String,
    pub score: f64,
}

impl ComparisonResult {
    pub fn new (name1: impl ToString, name2: impl ToString, score: f64)->Self {
        let name1 = name1.to_string();
        let name2 = name2.to_string();
        let file1 = format!("{name1}{INPUT_SUFFIX}");
        let file2 = format!("{name2}{INPUT_SUFFIX}");
        ComparisonResult { name1, name2, file1, file2, score }
    }

    pub fn from_paths<P,Q> (path1: &P, path2: &Q, score: f64)->Result<Self> where P: AsRef<Path>, Q: AsRef<Path> {
        let name1 = filestem(path1).ok_or_else( || invalid_input_path( path1.as_ref()))?;
        let name2 = filestem(path2).ok_or_else( || invalid_input_path( path2.as_ref()))?;
        Ok( ComparisonResult::new( name1, name2, score) )
    }

    /// name of the result directory for this pair
    pub fn dir_name (&self)->String {
        format!("{}-{}", self.name1, self.name2)
    }

    pub fn input_filename1 (&self)->String { self.file1.clone() }
    pub fn input_filename2 (&self)->String { self.file2.clone() }

    /// the info.txt record: `"<file1>" "<file2>" <score>`
    pub fn info_line (&self)->String {
        format!("{} {} {}\n", quoted( &self.file1), quoted( &self.file2), self.score)
    }

    /// parse an info.txt record. Filenames can be quoted or bare, content after the score is ignored.
    /// Names are the filenames without a `_rgb.png` suffix (if there is one)
    pub fn parse_info (s: &str)->Result<Self> {
        let mut tokens = Tokenizer::new(s);

        let fname1 = tokens.next_token()?.ok_or_else( || malformed("missing first filename"))?;
        let fname2 = tokens.next_token()?.ok_or_else( || malformed("missing second filename"))?;
        let score = tokens.next_token()?.ok_or_else( || malformed("missing score"))?;

        if fname1.is_empty() || fname2.is_empty() { return Err( malformed("empty filename")) }
        let score: f64 = score.parse().map_err( |_| malformed( format!("invalid score {score:?}")))?;

        Ok( ComparisonResult {
            name1: input_name( &fname1).to_string(),
            name2: input_name( &fname2).to_string(),
            file1: fname1,
            file2: fname2,
            score
        })
    }
}

fn invalid_input_path (path: &Path)->OdinImgDiffError {
    OdinImgDiffError::InvalidInputPath( format!("{path:?}"))
}

fn malformed (msg: impl ToString)->OdinImgDiffError {
    OdinImgDiffError::MalformedResultFile( msg.to_string())
}

fn input_name (fname: &str)->&str {
    fname.strip_suffix( INPUT_SUFFIX).unwrap_or( fname)
}

/// quote string with '"', escaping embedded '"' and '\'
pub fn quoted (s: &str)->String {
    let mut q = String::with_capacity( s.len() + 2);
    q.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' { q.push('\\') }
        q.push(c);
    }
    q.push('"');
    q
}

/// whitespace separated tokens that are either bare or quoted (with backslash escapes)
struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>
}

impl<'a> Tokenizer<'a> {
    fn new (s: &'a str)->Self {
        Tokenizer { chars: s.chars().peekable() }
    }

    fn next_token (&mut self)->Result<Option<String>> {
        while let Some(c) = self.chars.peek() {
            if c.is_whitespace() { self.chars.next(); } else { break }
        }

        match self.chars.peek() {
            None => Ok(None),
            Some('"') => {
                self.chars.next();
                let mut tok = String::new();
                loop {
                    match self.chars.next() {
                        Some('"') => return Ok(Some(tok)),
                        Some('\\') => match self.chars.next() {
                            Some(c) => tok.push(c),
                            None => return Err( malformed("unterminated escape"))
                        }
                        Some(c) => tok.push(c),
                        None => return Err( malformed("unterminated quoted string"))
                    }
                }
            }
            Some(_) => {
                let mut tok = String::new();
                while let Some(c) = self.chars.peek() {
                    if c.is_whitespace() { break }
                    tok.push(*c);
                    self.chars.next();
                }
                Ok(Some(tok))
            }
        }
    }
}

/// write the result directory `<output_dir>/<name1>-<name2>`, replacing any previous one
pub fn write_result<P> (result: &ComparisonResult, img1: &DynamicImage, img2: &DynamicImage, divergence: &Divergence, output_dir: P)->Result<PathBuf>
    where P: AsRef<Path>
{
    let dir = output_dir.as_ref().join( result.dir_name());

    if dir.exists() {
        warn!("replacing existing result directory {:?}", dir);
        fs::remove_dir_all( &dir)?;
    }
    fs::create_dir_all( &dir).map_err( |e| OdinImgDiffError::OutputDirectoryCreateFailure( format!("{dir:?}: {e}")))?;

    img1.save_with_format( dir.join( &result.file1), ImageFormat::Png)?;
    img2.save_with_format( dir.join( &result.file2), ImageFormat::Png)?;
    divergence.absdiff_rgb.save_with_format( dir.join( ABSDIFF_RGB_FILE), ImageFormat::Png)?;
    divergence.absdiff_hsv.save_with_format( dir.join( ABSDIFF_HSV_FILE), ImageFormat::Png)?;
    divergence.mask.save_with_format( dir.join( THRESHOLD_MASK_FILE), ImageFormat::Png)?;

    fs::write( dir.join( INFO_FILE), result.info_line())?;
    debug!("result written to {:?}", dir);

    Ok(dir)
}

/// read the info.txt record of a result directory
pub fn read_result<P> (dir: P)->Result<ComparisonResult> where P: AsRef<Path> {
    let path = dir.as_ref().join( INFO_FILE);
    if !path.is_file() {
        return Err( OdinImgDiffError::MissingOrUnreadableResultFile( format!("{path:?}")))
    }

    let s = fs::read_to_string( &path)
        .map_err( |e| OdinImgDiffError::MissingOrUnreadableResultFile( format!("{path:?}: {e}")))?;
    ComparisonResult::parse_info( &s).map_err( |e| match e {
        OdinImgDiffError::MalformedResultFile(msg) => malformed( format!("{path:?}: {msg}")),
        e => e
    })
}
