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

use std::{collections::BTreeMap, fmt, fs, path::{Path,PathBuf}, str::FromStr};
use tracing::{debug,info,warn};
use crate::{
    errors::{Result,OdinImgDiffError},
    result::{read_result, ComparisonResult, INFO_FILE, ABSDIFF_RGB_FILE, ABSDIFF_HSV_FILE, THRESHOLD_MASK_FILE}
};

/// result directory path -> names of the files to copy from it, sorted by path
pub type AggregationSelection = BTreeMap<PathBuf,Vec<String>>;

/* #region score filter ***********************************************************************************/

/// direction of the (inclusive) score threshold comparison
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum ScoreFilter {
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl ScoreFilter {
    pub fn accepts (&self, score: f64, threshold: f64)->bool {
        match self {
            ScoreFilter::LessThanOrEqual => score <= threshold,
            ScoreFilter::GreaterThanOrEqual => score >= threshold,
        }
    }
}

impl FromStr for ScoreFilter {
    type Err = OdinImgDiffError;

    fn from_str (s: &str)->Result<Self> {
        match s {
            "less" => Ok(ScoreFilter::LessThanOrEqual),
            "more" => Ok(ScoreFilter::GreaterThanOrEqual),
            _ => Err( OdinImgDiffError::InvalidFilterOption( format!("{s:?} (expected 'less' or 'more')")))
        }
    }
}

impl fmt::Display for ScoreFilter {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            ScoreFilter::LessThanOrEqual => write!(f, "less"),
            ScoreFilter::GreaterThanOrEqual => write!(f, "more"),
        }
    }
}

/* #endregion score filter */

/* #region diff flags *************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DiffKind {
    Rgb,
    Hsv,
    Mask,
}

impl DiffKind {
    pub const ALL: [DiffKind;3] = [DiffKind::Rgb, DiffKind::Hsv, DiffKind::Mask];

    /// the result directory artifact for this kind
    pub fn filename (&self)->&'static str {
        match self {
            DiffKind::Rgb => ABSDIFF_RGB_FILE,
            DiffKind::Hsv => ABSDIFF_HSV_FILE,
            DiffKind::Mask => THRESHOLD_MASK_FILE,
        }
    }

    fn bit (&self)->u8 {
        match self {
            DiffKind::Rgb => 0b001,
            DiffKind::Hsv => 0b010,
            DiffKind::Mask => 0b100,
        }
    }
}

impl FromStr for DiffKind {
    type Err = OdinImgDiffError;

    fn from_str (s: &str)->Result<Self> {
        match s {
            "rgb" => Ok(DiffKind::Rgb),
            "hsv" => Ok(DiffKind::Hsv),
            "mask" => Ok(DiffKind::Mask),
            _ => Err( OdinImgDiffError::InvalidFilterOption( format!("unknown diff flag {s:?}")))
        }
    }
}

/// non-empty set of DiffKinds
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct DiffFlags(u8);

impl DiffFlags {
    pub fn all()->Self {
        DiffFlags( DiffKind::ALL.iter().fold( 0, |acc,k| acc | k.bit()))
    }

    pub fn contains (&self, kind: DiffKind)->bool {
        self.0 & kind.bit() != 0
    }

    pub fn kinds (&self)->impl Iterator<Item=DiffKind> + '_ {
        DiffKind::ALL.into_iter().filter( |k| self.contains(*k))
    }

    /// parse a comma separated list such as "rgb,mask". Unknown entries are ignored (with a warning). If there
    /// is no valid entry at all we fall back to the full set
    pub fn parse_list (s: &str)->Self {
        let mut bits = 0u8;

        for tok in s.split(',').map( |t| t.trim()).filter( |t| !t.is_empty()) {
            match DiffKind::from_str( tok) {
                Ok(kind) => bits |= kind.bit(),
                Err(e) => warn!("ignoring {e}")
            }
        }

        if bits == 0 {
            warn!("no valid diff flags in {s:?}, using rgb,hsv,mask");
            DiffFlags::all()
        } else {
            DiffFlags(bits)
        }
    }
}

impl Default for DiffFlags {
    fn default()->Self { DiffFlags::all() }
}

/* #endregion diff flags */

#[derive(Debug,Clone)]
pub struct AggregationOptions {
    pub score_filter: ScoreFilter,
    pub threshold: f64,
    pub diff_flags: DiffFlags,
    pub exclude_inputs: bool,
}

impl Default for AggregationOptions {
    fn default()->Self {
        AggregationOptions {
            score_filter: ScoreFilter::LessThanOrEqual,
            threshold: 100.0,
            diff_flags: DiffFlags::all(),
            exclude_inputs: false,
        }
    }
}

impl AggregationOptions {
    pub fn accepts (&self, result: &ComparisonResult)->bool {
        self.score_filter.accepts( result.score, self.threshold)
    }

    /// the files to copy from an accepted result directory
    pub fn selected_files (&self, result: &ComparisonResult)->Vec<String> {
        let mut files = vec![ INFO_FILE.to_string() ];
        files.extend( self.diff_flags.kinds().map( |k| k.filename().to_string()));

        if !self.exclude_inputs {
            files.push( result.file1.clone());
            files.push( result.file2.clone());
        }
        files
    }
}

/// scan the result directories within `input_dir` and select the ones that pass the score filter.
/// Result directories without a valid info.txt are skipped
pub fn filter_results<P> (input_dir: P, options: &AggregationOptions)->Result<AggregationSelection> where P: AsRef<Path> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err( OdinImgDiffError::InvalidDirectory( format!("{input_dir:?}")))
    }

    let mut selection = AggregationSelection::new();

    for e in fs::read_dir( input_dir)? {
        let path = e?.path();
        if !path.is_dir() { continue }

        match read_result( &path) {
            Ok(result) => {
                if options.accepts( &result) {
                    debug!("selected {:?} with score {}", path, result.score);
                    let files = options.selected_files( &result);
                    selection.insert( path, files);
                } else {
                    debug!("rejected {:?} with score {}", path, result.score);
                }
            }
            Err(e) => warn!("skipping {:?}: {}", path, e)
        }
    }

    info!("{} result directories selected (score {} {})", selection.len(), options.score_filter, options.threshold);
    Ok(selection)
}
