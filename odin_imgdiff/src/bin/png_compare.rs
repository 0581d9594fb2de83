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

use std::path::Path;
use odin_common::{define_cli, check_cli, fs::ensure_dir};
use odin_imgdiff::{
    init_tracing, open_diff_image_pair, similarity_score, render_divergence, write_result,
    ComparisonResult, SsimParams, DivergenceParams, OdinImgDiffError
};
use tracing::{debug,info};
use anyhow::Result;

define_cli! { ARGS [about="png_compare - compute SSIM similarity and divergence images of two PNG files"] =
    image1: String [help="filename of first image to compare"],
    image2: String [help="filename of second image to compare"],
    output_dir: String [help="directory in which the <name1>-<name2> result directory is created"]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let output_dir = Path::new( &ARGS.output_dir);
    if !output_dir.is_dir() {
        println!("Creating directory {}", output_dir.display());
        ensure_dir( output_dir).map_err( |e| OdinImgDiffError::OutputDirectoryCreateFailure( format!("{output_dir:?}: {e}")))?;
    }

    let (img1,img2) = open_diff_image_pair( &ARGS.image1, &ARGS.image2)?;

    let ssim_params = SsimParams::default();
    let divergence_params = DivergenceParams::default();
    debug!("SSIM parameters: {}", serde_json::to_string( &ssim_params)?);
    debug!("divergence parameters: {}", serde_json::to_string( &divergence_params)?);

    println!("Computing SSIM...");
    let score = similarity_score( &img1, &img2, &ssim_params)?;

    println!("Computing deltas...");
    let divergence = render_divergence( &img1, &img2, &divergence_params)?;

    let result = ComparisonResult::from_paths( &ARGS.image1, &ARGS.image2, score)?;
    let dir = write_result( &result, &img1, &img2, &divergence, output_dir)?;
    info!("result stored in {:?}", dir);

    println!("Done.");
    println!("Similarity: {:.2}", score);

    Ok(())
}
