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

use std::str::FromStr;
use odin_common::{define_cli, check_cli};
use odin_imgdiff::{
    init_tracing, filter_results, materialize, AggregationOptions, DiffFlags, ScoreFilter
};
use tracing::debug;
use anyhow::Result;

define_cli! { ARGS [about="aggregate - collect png_compare result directories that pass a similarity threshold"] =
    input: Option<String> [help="directory that contains the png_compare result directories", long, short],
    output: Option<String> [help="directory to copy the selected result directories to", long, short],
    score_filter: String [help="keep results with a score 'less' or 'more' than or equal to the threshold", long, short, default_value="less"],
    diff_flags: String [help="comma separated list of diff images to copy (rgb,hsv,mask)", long, short, default_value="rgb,hsv,mask"],
    threshold: f64 [help="similarity score threshold [0..100]", long, short, default_value="100.0"],
    exclude_inputs: bool [help="do not copy the compared input images", long],
    dry_run: bool [help="only print what would be copied", long]
}

fn main()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let (Some(input), Some(output)) = (&ARGS.input, &ARGS.output) else {
        print_usage()?;
        return Ok(())
    };

    let score_filter = match ScoreFilter::from_str( &ARGS.score_filter) {
        Ok(score_filter) => score_filter,
        Err(e) => {
            eprintln!("{e}");
            print_usage()?;
            std::process::exit(1)
        }
    };

    let options = AggregationOptions {
        score_filter,
        threshold: ARGS.threshold,
        diff_flags: DiffFlags::parse_list( &ARGS.diff_flags),
        exclude_inputs: ARGS.exclude_inputs,
    };
    debug!("score filter: {} {}, diff flags: {:?}", options.score_filter, options.threshold, options.diff_flags);

    let command_line: Vec<String> = std::env::args().collect();

    let selection = filter_results( input, &options)?;
    let actions = materialize( &selection, output, ARGS.dry_run, &command_line)?;

    if ARGS.dry_run {
        for action in &actions {
            println!("{action}");
        }
    } else {
        println!("{} result directories copied to {}", selection.len(), output);
    }

    Ok(())
}

fn print_usage()->Result<()> {
    CliOpts::clap().print_help()?;
    println!();
    Ok(())
}
