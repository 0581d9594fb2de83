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

use thiserror::Error;
use odin_common::define_error;

pub type Result<T> = std::result::Result<T, OdinImgDiffError>;

define_error!{ pub OdinImgDiffError =
    ImageError(#[from] image::ImageError) : "Image error {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    UnsupportedImageFormat(String) : "unsupported image format: {0}",
    OutputDirectoryCreateFailure(String) : "failed to create output directory: {0}",
    InvalidInputPath(String) : "input path has no valid file name: {0}",
    InvalidChannelCount(usize) : "expected single channel input, got {0} channels",
    DimensionMismatch(String) : "image dimensions differ: {0}",
    ChannelCountMismatch(usize,usize) : "images have different number of channels: {0} vs {1}",
    MissingOrUnreadableResultFile(String) : "missing or unreadable result file: {0}",
    MalformedResultFile(String) : "malformed result file: {0}",
    InvalidFilterOption(String) : "invalid filter option: {0}",
    InvalidDirectory(String) : "invalid directory: {0}",
    DestinationCreateFailure(String) : "failed to create destination directory: {0}"
}
