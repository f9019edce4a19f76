// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for path conversion and lexical collapse

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use npk_core::{collapse_segments, style, NativePath, PathStyle};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    windows: bool,
    capacity: u16,
    path: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let path_style = if input.windows { PathStyle::Windows } else { PathStyle::Posix };

    // Converters must never write past the buffer they are given
    let mut out = vec![0xAAu8; usize::from(input.capacity)];
    if let Ok(len) = style::make_native_path(input.path, &mut out, path_style) {
        assert!(len < out.len());
        assert_eq!(out[len], 0);
    }

    if let Ok(native) = NativePath::try_from_input(Some(input.path), path_style) {
        assert_eq!(native.as_bytes_with_nul().last(), Some(&0));

        let collapsed = collapse_segments(native.as_bytes(), path_style);
        assert_eq!(collapse_segments(&collapsed, path_style), collapsed);
    }
});
