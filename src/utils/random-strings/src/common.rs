// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use rand::distributions::{Alphanumeric, Slice};
use rand::prelude::Distribution;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_random_string(
    prefix_maybe: Option<&str>,
    random_length: usize,
    allowed_symbols: &AllowedSymbols,
) -> String {
    let prefix = prefix_maybe.unwrap_or("");
    let mut rng = rand::thread_rng();

    let random_part: String = match allowed_symbols {
        AllowedSymbols::Alphanumeric => (0..random_length)
            .map(|_| char::from(Alphanumeric.sample(&mut rng)))
            .collect(),
        AllowedSymbols::HexDigits => {
            let digits = Slice::new(&HEX_DIGITS).unwrap();
            (0..random_length).map(|_| *digits.sample(&mut rng)).collect()
        }
    };

    format!("{prefix}{random_part}")
}

pub enum AllowedSymbols {
    Alphanumeric,
    HexDigits,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Shorthand for the lowercase-hex identifiers used in correlation headers
pub fn get_random_hex_string(length: usize) -> String {
    get_random_string(None, length, &AllowedSymbols::HexDigits)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
