// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};

pub const MIN_TOKEN_LEN: usize = 1;
pub const MAX_TOKEN_LEN: usize = 1000;

/// Accepts any token whose length in bytes is within
/// [`MIN_TOKEN_LEN`]..=[`MAX_TOKEN_LEN`]. The contents are not inspected.
pub fn validate(token: &str) -> Result<()> {
    let len = token.len();
    if (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&len) {
        Ok(())
    } else {
        Err(Error::InvalidToken { len })
    }
}
