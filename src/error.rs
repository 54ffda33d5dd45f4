// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("token defective (length {len} is outside the accepted range)")]
    InvalidToken { len: usize },
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] uuid::Error),
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}
