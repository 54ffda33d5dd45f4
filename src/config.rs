// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Transport security settings for talking to the authentication service.
///
/// The offline client accepts this for interface parity and never reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub ca_file: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

impl TlsConfig {
    #[must_use]
    pub fn with_ca_file(mut self, ca_file: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(ca_file.into());
        self
    }

    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}
