// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::shadow_reuse,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod command;

use std::{path::PathBuf, process};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use extauth_fake::{config, Client, FakeClient, Result, TlsConfig};
use log::error;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Profile(command::profile::Command),
    Validate(command::validate::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, client: impl Client + Send + Sync) -> Result<()> {
        match self {
            Self::Profile(cmd) => cmd.execute(client).await,
            Self::Validate(cmd) => cmd.execute(client).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The URL of the authentication service. Accepted for compatibility with
    /// the networked client; nothing is ever sent to it.
    #[arg(long, env = "EXTAUTH_URL", default_value = "https://127.0.0.1/", value_parser = Url::parse)]
    url: Url,

    /// The name of the cookie that carries the session token.
    #[arg(long, env = "EXTAUTH_COOKIE_NAME", default_value = config::SESSION_COOKIE_NAME)]
    cookie_name: String,

    /// Retry requests rejected for a stale CSRF token (no effect offline).
    #[arg(long, env = "EXTAUTH_AUTO_RETRY_CSRF")]
    auto_retry_csrf: bool,

    /// A CA certificate bundle to trust when connecting to the service.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    tls_ca_file: Option<PathBuf>,

    /// Skip verification of the service's certificate.
    #[arg(long)]
    tls_accept_invalid_certs: bool,

    #[clap(subcommand)]
    command: Command,
}

impl Args {
    fn tls_config(&self) -> Option<TlsConfig> {
        if self.tls_ca_file.is_none() && !self.tls_accept_invalid_certs {
            return None;
        }

        let tls = TlsConfig::default().with_accept_invalid_certs(self.tls_accept_invalid_certs);
        Some(match self.tls_ca_file {
            Some(ref ca_file) => tls.with_ca_file(ca_file),
            None => tls,
        })
    }
}

async fn run(args: Args) -> Result<()> {
    let client = FakeClient::new(args.url.clone(), args.tls_config(), args.auto_retry_csrf)?
        .with_cookie_name(&args.cookie_name);

    command::Command::execute(args.command, client).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("EXTAUTH_LOG", "warn")
        .write_style("EXTAUTH_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
