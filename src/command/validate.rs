// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use extauth_fake::{Client, Result};
use secrecy::{ExposeSecret as _, SecretString};
use tokio::task;

/// Check whether a token would be accepted.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The address the token was presented from.
    #[arg(long, default_value = "127.0.0.1")]
    remote_addr: String,

    /// The token to check. If omitted, it is read from the terminal.
    #[clap()]
    token: Option<String>,
}

impl Command {
    async fn token(self) -> Result<(SecretString, String)> {
        let token = match self.token {
            Some(token) => SecretString::new(token),
            None => {
                task::spawn_blocking(|| rpassword::prompt_password("Token: ").map(SecretString::new))
                    .await??
            }
        };
        Ok((token, self.remote_addr))
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, client: impl Client + Send + Sync) -> Result<()> {
        let (token, remote_addr) = self.token().await?;

        client
            .validate_token(token.expose_secret(), &remote_addr)
            .await?;
        println!("Token accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use extauth_fake::{Error, FakeClient};
    use url::Url;

    use super::*;
    use crate::command::Command as _;

    fn client() -> FakeClient {
        FakeClient::new(Url::parse("https://auth.invalid/").unwrap(), None, false).unwrap()
    }

    #[tokio::test]
    async fn accepts_token_within_bounds() {
        let cmd = Command::parse_from(["validate", "--remote-addr", "10.0.0.1", "t"]);
        assert!(cmd.execute(client()).await.is_ok());
    }

    #[tokio::test]
    async fn rejection_is_returned_to_the_caller() {
        let token = "t".repeat(1001);
        let cmd = Command::parse_from(["validate", token.as_str()]);
        assert!(matches!(
            cmd.execute(client()).await,
            Err(Error::InvalidToken { len: 1001 })
        ));
    }
}
