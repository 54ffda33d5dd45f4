// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use extauth_fake::{Client, Result};

pub(crate) mod profile;
pub(crate) mod validate;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, client: impl Client + Send + Sync) -> Result<()>;
}
