// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use extauth_fake::{Client, Profile, Result};
use tabled::{settings::Style, Table, Tabled};

/// Resolve the user profile carried by a Cookie header.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Print the profile as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// The raw value of the Cookie header, e.g. "session=<user>.<entity>.admin".
    #[clap()]
    cookies: String,
}

#[derive(Clone, Debug, Tabled)]
struct Field {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn fields(profile: &Profile) -> Vec<Field> {
    let authorization = profile.authorization();
    [
        ("User ID", profile.user_id().to_string()),
        ("Authenticated", profile.authenticated().to_string()),
        ("User", authorization.is_user.to_string()),
        ("Admin", authorization.is_admin.to_string()),
        ("Manager", authorization.is_manager.to_string()),
        ("Isolated Entity ID", profile.isolated_entity_id().to_string()),
        ("Department ID", profile.department_id().to_string()),
        ("Department Name", profile.department_name().to_owned()),
    ]
    .into_iter()
    .map(|(name, value)| Field { name, value })
    .collect()
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, client: impl Client + Send + Sync) -> Result<()> {
        let profile = client.get_user_profile(&self.cookies).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        } else {
            println!("{}", Table::new(fields(&profile)).with(Style::rounded()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use extauth_fake::{FakeClient, SequentialIds};
    use url::Url;

    use super::*;

    #[tokio::test]
    async fn lists_every_profile_field() {
        let client = FakeClient::new(Url::parse("https://auth.invalid/").unwrap(), None, false)
            .unwrap()
            .with_ids(SequentialIds::new());
        let profile = client
            .get_user_profile("session=abc.def.manager")
            .await
            .unwrap();

        let rows = fields(&profile);
        let names: Vec<_> = rows.iter().map(|field| field.name).collect();
        assert_eq!(
            names,
            [
                "User ID",
                "Authenticated",
                "User",
                "Admin",
                "Manager",
                "Isolated Entity ID",
                "Department ID",
                "Department Name",
            ]
        );
        assert_eq!(rows[0].value, "00000000-0000-0000-0000-000000000000");
        assert_eq!(rows[4].value, "true");
        assert_eq!(rows[3].value, "false");
    }
}
