// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::{debug, trace};
use url::Url;

use crate::{
    config::{self, TlsConfig},
    cookie,
    error::Result,
    id::{IdGenerator, RandomIds},
    profile::{self, Profile},
    token,
};

/// Operations offered by the external authentication service.
#[async_trait]
pub trait Client {
    /// Looks up the profile of the user whose session cookie appears in
    /// `raw_cookies`, the value of a `Cookie` request header.
    async fn get_user_profile(&self, raw_cookies: &str) -> Result<Profile>;

    /// Checks a bearer token presented from `remote_addr`.
    async fn validate_token(&self, token: &str, remote_addr: &str) -> Result<()>;
}

#[async_trait]
impl Client for Box<dyn Client + Send + Sync + '_> {
    async fn get_user_profile(&self, raw_cookies: &str) -> Result<Profile> {
        <dyn Client>::get_user_profile(self.as_ref(), raw_cookies).await
    }

    async fn validate_token(&self, token: &str, remote_addr: &str) -> Result<()> {
        <dyn Client>::validate_token(self.as_ref(), token, remote_addr).await
    }
}

/// A [`Client`] that answers locally instead of calling the service.
///
/// Profiles are decoded straight from the session cookie, so tests can log in
/// as any user by setting `session=<user id>.<isolated entity id>[.<role>]`.
/// Neither operation ever reports a failure other than a defective token.
///
/// The endpoint, TLS configuration and CSRF retry flag given to
/// [`FakeClient::new`] configure nothing: no connection is ever made.
#[derive(Debug)]
pub struct FakeClient<G = RandomIds> {
    endpoint: Url,
    auto_retry_csrf: bool,
    cookie_name: String,
    ids: G,
}

impl FakeClient {
    // LINT: Kept fallible so callers can swap in the networked client without
    // changing their error handling.
    #[allow(clippy::unnecessary_wraps)]
    pub fn new(endpoint: Url, tls_config: Option<TlsConfig>, auto_retry_csrf: bool) -> Result<Self> {
        if let Some(tls_config) = tls_config {
            debug!("Ignoring TLS configuration {:?} for offline client", tls_config);
        }

        Ok(Self {
            endpoint,
            auto_retry_csrf,
            cookie_name: config::SESSION_COOKIE_NAME.to_owned(),
            ids: RandomIds,
        })
    }
}

impl<G: IdGenerator> FakeClient<G> {
    /// Replaces the source of identifiers used for anonymous sessions and
    /// malformed segments.
    pub fn with_ids<H: IdGenerator>(self, ids: H) -> FakeClient<H> {
        FakeClient {
            endpoint: self.endpoint,
            auto_retry_csrf: self.auto_retry_csrf,
            cookie_name: self.cookie_name,
            ids,
        }
    }

    #[must_use]
    pub fn with_cookie_name(mut self, cookie_name: &str) -> Self {
        cookie_name.clone_into(&mut self.cookie_name);
        self
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub const fn auto_retry_csrf(&self) -> bool {
        self.auto_retry_csrf
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

#[async_trait]
impl<G: IdGenerator> Client for FakeClient<G> {
    async fn get_user_profile(&self, raw_cookies: &str) -> Result<Profile> {
        let session_value = cookie::extract_session_value(raw_cookies, &self.cookie_name);
        trace!("Resolving profile from session value {:?}", session_value);
        Ok(profile::resolve_profile(&session_value, &self.ids))
    }

    async fn validate_token(&self, token: &str, _remote_addr: &str) -> Result<()> {
        token::validate(token)
    }
}
