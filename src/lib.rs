// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! An offline stand-in for the external authentication service client.
//!
//! [`FakeClient`] implements the same [`Client`] operations as the networked
//! client but decodes user profiles directly from the session cookie and never
//! performs I/O. Use it in tests and local development.

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
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod id;
pub mod profile;
mod rng;
pub mod token;

pub use client::{Client, FakeClient};
pub use config::TlsConfig;
pub use error::{Error, Result};
pub use id::{Id, IdGenerator, RandomIds, SequentialIds};
pub use profile::{Authorization, Profile, Role};
