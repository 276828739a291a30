//! Async client for the Ragnabot backend API.
//!
//! # Overview
//! Bot command handlers call one [`RagnabotClient`] method per domain
//! operation (item embeds, monster browsers, boss fights, auctions,
//! trivia). The client posts a JSON payload to
//! `{api}/v{version}/{route}/{endpoint}` and shapes the JSON answer into an
//! [`Embed`], an [`EmbedBrowser`] or a typed list with embeds inside.
//!
//! # Design
//! - `build_url` and `ApiRequest::into_http` are pure; the only I/O happens
//!   in a [`Transport`], so tests can record requests without a network.
//! - [`ApiManager`] turns every transport or status failure into
//!   [`ApiError::Backend`], and refuses authenticated calls without a key
//!   before anything is sent.
//! - Empty or falsy responses become [`RawResponse::Empty`] rather than an
//!   error.
//! - No retries, caching or rate limiting.

pub mod browser;
pub mod client;
pub mod config;
pub mod embed;
pub mod error;
pub mod http;
pub mod manager;
pub mod options;
pub mod request;
pub mod response;
pub mod types;

pub use browser::{BrowserContext, BrowserItem, EmbedBrowser};
pub use client::RagnabotClient;
pub use config::{ClientConfig, CredentialProvider};
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};
pub use error::ApiError;
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
pub use http::{HttpRequest, HttpResponse, Transport, TransportError};
pub use manager::ApiManager;
pub use options::{CallOptions, Endpoint, HttpOptions, Route};
pub use request::{build_url, ApiRequest};
pub use response::RawResponse;
pub use types::{AuctionEmbedKind, BossDrop, BossSpawn, GearCategory, GearList, GearOffer};
