//! Synchronous client core for the member directory app.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//! On top of the fetch layer, the crate owns everything a member screen needs
//! besides widgets: the {loading, error, data} state machine, the screen
//! controllers, the avatar resolver, and the text-level rendering contract.
//!
//! # Design
//! - `MemberClient` is stateless — it holds only `base_url`.
//! - Each fetch operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `RemoteResource` is the one shared view-state machine; every screen
//!   composes it instead of re-implementing the fetch/state pattern.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod avatar;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod resource;
pub mod screens;
pub mod types;

pub use avatar::{avatar_for, AvatarImage};
pub use client::MemberClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{RemoteResource, ResourceState, FALLBACK_ERROR_MESSAGE};
pub use screens::{DetailScreen, Fetch, ListScreen, RosterScreen};
pub use types::{Member, PersonRole};
