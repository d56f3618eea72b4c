//! # Menuboard Architecture
//!
//! Menuboard is the client side of a restaurant menu system: the admin
//! screens that manage categories and menu items, and the public storefront
//! that customers browse. The core is a **UI-agnostic library**; the
//! `menuboard` binary is one front end over it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, terminal I/O        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, dispatch.rs)                            │
//! │  - Thin facade owning the backend and screen controllers    │
//! │  - Named actions routed through per-screen tables           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Screen Layer (screens/)                                    │
//! │  - CategoryAdmin, MenuAdmin, Storefront                     │
//! │  - Explicit state, every transition a method                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (engine, filter, sort, view, form, sequence)          │
//! │  - Filter → sort → paginate pipeline and page controls      │
//! │  - Record → view model mapping, form validation             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend (backend/)                                         │
//! │  - Backend trait mirroring the REST API                     │
//! │  - HttpBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Pipeline
//!
//! Every list on every screen is derived the same way: the full source list
//! is filtered, stable-sorted, and cut into a page window. Nothing is cached
//! between steps; any change to the query, sort, page size or page recomputes
//! from the source. See [`engine`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns Rust types.
//! It never prints and never exits. Network access happens only through a
//! [`backend::Backend`] handed in by the caller.
//!
//! ## Testing Strategy
//!
//! 1. **Core** modules: unit tests of the pipeline, prices, forms.
//! 2. **Screens**: driven end to end against `InMemoryBackend`, built with
//!    `backend::memory::fixtures::BackendFixture`.
//! 3. **CLI**: `tests/` runs the binary with `assert_cmd` for argument
//!    handling and the failures that never reach the network.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by front ends
//! - [`dispatch`]: action-name tables per screen
//! - [`screens`]: screen controllers
//! - [`engine`]: pagination engine and page controls
//! - [`filter`], [`sort`]: predicates and comparators
//! - [`view`]: view models and price formatting
//! - [`form`]: form state, validation, request payloads
//! - [`sequence`]: request generations for discarding stale loads
//! - [`backend`]: API collaborator trait and implementations
//! - [`model`]: records as the API sends them
//! - [`config`]: persisted client configuration
//! - [`error`]: error type

pub mod api;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod filter;
pub mod form;
pub mod model;
pub mod screens;
pub mod sequence;
pub mod sort;
pub mod view;
