//! # Site Freeze
//!
//! Freeze a dynamically rendered blog into a fully static file tree with
//! client-side full-text search.
//!
//! The pipeline waits for the source CMS to come up, mirrors it with an
//! external recursive fetcher, repairs the artifacts a generic mirror
//! leaves behind, and builds a search index the deployed page queries
//! entirely in the browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────┐   ┌───────────┐   ┌─────────┐
//! │ Origin CMS │──▶│ Mirror │──▶│ Normalize │──▶│  Index  │
//! │ (probe)    │   │ (wget) │   │ tree fix  │   │ builder │
//! └────────────┘   └────────┘   └───────────┘   └────┬────┘
//!                                                    │
//!                                              search.json
//!                                                    │
//!                                                    ▼
//!                                            ┌──────────────┐
//!                                            │ Client query │
//!                                            │    engine    │
//!                                            └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! freeze export                 # probe, mirror, normalize, index
//! freeze normalize              # repair an existing mirrored tree
//! freeze index                  # rebuild search.json
//! freeze search "deployment"    # query the built index locally
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with env overrides |
//! | [`probe`] | Bounded readiness polling of the origin |
//! | [`mirror`] | wget invocation contract |
//! | [`normalize`] | Post-mirror tree repair |
//! | [`html`] | Minimal HTML parsing abstraction |
//! | [`extract`] | Per-page document extraction |
//! | [`index`] | Corpus assembly and `search.json` |
//! | [`models`] | Core data types |
//! | [`client`] | Browser query engine logic |

pub mod client;
pub mod config;
pub mod extract;
pub mod html;
pub mod index;
pub mod mirror;
pub mod models;
pub mod normalize;
pub mod probe;
