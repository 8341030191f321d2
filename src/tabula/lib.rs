//! # Tabula Architecture
//!
//! Tabula is a **UI-agnostic record-collection engine**. This is not a CLI
//! application that happens to have some library code; it's a library that
//! happens to have a terminal client.
//!
//! The engine holds everything a record-management screen needs: the ordered
//! collection, the search projection, the inline edit session, the selection
//! and its confirmation gate, the creation form, and manual reordering.
//! Screens differ only in the schema they are handed, never in code.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs + styles.rs, binary only)     │
//! │  - Parses input lines, formats tables, handles terminal I/O │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Console Layer (console.rs)                                 │
//! │  - Composes one screen per entity kind plus reports, login  │
//! │    and the profile form                                     │
//! │  - Owns the active-screen switch and timer delivery (tick)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine Layer (screen/, store.rs, filter.rs, validate.rs)   │
//! │  - Pure interaction state machines over an ordered store    │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Schema System
//!
//! Users, products and documents are three configurations of one engine.
//! A [`schema::EntitySchema`] names the fields, their kinds, which are
//! required, which the search looks at, and whether records can be manually
//! reordered. Adding an entity kind means writing a schema, not a screen.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `console.rs` inward (console, screens, store), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<Outcome>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! Even the simulated delays take the current `Instant` as an argument, so
//! tests drive time instead of sleeping through it.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`store.rs`, `screen/*`): Thorough unit tests of the
//!    collection contract and the state machines. This is where the lion's
//!    share of testing lives.
//!
//! 2. **Console** (`console.rs`): Tests composition concerns, screen
//!    switching, timer teardown and delivery.
//!
//! 3. **CLI** (the thin binary): An end-to-end test drives it over stdin
//!    and asserts on the rendered output.
//!
//! ## Module Overview
//!
//! - [`console`]: The composition root, one instance per session
//! - [`screen`]: One record-management screen and its state machines
//! - [`store`]: The ordered record collection
//! - [`filter`]: Search projection over searchable fields
//! - [`schema`]: Entity kind descriptions and the built-in kinds
//! - [`validate`]: Draft validation against a schema
//! - [`model`]: Core data types (`Record`, `FieldValue`, `Draft`)
//! - [`report`], [`login`], [`profile`]: The non-collection screens
//! - [`delay`]: Single-shot simulated delays
//! - [`seed`]: Built-in demo data
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//!
//! Input parsing and terminal rendering live in the binary, outside the
//! lib API.

pub mod config;
pub mod console;
pub mod delay;
pub mod error;
pub mod filter;
pub mod login;
pub mod model;
pub mod profile;
pub mod report;
pub mod schema;
pub mod screen;
pub mod seed;
pub mod store;
pub mod validate;
