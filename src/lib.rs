//! # Procfile - Cloud Native Buildpack for Procfile process types
//!
//! This library turns process types declared in a `Procfile` into the launch
//! processes of an application image.
//!
//! ## Overview
//!
//! An application declares its long-running processes by name:
//!
//! ```yaml
//! web: bundle exec rackup -p $PORT
//! worker: bundle exec sidekiq
//! ```
//!
//! During detection these declarations become `procfile` plan metadata. During
//! the build they are converted into launch processes, exactly one of which is
//! marked as the default.
//!
//! ## Key Features
//!
//! - **Deterministic Output**: Processes are emitted in process type order
//! - **Default Selection**: `web` is the default process when declared,
//!   otherwise the first emitted process
//! - **Shell-less Stacks**: On the tiny stack command lines are split into an
//!   executable and arguments so they can run without a shell
//! - **Platform Overrides**: `BP_PROCFILE_DEFAULT_PROCESS` declares the `web`
//!   process without a Procfile
//!
//! ## Architecture
//!
//! The core is pure and performs no I/O:
//!
//! - `tokenizer`: POSIX shell word splitting of command lines
//! - `process`: Process set construction and default selection
//!
//! The buildpack plumbing around it:
//!
//! - `stack`: Stack identifier to execution mode classification
//! - `plan`: Buildpack plan loading and `procfile` entry merging
//! - `procfile`: Procfile and platform environment discovery
//! - `platform`: Platform environment loading
//! - `detect`: Detect phase
//! - `build`: Build phase
//! - `result`: Launch metadata serialization
//! - `config`: Runtime configuration resolution
//!
//! ## Example Usage
//!
//! ```rust
//! use procfile::build::{build, BuildContext};
//! use procfile::plan::{BuildPlan, BuildPlanEntry};
//! use procfile::stack::TINY_STACK_ID;
//!
//! let mut metadata = toml::Table::new();
//! metadata.insert("web".into(), "bin/server --port 8080".into());
//!
//! let context = BuildContext {
//!     plan: BuildPlan {
//!         entries: vec![BuildPlanEntry { name: "procfile".into(), metadata }],
//!     },
//!     stack_id: TINY_STACK_ID.into(),
//! };
//!
//! let result = build(&context)?;
//! assert_eq!(result.processes[0].command, "bin/server");
//! assert_eq!(result.processes[0].args(), ["--port", "8080"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed errors built with `thiserror`. The `procfile`
//! binary reports them through `color_eyre`.

pub mod build;
pub mod config;
pub mod detect;
pub mod plan;
pub mod platform;
pub mod process;
pub mod procfile;
pub mod result;
pub mod stack;
pub mod tokenizer;
