//! **pagewright** - Fast CLI for scaffolding React pages and wiring them into a generated router
//!
//! Scaffolds page components and registers their routes in a machine-generated
//! `routes.tsx`/`routes.jsx` file using scoped, idempotent text edits instead of
//! a full parser. The router file's grammar is controlled by this tool, so
//! line-oriented scanning with brace balancing is sufficient and keeps output
//! formatting byte-stable across runs.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core route engine - resolution, analysis and mutation of the router file
pub mod core {
    /// Directory location → route descriptor (pure, no I/O)
    pub mod resolve;
    pub use resolve::{RouteDescriptor, RouteSegment, resolve_route};

    /// Canonical router file discovery and skeleton creation
    pub mod locate;
    pub use locate::locate_router_file;

    /// Heuristic scan of router text into imports + children-array span
    pub mod parse;
    pub use parse::{ChildrenSpan, RouterFileState, parse_router_file};

    /// Brace-balanced location of a parent route's text block
    pub mod block;
    pub use block::{RouteBlock, find_parent_block};

    /// Route descriptor → import statement + route entry text (pure)
    pub mod entry;
    pub use entry::{import_statement, route_entry};

    /// Orchestrator: idempotent insertion of one route into file text
    pub mod mutate;
    pub use mutate::{MutationReason, MutationReport, apply_route, register_route};

    /// Page-creation command: template emission + best-effort route registration
    pub mod page;
    pub use page::run as page_run;
}

/// Infrastructure - Configuration, line indexing, and path math
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, ProjectType, init as config_init, load_config};

    /// Newline index for O(1) line→byte-span mapping during splices
    pub mod lines;
    pub use lines::{LineIndex, splice};

    /// POSIX-style relative path math for import statements
    pub mod paths;
    pub use paths::relative_import;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{page_run, register_route, resolve_route};
pub use infra::{Config, ProjectType, load_config};

// Core types for external consumers
pub use crate::core::{MutationReason, MutationReport, RouteDescriptor};
