//! Canonical router file discovery and first-use skeleton creation.
//!
//! The only module besides the final write in `mutate` that touches the
//! filesystem. Tries the conventional locations in order and, on a full
//! miss, writes a fixed-shape skeleton the rest of the engine can rely
//! on byte-for-byte.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

use crate::infra::config::Config;

/// Marker replaced by the first registered route.
pub const PLACEHOLDER: &str = "// Routes will be automatically added here";

/// Import line used as the anchor for inserting page imports.
pub const ROOT_LAYOUT_ANCHOR: &str = "import RootLayout from";

/// Candidate locations relative to the project base, in priority order.
const CANDIDATES: [&str; 3] = ["pages/routes", "routes", "src/routes"];

/// Resolve the single canonical router file, creating it (plus parent
/// directories) with the skeleton content if none of the conventional
/// paths exist yet.
pub fn locate_router_file(base_dir: &Utf8Path, config: &Config) -> Result<Utf8PathBuf> {
    if let Some(existing) = existing_router_file(base_dir, config) {
        debug!(path = %existing, "found existing router file");
        return Ok(existing);
    }

    let path = creation_path(base_dir, config);
    let dir = path.parent().unwrap_or(base_dir);
    fs::create_dir_all(dir).with_context(|| format!("creating router directory {dir}"))?;
    fs::write(&path, router_skeleton()).with_context(|| format!("writing router skeleton {path}"))?;
    debug!(path = %path, "created router skeleton");

    Ok(path)
}

/// First conventional path that already holds a router file, if any.
pub fn existing_router_file(base_dir: &Utf8Path, config: &Config) -> Option<Utf8PathBuf> {
    let file_name = format!("routes.{}", config.extension());
    CANDIDATES
        .iter()
        .map(|dir| base_dir.join(dir).join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Where a fresh router file would be created: prefer src/routes when
/// the project has a src tree, else the top-level routes dir.
pub fn creation_path(base_dir: &Utf8Path, config: &Config) -> Utf8PathBuf {
    let file_name = format!("routes.{}", config.extension());
    let dir = if base_dir.join("src").is_dir() {
        base_dir.join("src/routes")
    } else {
        base_dir.join("routes")
    };
    dir.join(file_name)
}

/// Initial router content: one root route with an empty children array.
/// Two-space indentation and single quotes are part of the contract;
/// the mutation engine re-reads exactly this shape.
pub fn router_skeleton() -> String {
    format!(
        "import {{ createBrowserRouter }} from 'react-router-dom';\n\
         import RootLayout from '../layouts/RootLayout';\n\
         \n\
         const router = createBrowserRouter([\n\
         {0}{{\n\
         {0}{0}path: '/',\n\
         {0}{0}element: <RootLayout />,\n\
         {0}{0}children: [\n\
         {0}{0}{0}{PLACEHOLDER}\n\
         {0}{0}],\n\
         {0}}},\n\
         ]);\n\
         \n\
         export default router;\n",
        "  "
    )
}
