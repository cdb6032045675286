//! The `page` command: template emission plus best-effort route wiring.
//!
//! The component file always wins: any route-engine failure is caught
//! here, reported as a warning, and never blocks page creation.

use std::fs;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use owo_colors::OwoColorize;
use regex::Regex;
use tracing::debug;

use crate::cli::{AppContext, PageArgs};
use crate::core::entry::component_identifier;
use crate::core::locate::{creation_path, existing_router_file, locate_router_file};
use crate::core::mutate::{MutationReason, MutationReport, register_route};
use crate::core::resolve::resolve_route;
use crate::infra::config::{Config, ProjectType, load_config};

/// PascalCase page name, e.g. `Dashboard`
static PASCAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("pascal name pattern"));

/// Dynamic-segment marker, e.g. `_[productId]`
static DYNAMIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_\[[a-z][A-Za-z0-9]*\]$").expect("dynamic name pattern"));

/// Rejected before the route engine ever sees the name.
#[derive(Debug, thiserror::Error)]
#[error("invalid page name '{name}': use PascalCase (Dashboard) or a dynamic segment (_[productId])")]
pub struct InvalidPageName {
    pub name: String,
}

pub fn run(args: PageArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();

    if !PASCAL_NAME.is_match(&args.name) && !DYNAMIC_NAME.is_match(&args.name) {
        return Err(InvalidPageName { name: args.name }.into());
    }

    let base_dir = resolve_base_dir(args.base_dir.as_deref(), &config)?;
    let target_dir = match &args.dir {
        Some(dir) => base_dir.join(shellexpand::tilde(dir).as_ref()),
        None => base_dir.join("pages").join(&args.name),
    };
    let page_file = target_dir.join(format!("{}.{}", args.name, config.extension()));

    if ctx.dry_run {
        print_plan(&args, ctx, &config, &base_dir, &target_dir, &page_file);
        return Ok(());
    }

    write_page_file(&args.name, &page_file, config.typescript, ctx)?;

    if args.no_route {
        return Ok(());
    }
    if config.project_type == ProjectType::Next {
        if !ctx.quiet {
            println!("next projects route by filesystem convention; no router file to update");
        }
        return Ok(());
    }

    // Best effort from here on: the page file already exists.
    match wire_route(&args, &config, &base_dir, &target_dir) {
        Ok(report) => report_outcome(&args, ctx, &report),
        Err(err) => {
            if !ctx.quiet {
                print_warn(ctx, &format!("route registration failed: {err:#}"));
                print_warn(ctx, "add the route to your router file manually");
            }
        }
    }

    Ok(())
}

/// Locate (or create) the router file and run the mutation engine.
fn wire_route(
    args: &PageArgs,
    config: &Config,
    base_dir: &Utf8Path,
    target_dir: &Utf8Path,
) -> Result<MutationReport> {
    let router_file = locate_router_file(base_dir, config)?;
    let router_dir = router_file
        .parent()
        .context("router file has no parent directory")?;

    let desc = resolve_route(&args.name, target_dir, base_dir, router_dir);
    debug!(route = %desc.route_path, import = %desc.import_path, "resolved route");

    register_route(&router_file, &desc)
}

fn report_outcome(args: &PageArgs, ctx: &AppContext, report: &MutationReport) {
    if args.json {
        // Single-line JSON for scripting; failure here is not worth a panic
        if let Ok(line) = serde_json::to_string(report) {
            println!("{line}");
        }
        return;
    }
    if ctx.quiet {
        return;
    }

    match report.reason {
        MutationReason::Registered => {
            if ctx.no_color {
                println!("{}", report.message);
            } else {
                println!("{}", report.message.green());
            }
        }
        MutationReason::Duplicate => println!("{}", report.message),
        MutationReason::AnchorNotFound
        | MutationReason::ParentNotFound
        | MutationReason::TransformationFailed => print_warn(ctx, &report.message),
    }
}

fn print_warn(ctx: &AppContext, message: &str) {
    if ctx.no_color {
        eprintln!("warning: {message}");
    } else {
        eprintln!("{} {message}", "warning:".yellow());
    }
}

fn resolve_base_dir(override_dir: Option<&str>, config: &Config) -> Result<Utf8PathBuf> {
    let raw = shellexpand::tilde(override_dir.unwrap_or(&config.base_dir)).to_string();
    let path = Utf8PathBuf::from(raw);

    // Canonicalize when possible for stable prefix math; keep the raw
    // path for not-yet-created bases.
    match dunce::canonicalize(path.as_std_path()) {
        Ok(canonical) => Utf8PathBuf::from_path_buf(canonical)
            .map_err(|p| anyhow::anyhow!("base dir is not valid UTF-8: {}", p.display())),
        Err(_) => Ok(path),
    }
}

fn write_page_file(
    name: &str,
    page_file: &Utf8Path,
    typescript: bool,
    ctx: &AppContext,
) -> Result<()> {
    if page_file.exists() {
        if !ctx.quiet {
            println!("{page_file} already exists; leaving it untouched");
        }
        return Ok(());
    }

    let dir = page_file.parent().context("page file has no parent")?;
    fs::create_dir_all(dir).with_context(|| format!("creating page directory {dir}"))?;
    fs::write(page_file, page_template(name, typescript))
        .with_context(|| format!("writing page component {page_file}"))?;

    if !ctx.quiet {
        if ctx.no_color {
            println!("created {page_file}");
        } else {
            println!("created {}", page_file.green());
        }
    }
    Ok(())
}

/// Minimal component body; the identifier goes through the same
/// boundary as the router import so dynamic pages stay consistent.
fn page_template(name: &str, typescript: bool) -> String {
    let ident = component_identifier(name);
    if typescript {
        format!(
            "const {ident}: React.FC = () => {{\n  return <div>{ident}</div>;\n}};\n\nexport default {ident};\n"
        )
    } else {
        format!(
            "const {ident} = () => {{\n  return <div>{ident}</div>;\n}};\n\nexport default {ident};\n"
        )
    }
}

fn print_plan(
    args: &PageArgs,
    ctx: &AppContext,
    config: &Config,
    base_dir: &Utf8Path,
    target_dir: &Utf8Path,
    page_file: &Utf8Path,
) {
    if ctx.quiet {
        return;
    }

    let router_file = existing_router_file(base_dir, config)
        .unwrap_or_else(|| creation_path(base_dir, config));
    let router_dir = router_file.parent().unwrap_or(base_dir);
    let desc = resolve_route(&args.name, target_dir, base_dir, router_dir);

    if ctx.no_color {
        println!("DRY RUN: Would create:");
    } else {
        println!("{}", "DRY RUN: Would create:".yellow());
    }
    println!("  Page: {page_file}");
    println!("  Route: {}", desc.route_path);
    if let Some(parent) = &desc.parent_route_path {
        println!("  Parent: {parent}");
    }
    println!("  Router file: {router_file}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name_validation_patterns() {
        assert!(PASCAL_NAME.is_match("Dashboard"));
        assert!(PASCAL_NAME.is_match("UserProfile2"));
        assert!(!PASCAL_NAME.is_match("dashboard"));
        assert!(!PASCAL_NAME.is_match("User-Profile"));

        assert!(DYNAMIC_NAME.is_match("_[productId]"));
        assert!(!DYNAMIC_NAME.is_match("_[ProductId]"));
        assert!(!DYNAMIC_NAME.is_match("_[]"));
    }

    #[test]
    fn test_template_uses_import_safe_identifier() {
        let body = page_template("_[productId]", true);
        assert!(body.contains("const DynamicProductId: React.FC"));
        assert!(body.contains("export default DynamicProductId;"));
    }

    #[test]
    fn test_jsx_template_has_no_type_annotation() {
        let body = page_template("Dashboard", false);
        assert!(body.contains("const Dashboard = () =>"));
        assert!(!body.contains("React.FC"));
    }
}
