// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshtweak CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use meshtweak::geometry::{validate_mesh, MeshValidation};
use meshtweak::io::{load_document, save_mesh};
use meshtweak::{
    BodyRegion, InteractiveObject, MemoryMeshLoader, Mesh, MeshTweaker, TextureLibrary, TweakConfig, TweakKind,
    TweakOutcome,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "meshtweak")]
#[command(about = "Splice body regions between segmented character meshes", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to meshtweak.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a tweak to a base mesh using a source mesh
    Tweak {
        /// Base mesh document
        base: PathBuf,

        /// Source mesh document
        source: PathBuf,

        /// Tweak kind (head, torso, legs, upper, lower, upper_from_lower, all)
        #[arg(short, long, default_value = "head")]
        kind: String,

        /// Output mesh document
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Swap one skin texture for another
    Skin {
        /// Mesh document
        mesh: PathBuf,

        /// Skin to replace, e.g. npc_human_chest
        from: String,

        /// Replacement skin
        to: String,

        /// Output mesh document
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print a summary of a mesh document
    Inspect {
        /// Mesh document
        input: PathBuf,
    },

    /// Check mesh documents for dangling references
    Validate {
        /// Mesh document or directory of documents
        path: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => TweakConfig::from_file(path)?,
        None => TweakConfig::load()?,
    };

    match &cli.command {
        Commands::Tweak {
            base,
            source,
            kind,
            output,
        } => tweak_command(config, base, source, kind, output),
        Commands::Skin {
            mesh,
            from,
            to,
            output,
        } => skin_command(config, mesh, from, to, output),
        Commands::Inspect { input } => inspect_command(input),
        Commands::Validate { path } => validate_command(&config, path, cli.verbose),
        Commands::Version => {
            println!("Meshtweak v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_mesh(path: &Path, library: &mut TextureLibrary) -> Result<Mesh> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }
    Ok(load_document(path)?.into_mesh(library))
}

fn object_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "object".to_string())
}

fn tweak_command(
    config: TweakConfig,
    base: &Path,
    source: &Path,
    kind: &str,
    output: &Path,
) -> Result<()> {
    let kind: TweakKind = kind.parse()?;

    let mut library = TextureLibrary::new();
    let base_mesh = load_mesh(base, &mut library)?;
    let source_mesh = load_mesh(source, &mut library)?;

    let source_key = source.to_string_lossy().into_owned();
    let mut loader = MemoryMeshLoader::with_library(library);
    loader.insert(&source_key, source_mesh);

    let mut tweaker = MeshTweaker::new(config, loader);
    let mut object = InteractiveObject::new(object_name(base), base_mesh);

    let start = std::time::Instant::now();
    let outcome = tweaker
        .apply(&mut object, kind, &source_key)
        .with_context(|| format!("Tweak {} of {} failed", kind, base.display()))?;
    let elapsed = start.elapsed();

    match outcome {
        TweakOutcome::Replaced => {
            save_mesh(object.mesh(), output)?;
            println!(
                "{} {} {} {} -> {} ({} vertices, {} faces, {:.2?})",
                "✓".green(),
                kind.to_string().cyan(),
                base.display(),
                source.display(),
                output.display(),
                object.mesh().vertex_count(),
                object.mesh().face_count(),
                elapsed
            );
        }
        TweakOutcome::Disabled => {
            println!("{} Mesh tweaking is disabled by configuration", "!".yellow());
        }
        TweakOutcome::Restored | TweakOutcome::Unchanged => {
            println!("{} Nothing to do for {}", "ℹ".bright_blue(), kind);
        }
    }

    Ok(())
}

fn skin_command(config: TweakConfig, mesh: &Path, from: &str, to: &str, output: &Path) -> Result<()> {
    let mut library = TextureLibrary::new();
    let loaded = load_mesh(mesh, &mut library)?;

    let mut tweaker = MeshTweaker::new(config, MemoryMeshLoader::with_library(library));
    let mut object = InteractiveObject::new(object_name(mesh), loaded);

    if !tweaker.tweak_skin(&mut object, from, to) {
        bail!("Skin {} not found on {}", from, mesh.display());
    }

    save_mesh(object.mesh(), output)?;
    println!("{} {} -> {} written to {}", "✓".green(), from, to, output.display());
    Ok(())
}

fn inspect_command(input: &Path) -> Result<()> {
    let mut library = TextureLibrary::new();
    let mesh = load_mesh(input, &mut library)?;

    println!("{}", input.display().to_string().bold());
    println!("  {} {}", "Vertices:".bright_black(), mesh.vertex_count().to_string().cyan());
    println!("  {} {}", "Faces:".bright_black(), mesh.face_count().to_string().cyan());
    println!(
        "  {} {:?} .. {:?}",
        "Bounds:".bright_black(),
        mesh.bounds.min.coords.as_slice(),
        mesh.bounds.max.coords.as_slice()
    );

    println!("  {}", "Textures:".bright_black());
    for (slot, texture) in mesh.textures.iter().enumerate() {
        println!("    [{}] {}", slot, texture.name());
    }

    println!("  {}", "Selections:".bright_black());
    for selection in &mesh.selections {
        let marker = if BodyRegion::from_selection_name(&selection.name).is_some() {
            "*".yellow()
        } else {
            " ".normal()
        };
        println!("   {}{} ({})", marker, selection.name, selection.vertices.len());
    }

    println!("  {}", "Action points:".bright_black());
    for point in &mesh.action_points {
        println!("    {} -> vertex {}", point.name, point.vertex);
    }

    println!("  {}", "Groups:".bright_black());
    for group in &mesh.groups {
        println!(
            "    {} ({} vertices, origin {})",
            group.name,
            group.vertices.len(),
            group.origin
        );
    }

    let report = validate_mesh(&mesh);
    if !report.is_valid() {
        println!("  {} {} issue(s)", "Invalid:".red(), report.issue_count());
    }
    Ok(())
}

fn collect_documents(path: &Path, extension: &str) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|e| e.into_path())
        .collect()
}

fn validate_command(config: &TweakConfig, path: &Path, verbose: bool) -> Result<()> {
    if !path.exists() {
        bail!("Path not found: {}", path.display());
    }

    let files = collect_documents(path, &config.mesh_extension);
    if files.is_empty() {
        println!("{} No mesh documents under {}", "ℹ".bright_blue(), path.display());
        return Ok(());
    }

    let results: Vec<(PathBuf, Result<MeshValidation>)> = files
        .par_iter()
        .map(|file| {
            let report = load_document(file).map(|document| {
                let mut library = TextureLibrary::new();
                validate_mesh(&document.into_mesh(&mut library))
            });
            (file.clone(), report)
        })
        .collect();

    let mut failed = 0usize;
    for (file, result) in &results {
        match result {
            Ok(report) if report.is_valid() => {
                if verbose {
                    println!("{} {}", "✓".green(), file.display());
                }
            }
            Ok(report) => {
                failed += 1;
                println!(
                    "{} {} ({} issue(s))",
                    "✗".red(),
                    file.display(),
                    report.issue_count()
                );
                if verbose {
                    println!("    {:?}", report);
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {:#}", "✗".red(), file.display(), e);
            }
        }
    }

    println!(
        "{} {} checked, {} failed",
        "Summary:".bold(),
        results.len().to_string().cyan(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        }
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
