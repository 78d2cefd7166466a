//! API2GEN CLI
//!
//! Command-line interface for turning OpenAPI documents into AI tool specs
//! and client code.

use anyhow::{Context, Result};
use api2gen_common::{GenerationConfig, ToolFamily};
use api2gen_generator::{generator_for, process, GenerationSummary};
use api2gen_parser::OpenApiDocument;
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "api2gen")]
#[command(
    version,
    about = "API2GEN: Your OpenAPI to AI function converter",
    long_about = None
)]
#[command(after_help = "EXAMPLES:\n  \
    # Generate OpenAI tools from a Swagger 2.0 spec\n  \
    api2gen --spec petstore.json --tool openai\n\n  \
    # Choose output locations and the token placeholder\n  \
    api2gen -s petstore.yaml -t openai \\\n    \
    -f ./tools/spec.json -c ./tools/client.py \\\n    \
    --token \"$API_TOKEN\"")]
struct Cli {
    /// OpenAPI spec file to be processed (JSON or YAML)
    #[arg(short, long)]
    spec: PathBuf,

    /// The tool family to use for generation of spec and code
    #[arg(short, long)]
    tool: ToolArg,

    /// Location on disk where the tool spec needs to be saved
    #[arg(short = 'f', long, default_value = "../output/tools/spec.json")]
    tool_spec: PathBuf,

    /// Location on disk where the generated code needs to be saved
    #[arg(short, long, default_value = "../output/tools/code.py")]
    code: PathBuf,

    /// YAML file with generation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL for generated calls (overrides the document's host)
    #[arg(long)]
    base_url: Option<String>,

    /// Value returned by the generated bearer-token stub
    #[arg(long)]
    token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ToolArg {
    /// OpenAI function calling
    #[value(name = "openai", alias = "OpenAI")]
    OpenAi,
    /// Model Context Protocol (not implemented)
    #[value(name = "mcp", alias = "MCP")]
    Mcp,
    /// Vertex AI (not implemented)
    #[value(name = "vertex", alias = "Vertex")]
    Vertex,
}

impl From<ToolArg> for ToolFamily {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::OpenAi => ToolFamily::OpenAi,
            ToolArg::Mcp => ToolFamily::Mcp,
            ToolArg::Vertex => ToolFamily::Vertex,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    let config = load_config(&cli)?;
    let family = ToolFamily::from(cli.tool);

    // Unwired families fail here, before the document is read
    let generator = generator_for(family, config).context("Unsupported tool family")?;

    println!("{} Loading OpenAPI spec: {}", "→".cyan(), cli.spec.display());
    let document = OpenApiDocument::from_file(&cli.spec).context("Failed to load OpenAPI spec")?;

    if cli.verbose {
        println!("  Version: {}", document.version());
        println!("  Tool family: {}", family);
        println!("  Tool spec: {}", cli.tool_spec.display());
        println!("  Code: {}", cli.code.display());
    }

    println!("{} Generating {} tools...", "→".cyan(), family.to_string().yellow());
    let summary = process(generator.as_ref(), &document, &cli.tool_spec, &cli.code)
        .context("Failed to generate tools")?;

    report(&summary, cli.verbose);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "api2gen=debug" } else { "api2gen=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Settings from `--config`, then command-line overrides
fn load_config(cli: &Cli) -> Result<GenerationConfig> {
    let mut config = match &cli.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GenerationConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(token) = &cli.token {
        config = config.with_token_placeholder(token.as_str());
    }

    Ok(config)
}

fn report(summary: &GenerationSummary, verbose: bool) {
    for skipped in &summary.skipped {
        eprintln!(
            "{} Skipped {} {}{}: {}",
            "⚠".yellow(),
            skipped.method,
            skipped.path,
            skipped
                .operation_id
                .as_deref()
                .map(|id| format!(" ({})", id))
                .unwrap_or_default(),
            skipped.reason
        );
    }

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  Functions: {}", summary.functions);
    if !summary.skipped.is_empty() || verbose {
        println!("  Skipped operations: {}", summary.skipped.len());
    }
    println!("\n{}", "Generated files:".bold());
    print_file(&summary.spec_path);
    print_file(&summary.code_path);
}

fn print_file(path: &Path) {
    println!("  📄 {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["api2gen", "--spec", "petstore.json", "--tool", "openai"])
            .unwrap();
        assert_eq!(cli.tool_spec, PathBuf::from("../output/tools/spec.json"));
        assert_eq!(cli.code, PathBuf::from("../output/tools/code.py"));
        assert!(matches!(cli.tool, ToolArg::OpenAi));
    }

    #[test]
    fn test_cli_requires_spec_and_tool() {
        assert!(Cli::try_parse_from(["api2gen", "--tool", "openai"]).is_err());
        assert!(Cli::try_parse_from(["api2gen", "--spec", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["api2gen", "-s", "a.json", "-t", "gemini"]).is_err());
    }

    #[test]
    fn test_tool_alias() {
        let cli = Cli::try_parse_from(["api2gen", "-s", "a.json", "-t", "OpenAI"]).unwrap();
        assert_eq!(ToolFamily::from(cli.tool), ToolFamily::OpenAi);
    }

    #[test]
    fn test_every_tool_arg_maps_to_family() {
        for (flag, family) in [
            ("openai", ToolFamily::OpenAi),
            ("mcp", ToolFamily::Mcp),
            ("MCP", ToolFamily::Mcp),
            ("vertex", ToolFamily::Vertex),
            ("Vertex", ToolFamily::Vertex),
        ] {
            let cli = Cli::try_parse_from(["api2gen", "-s", "a.json", "-t", flag]).unwrap();
            assert_eq!(ToolFamily::from(cli.tool), family);
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "api2gen",
            "-s",
            "a.json",
            "-t",
            "openai",
            "--base-url",
            "https://example.org",
            "--token",
            "abc",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.org"));
        assert_eq!(config.token_placeholder, "abc");
    }

    #[test]
    fn test_unwired_tool_is_config_error() {
        let family = ToolFamily::from(ToolArg::Mcp);
        assert!(generator_for(family, GenerationConfig::default()).is_err());
    }
}
