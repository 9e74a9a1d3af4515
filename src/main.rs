use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use template_fmt::{
    Config, ContentType, FormattedContent, MergeField, classify_merge_fields,
    format_template_content_with_config, get_performance_metrics, read_template, to_plain_text,
    validate_template_with_settings,
};

#[derive(Parser)]
#[command(name = "template-fmt")]
#[command(about = "Format markdown templates with merge fields into accessible HTML")]
struct Cli {
    /// Input template file
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to write
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured content type
    #[arg(long, value_enum)]
    content_type: Option<ContentTypeArg>,

    /// Report validation issues and suggestions; exit 1 if invalid
    #[arg(long)]
    validate: bool,

    /// Report formatting time and output size
    #[arg(long)]
    metrics: bool,

    /// Keep a leading YAML frontmatter block
    #[arg(long)]
    keep_frontmatter: bool,

    /// Skip heading, emphasis and paragraph markup
    #[arg(long)]
    no_typography: bool,

    /// Leave merge fields as plain text
    #[arg(long)]
    no_highlight: bool,

    /// Skip whitespace and punctuation cleanup
    #[arg(long)]
    no_spacing: bool,

    /// Skip the labelled article wrapper and skip link
    #[arg(long)]
    no_accessibility: bool,

    /// Keep desktop-only heading and paragraph sizes
    #[arg(long)]
    no_mobile: bool,

    /// Omit the inferred type attribute on highlighted merge fields
    #[arg(long)]
    hide_field_types: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Plain,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContentTypeArg {
    Email,
    Lesson,
    Article,
    General,
}

impl From<ContentTypeArg> for ContentType {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Email => ContentType::Email,
            ContentTypeArg::Lesson => ContentType::Lesson,
            ContentTypeArg::Article => ContentType::Article,
            ContentTypeArg::General => ContentType::General,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    formatted: &'a FormattedContent,
    merge_field_kinds: Vec<MergeField>,
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> template_fmt::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(Path::new("template-fmt.toml")),
    };

    if let Some(content_type) = cli.content_type {
        config.template.content_type = content_type.into();
    }
    config.template.show_merge_field_types &= !cli.hide_field_types;
    let formatting = &mut config.formatting;
    formatting.enhance_typography &= !cli.no_typography;
    formatting.highlight_merge_fields &= !cli.no_highlight;
    formatting.improve_spacing &= !cli.no_spacing;
    formatting.add_accessibility_tags &= !cli.no_accessibility;
    formatting.mobile_optimized &= !cli.no_mobile;

    Ok(config)
}

fn render(cli: &Cli, config: &Config, template: &str) -> template_fmt::Result<String> {
    let formatted = format_template_content_with_config(template, config);
    debug!(merge_fields = ?formatted.merge_fields, "formatted {}", cli.input.display());

    let rendered = match cli.format {
        OutputFormat::Html => formatted.content,
        OutputFormat::Plain => to_plain_text(&formatted.content),
        OutputFormat::Json => {
            let report = JsonReport {
                merge_field_kinds: classify_merge_fields(&formatted.merge_fields),
                formatted: &formatted,
            };
            serde_json::to_string_pretty(&report)?
        }
    };
    Ok(rendered)
}

fn run(cli: &Cli) -> template_fmt::Result<bool> {
    let config = load_config(cli)?;
    let template = read_template(&cli.input, cli.keep_frontmatter)?;

    let mut valid = true;
    if cli.validate {
        let validation = validate_template_with_settings(&template, &config.template);
        for issue in &validation.issues {
            eprintln!("issue: {}", issue);
        }
        for suggestion in &validation.suggestions {
            eprintln!("suggestion: {}", suggestion);
        }
        valid = validation.is_valid;
    }

    if cli.metrics {
        let metrics = get_performance_metrics(&template);
        eprintln!(
            "metrics: {:?} processing, {} chars output, {:.3} input/output ratio",
            metrics.processing_time, metrics.output_size, metrics.compression_ratio
        );
    }

    let rendered = render(cli, &config, &template)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Created {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(valid)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
