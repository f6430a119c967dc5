use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use relative_path::RelativePathBuf;
use specdown_config::{Config, OutputFormat};
use specdown_engine::{
    DirStore, HtmlRenderer, LogicalPath, Options, OutlineRenderer, Pipeline, Renderer,
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(author, version, about = "Render Markdown with file inclusion", long_about = None)]
struct Cli {
    /// Markdown file to render
    file: PathBuf,

    /// Directory that rooted (`/...`) inclusion targets resolve against.
    /// Defaults to the config file's `root`, then the file's directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Enable an extension (repeatable)
    #[arg(short, long = "extension", value_enum)]
    extensions: Vec<ExtensionArg>,

    /// Limit on nested inclusions
    #[arg(long)]
    max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log resolved inclusions
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExtensionArg {
    Include,
    TitleBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Html,
    Outline,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Outline => OutputFormat::Outline,
        }
    }
}

/// Everything needed for one run, after flags are laid over the config.
#[derive(Debug, PartialEq)]
struct Settings {
    root_dir: PathBuf,
    document: LogicalPath,
    options: Options,
    format: OutputFormat,
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' not found", path.display())),
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

fn settings(cli: &Cli, config: Config) -> Result<Settings> {
    let root_dir = match (&cli.root, &config.root) {
        (Some(root), _) => root.clone(),
        (None, Some(root)) => root.clone(),
        (None, None) => cli
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut options = config.options();
    for extension in &cli.extensions {
        match extension {
            ExtensionArg::Include => options.extensions.include = true,
            ExtensionArg::TitleBlock => options.extensions.title_block = true,
        }
    }
    if let Some(max_depth) = cli.max_depth {
        options.max_depth = max_depth;
    }

    Ok(Settings {
        document: document_path(&root_dir, &cli.file)?,
        root_dir,
        options,
        format: cli.format.map(OutputFormat::from).unwrap_or(config.format),
    })
}

/// The file's logical path inside the store rooted at `root_dir`.
fn document_path(root_dir: &Path, file: &Path) -> Result<LogicalPath> {
    let root_dir = root_dir
        .canonicalize()
        .with_context(|| format!("Store root '{}' is not accessible", root_dir.display()))?;
    let file = file
        .canonicalize()
        .with_context(|| format!("Cannot read '{}'", file.display()))?;

    let relative = file.strip_prefix(&root_dir).with_context(|| {
        format!(
            "'{}' is outside the store root '{}'",
            file.display(),
            root_dir.display()
        )
    })?;
    let relative = RelativePathBuf::from_path(relative)
        .with_context(|| format!("'{}' is not a portable path", relative.display()))?;
    Ok(LogicalPath::parse(relative.as_str())?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = load_config(&cli)?;
    let settings = settings(&cli, config)?;
    log::info!(
        "Rendering {} from store '{}'",
        settings.document,
        settings.root_dir.display()
    );

    let store = DirStore::open(&settings.root_dir)?;
    let mut renderer: Box<dyn Renderer> = match settings.format {
        OutputFormat::Html => Box::new(HtmlRenderer::new()),
        OutputFormat::Outline => Box::new(OutlineRenderer::new()),
    };

    let output = Pipeline::new(&store, settings.options)
        .run(&settings.document, renderer.as_mut())
        .with_context(|| format!("Failed to render {}", settings.document))?;

    if let Some(title) = &output.title {
        log::info!("Title: {}", title.title);
    }

    match &cli.output {
        Some(path) => fs::write(path, &output.body)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => io::stdout().write_all(output.body.as_bytes())?,
    }

    if !output.diagnostics.is_empty() {
        eprintln!(
            "{} inclusion(s) failed in {}",
            output.diagnostics.len(),
            settings.document
        );
    }

    Ok(())
}
