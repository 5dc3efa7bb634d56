use anyhow::{Context, Result, bail};
use markdown_aside_config::Config;
use markdown_aside_engine::{AsideOptions, Markdown, Source, aside, io};
use std::{
    env,
    io::{Write, stdout},
    path::{Path, PathBuf},
};

const USAGE: &str =
    "Usage: markdown-aside [--config PATH] [--spans] [--no-warn] <FILE|->\n       markdown-aside [--config PATH] --init-config";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    spans: bool,
    no_warn: bool,
    init_config: bool,
    input: Option<Source>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut spans = false;
    let mut no_warn = false;
    let mut init_config = false;
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a path\n{USAGE}"),
            },
            "--spans" => spans = true,
            "--no-warn" => no_warn = true,
            "--init-config" => init_config = true,
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
            _ if input.is_some() => bail!("Only one input file is accepted\n{USAGE}"),
            _ => input = Some(Source::from_arg(&arg)),
        }
    }

    if input.is_none() && !init_config {
        bail!("No input file given\n{USAGE}");
    }

    Ok(Args {
        config,
        spans,
        no_warn,
        init_config,
        input,
    })
}

/// Writes the default config to `path` (or the default location) and
/// returns where it went. An existing file is left alone.
fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let config_path = Config::resolve_path(path);
    if config_path.exists() {
        bail!("Config already exists at {}", config_path.display());
    }
    Config::default()
        .save_to_path(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

fn build_markdown(config: &Config, no_warn: bool) -> Markdown {
    let options = AsideOptions {
        extra_classes: config.extra_classes.clone(),
        warn_unknown_classes: config.warn_unknown_classes && !no_warn,
    };

    let mut md = Markdown::new();
    md.use_plugin(move |md| aside::add_with(md, options));
    md.xhtml_out = config.xhtml_out;
    md
}

fn describe_source(source: &Source) -> String {
    match source {
        Source::File(path) => path.display().to_string(),
        Source::Stdin => "<stdin>".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args(env::args().skip(1))?;

    if args.init_config {
        let written = init_config(args.config.as_deref())?;
        log::info!("wrote default config to {}", written.display());
        if args.input.is_none() {
            return Ok(());
        }
    }

    let Some(input) = &args.input else {
        bail!("No input file given\n{USAGE}");
    };

    let config = Config::load_or_default(args.config.as_deref()).context("Failed to load config")?;
    log::debug!("using {config:?}");

    let name = describe_source(input);
    let src = io::read_source(input).with_context(|| format!("Failed to read {name}"))?;

    let md = build_markdown(&config, args.no_warn);
    let doc = md.parse(&src);

    for diagnostic in &doc.diagnostics {
        log::warn!("{name}: {diagnostic}");
    }

    let mut out = stdout().lock();
    if args.spans {
        for span in &doc.spans {
            writeln!(out, "{}", serde_json::to_string(span)?)?;
        }
    } else {
        out.write_all(md.render(&doc.ast).as_bytes())?;
    }
    out.flush()?;

    Ok(())
}
