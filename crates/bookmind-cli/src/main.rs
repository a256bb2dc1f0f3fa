use bookmind::layout::{HeadlessError, LayoutError, MindmapSession};
use bookmind::{CascadePolicy, MindmapConfig, TreeSource, truncate_label, truncate_url};
use std::io::{Read, Write};
use tracing::level_filters::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Mindmap(HeadlessError),
    Malformed(bookmind::MalformedTreeError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Mindmap(err) => write!(f, "{err}"),
            CliError::Malformed(err) => write!(f, "Malformed tree: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bookmind::Error> for CliError {
    fn from(value: bookmind::Error) -> Self {
        Self::Mindmap(value.into())
    }
}

impl From<LayoutError> for CliError {
    fn from(value: LayoutError) -> Self {
        Self::Mindmap(value.into())
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Truncate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    strict: bool,
    config_path: Option<String>,
    overrides: Vec<(String, String)>,
    cascade: Option<CascadePolicy>,
    toggles: Vec<String>,
    collapse_all: bool,
    max_len: Option<usize>,
    as_label: bool,
}

fn usage() -> &'static str {
    "bookmind-cli\n\
\n\
USAGE:\n\
  bookmind-cli [layout] [--pretty] [--strict] [--config <json-file>] [--set <path>=<json>]... [--cascade transitive|direct] [--collapse-all] [--toggle <node-id>]... [-v] [<path>|-]\n\
  bookmind-cli truncate [--max <n>] [--label] <text>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the tree is read from stdin.\n\
  - layout prints the positioned mind-map snapshot as JSON.\n\
  - Toggles are applied in order after --collapse-all.\n\
  - A malformed tree yields a center-only snapshot; --strict turns it into exit code 3.\n\
  - --set takes a dotted config path and a JSON value, e.g. --set label.charWidth=9.\n\
  - truncate shortens a URL (or, with --label, plain text) to --max characters (default 40).\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" if args.input.is_none() => args.command = Command::Layout,
            "truncate" if args.input.is_none() => args.command = Command::Truncate,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--strict" => args.strict = true,
            "--collapse-all" => args.collapse_all = true,
            "--label" => args.as_label = true,
            "--config" => args.config_path = Some(next_value(&mut it)?.clone()),
            "--set" => {
                let pair = next_value(&mut it)?;
                let Some((path, value)) = pair.split_once('=') else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.push((path.to_string(), value.to_string()));
            }
            "--cascade" => {
                args.cascade = match next_value(&mut it)?.as_str() {
                    "transitive" => Some(CascadePolicy::Transitive),
                    "direct" | "direct-children" => Some(CascadePolicy::DirectChildren),
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--toggle" => args.toggles.push(next_value(&mut it)?.clone()),
            "--max" => {
                let n = next_value(&mut it)?;
                args.max_len = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(args: &Args) -> Result<MindmapConfig, CliError> {
    let mut config = match &args.config_path {
        Some(path) => MindmapConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => MindmapConfig::default(),
    };
    for (path, raw) in &args.overrides {
        // Bare words are taken as strings so `--set cascade=directChildren` works unquoted.
        let value = serde_json::from_str(raw).unwrap_or_else(|_| serde_json::json!(raw));
        config.set_value(path, value)?;
    }
    if let Some(cascade) = args.cascade {
        config.cascade = cascade;
    }
    Ok(config)
}

fn run_layout(args: &Args) -> Result<(), CliError> {
    let config = load_config(args)?;
    let text = read_input(args.input.as_deref())?;
    let tree = TreeSource::from_json_str(&text)?;

    let mut session = MindmapSession::new(config);
    if let Some(err) = session.load(&tree) {
        if args.strict {
            return Err(CliError::Malformed(err.clone()));
        }
    }
    if args.collapse_all {
        session.collapse_all();
    }
    for id in &args.toggles {
        let outcome = session.toggle(id)?;
        tracing::debug!(node = %outcome.node_id, collapsed = outcome.collapsed, "applied toggle");
    }

    let json = session.snapshot().to_json(args.pretty)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn run_truncate(args: &Args) -> Result<(), CliError> {
    let Some(text) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let max_len = args.max_len.unwrap_or(40);
    let out = if args.as_label {
        truncate_label(text, max_len)
    } else {
        truncate_url(text, max_len)
    };
    println!("{out}");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Layout => run_layout(&args),
        Command::Truncate => run_truncate(&args),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Malformed(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
