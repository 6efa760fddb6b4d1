use std::path::PathBuf;

use argh::FromArgs;
use cfetch::{Cfetch, Config, Error, OutputFormat, Target, consts, output, telemetry};
use tracing::{debug, warn};

/// Fetch Codeforces problem statements.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to config file
    #[argh(
        option,
        short = 'c',
        default = "PathBuf::from(consts::DEFAULT_CONFIG_PATH)"
    )]
    config: PathBuf,
    /// output format, `text` or `json`
    #[argh(option, short = 'f', default = "OutputFormat::Text")]
    format: OutputFormat,
    /// problem URLs or identifiers such as `158A`
    #[argh(positional, from_str_fn(parse_target))]
    targets: Vec<Target>,
}

fn parse_target(value: &str) -> Result<Target, String> {
    value.parse().map_err(|err: Error| err.to_string())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Parse command-line arguments
    let opts: Opts = argh::from_env();

    let config = Config::load(&opts.config)?;
    let provider = telemetry::try_init(&config.tracing)?;

    debug!(path = %opts.config.display(), ?config, "loaded config");

    let result = run(config, &opts).await;

    if let Some(provider) = provider
        && let Err(err) = provider.shutdown()
    {
        warn!(error = %err, "could not shut down tracer provider");
    }

    result
}

async fn run(config: Config, opts: &Opts) -> miette::Result<()> {
    if opts.targets.is_empty() {
        return Err(Error::NoTargets.into());
    }

    let cfetch = Cfetch::new(config)?;
    let results = cfetch.fetch_all(&opts.targets).await;
    let total = results.len();
    let mut problems = Vec::with_capacity(total);

    for result in results {
        match result {
            Ok(problem) => problems.push(problem),
            Err(err) => eprintln!("{:?}", miette::Report::new(err)),
        }
    }

    match opts.format {
        OutputFormat::Text => {
            let texts: Vec<String> = problems.iter().map(output::render_text).collect();

            if !texts.is_empty() {
                println!("{}", texts.join("\n\n---\n\n"));
            }
        }
        OutputFormat::Json => {
            let json = output::render_json(&problems)?;

            println!("{json}");
        }
    }

    let failed = total - problems.len();

    if failed > 0 {
        return Err(Error::Failed { failed, total }.into());
    }

    Ok(())
}
