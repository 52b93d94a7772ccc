#![allow(missing_docs)]
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use specsieve_core::{Document, FilterOptions, is_yaml_path, run};
use tracing::{Level, debug, info, warn};

const HELP: &str = "\
Keep only the operations of an OpenAPI/Swagger document matching filters

USAGE:
  specsieve [OPTIONS] INPUT

ARGS:
  INPUT                 the JSON or YAML document to filter

OPTIONS:
  -c, --config FILE     filter options (JSON or YAML), no filters if absent
  -o, --output FILE     write the filtered document to FILE instead of stdout
      --yaml            write YAML instead of JSON
  -v, --verbose         log the filtering details
  -h, --help            print this help
";

fn main() -> Result<()> {
    let args = AppArgs::parse(pico_args::Arguments::from_env()).context("parsing arguments")?;
    let Some(args) = args else {
        std::io::stdout().write_all(HELP.as_bytes())?;
        return Ok(());
    };

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if !args.unused.is_empty() {
        warn!(unused = ?args.unused, "Warning: unused arguments left");
    }

    args.execute()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn render(self, document: &Document) -> Result<String> {
        match self {
            Self::Json => {
                let mut json =
                    serde_json::to_string_pretty(document).context("serializing to JSON")?;
                json.push('\n');
                Ok(json)
            }
            #[cfg(feature = "yaml")]
            Self::Yaml => {
                use specsieve_core::ToYaml;
                document.to_yaml().context("serializing to YAML")
            }
            #[cfg(not(feature = "yaml"))]
            Self::Yaml => anyhow::bail!("YAML output requires the `yaml` feature"),
        }
    }
}

#[derive(Debug)]
struct AppArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Format,
    verbose: bool,
    unused: Vec<OsString>,
}

impl AppArgs {
    /// Returns `None` when help is requested.
    fn parse(mut pargs: pico_args::Arguments) -> Result<Option<Self>> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let verbose = pargs.contains(["-v", "--verbose"]);
        let yaml = pargs.contains("--yaml");

        let config: Option<PathBuf> = pargs
            .opt_value_from_str(["-c", "--config"])
            .context("parsing config argument")?;

        let output: Option<PathBuf> = pargs
            .opt_value_from_str(["-o", "--output"])
            .context("parsing output argument")?;

        let input: PathBuf = pargs.free_from_str().context("parsing input argument")?;

        let format = if yaml || output.as_deref().is_some_and(is_yaml_path) {
            Format::Yaml
        } else {
            Format::Json
        };

        Ok(Some(Self {
            input,
            config,
            output,
            format,
            verbose,
            unused: pargs.finish(),
        }))
    }

    fn options(&self) -> Result<FilterOptions> {
        let Some(config) = &self.config else {
            debug!("no configuration, the document is only cleaned up");
            return Ok(FilterOptions::default());
        };
        FilterOptions::from_file(config)
            .with_context(|| format!("loading filters from {}", config.display()))
    }

    fn execute(&self) -> Result<()> {
        let options = self.options()?;
        let document = run(self.input.as_path(), &options)
            .with_context(|| format!("filtering {}", self.input.display()))?;
        info!(
            paths = document.paths.len(),
            operations = document.operation_count(),
            "document filtered"
        );

        let rendered = self.format.render(&document)?;
        match &self.output {
            Some(output) => std::fs::write(output, rendered)
                .with_context(|| format!("writing {}", output.display()))?,
            None => std::io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .context("writing to stdout")?,
        }
        Ok(())
    }
}
