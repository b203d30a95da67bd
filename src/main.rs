use std::{
    fs,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use jest_junit::constants::{
    JEST_JUNIT_ANCESTOR_SEPARATOR_ENV, JEST_JUNIT_CLASSNAME_ENV, JEST_JUNIT_LOG_ENV,
    JEST_JUNIT_OUTPUT_ENV, JEST_JUNIT_TITLE_ENV, JEST_SUITE_NAME_ENV,
    JEST_USE_PATH_FOR_SUITE_NAME_ENV, STDOUT_OUTPUT,
};
use jest_junit::options::{load_package_json_options, read_package_json_options, OptionsError};
use jest_junit::types::{ReportParseError, TestRunReport};
use jest_junit::{build_junit_document, xml, RawOptions, ReportOptions};

#[derive(Debug, Parser)]
#[command(
    version = std::env!("CARGO_PKG_VERSION"),
    name = "jest-junit",
    about = "Convert Jest JSON results into a JUnit XML report"
)]
struct Cli {
    /// Output of `jest --json`, defaults to stdin
    report: Option<PathBuf>,
    #[arg(
        long,
        help = "Directory stripped from test file paths. Defaults to current directory."
    )]
    app_directory: Option<PathBuf>,
    #[arg(
        long,
        help = "package.json to read \"jest-junit\" options from. Defaults to <app-directory>/package.json."
    )]
    package_json: Option<PathBuf>,
    #[command(flatten)]
    options: OptionArgs,
}

#[derive(Debug, Clone, clap::Args)]
struct OptionArgs {
    #[arg(long, env = JEST_SUITE_NAME_ENV, help = "Name of the top-level testsuites element.")]
    suite_name: Option<String>,
    #[arg(long, env = JEST_JUNIT_OUTPUT_ENV, help = "JUnit XML output path, `-` for stdout.")]
    output: Option<String>,
    #[arg(
        long,
        env = JEST_JUNIT_CLASSNAME_ENV,
        help = "Template for testcase classname, supports {classname} and {title}."
    )]
    class_name_template: Option<String>,
    #[arg(
        long,
        env = JEST_JUNIT_TITLE_ENV,
        help = "Template for testcase name, supports {classname} and {title}."
    )]
    title_template: Option<String>,
    #[arg(
        long,
        env = JEST_JUNIT_ANCESTOR_SEPARATOR_ENV,
        allow_hyphen_values = true,
        help = "Separator between describe block titles."
    )]
    ancestor_separator: Option<String>,
    #[arg(
        long,
        env = JEST_USE_PATH_FOR_SUITE_NAME_ENV,
        help = "Set to \"true\" to name suites by test file path."
    )]
    use_path_for_suite_name: Option<String>,
}

impl From<OptionArgs> for RawOptions {
    fn from(args: OptionArgs) -> Self {
        let OptionArgs {
            suite_name,
            output,
            class_name_template,
            title_template,
            ancestor_separator,
            use_path_for_suite_name,
        } = args;
        RawOptions {
            suite_name,
            output,
            class_name_template,
            title_template,
            ancestor_separator,
            use_path_for_suite_name,
        }
    }
}

fn main() {
    if let Err(e) = setup_logger() {
        eprintln!("Failed to set up logger: {e:?}");
    }
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => std::process::exit(exitcode::OK),
        Err(e) => {
            log::error!("Error: {:?}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        report,
        app_directory,
        package_json,
        options,
    } = cli;

    let app_directory = match app_directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let app_directory = fs::canonicalize(&app_directory).map_err(|e| {
        anyhow::anyhow!(
            "failed to get absolute path for {}: {}",
            app_directory.display(),
            e
        )
    })?;

    let package_json_options = match package_json {
        Some(path) => read_package_json_options(path)?,
        None => load_package_json_options(&app_directory)?,
    };
    let options = ReportOptions::from(package_json_options.merge(RawOptions::from(options)));
    log::debug!("resolved options: {:?}", options);

    let report = read_report(report.as_deref())?;
    for issue in report.check() {
        log::warn!("{}", issue);
    }

    let document =
        build_junit_document(&report, &app_directory.to_string_lossy(), &options);
    write_output(&options.output, &document)?;
    Ok(())
}

fn read_report(path: Option<&Path>) -> anyhow::Result<TestRunReport> {
    let report = match path {
        Some(path) => {
            log::info!("Reading test results from {}", path.display());
            TestRunReport::from_reader(BufReader::new(fs::File::open(path)?))?
        }
        None => TestRunReport::from_reader(io::stdin().lock())?,
    };
    Ok(report)
}

fn write_output(output: &Path, document: &jest_junit::Node) -> anyhow::Result<()> {
    if output.as_os_str() == STDOUT_OUTPUT {
        let mut stdout = io::stdout().lock();
        xml::write_document(document, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = io::BufWriter::new(fs::File::create(output)?);
    xml::write_document(document, &mut file)?;
    file.flush()?;
    log::info!("Wrote JUnit report to {}", output.display());
    Ok(())
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    if let Some(e) = e.downcast_ref::<ReportParseError>() {
        return match e {
            ReportParseError::Json(..) => exitcode::DATAERR,
            ReportParseError::Io(..) => exitcode::IOERR,
        };
    }
    if e.downcast_ref::<OptionsError>().is_some() {
        return exitcode::CONFIG;
    }
    if e.downcast_ref::<io::Error>().is_some() {
        return exitcode::IOERR;
    }
    exitcode::SOFTWARE
}

fn setup_logger() -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info);
    if let Ok(log) = std::env::var(JEST_JUNIT_LOG_ENV) {
        builder.parse_filters(&log);
    }
    builder.try_init()?;
    Ok(())
}
