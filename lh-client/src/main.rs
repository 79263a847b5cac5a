//! Lighthouse client
//!
//! Loads a translation unit handed over by the host compiler as JSON,
//! reopens the main source file, serializes the unit and delivers the
//! document to the downstream consumer.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{load_config, ClientConfig};
use lh_common::LighthouseError;
use lh_ir::TranslationUnit;
use lh_xml::{deliver, serialize_unit, DocumentSink, FileSink, ProcessSink, StdoutSink};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(name = "lighthouse", version, about = "Serialize a translation unit to Lighthouse XML")]
struct Args {
    /// Translation unit (JSON)
    unit: PathBuf,

    /// Main source file (defaults to the unit's filename)
    #[clap(short, long)]
    source: Option<PathBuf>,

    /// Client configuration (JSON)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write the document to a file instead of the consumer
    #[clap(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the document to stdout instead of the consumer
    #[clap(long)]
    stdout: bool,

    /// Consumer program (overrides the configuration)
    #[clap(long)]
    consumer: Option<String>,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(&args) {
        eprintln!("lighthouse: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(consumer) = &args.consumer {
        config.consumer = consumer.clone();
    }
    debug!("{:?}", config);

    let unit = load_unit(&args.unit)?;
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from(&unit.filename));
    let raw_source = read_source(&source)?;

    let document = serialize_unit(&unit, &raw_source, &config.client_version)?;
    info!("serialized {} ({} bytes)", unit.filename, document.len());

    let mut sink: Box<dyn DocumentSink> = if args.stdout {
        Box::new(StdoutSink)
    } else if let Some(path) = &args.output {
        Box::new(FileSink::new(path))
    } else {
        Box::new(ProcessSink::new(&config.consumer, &config.consumer_args, &unit.filename))
    };
    deliver(sink.as_mut(), &document)?;
    Ok(())
}

fn load_unit(path: &Path) -> Result<TranslationUnit> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading unit {}", path.display()))?;
    let unit: TranslationUnit = serde_json::from_str(&content)
        .with_context(|| format!("parsing unit {}", path.display()))?;
    Ok(unit)
}

/// Reopen the main source. The bytes are kept as read, whatever the encoding.
fn read_source(path: &Path) -> Result<Vec<u8>, LighthouseError> {
    fs::read(path).map_err(|e| LighthouseError::resource(format!("reopening {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lh_common::SourceLanguage;
    use lh_ir::{EdgeFlags, Statement, TypeNode, UnitBuilder};

    fn write_unit(dir: &Path, source: &Path) -> PathBuf {
        let mut b = UnitBuilder::new(&source.display().to_string(), SourceLanguage::C);
        let f = b.function_decl("f", TypeNode::function(TypeNode::void(), vec![TypeNode::void()]));
        let mut body = b.function(f);
        body.create_block(2);
        body.push(Statement::ret(None)).unwrap();
        body.edge(1, EdgeFlags::empty()).unwrap();
        body.finish();

        let path = dir.join("unit.json");
        fs::write(&path, serde_json::to_string(&b.finish()).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_run_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("f.c");
        fs::write(&source, "void f(void) {}\n").unwrap();
        let unit = write_unit(dir.path(), &source);
        let output = dir.path().join("f.xml");

        let args = Args::parse_from([
            "lighthouse",
            unit.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        run(&args).unwrap();

        let doc = fs::read_to_string(&output).unwrap();
        assert!(doc.contains("<raw-source>void f(void) {}\n</raw-source>"));
        assert!(doc.contains("<function name='f'"));
    }

    #[test]
    fn test_latin1_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("f.c");
        fs::write(&source, b"/* r\xe9sum\xe9 */\nvoid f(void) {}\n").unwrap();
        let unit = write_unit(dir.path(), &source);
        let output = dir.path().join("f.xml");

        let args = Args::parse_from([
            "lighthouse",
            unit.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        run(&args).unwrap();

        let doc = fs::read_to_string(&output).unwrap();
        assert!(doc.contains("<raw-source>/* r&#233;sum&#233; */\nvoid f(void) {}\n</raw-source>"));
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("gone.c");
        let unit = write_unit(dir.path(), &source);

        let args = Args::parse_from(["lighthouse", unit.to_str().unwrap(), "--stdout"]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().starts_with("reopening"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_consumer() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("f.c");
        fs::write(&source, "void f(void) {}\n").unwrap();
        let unit = write_unit(dir.path(), &source);

        let args = Args::parse_from(["lighthouse", unit.to_str().unwrap(), "--consumer", "false"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LighthouseError>(),
            Some(LighthouseError::ConsumerFailed { status: 1 })
        ));
    }
}
