use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uifactory_components::ComponentFactory;
use uifactory_editor::{EditorConfig, EditorError, FormEditor, LogNotifier, PublishOutcome};
use uifactory_forms::serialization::load_definition;
use uifactory_forms::{FormMetadata, TemplateRegistry};

mod transport;

use transport::DirectoryTransport;

#[derive(Parser)]
#[command(name = "uifactory", version, about = "Render, check and publish UI Factory form definitions")]
struct Cli {
    /// Editor config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Template catalog, overrides the config
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `uifactory_editor=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog types and report editor types that do not exist
    Check,
    /// Print the canvas markup of a saved definition
    Render { definition: PathBuf },
    /// Publish a saved definition into a directory
    Publish {
        definition: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        user: Option<String>,
        /// Update this form instead of creating a new one
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Forms(#[from] uifactory_forms::FormsError),
    #[error(transparent)]
    Component(#[from] uifactory_components::ComponentError),
    #[error("{0}")]
    Publish(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.catalog.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = cli.log_level.clone().unwrap_or_else(|| config.log_filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>, catalog: Option<PathBuf>) -> Result<EditorConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            EditorConfig::load(path)?.resolve_paths(base)
        }
        None => EditorConfig::default(),
    };
    if let Some(catalog) = catalog {
        config.catalog_path = catalog;
    }
    Ok(config)
}

fn run(command: Command, config: EditorConfig) -> Result<(), CliError> {
    let registry = Arc::new(TemplateRegistry::from_path(&config.catalog_path)?);

    match command {
        Command::Check => {
            let factory = ComponentFactory::from_registry(Arc::clone(&registry))?;
            for name in registry.names() {
                let status = if factory.is_defined(name) { "ok" } else { "undefined" };
                let attrs = registry.schema(name).map(|s| s.len()).unwrap_or(0);
                println!("{:<12} {:>2} options  {}", name, attrs, status);
            }
            for dangling in registry.dangling_editor_refs() {
                println!(
                    "warning: {}.{} is edited with unknown type '{}'",
                    dangling.field_type, dangling.option, dangling.editor
                );
            }
        }
        Command::Render { definition } => {
            let definition = load_definition(&definition)?;
            let factory = ComponentFactory::from_registry(registry)?;
            let mut editor = FormEditor::new(factory, &config);
            editor.load_definition(&definition)?;
            println!("{}", editor.canvas().render_html());
        }
        Command::Publish { definition, out, user, id } => {
            let definition = load_definition(&definition)?;
            let mut config = config;
            if let Some(user) = user {
                config.user = user;
            }
            if let Some(id) = id {
                config.form_id = Some(id);
            }
            let factory = ComponentFactory::from_registry(registry)?;
            let mut editor = FormEditor::new(factory, &config);
            editor.load_definition(&definition)?;

            let metadata: FormMetadata = definition.metadata();
            let mut transport = DirectoryTransport::new(out);
            match editor.publish(&metadata, &mut transport, &LogNotifier)? {
                PublishOutcome::Failed(e) => return Err(CliError::Publish(e.to_string())),
                _ => {
                    if let Some(link) = editor.post_publish_link() {
                        println!("{}", link);
                    }
                }
            }
        }
    }
    Ok(())
}
