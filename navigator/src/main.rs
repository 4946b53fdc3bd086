//! ansible-navigator configuration front end.
//!
//! Resolves the configuration from the settings file, the environment, and the
//! command line, post-processes every entry, and prints the result as JSON.
//! Any exit message makes the binary fail with every collected problem listed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navigator::actions::ActionRegistry;
use navigator::configurator::{Sources, configure};
use navigator::core::definitions::navigator_configuration;
use navigator::core::value::Value;
use navigator::exit_codes;
use navigator::io::host::SystemHost;
use navigator::io::settings::{SETTINGS_ENV_VAR, load_settings, locate_settings_file};
use navigator::logging;
use navigator::post_process::PostProcessor;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ansible-navigator",
    version,
    about = "Resolve and validate the ansible-navigator configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Settings file to use instead of searching for one.
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// The path to collection doc cache.
    #[arg(long = "cdcp", visible_alias = "collection-doc-cache-path", global = true)]
    collection_doc_cache_path: Option<String>,

    /// Container engine used to run the execution environment.
    #[arg(long = "ce", visible_alias = "container-engine", global = true)]
    container_engine: Option<String>,

    /// Editor command.
    #[arg(long = "ecmd", visible_alias = "editor-command", global = true)]
    editor_command: Option<String>,

    /// Whether the editor is console based.
    #[arg(long = "econ", visible_alias = "editor-console", global = true)]
    editor_console: Option<String>,

    /// Enable or disable the use of an execution environment.
    #[arg(long = "ee", visible_alias = "execution-environment", global = true)]
    execution_environment: Option<String>,

    /// Name of the execution environment image.
    #[arg(long = "eei", visible_alias = "execution-environment-image", global = true)]
    execution_environment_image: Option<String>,

    /// Show ansible-config help (stdout mode only).
    #[arg(long = "hc", visible_alias = "help-config", global = true)]
    help_config: Option<String>,

    /// Show ansible-doc help (stdout mode only).
    #[arg(long = "hd", visible_alias = "help-doc", global = true)]
    help_doc: Option<String>,

    /// Inventory file path or host list. Repeatable.
    #[arg(short = 'i', long = "inventory", global = true)]
    inventory: Vec<String>,

    /// Host attribute to show in the inventory view. Repeatable.
    #[arg(long = "ic", visible_alias = "inventory-column", global = true)]
    inventory_column: Vec<String>,

    /// Append to an existing log file.
    #[arg(long = "la", visible_alias = "log-append", global = true)]
    log_append: Option<String>,

    /// Full path for the log file.
    #[arg(long = "lf", visible_alias = "log-file", global = true)]
    log_file: Option<String>,

    /// Log level.
    #[arg(long = "ll", visible_alias = "log-level", global = true)]
    log_level: Option<String>,

    /// User-interface mode.
    #[arg(short = 'm', long = "mode", global = true)]
    mode: Option<String>,

    /// Terminal color changing support.
    #[arg(long = "osc4", global = true)]
    osc4: Option<String>,

    /// Environment variable passed through to the execution environment. Repeatable.
    #[arg(long = "penv", visible_alias = "pass-environment-variable", global = true)]
    pass_environment_variable: Vec<String>,

    /// Create artifacts for completed playbooks.
    #[arg(long = "pae", visible_alias = "playbook-artifact-enable", global = true)]
    playbook_artifact_enable: Option<String>,

    /// Name for artifacts created from completed playbooks.
    #[arg(long = "pas", visible_alias = "playbook-artifact-save-as", global = true)]
    playbook_artifact_save_as: Option<String>,

    /// Plugin type.
    #[arg(short = 't', long = "type", global = true)]
    plugin_type: Option<String>,

    /// `NAME=value` set within the execution environment. Repeatable.
    #[arg(long = "senv", visible_alias = "set-environment-variable", global = true)]
    set_environment_variable: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Explore available collections.
    Collections,
    /// Explore the current ansible configuration.
    Config,
    /// Review documentation for a module or plugin.
    Doc {
        plugin_name: Option<String>,
    },
    /// Dump information about the execution environment.
    #[command(name = "ee-details")]
    EeDetails,
    /// Explore execution environment images.
    Images,
    /// Explore an inventory.
    Inventory,
    /// Explore a previous run using a playbook artifact.
    Replay {
        playbook_artifact_replay: Option<String>,
    },
    /// Run a playbook.
    Run {
        playbook: Option<String>,
        /// Extra parameters passed to ansible-playbook.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        cmdline: Vec<String>,
    },
    /// Start at the welcome page.
    Welcome,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Config => "config",
            Self::Doc { .. } => "doc",
            Self::EeDetails => "ee-details",
            Self::Images => "images",
            Self::Inventory => "inventory",
            Self::Replay { .. } => "replay",
            Self::Run { .. } => "run",
            Self::Welcome => "welcome",
        }
    }
}

impl Cli {
    /// Values the user typed, keyed by entry name.
    fn overrides(&self) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        if let Some(command) = &self.command {
            out.push(("app".to_string(), Value::from(command.name())));
            match command {
                Command::Doc { plugin_name } => scalar(&mut out, "plugin_name", plugin_name),
                Command::Replay {
                    playbook_artifact_replay,
                } => scalar(&mut out, "playbook_artifact_replay", playbook_artifact_replay),
                Command::Run { playbook, cmdline } => {
                    scalar(&mut out, "playbook", playbook);
                    list(&mut out, "cmdline", cmdline);
                }
                _ => {}
            }
        }
        scalar(&mut out, "collection_doc_cache_path", &self.collection_doc_cache_path);
        scalar(&mut out, "container_engine", &self.container_engine);
        scalar(&mut out, "editor_command", &self.editor_command);
        scalar(&mut out, "editor_console", &self.editor_console);
        scalar(&mut out, "execution_environment", &self.execution_environment);
        scalar(&mut out, "execution_environment_image", &self.execution_environment_image);
        scalar(&mut out, "help_config", &self.help_config);
        scalar(&mut out, "help_doc", &self.help_doc);
        list(&mut out, "inventory", &self.inventory);
        list(&mut out, "inventory_column", &self.inventory_column);
        scalar(&mut out, "log_append", &self.log_append);
        scalar(&mut out, "log_file", &self.log_file);
        scalar(&mut out, "log_level", &self.log_level);
        scalar(&mut out, "mode", &self.mode);
        scalar(&mut out, "osc4", &self.osc4);
        list(&mut out, "pass_environment_variable", &self.pass_environment_variable);
        scalar(&mut out, "playbook_artifact_enable", &self.playbook_artifact_enable);
        scalar(&mut out, "playbook_artifact_save_as", &self.playbook_artifact_save_as);
        scalar(&mut out, "plugin_type", &self.plugin_type);
        list(&mut out, "set_environment_variable", &self.set_environment_variable);
        out
    }
}

fn scalar(out: &mut Vec<(String, Value)>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        out.push((name.to_string(), Value::string(value.as_str())));
    }
}

fn list(out: &mut Vec<(String, Value)>, name: &str, values: &[String]) {
    if !values.is_empty() {
        out.push((name.to_string(), Value::strings(values.iter().cloned())));
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("read current directory")?;
    let home = dirs::home_dir();
    let env_settings = std::env::var(SETTINGS_ENV_VAR).ok();
    let settings = locate_settings_file(
        cli.settings.as_deref(),
        env_settings.as_deref(),
        &cwd,
        home.as_deref(),
    )?
    .map(|path| load_settings(&path))
    .transpose()?;

    let sources = Sources {
        settings,
        environment: std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect(),
        cli: cli.overrides(),
    };

    let host = SystemHost::default();
    let actions = ActionRegistry::with_builtin();
    let processor = PostProcessor::new(&host, &actions);
    let mut config = navigator_configuration();
    let diagnostics = configure(&mut config, &sources, &processor);
    logging::emit(&diagnostics.messages);

    if diagnostics.is_fatal() {
        for msg in &diagnostics.exit_messages {
            eprintln!("{msg}");
        }
        return Ok(exit_codes::INVALID);
    }

    let payload =
        serde_json::to_string_pretty(&config.resolved()).context("serialize configuration")?;
    println!("{payload}");
    Ok(exit_codes::OK)
}
