use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::PageCount;
use crate::domain::services::example_prompts;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn print_example_prompts() {
    let prompts = example_prompts()
        .iter()
        .enumerate()
        .map(|(idx, prompt)| {
            let n = idx + 1;
            return format!("- ({n}) {prompt}");
        })
        .collect::<Vec<String>>();

    println!("{}", prompts.join("\n"));
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions").about("Generates shell completions.").arg(
        Arg::new("shell")
            .short('s')
            .long("shell")
            .help("Which shell to generate completions for.")
            .action(ArgAction::Set)
            .value_parser(value_parser!(Shell)),
    );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout."),
        )
        .subcommand(Command::new("create").about(format!(
            "Saves the default configuration file to {}.",
            Config::default(ConfigKey::ConfigFile)
        )));
}

fn subcommand_prompts() -> Command {
    return Command::new("prompts").about("Lists example story ideas to get started with.");
}

pub fn build() -> Command {
    return Command::new("inkstrip")
        .about("Terminal UI to turn short story ideas into AI generated comic pages, browse the result, and export sessions to JSON.")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_prompts())
        .arg(
            Arg::new("backend")
                .short('b')
                .long("backend")
                .env("INKSTRIP_BACKEND")
                .num_args(1)
                .help(format!(
                    "The AI backend used to generate comics. [default: {}]",
                    Config::default(ConfigKey::Backend)
                ))
                .value_parser(PossibleValuesParser::new(BackendName::VARIANTS)),
        )
        .arg(
            Arg::new("backend-health-check-timeout")
                .long("backend-health-check-timeout")
                .env("INKSTRIP_BACKEND_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time in milliseconds to wait for the backend health check. [default: {}]",
                    Config::default(ConfigKey::BackendHealthCheckTimeout)
                )),
        )
        .arg(
            Arg::new("config-file")
                .short('c')
                .long("config-file")
                .env("INKSTRIP_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file. [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                )),
        )
        .arg(
            Arg::new("export-dir")
                .short('e')
                .long("export-dir")
                .env("INKSTRIP_EXPORT_DIR")
                .num_args(1)
                .help(
                    "Directory where exported comic JSON files are saved. Defaults to the platform downloads directory.",
                ),
        )
        .arg(
            Arg::new("gemini-token")
                .long("gemini-token")
                .env("GEMINI_API_KEY")
                .num_args(1)
                .help("Google Gemini API token."),
        )
        .arg(
            Arg::new("image-model")
                .short('i')
                .long("image-model")
                .env("INKSTRIP_IMAGE_MODEL")
                .num_args(1)
                .help(format!(
                    "The model used to generate page images. [default: {}]",
                    Config::default(ConfigKey::ImageModel)
                )),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .env("INKSTRIP_MODEL")
                .num_args(1)
                .help(format!(
                    "The model used to write comic page scripts. [default: {}]",
                    Config::default(ConfigKey::Model)
                )),
        )
        .arg(
            Arg::new("open-ai-token")
                .long("open-ai-token")
                .env("OPENAI_API_KEY")
                .num_args(1)
                .help("OpenAI API token."),
        )
        .arg(
            Arg::new("open-ai-url")
                .long("open-ai-url")
                .env("INKSTRIP_OPENAI_URL")
                .num_args(1)
                .help(format!(
                    "OpenAI API URL. [default: {}]",
                    Config::default(ConfigKey::OpenAiURL)
                )),
        )
        .arg(
            Arg::new("page-count")
                .short('p')
                .long("page-count")
                .env("INKSTRIP_PAGE_COUNT")
                .num_args(1)
                .help(format!(
                    "Number of comic pages to request. [default: {}]",
                    Config::default(ConfigKey::PageCount)
                ))
                .value_parser(PossibleValuesParser::new(["1", "2"])),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                _ => {
                    println!(
                        "{}",
                        Paint::red(
                            "A config subcommand is required. Run inkstrip config --help for more details."
                        )
                    );
                }
            }
            return Ok(false);
        }
        Some(("prompts", _)) => {
            print_example_prompts();
            return Ok(false);
        }
        _ => (),
    }

    Config::load(build(), vec![&matches]).await?;

    // Fail fast on values the UI would otherwise trip over mid-session.
    BackendName::parse(Config::get(ConfigKey::Backend))?;
    PageCount::parse(&Config::get(ConfigKey::PageCount))?;

    return Ok(true);
}
