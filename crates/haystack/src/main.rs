use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use haystack_core::config::{DEFAULT_CONFIG_FILENAME, ToolConfig, load_config};
use haystack_core::roles;
use haystack_core::runner::{SiteContext, WpCliRunner};
use haystack_core::spam::{self, SpamCategory};

#[derive(Debug, Parser)]
#[command(
    name = "haystack",
    version,
    about = "Site administration helpers for WordPress multisite networks"
)]
struct Cli {
    #[arg(long, global = true, value_name = "URL", help = "Target site URL")]
    url: Option<String>,
    #[arg(long, global = true, value_name = "PATH", help = "Path to haystack.toml")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Spam removal utilities")]
    Spam(SpamArgs),
    #[command(about = "bbPress cleanup utilities")]
    Bbpress(BbpressArgs),
}

#[derive(Debug, Args)]
struct SpamArgs {
    #[command(subcommand)]
    command: SpamSubcommand,
}

#[derive(Debug, Subcommand)]
enum SpamSubcommand {
    #[command(about = "Delete spam comments and Jetpack contact form submissions")]
    Delete(SpamDeleteArgs),
}

#[derive(Debug, Args)]
struct SpamDeleteArgs {
    #[arg(
        long = "type",
        value_name = "TYPE",
        default_value = "comment",
        help = "Type of spam to delete: 'comment' or 'feedback'"
    )]
    kind: String,
    #[arg(long, help = "Run the command across the entire network")]
    all: bool,
}

#[derive(Debug, Args)]
struct BbpressArgs {
    #[command(subcommand)]
    command: BbpressSubcommand,
}

#[derive(Debug, Subcommand)]
enum BbpressSubcommand {
    #[command(name = "role-delete", about = "Delete the roles that bbPress added")]
    RoleDelete(RoleDeleteArgs),
}

#[derive(Debug, Args)]
struct RoleDeleteArgs {
    #[arg(long, value_name = "NAME", help = "Name of the role to remove")]
    name: Option<String>,
    #[arg(long, help = "Run the command for all roles")]
    all: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let config = load_config(&config_path)?;

    match cli.command.take() {
        Some(Commands::Spam(SpamArgs {
            command: SpamSubcommand::Delete(args),
        })) => run_spam_delete(&cli, &config, args),
        Some(Commands::Bbpress(BbpressArgs {
            command: BbpressSubcommand::RoleDelete(args),
        })) => run_role_delete(&config, args),
        None => {
            let mut command = Cli::command();
            command.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn run_spam_delete(cli: &Cli, config: &ToolConfig, args: SpamDeleteArgs) -> Result<()> {
    let category = SpamCategory::parse(&args.kind)?;
    let runner = WpCliRunner::new(config.wp_binary());

    if args.all {
        spam::purge_network(category, &runner, |url| {
            println!(
                "{} {}",
                format!("Deleting spam {} on site", category.label()).green(),
                url.yellow()
            );
        })?;
        println!("{}", "Success: All spam deleted.".green());
        return Ok(());
    }

    let ambient = cli.url.clone().or_else(|| config.site_url());
    let context = match ambient.as_deref() {
        Some(url) => SiteContext::site(url),
        None => SiteContext::Local,
    };
    println!(
        "{} {}",
        "Deleting spam on site".green(),
        ambient.as_deref().unwrap_or("").yellow()
    );
    spam::purge(category, &context, &runner)?;
    println!(
        "{}",
        format!("Success: All spam {} deleted.", category.label()).green()
    );
    Ok(())
}

fn run_role_delete(config: &ToolConfig, args: RoleDeleteArgs) -> Result<()> {
    let runner = WpCliRunner::new(config.wp_binary());

    if args.all {
        roles::purge_all(&runner, |role| {
            println!("{} {}", "Deleting role".green(), role.yellow());
        })?;
        println!("{}", "Success: All roles deleted.".green());
        return Ok(());
    }

    let name = args.name.unwrap_or_default();
    println!("{} {}", "Deleting role".green(), name.yellow());
    let role = roles::validate_role(&name)?;
    roles::purge_role(role, &runner)?;
    println!("{}", "Success: Role deleted.".green());
    Ok(())
}
