mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use pagekit_core::PageTemplate;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagekit")]
#[command(version, about = "Static site builder for component-based pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory
    Init {
        /// Path to create site directory
        path: PathBuf,

        /// Page template for the home page
        #[arg(short, long, value_enum, default_value = "landing")]
        template: TemplateArg,
    },

    /// Validate site configuration and page layouts
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Build the deployable site without deploying
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Deploy site to hosting platform
    Deploy {
        #[command(subcommand)]
        command: DeployCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
enum DeployCommand {
    /// Configure Vercel credentials
    ///
    /// Create a token at: https://vercel.com/account/tokens
    Configure,

    /// Publish site to Vercel
    Publish {
        /// Path to site directory
        path: PathBuf,

        /// Promote to production instead of a preview deploy
        #[arg(long)]
        production: bool,

        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
    },

    /// Show status of the most recent deployment
    Status {
        /// Path to site directory (optional - scans current dir)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum TemplateArg {
    Landing,
    About,
    Pricing,
    Contact,
}

impl From<TemplateArg> for PageTemplate {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Landing => PageTemplate::Landing,
            TemplateArg::About => PageTemplate::About,
            TemplateArg::Pricing => PageTemplate::Pricing,
            TemplateArg::Contact => PageTemplate::Contact,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { path, template } => commands::init::run(path, template.into()).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Deploy { command } => match command {
            DeployCommand::Configure => commands::deploy::configure().await,
            DeployCommand::Publish {
                path,
                production,
                force,
            } => commands::deploy::publish(path, production, force).await,
            DeployCommand::Status { path } => commands::deploy::status(path).await,
        },
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pagekit", &mut io::stdout());
            Ok(())
        }
    }
}
