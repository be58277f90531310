//! stackline - show and sync stacked pull requests
//!
//! Binary entry point for the command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail};
use crossterm::style::Stylize;
use tracing::{info, warn};

use stackline::config::Config;
use stackline::forge::{Connector, new_connector};
use stackline::git::GitExecutor;
use stackline::lineage::{BranchRoles, LineageTree, LineageTreeNode};
use stackline::model::{BranchName, Lineage};
use stackline::stack::{ProposalStackBuilder, StackError, plan_body_updates};
use stackline::ui::theme;

#[derive(Parser)]
#[command(name = "stackline", version)]
#[command(about = "Show and sync stacked pull requests of git branch stacks")]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', global = true)]
    repo: Option<PathBuf>,

    /// Configuration file (default: <repo>/.stackline.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lineage tree of a branch
    Tree {
        /// Branch to show (default: current branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Print the proposals of a branch's stack
    Show {
        /// Branch to show (default: current branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Write the stack into the description of every proposal in it
    Sync {
        /// Branch whose stack is synced (default: current branch)
        #[arg(long)]
        branch: Option<String>,

        /// Print the planned updates without sending them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Everything the commands need from the repository
struct Repository {
    config: Config,
    git: GitExecutor,
    lineage: Lineage,
    roles: BranchRoles,
}

impl Repository {
    fn open(cli: &Cli) -> Result<Self> {
        let git = match &cli.repo {
            Some(path) => GitExecutor::with_repo_path(path.clone()),
            None => GitExecutor::new(),
        };

        let config = match &cli.config {
            Some(path) => Config::load(path),
            None => Config::discover(&git),
        }
        .wrap_err("Failed to load configuration")?;

        let lineage = git
            .lineage(&config.lineage.config_prefix)
            .wrap_err("Failed to read branch lineage")?;

        let main_branch = match &config.lineage.main_branch {
            Some(name) => Some(BranchName::from(name.as_str())),
            None => git.main_branch().wrap_err("Failed to read main branch")?,
        };
        let perennials = git
            .perennial_branches()
            .wrap_err("Failed to read perennial branches")?;
        let roles = BranchRoles::new(
            main_branch,
            perennials.into_iter().chain(config.perennial_branches()),
        );

        info!(
            branches = lineage.len(),
            perennials = roles.perennials.len(),
            "loaded repository lineage"
        );
        Ok(Self {
            config,
            git,
            lineage,
            roles,
        })
    }

    fn target(&self, branch: Option<String>) -> Result<BranchName> {
        match branch {
            Some(name) => Ok(BranchName::from(name)),
            None => self
                .git
                .current_branch()
                .wrap_err("Failed to determine the current branch"),
        }
    }

    fn connector(&self) -> Option<Box<dyn Connector>> {
        new_connector(
            self.config.forge.kind,
            self.git.repo_path().map(|path| path.to_path_buf()),
        )
    }

    /// Stack tree of `target` and the exempt branches it was built with
    fn stack_tree(&self, target: &BranchName) -> Result<(LineageTree, Vec<BranchName>)> {
        let exempt = self.roles.exempt_for(target, &self.lineage);
        let tree = LineageTree::for_stack(target, &self.lineage, &exempt)
            .wrap_err_with(|| format!("Failed to build the lineage tree of {target}"))?;
        Ok((tree, exempt))
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    stackline::logging::init(cli.verbose);

    let repo = Repository::open(&cli)?;
    match cli.command {
        Commands::Tree { branch } => print_tree(&repo, branch),
        Commands::Show { branch } => show_stack(&repo, branch),
        Commands::Sync { branch, dry_run } => sync_stack(&repo, branch, dry_run),
    }
}

fn print_tree(repo: &Repository, branch: Option<String>) -> Result<()> {
    let target = repo.target(branch)?;
    let (tree, _) = repo.stack_tree(&target)?;
    let render = &repo.config.render;
    print_node(
        tree.root(),
        &render.indent_marker,
        &render.terminal_indicator,
        &target,
    );
    Ok(())
}

fn print_node(node: &LineageTreeNode, marker: &str, indicator: &str, current: &BranchName) {
    let indent = " ".repeat(node.depth() * 2);
    let line = format!("{indent} {marker} {}", node.branch());
    if node.branch() == current {
        let line = format!("{indicator}{line}");
        println!("{}", line.with(theme::CURRENT_BRANCH));
    } else {
        println!("{line}");
    }
    for child in node.children() {
        print_node(child, marker, indicator, current);
    }
}

/// Resolve the proposal of every branch in `tree`
///
/// A branch without a proposal is reported and left unresolved, so the
/// rendered stack stops at it. Other lookup failures abort.
fn resolve_proposals(builder: &mut ProposalStackBuilder<'_>, tree: &LineageTree) -> Result<()> {
    for branch in tree.branches() {
        match builder.add_branch(branch) {
            Ok(()) => {}
            Err(StackError::ProposalNotFound { branch }) => {
                warn!(%branch, "branch has no open proposal");
            }
            Err(e) => return Err(e).wrap_err("Failed to resolve proposals"),
        }
    }
    Ok(())
}

fn show_stack(repo: &Repository, branch: Option<String>) -> Result<()> {
    let target = repo.target(branch)?;
    let (tree, exempt) = repo.stack_tree(&target)?;
    let connector = repo.connector();

    let mut builder = ProposalStackBuilder::new(connector.as_deref(), &repo.lineage, exempt);
    if !builder.is_enabled() {
        bail!("the configured forge cannot look up proposals");
    }
    resolve_proposals(&mut builder, &tree)?;

    let options = repo.config.terminal_options().with_current_branch(target);
    if let Some(rendered) = builder.build(&tree, &options) {
        print!("{rendered}");
    }
    Ok(())
}

fn sync_stack(repo: &Repository, branch: Option<String>, dry_run: bool) -> Result<()> {
    let target = repo.target(branch)?;
    let (tree, exempt) = repo.stack_tree(&target)?;
    let connector = repo.connector();

    let mut builder = ProposalStackBuilder::new(connector.as_deref(), &repo.lineage, exempt);
    if !builder.is_enabled() {
        bail!("the configured forge cannot look up proposals");
    }
    resolve_proposals(&mut builder, &tree)?;

    let updates = plan_body_updates(&tree, &builder, &repo.config.proposal_body_options());
    if updates.is_empty() {
        println!("All proposal descriptions are up to date");
        return Ok(());
    }

    for update in &updates {
        if dry_run {
            println!("Would update {}", update.proposal.url);
            if let Some(body) = &update.updated_body {
                println!("{body}\n");
            }
            continue;
        }
        update
            .run(connector.as_deref())
            .wrap_err_with(|| format!("Failed to update {}", update.proposal.url))?;
        println!("Updated {}", update.proposal.url);
    }
    Ok(())
}
