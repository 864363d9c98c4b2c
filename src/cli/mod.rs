//! Thin command layer over the library: loads the profile snapshot, applies
//! one mutation or query, and persists any change before printing.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::engine::{budget_vs_actual, burn_rate, DerivedState};
use crate::errors::CoachError;
use crate::import::parse_import;
use crate::model::sample_transactions;
use crate::report::Report;
use crate::storage::{JsonFileStore, ProfileState};
use crate::utils::dollars;

#[derive(Parser)]
#[command(
    name = "budget-coach",
    version,
    about = "Categorize spending, compare it to budgets, and preview cuts"
)]
pub struct Cli {
    /// Data directory override (defaults to ~/.budget_coach).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import transactions from a delimited or JSON file, replacing the
    /// working set.
    Import { path: PathBuf },
    /// Reset the working set to the bundled sample transactions.
    Sample,
    /// Show totals, budget status, subscriptions, and suggestions.
    Summary,
    /// Show advisory suggestions for the active basis.
    Suggest,
    /// List likely recurring subscriptions.
    Subscriptions,
    /// Export the JSON report document.
    Report {
        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Edit spending caps.
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
    /// Edit what-if reductions and the simulation toggle.
    WhatIf {
        #[command(subcommand)]
        action: WhatIfAction,
    },
    /// Inspect and edit categorization rules.
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the global monthly cap (0 clears it).
    Monthly { amount: f64 },
    /// Set a per-category cap (0 clears it).
    Set { category: String, amount: f64 },
}

#[derive(Subcommand)]
pub enum WhatIfAction {
    /// Set a category's hypothetical reduction percentage (0-100).
    Set { category: String, percent: f64 },
    /// Select whether comparisons use actual or simulated totals.
    Use {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        simulation: bool,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Print the rule table in priority order.
    List,
    /// Append a new category with an empty keyword set.
    AddCategory { name: String },
    /// Replace a category's keywords (comma-separated).
    SetKeywords { category: String, keywords: String },
}

pub fn run_cli() -> Result<(), CoachError> {
    let cli = Cli::parse();
    let store = JsonFileStore::new(cli.data_dir.clone())?;
    let mut profile = ProfileState::load(&store);

    match cli.command {
        Command::Import { path } => {
            let text = fs::read_to_string(&path)?;
            let transactions = parse_import(&text)?;
            let count = transactions.len();
            profile.replace_transactions(transactions);
            profile.save(&store)?;
            println!("Imported {count} transactions from {}.", path.display());
        }
        Command::Sample => {
            profile.replace_transactions(sample_transactions());
            profile.save(&store)?;
            println!("Working set reset to {} sample transactions.", profile.transactions.len());
        }
        Command::Summary => print_summary(&profile),
        Command::Suggest => print_suggestions(&profile.derive()),
        Command::Subscriptions => print_subscriptions(&profile.derive()),
        Command::Report { out } => {
            let report = Report::build(&profile.derive(), &profile.budget);
            let json = report.to_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Report written to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Budget { action } => {
            match action {
                BudgetAction::Monthly { amount } => {
                    profile.budget.set_monthly_total(amount);
                    println!("Monthly cap set to {}.", dollars(profile.budget.monthly_total));
                }
                BudgetAction::Set { category, amount } => {
                    warn_unknown_category(&profile, &category);
                    profile.budget.set_cap(category.clone(), amount);
                    println!("{category} cap set to {}.", dollars(profile.budget.cap_for(&category)));
                }
            }
            profile.save(&store)?;
        }
        Command::WhatIf { action } => {
            match action {
                WhatIfAction::Set { category, percent } => {
                    warn_unknown_category(&profile, &category);
                    profile.what_if.set_reduction(category.clone(), percent);
                    println!(
                        "{category} reduction set to {:.0}%.",
                        profile.what_if.reduction_for(&category)
                    );
                }
                WhatIfAction::Use { simulation } => {
                    profile.what_if.use_simulation = simulation;
                    println!(
                        "Comparisons now use {} totals.",
                        if simulation { "simulated" } else { "actual" }
                    );
                }
            }
            profile.save(&store)?;
        }
        Command::Rules { action } => {
            match action {
                RulesAction::List => {
                    for rule in profile.rules.rules() {
                        println!("{}: {}", rule.category.bold(), rule.keywords.join(", "));
                    }
                }
                RulesAction::AddCategory { name } => {
                    if profile.add_category(&name) {
                        profile.save(&store)?;
                        println!("Added category {name}.");
                    } else {
                        println!("Category {name} already exists.");
                    }
                }
                RulesAction::SetKeywords { category, keywords } => {
                    let keywords: Vec<String> =
                        keywords.split(',').map(|kw| kw.trim().to_string()).collect();
                    profile.rules.set_keywords(&category, &keywords);
                    profile.save(&store)?;
                    println!("Keywords updated for {category}.");
                }
            }
        }
    }
    Ok(())
}

fn warn_unknown_category(profile: &ProfileState, category: &str) {
    if !profile.rules.contains(category) {
        tracing::warn!(category, "entry targets a category not in the rule table; it stays inert until the category exists");
        println!(
            "{} {category} is not in the category list yet; the entry stays inert until it is added.",
            "note:".yellow()
        );
    }
}

fn print_summary(profile: &ProfileState) {
    let state = profile.derive();
    let basis = if state.using_simulation { "simulated" } else { "actual" };
    println!("{} ({basis} basis)", "Spending by category".bold());
    for row in budget_vs_actual(&profile.rules, &state, &profile.budget) {
        let spent = if state.using_simulation { row.simulated } else { row.actual };
        let line = format!(
            "  {:<14} {:>10} / {}",
            row.category,
            dollars(spent),
            if row.target > 0.0 { dollars(row.target) } else { "unset".into() }
        );
        if row.target > 0.0 && spent > row.target {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    let (spent, cap) = burn_rate(&state, &profile.budget);
    let pace = format!("Spent {} / {}", dollars(spent), dollars(cap));
    if cap > 0.0 && spent > cap {
        println!("{}", pace.red().bold());
    } else {
        println!("{}", pace.green());
    }
    print_subscriptions(&state);
    print_suggestions(&state);
}

fn print_subscriptions(state: &DerivedState) {
    println!("{}", "Likely subscriptions".bold());
    if state.subscriptions.is_empty() {
        println!("  No obvious recurring merchants.");
    }
    for candidate in &state.subscriptions {
        println!("  {:<24} ~{}/mo", candidate.merchant, dollars(candidate.est_monthly));
    }
}

fn print_suggestions(state: &DerivedState) {
    println!("{}", "Suggestions".bold());
    for suggestion in &state.suggestions {
        if state.comparison.is_on_track() {
            println!("  {}", suggestion.title.green());
        } else {
            println!("  {}", suggestion.title.yellow());
        }
        println!("    {}", suggestion.detail);
    }
}
