//! desk-runner: headless driver for the loan desk.
//!
//! Usage:
//!   desk-runner --seed 12345
//!   desk-runner --config desk.json --today 2024-06-15
//!   desk-runner --population 250 --ipc-mode
//!
//! In IPC mode every stdin line is one JSON command, e.g.
//!   {"cmd":"list","criteria":{"page":1,"limit":5,"sortBy":"amountDue","sortOrder":"desc"}}
//!   {"cmd":"open_detail","id":3}
//!   {"cmd":"detail"}
//!   {"cmd":"quit"}
//! and every answer is one JSON line on stdout.

use anyhow::Result;
use chrono::NaiveDate;
use loandesk_core::{
    analytics::Analytics,
    borrower::BorrowerRecord,
    clock::DeskClock,
    command::DeskCommand,
    config::DeskConfig,
    desk::Desk,
    query::{ListCriteria, QueryResult, SortOrder},
};
use std::env;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match find_arg(&args, "--config") {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    if let Some(n) = find_arg(&args, "--population").and_then(|v| v.parse().ok()) {
        config.population = Some(n);
    }
    let clock = match find_arg(&args, "--today") {
        Some(day) => DeskClock::fixed_on(NaiveDate::parse_from_str(day, "%Y-%m-%d")?),
        None => DeskClock::System,
    };

    if !ipc_mode {
        println!("Loan Desk: desk-runner");
        println!("  seed:       {}", config.seed);
        println!("  today:      {}", clock.today());
        println!(
            "  borrowers:  {}",
            config.population.unwrap_or(config.seed_names.len())
        );
        println!();
    }

    let mut desk = Desk::build(config, clock)?;

    if ipc_mode {
        run_ipc_loop(&mut desk).await?;
    } else {
        print_summary(&desk).await?;
    }

    desk.shutdown().await;
    Ok(())
}

async fn run_ipc_loop(desk: &mut Desk) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };
        if value["cmd"] == "quit" {
            break;
        }

        let cmd: DeskCommand = match serde_json::from_value(value) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {}", line.trim());
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match desk.execute(cmd).await {
            Ok(response) => writeln!(stdout, "{}", serde_json::to_string(&response)?)?,
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

async fn print_summary(desk: &Desk) -> Result<()> {
    let service = desk.service();
    let analytics = service.analytics().await;
    print_overview(&analytics);

    let largest = service
        .list(&ListCriteria::default().limit(5).sort("amountDue", SortOrder::Desc))
        .await;
    println!();
    println!("=== LARGEST BALANCES ===");
    print_page(&largest);

    let overdue = service
        .list(&ListCriteria::default().limit(5).search("overdue").sort("dueDate", SortOrder::Asc))
        .await;
    println!();
    println!("=== OLDEST OVERDUE ({} total) ===", overdue.total);
    print_page(&overdue);
    Ok(())
}

fn print_overview(analytics: &Analytics) {
    let o = &analytics.overview;
    println!("=== PORTFOLIO ===");
    println!("  borrowers:        {}", o.total);
    println!("  active:           {}", o.active);
    println!("  overdue:          {} ({}%)", o.overdue, o.overdue_percentage);
    println!("  paid:             {}", o.paid);
    println!("  pending:          {}", o.pending);
    println!("  in progress:      {}", o.payment_in_progress);
    println!("  total recovered:  ${}", o.total_recovered);
    println!("  total due:        ${}", o.total_due);

    println!();
    println!("=== MONTHLY (illustrative) ===");
    for p in &analytics.monthly_data {
        println!("  {} | recovered ${:>6} | due ${:>6}", p.month, p.recovered, p.due);
    }
}

fn print_page(page: &QueryResult<BorrowerRecord>) {
    if page.data.is_empty() {
        println!("  (none)");
        return;
    }
    for r in &page.data {
        println!(
            "  {} | {:<22} | {:<19} | ${:>6} | due {} | {}%",
            r.loan_id, r.customer_name, r.status, r.amount_due, r.due_date, r.interest_rate
        );
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
