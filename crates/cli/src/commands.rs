use anyhow::Context;
use sitewarden_application::use_cases::GuardDecision;
use sitewarden_domain::{
    validate_domain_input, BlockedDomainEntry, DomainValidation, NavigationCommitted, TabStatus,
    TabUpdated,
};

use crate::di::UseCases;
use crate::Command;

pub async fn run(command: Command, use_cases: &UseCases) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let entries = use_cases.get.get_all().await?;
            if entries.is_empty() {
                println!("No blocked domains.");
            }
            for entry in &entries {
                println!("{}", render_entry(entry));
            }
        }
        Command::Add { domain } => {
            let entry = use_cases.add.execute(&domain).await?;
            println!("Blocked {}", entry.domain);
        }
        Command::Remove { domain } => match use_cases.remove.execute(&domain).await? {
            Some(entry) => println!("Removed {}", entry.domain),
            None => println!("{} is not in the block list", domain),
        },
        Command::Toggle { domain } => match use_cases.toggle.execute(&domain).await? {
            Some(entry) => println!("{}", render_entry(&entry)),
            None => println!("{} is not in the block list", domain),
        },
        Command::Check { target } => {
            let blocked = use_cases.get.is_blocked(&target).await?;
            println!("{}", if blocked { "blocked" } else { "allowed" });
        }
        Command::Validate { input } => match validate_domain_input(&input) {
            DomainValidation::Empty => println!("empty"),
            DomainValidation::Invalid { normalized } => println!("invalid: {}", normalized),
            DomainValidation::Valid { normalized } => println!("valid: {}", normalized),
        },
        Command::Visit { url, frame_id } => visit(use_cases, &url, frame_id).await?,
        Command::AddCurrent { url } => {
            use_cases.tabs.open_tab(&url).await;
            let entry = use_cases.add_current_page.execute().await?;
            println!("Blocked {}", entry.domain);
        }
    }
    Ok(())
}

async fn visit(use_cases: &UseCases, url: &str, frame_id: i64) -> anyhow::Result<()> {
    let tab_id = use_cases.tabs.open_tab("about:blank").await;
    if frame_id == 0 {
        use_cases
            .tabs
            .navigate(tab_id, url)
            .context("simulated tab disappeared")?;
    }

    let committed = use_cases
        .guard
        .on_navigation_committed(&NavigationCommitted {
            tab_id,
            frame_id,
            url: url.to_string(),
        })
        .await;
    println!("navigation committed: {}", render_decision(&committed));

    if frame_id == 0 {
        let updated = use_cases
            .guard
            .on_tab_updated(&TabUpdated {
                tab_id,
                status: Some(TabStatus::Loading),
                url: Some(url.to_string()),
            })
            .await;
        println!("tab updated: {}", render_decision(&updated));
    }

    if let Some(tab) = use_cases.tabs.tab(tab_id) {
        println!("tab {} now at {}", tab_id, tab.url);
    }
    Ok(())
}

fn render_entry(entry: &BlockedDomainEntry) -> String {
    let mark = if entry.enabled { "x" } else { " " };
    format!("[{}] {}", mark, entry.domain)
}

fn render_decision(decision: &GuardDecision) -> String {
    match decision {
        GuardDecision::Ignored => "ignored".to_string(),
        GuardDecision::Excluded(kind) => format!("excluded ({:?})", kind),
        GuardDecision::Unparseable => "unparseable URL".to_string(),
        GuardDecision::Allowed => "allowed".to_string(),
        GuardDecision::Redirected { domain } => format!("redirected ({} is blocked)", domain),
        GuardDecision::RedirectFailed { domain } => {
            format!("redirect failed ({} is blocked)", domain)
        }
    }
}
