use portunus::hierarchy::{EnvOption, filter_options};
use portunus::model::EntityKind;
use portunus::remote::AuditScope;

use super::*;

fn indent(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Team => "",
        EntityKind::Project => "  ",
        EntityKind::Stage => "    ",
    }
}

fn print_option(option: &EnvOption) {
    println!("{}{} ({})", indent(option.kind), option.label, option.key);
}

pub(super) fn handle_tree_command(store: &SessionStore, json: bool) -> Result<()> {
    let console = open_console(store)?;
    if json {
        return print_json(console.state(), "hierarchy");
    }
    let options = console.options();
    if options.is_empty() {
        println!("No teams");
        return Ok(());
    }
    for option in &options {
        print_option(option);
    }
    Ok(())
}

pub(super) fn handle_search_command(store: &SessionStore, query: &str, json: bool) -> Result<()> {
    let console = open_console(store)?;
    let options = console.options();
    let hits = filter_options(&options, query);
    if json {
        return print_json(&hits, "search results");
    }
    if hits.is_empty() {
        println!("No matches");
    }
    for hit in hits {
        println!("{:<8} {:<40} {}", hit.kind.as_str(), hit.key, hit.breadcrumb());
    }
    Ok(())
}

pub(super) fn handle_audit_command(
    store: &SessionStore,
    team: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let client = connect(store)?;
    let scope = match team {
        Some(team) => AuditScope::Team(team),
        None => AuditScope::User,
    };
    let mut records = client.audit_history(scope)?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    if json {
        return print_json(&records, "audit history");
    }
    if records.is_empty() {
        println!("No audit records");
    }
    for r in records {
        println!("{} {} {:<6} {}", r.start, r.email, r.method, r.url);
        if !r.explanation.is_empty() {
            println!("    {}", r.explanation);
        }
    }
    Ok(())
}
