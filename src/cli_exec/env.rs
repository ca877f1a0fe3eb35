use std::io::Read;
use std::path::Path;

use portunus::console::Console;
use portunus::hierarchy::Outcome;
use portunus::kv::{Delta, KvEditor};
use portunus::model::EntityKind;
use portunus::remote::RemoteClient;

use super::*;

pub(super) fn handle_env_command(store: &SessionStore, command: EnvCommands) -> Result<()> {
    match command {
        EnvCommands::Show { stage, json } => {
            let console = open_stage(store, &stage)?;
            let editor = loaded_editor(&console)?;
            if json {
                println!("{}", editor.json_text());
            } else if editor.baseline().is_empty() {
                println!("No variables");
            } else {
                for (k, v) in editor.baseline() {
                    println!("{}={}", k, v);
                }
            }
        }
        EnvCommands::Set {
            stage,
            pairs,
            unset,
            dry_run,
            json,
        } => {
            let updates = pairs
                .iter()
                .map(|p| parse_pair(p))
                .collect::<Result<Vec<_>>>()?;
            if updates.is_empty() && unset.is_empty() {
                anyhow::bail!("nothing to change (pass KEY=VALUE pairs and/or --unset KEY)");
            }

            let mut console = open_stage(store, &stage)?;
            let editor = console
                .editor_mut()
                .context("stage variables not loaded")?;
            for (k, v) in updates {
                editor.upsert(&k, v);
            }
            for k in &unset {
                if editor.remove_key(k) == 0 {
                    tracing::warn!(key = %k, "not set; nothing to unset");
                }
            }
            finish(&mut console, &stage, dry_run, json)?;
        }
        EnvCommands::Import {
            stage,
            file,
            dry_run,
            json,
        } => {
            let text = read_input(&file)?;
            let mut console = open_stage(store, &stage)?;
            let editor = console
                .editor_mut()
                .context("stage variables not loaded")?;
            editor
                .sync_from_json(&text)
                .with_context(|| format!("parse {}", file.display()))?;
            finish(&mut console, &stage, dry_run, json)?;
        }
    }
    Ok(())
}

/// Console with `stage_key` selected and its variables loaded.
fn open_stage(store: &SessionStore, stage_key: &str) -> Result<Console<RemoteClient>> {
    let mut console = open_console(store)?;
    if console.choose(EntityKind::Stage, stage_key) == Outcome::Unchanged {
        anyhow::bail!("unknown stage {} (see `portunus tree`)", stage_key);
    }
    console
        .load_stage()
        .with_context(|| format!("load variables of {}", stage_key))?;
    Ok(console)
}

fn loaded_editor(console: &Console<RemoteClient>) -> Result<&KvEditor> {
    console.editor().context("stage variables not loaded")
}

fn finish(
    console: &mut Console<RemoteClient>,
    stage_key: &str,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let editor = loaded_editor(console)?;
    if dry_run {
        let delta = editor.delta().clone();
        if !editor.duplicates().is_empty() {
            tracing::warn!(keys = ?editor.duplicates(), "duplicate keys");
        }
        return report(&delta, stage_key, json, true);
    }
    if editor.delta().is_empty() {
        println!("No changes");
        return Ok(());
    }
    let sent = console.save_vars()?;
    report(&sent, stage_key, json, false)
}

fn report(delta: &Delta, stage_key: &str, json: bool, dry_run: bool) -> Result<()> {
    if json {
        return print_json(delta, "delta");
    }
    for (k, v) in &delta.add {
        println!("+ {}={}", k, v);
    }
    for (k, v) in &delta.edit {
        println!("~ {}={}", k, v);
    }
    for k in &delta.remove {
        println!("- {}", k);
    }
    if dry_run {
        println!("{} change(s) not saved (dry run)", delta.change_count());
    } else {
        println!("Saved {} change(s) to {}", delta.change_count(), stage_key);
    }
    Ok(())
}

fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (k, v) = raw
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got {:?}", raw))?;
    let k = k.trim();
    if k.is_empty() {
        anyhow::bail!("empty key in {:?}", raw);
    }
    Ok((k.to_string(), v.to_string()))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
