use super::*;

pub(super) fn handle_team_command(store: &SessionStore, command: TeamCommands) -> Result<()> {
    match command {
        TeamCommands::Create { name, json } => {
            let mut console = open_console(store)?;
            let team = console.create_team(name.trim())?;
            if json {
                print_json(&team, "team")?;
            } else {
                println!("Created team {} ({})", team.name, team.key);
            }
        }
        TeamCommands::Rename { team, name } => {
            let mut console = open_console(store)?;
            console.rename_team(&team, name.trim())?;
            println!("Renamed team {}", team);
        }
        TeamCommands::Delete { team } => {
            let mut console = open_console(store)?;
            console.delete_team(&team)?;
            println!("Deleted team {}", team);
        }
        TeamCommands::Members { command } => handle_members_command(store, command)?,
    }
    Ok(())
}

fn handle_members_command(store: &SessionStore, command: MembersCommands) -> Result<()> {
    let client = connect(store)?;
    match command {
        MembersCommands::List { team, json } => {
            let members = client.list_team_members(&team)?;
            if json {
                print_json(&members, "members")?;
            } else {
                for m in members {
                    if m.admin {
                        println!("{} (admin)", m.email);
                    } else {
                        println!("{}", m.email);
                    }
                }
            }
        }
        MembersCommands::Add { team, email } => {
            client.add_team_member(&team, email.trim())?;
            println!("Added {} to {}", email.trim(), team);
        }
        MembersCommands::Remove { team, email } => {
            client.remove_team_member(&team, email.trim())?;
            println!("Removed {} from {}", email.trim(), team);
        }
    }
    Ok(())
}

pub(super) fn handle_project_command(store: &SessionStore, command: ProjectCommands) -> Result<()> {
    let mut console = open_console(store)?;
    match command {
        ProjectCommands::Create { team, name, json } => {
            let project = console.create_project(&team, name.trim())?;
            if json {
                print_json(&project, "project")?;
            } else {
                println!("Created project {} ({})", project.project, project.key);
            }
        }
        ProjectCommands::Rename { project, name } => {
            console.rename_project(&project, name.trim())?;
            println!("Renamed project {}", project);
        }
        ProjectCommands::Delete { project } => {
            console.delete_project(&project)?;
            println!("Deleted project {}", project);
        }
    }
    Ok(())
}

pub(super) fn handle_stage_command(store: &SessionStore, command: StageCommands) -> Result<()> {
    let mut console = open_console(store)?;
    match command {
        StageCommands::Create {
            project,
            name,
            json,
        } => {
            let stage = console.create_stage(&project, name.trim())?;
            if json {
                print_json(&stage, "stage")?;
            } else {
                println!("Created stage {} ({})", stage.stage, stage.key);
            }
        }
        StageCommands::Rename { stage, name } => {
            console.rename_stage(&stage, name.trim())?;
            println!("Renamed stage {}", stage);
        }
        StageCommands::Delete { stage } => {
            console.delete_stage(&stage)?;
            println!("Deleted stage {}", stage);
        }
    }
    Ok(())
}
