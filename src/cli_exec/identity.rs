use portunus::model::RemoteConfig;
use portunus::remote::RemoteClient;

use super::*;

pub(super) fn handle_login_command(store: &SessionStore, url: String, token: String) -> Result<()> {
    let remote = RemoteConfig::new(url);
    let client = RemoteClient::new(remote.clone(), token.clone())?;
    let who = client.whoami().context("verify token")?;

    store
        .login(remote.clone(), &token)
        .context("store token in state.json")?;
    store.set_identity(&remote, &who.email)?;
    tracing::info!(remote = %remote.base_url, email = %who.email, "logged in");
    println!("Logged in as {}", who.email);
    Ok(())
}

pub(super) fn handle_logout_command(store: &SessionStore) -> Result<()> {
    if store.logout().context("clear token")? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub(super) fn handle_whoami_command(store: &SessionStore, json: bool) -> Result<()> {
    let client = connect(store)?;
    let who = client.whoami()?;
    if json {
        print_json(&who, "whoami")?;
    } else {
        println!("email: {}", who.email);
        println!("admin: {}", who.admin);
        println!("remote: {}", client.remote().base_url);
    }
    Ok(())
}

pub(super) fn handle_user_command(store: &SessionStore, command: UserCommands) -> Result<()> {
    let client = connect(store)?;
    match command {
        UserCommands::Show { json } => {
            let user = client.get_user()?;
            if json {
                print_json(&user, "user")?;
            } else {
                println!("email: {}", user.email);
                println!(
                    "public_key: {}",
                    user.public_key.as_deref().unwrap_or("(none)")
                );
                println!("audit: {}", user.preferences.audit);
            }
        }
        UserCommands::Key { command } => match command {
            KeyCommands::Set { public_key } => {
                client.set_public_key(public_key.trim())?;
                println!("Public key stored");
            }
            KeyCommands::Delete => {
                client.delete_public_key()?;
                println!("Public key removed");
            }
        },
        UserCommands::Audit { state } => {
            client.set_audit_preference(state.enabled())?;
            println!(
                "Audit {}",
                if state.enabled() { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(())
}
