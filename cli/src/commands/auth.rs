//! Sign-in commands

use replydesk_client::ReplyDeskClient;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliError;

use super::print_json;

pub async fn login(client: &ReplyDeskClient, email: &str, password: &str) -> Result<(), CliError> {
    let auth = client.auth();
    if !auth.login(email, password).await {
        return Err(CliError::Auth(
            auth.last_error()
                .unwrap_or_else(|| "Login failed".to_string()),
        ));
    }

    if let Some(user) = auth.user() {
        println!("Signed in as {} <{}>", user.name, user.email);
    }
    info!("Session stored at {}", client.config().session_path().display());
    Ok(())
}

pub async fn register(
    client: &ReplyDeskClient,
    email: &str,
    password: &str,
    name: &str,
    domain: &str,
) -> Result<(), CliError> {
    let auth = client.auth();
    if !auth.register(email, password, name, domain).await {
        return Err(CliError::Auth(
            auth.last_error()
                .unwrap_or_else(|| "Registration failed".to_string()),
        ));
    }

    println!("Account created for {}", email);
    Ok(())
}

pub async fn logout(client: &ReplyDeskClient) -> Result<(), CliError> {
    client.auth().logout().await;
    println!("Signed out");
    Ok(())
}

pub fn whoami(client: &ReplyDeskClient, format: OutputFormat) -> Result<(), CliError> {
    let Some(user) = client.auth().user() else {
        return Err(CliError::Auth("Not signed in".to_string()));
    };

    match format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Text => {
            println!("{} <{}>", user.name, user.email);
            if let Some(domain) = &user.domain {
                println!("Domain: {}", domain);
            }
            Ok(())
        }
    }
}
