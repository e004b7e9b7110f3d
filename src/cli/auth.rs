use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error, info,
    management::TokenManager,
    server::start_callback_server,
    spotify::AuthClient,
    success,
    types::{PendingLogin, Token},
    warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn auth(config: &Config) {
    let auth = AuthClient::new(Client::new(), config);
    let redirect = match auth.initiate_login() {
        Ok(redirect) => redirect,
        Err(e) => error!("Cannot build login url: {}", e),
    };

    // Store the issued state before the browser can hit the callback
    let shared_state = Arc::new(Mutex::new(Some(PendingLogin::new(&redirect.state))));

    let server_state = Arc::clone(&shared_state);
    let server_auth = auth.clone();
    tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_auth, server_state).await {
            warning!("Callback listener stopped: {}", e);
        }
    });

    if webbrowser::open(&redirect.url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            redirect.url
        )
    }

    info!("Waiting for authorization...");
    match wait_for_token(shared_state).await {
        Ok(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        Err(reason) => {
            error!("Authentication failed: {}", reason);
        }
    }
}

async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PendingLogin>>>,
) -> Result<Token, String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_ref().and_then(PendingLogin::outcome) {
            return outcome;
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err("timed out waiting for the callback".into())
}
