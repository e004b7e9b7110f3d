use crate::{
    cli::session::{self, Session},
    config::Config,
    error,
    error::AssemblyError,
    info,
    management::PlaylistAssembler,
    success,
    types::PlaylistRequest,
    vibe::Vibe,
};

pub async fn playlist(
    config: &Config,
    vibe: Vibe,
    name: String,
    description: Option<String>,
    public: bool,
) {
    let mut library = session::library(config, None, false).await;
    let selected = library.select(vibe);
    let mut session = Session::open(config).await;

    let gateway = &session.gateway;
    let profile = match session
        .tokens
        .with_refresh(&session.auth, |token| async move {
            gateway.get_profile(&token).await
        })
        .await
    {
        Ok(profile) => profile,
        Err(e) => error!("Failed to fetch user profile: {}", e),
    };

    let mut request = PlaylistRequest::from_tracks(&profile.id, name, description, selected);
    request.public = public;

    // Assembly is not retried on 401; make sure the token is fresh up front
    let token = match session.tokens.get_valid_token(&session.auth).await {
        Ok(token) => token,
        Err(e) => error!("Failed to refresh access token: {}", e),
    };

    info!(
        "Create playlist '{}' with {} {} tracks",
        request.name.trim(),
        request.track_uris.len(),
        vibe
    );

    let mut assembler = PlaylistAssembler::new(&session.gateway);
    match assembler.assemble(&token, &request).await {
        Ok(playlist) => success!("Playlist '{}' created ({})", playlist.name, playlist.id),
        Err(AssemblyError::Populate { playlist, source }) => error!(
            "Playlist {} was created but is still empty, adding tracks failed: {}",
            playlist.id,
            source
        ),
        Err(e) => error!("{}", e),
    }
}
