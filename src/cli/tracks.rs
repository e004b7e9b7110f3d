use tabled::{Table, settings::Style};

use crate::{
    cli::session, config::Config, info, types::TrackTableRow, vibe::Vibe, warning,
};

pub async fn list_tracks(config: &Config, vibe: Vibe, max: Option<u32>, refresh: bool) {
    let mut library = session::library(config, max, refresh).await;
    let total = library.len();
    let selected = library.select(vibe);

    if selected.is_empty() {
        warning!("No {} tracks among {} saved tracks", vibe, total);
        return;
    }

    let rows: Vec<TrackTableRow> = selected.iter().map(|t| TrackTableRow::from(*t)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    info!("{} of {} saved tracks match vibe '{}'", selected.len(), total, vibe);
}
