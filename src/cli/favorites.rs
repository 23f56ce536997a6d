use std::{collections::BTreeMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    catalog::{self, CatalogClient, ResolvedFavorites},
    Res, info,
    management::{DEFAULT_BUCKETS, FavoritesManager},
    store::Storage,
    success,
    types::{EventTableRow, FavoriteCountRow, MerchTableRow, TrackTableRow},
    utils, warning,
};

/// Lists favorites per bucket.
///
/// With `resolve`, the default buckets (or just `bucket`) are looked up in the
/// catalog and shown as full records; ids the catalog no longer knows are
/// reported as a warning.
pub async fn list_favorites<S: Storage>(
    favorites: &FavoritesManager<S>,
    bucket: Option<String>,
    resolve: bool,
) -> Res<()> {
    if resolve {
        let selection = favorites.selection(bucket.as_deref());
        let client = CatalogClient::from_env();
        let resolved = fetch_resolved(&client, &selection)
            .await
            .map_err(|e| format!("Cannot resolve favorites from {}. Err: {}", client.base_url(), e))?;
        print_resolved(&resolved);

        let requested: usize = DEFAULT_BUCKETS
            .iter()
            .filter_map(|b| selection.get(*b))
            .map(Vec::len)
            .sum();
        if resolved.len() < requested {
            warning!(
                "{} favorite(s) no longer exist in the catalog",
                requested - resolved.len()
            );
        }
        return Ok(());
    }

    let rows: Vec<FavoriteCountRow> = favorites
        .buckets()
        .filter(|b| bucket.as_deref().is_none_or(|wanted| wanted == *b))
        .map(|b| FavoriteCountRow {
            bucket: b.to_string(),
            count: favorites.count(b),
            ids: utils::join_ids(favorites.favorites(b)),
        })
        .collect();

    if rows.is_empty() {
        info!("No favorites in bucket {}", bucket.unwrap_or_default());
        return Ok(());
    }

    println!("{}", Table::new(rows));
    info!("{} favorite(s) in total", favorites.total_count());
    Ok(())
}

pub async fn toggle_favorite<S: Storage>(favorites: &mut FavoritesManager<S>, bucket: &str, id: i64) {
    if favorites.toggle(bucket, id).await {
        success!("Added {} to {} favorites", id, bucket);
    } else {
        success!("Removed {} from {} favorites", id, bucket);
    }
}

pub async fn clear_favorites<S: Storage>(favorites: &mut FavoritesManager<S>) {
    favorites.clear_all().await;
    success!("Favorites cleared");
}

async fn fetch_resolved(
    client: &CatalogClient,
    selection: &BTreeMap<String, Vec<i64>>,
) -> Result<ResolvedFavorites, catalog::CatalogError> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching favorites from catalog...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = catalog::resolve_favorites(client, selection).await;
    pb.finish_and_clear();
    result
}

fn print_resolved(resolved: &ResolvedFavorites) {
    if resolved.is_empty() {
        info!("No favorites yet.");
        return;
    }

    if !resolved.tracks.is_empty() {
        let rows: Vec<TrackTableRow> = resolved
            .tracks
            .iter()
            .map(|t| TrackTableRow {
                id: t.id,
                title: t.title.clone(),
                artist: t.artist.clone(),
                genre: t.genre.clone(),
                bpm: t.bpm,
            })
            .collect();
        println!("Tracks\n{}\n", Table::new(rows));
    }

    if !resolved.events.is_empty() {
        let rows: Vec<EventTableRow> = resolved
            .events
            .iter()
            .map(|e| EventTableRow {
                id: e.id,
                name: e.name.clone(),
                date: e.date.format("%B %-d, %Y %-I:%M %p").to_string(),
                venue: e.venue.clone(),
                city: e.city.clone(),
            })
            .collect();
        println!("Events\n{}\n", Table::new(rows));
    }

    if !resolved.merch.is_empty() {
        let rows: Vec<MerchTableRow> = resolved
            .merch
            .iter()
            .map(|m| MerchTableRow {
                id: m.id,
                name: m.name.clone(),
                category: m.category.clone(),
                price: utils::format_price(m.price),
            })
            .collect();
        println!("Merch\n{}\n", Table::new(rows));
    }
}
