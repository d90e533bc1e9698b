use crate::state::AppState;

pub async fn cmd_saved(state: &AppState) -> anyhow::Result<()> {
    let Some(saved) = state.saved_movies.list_saved().await else {
        println!("⚠ Could not load saved movies.");
        return Ok(());
    };

    if saved.is_empty() {
        println!("No saved movies yet.");
        println!();
        println!("Save a movie with: marquee save <movie id>");
        return Ok(());
    }

    println!("Saved Movies ({} total)", saved.len());
    println!("{:-<60}", "");

    for record in &saved {
        println!("• {}", record.title);
        println!("  ID: {} | Poster: {}", record.movie_id, record.display_poster());
    }

    Ok(())
}
