use crate::domain::MovieId;
use crate::state::AppState;

pub async fn cmd_save(state: &AppState, id: MovieId) -> anyhow::Result<()> {
    let Some(movie) = state.tmdb.fetch_movie_details(id).await? else {
        println!("Movie with ID {id} not found.");
        return Ok(());
    };

    let saved = state.saved_toggle.toggle_saved(id, &movie).await?;

    if saved {
        println!("✓ Saved '{}'", movie.title);
    } else {
        println!("✓ Removed '{}' from saved movies", movie.title);
    }

    Ok(())
}
