use tracing::warn;

use crate::domain::MovieId;
use crate::state::AppState;

pub async fn cmd_show(state: &AppState, id: MovieId) -> anyhow::Result<()> {
    let (details, saved) = futures::join!(
        state.tmdb.fetch_movie_details(id),
        state.saved_movies.is_saved(id)
    );

    let Some(movie) = details? else {
        println!("Movie with ID {id} not found.");
        return Ok(());
    };

    let saved = saved.unwrap_or_else(|e| {
        warn!(movie_id = %id, error = %e, "Could not check saved state");
        false
    });

    let runtime = movie
        .runtime
        .map_or_else(|| "?".to_string(), |m| format!("{m}m"));

    println!("{}{}", movie.title, if saved { "  [saved]" } else { "" });
    println!("{:-<60}", "");
    println!(
        "{} | {} | ★ {}/10 ({} votes)",
        movie.release_year().unwrap_or("N/A"),
        runtime,
        movie.rating(),
        movie.vote_count
    );
    println!();
    println!("Overview:     {}", movie.overview.as_deref().filter(|o| !o.is_empty()).unwrap_or("N/A"));
    println!("Genres:       {}", movie.genres_display());
    println!("Budget:       {}", movie.budget_display());
    println!("Revenue:      {}", movie.revenue_display());
    println!("Production:   {}", movie.production_companies_display());
    println!("Poster:       {}", movie.poster_url(&state.config.tmdb.image_base_url));

    Ok(())
}
