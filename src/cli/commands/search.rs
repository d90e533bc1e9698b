use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::models::{Movie, MovieSummary};
use crate::state::AppState;

fn print_results(movies: &[MovieSummary]) {
    for movie in movies.iter().take(MAX_SEARCH_RESULTS) {
        let year = movie.release_year().unwrap_or("????");
        println!("• {} ({year})", movie.title);
        println!(
            "  ID: {} | Rating: {:.1}/10",
            movie.id, movie.vote_average
        );
    }
}

pub async fn cmd_search(state: &AppState, query: &str) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        println!("Nothing to search for. Try: marquee search <title>");
        println!("To browse popular movies: marquee discover");
        return Ok(());
    }

    println!("Searching for: {query}");

    let results = state.tmdb.fetch_movies(query).await?;

    let Some(top) = results.first() else {
        println!("No movies found matching '{query}'");
        return Ok(());
    };

    // The top hit is what the search counts towards.
    if state
        .search_counts
        .record_search(query, &Movie::from(top))
        .await
        .is_err()
    {
        println!("⚠ Search popularity could not be updated");
    }

    println!();
    println!("Search Results for '{query}':");
    println!("{:-<60}", "");
    print_results(&results);

    println!();
    println!("Details: marquee show <id> | Save: marquee save <id>");

    Ok(())
}

pub async fn cmd_discover(state: &AppState) -> anyhow::Result<()> {
    let results = state.tmdb.fetch_movies("").await?;

    if results.is_empty() {
        println!("No movies to show right now.");
        return Ok(());
    }

    println!("Latest Movies");
    println!("{:-<60}", "");
    print_results(&results);

    Ok(())
}
