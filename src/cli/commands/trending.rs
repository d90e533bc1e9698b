use crate::state::AppState;

pub async fn cmd_trending(state: &AppState) -> anyhow::Result<()> {
    let Some(trending) = state.trending.list_trending().await else {
        println!("⚠ Could not load trending movies.");
        return Ok(());
    };

    if trending.is_empty() {
        println!("Nothing trending yet. Searches show up here.");
        return Ok(());
    }

    println!("Trending Movies");
    println!("{:-<60}", "");

    for (rank, record) in trending.iter().enumerate() {
        println!(
            "{}. {} ({} searches for '{}')",
            rank + 1,
            record.title,
            record.count,
            record.search_term
        );
        println!("   ID: {}", record.movie_id);
    }

    Ok(())
}
