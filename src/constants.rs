pub mod images {

    pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

    pub const PLACEHOLDER_POSTER: &str = "https://placehold.co/600x400/1a1a1a/ffffff.png";
}

pub mod limits {

    pub const TRENDING_LIMIT: u32 = 5;

    pub const SAVED_LIST_LIMIT: u32 = 100;

    pub const MAX_SEARCH_RESULTS: usize = 10;
}

pub mod fields {

    pub const SEARCH_TERM: &str = "searchTerm";

    pub const COUNT: &str = "count";

    pub const POSTER_PATH: &str = "poster_path";

    pub const TITLE: &str = "title";

    pub const MOVIE_ID: &str = "movie_id";

    pub const IS_MOVIE_SAVED: &str = "is_movie_saved";
}

pub const USER_AGENT: &str = "Marquee/0.1";
