use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!(
            "Created {}. Fill in the [store] identifiers and [tmdb] api_key.",
            Config::default_config_path().display()
        );
    } else {
        println!(
            "{} already exists, leaving it untouched.",
            Config::default_config_path().display()
        );
    }

    Ok(())
}
