use hamsafar_data::services::read;
use hamsafar_data::{store, AppConfig};

fn main() -> anyhow::Result<()> {
    hamsafar_shared::telemetry::init_tracing("hamsafar-data");

    let config = AppConfig::load()?;
    let store = store::open(&config)?;
    let store = store.as_ref();

    let users = read::get_users(store)?;
    let posts = read::get_posts(store)?;
    let cities = read::get_cities(store)?;
    let places = read::get_places(store)?;
    let requests = read::get_companion_requests(store)?;
    let follows = read::get_follows(store)?;

    tracing::info!(
        mode = %config.data_mode,
        users = users.len(),
        posts = posts.len(),
        cities = cities.len(),
        places = places.len(),
        companion_requests = requests.len(),
        follows = follows.len(),
        "data source ready"
    );

    if let Some(latest) = posts.first() {
        tracing::info!(
            post_id = %latest.post_id,
            title = %latest.title,
            avg_rating = latest.avg_rating,
            "latest post"
        );
    }

    Ok(())
}
