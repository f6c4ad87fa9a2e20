//! Idempotent sample data for fresh installs.
//!
//! Each sample row is inserted only when no row with the same title (movies)
//! or name (actors) exists yet. Nothing is ever deleted or overwritten.

use casting_core::release_date::parse_release_date;

use crate::error::{StoreError, StoreResult};
use crate::models::actor::CreateActor;
use crate::models::movie::CreateMovie;
use crate::store::RecordStore;

const SAMPLE_MOVIES: &[(&str, &str)] = &[("Titanic", "1997-12-19"), ("Avatar", "2009-12-18")];

const SAMPLE_ACTORS: &[(&str, &str, i32)] = &[
    ("Leonardo DiCaprio", "Male", 25),
    ("Kate Winslet", "Female", 25),
];

/// How many rows a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub movies_inserted: usize,
    pub actors_inserted: usize,
}

/// Insert any sample movies and actors that are not present yet.
pub async fn seed_sample_records(store: &dyn RecordStore) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for (title, date) in SAMPLE_MOVIES {
        if store.find_movie_by_title(title).await?.is_some() {
            continue;
        }
        let release_date =
            parse_release_date(date).map_err(|e| StoreError::Backend(e.to_string()))?;
        let input = CreateMovie {
            title: title.to_string(),
            release_date,
        };
        store.create_movie(&input).await?;
        report.movies_inserted += 1;
    }

    for (name, gender, age) in SAMPLE_ACTORS {
        if store.find_actor_by_name(name).await?.is_some() {
            continue;
        }
        let input = CreateActor {
            name: name.to_string(),
            age: *age,
            gender: gender.to_string(),
        };
        store.create_actor(&input).await?;
        report.actors_inserted += 1;
    }

    tracing::info!(
        movies_inserted = report.movies_inserted,
        actors_inserted = report.actors_inserted,
        "Sample records seeded"
    );
    Ok(report)
}
