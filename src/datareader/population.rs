// src/datareader/population.rs
//
// Seeds a repository from the CSV files in a data folder.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use super::csv_data_reader::{CatalogueData, CsvDataReader};
use crate::error::AppResult;
use crate::repositories::Repository;

/// Counts reported after seeding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationSummary {
    pub podcasts: usize,
    pub episodes: usize,
    pub authors: usize,
    pub categories: usize,
    pub dropped_episodes: usize,
}

/// Reads `podcasts.csv` and `episodes.csv` from `data_path` into `repo`
pub fn populate(repo: &dyn Repository, data_path: &Path) -> AppResult<PopulationSummary> {
    let mut reader = CsvDataReader::new(data_path);
    reader.read_podcasts()?;
    reader.read_episodes()?;
    populate_from(repo, reader.into_parts())
}

/// Links episodes to their podcasts and stores everything.
///
/// Episodes whose podcast is not in the data set are dropped.
pub fn populate_from(repo: &dyn Repository, data: CatalogueData) -> AppResult<PopulationSummary> {
    let CatalogueData {
        mut podcasts,
        episodes,
        authors,
        categories,
    } = data;

    let index: HashMap<u32, usize> = podcasts
        .iter()
        .enumerate()
        .map(|(idx, podcast)| (podcast.id(), idx))
        .collect();

    let mut linked = 0;
    let mut dropped = 0;
    for episode in episodes {
        match index.get(&episode.podcast_id()) {
            Some(&idx) => {
                podcasts[idx].add_episode(episode);
                linked += 1;
            }
            None => {
                log::warn!(
                    "Dropping episode {} ('{}'): podcast {} does not exist",
                    episode.id(),
                    episode.title(),
                    episode.podcast_id()
                );
                dropped += 1;
            }
        }
    }

    for author in &authors {
        repo.add_author(author)?;
    }
    for category in &categories {
        repo.add_category(category)?;
    }
    repo.add_podcasts(&podcasts)?;

    let summary = PopulationSummary {
        podcasts: podcasts.len(),
        episodes: linked,
        authors: authors.len(),
        categories: categories.len(),
        dropped_episodes: dropped,
    };
    log::info!(
        "Seeded {} podcasts, {} episodes, {} authors, {} categories ({} episodes dropped)",
        summary.podcasts,
        summary.episodes,
        summary.authors,
        summary.categories,
        summary.dropped_episodes
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, Episode, Podcast};
    use crate::repositories::{MemoryRepository, MockRepository};
    use std::fs;

    fn data() -> CatalogueData {
        let author = Author::new(1, "Host").unwrap();
        CatalogueData {
            podcasts: vec![
                Podcast::new(1, author.clone(), "One").unwrap(),
                Podcast::new(2, author.clone(), "Two").unwrap(),
            ],
            episodes: vec![
                Episode::new(1, 1, 60, "A").unwrap(),
                Episode::new(2, 2, 60, "B").unwrap(),
                Episode::new(3, 77, 60, "Orphan").unwrap(),
            ],
            authors: vec![author],
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_orphan_episodes_are_dropped() {
        let repo = MemoryRepository::new();
        let summary = populate_from(&repo, data()).unwrap();

        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.dropped_episodes, 1);
        assert!(repo.get_episode(3).unwrap().is_none());
        assert_eq!(repo.get_podcast(1).unwrap().unwrap().episodes().len(), 1);
    }

    #[test]
    fn test_podcasts_are_stored_in_one_batch() {
        let mut mock = MockRepository::new();
        mock.expect_add_author().times(1).returning(|_| Ok(()));
        mock.expect_add_category().never();
        mock.expect_add_podcasts()
            .times(1)
            .withf(|podcasts| podcasts.len() == 2 && podcasts[0].episodes().len() == 1)
            .returning(|_| Ok(()));
        mock.expect_add_podcast().never();

        populate_from(&mock, data()).unwrap();
    }

    #[test]
    fn test_populate_reads_data_folder() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("podcasts.csv"),
            "id,title,image,description,language,categories,website,author,itunes_id\n\
             1,Show,,About,English,News,http://show.example,Host,\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("episodes.csv"),
            "id,podcast_id,title,audio,audio_length,description,pub_date\n\
             1,1,Pilot,http://show.example/1.mp3,120,First,2020-01-01 10:00:00+00\n",
        )
        .unwrap();

        let repo = MemoryRepository::new();
        let summary = populate(&repo, dir.path()).unwrap();

        assert_eq!(summary.podcasts, 1);
        assert_eq!(summary.categories, 1);
        let podcast = repo.get_podcast(1).unwrap().unwrap();
        assert_eq!(podcast.episodes()[0].title(), "Pilot");
        assert_eq!(repo.get_author(1).unwrap().unwrap().name(), "Host");
    }
}
