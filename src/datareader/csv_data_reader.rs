// src/datareader/csv_data_reader.rs
//
// CSV Data Reader
//
// Reads podcasts.csv and episodes.csv into domain entities.
//
// podcasts.csv: id, title, image, description, language, categories,
//               website, author, itunes_id
// episodes.csv: id, podcast_id, title, audio, audio_length, description,
//               pub_date
//
// Columns are positional and the header row is skipped. Authors and
// categories are deduplicated by trimmed name and numbered from 1 in
// first-seen order.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate};
use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{validate_id, Author, Category, Episode, Podcast};
use crate::error::{AppError, AppResult};

pub const PODCASTS_FILE: &str = "podcasts.csv";
pub const EPISODES_FILE: &str = "episodes.csv";

/// Author used when the author cell is blank
pub const UNKNOWN_AUTHOR: &str = "Unknown";

const PODCAST_FIELDS: usize = 9;
const EPISODE_FIELDS: usize = 7;

/// Two-digit UTC offset at the end of a timestamp ("+00", "-05")
static SHORT_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]\d{2})$").expect("offset pattern compiles"));

pub struct CsvDataReader {
    podcasts_path: PathBuf,
    episodes_path: PathBuf,
    podcasts: Vec<Podcast>,
    episodes: Vec<Episode>,
    authors: Vec<Author>,
    categories: Vec<Category>,
    author_index: HashMap<String, usize>,
    category_index: HashMap<String, usize>,
}

impl CsvDataReader {
    pub fn new(data_folder: impl AsRef<Path>) -> Self {
        let folder = data_folder.as_ref();
        Self {
            podcasts_path: folder.join(PODCASTS_FILE),
            episodes_path: folder.join(EPISODES_FILE),
            podcasts: Vec::new(),
            episodes: Vec::new(),
            authors: Vec::new(),
            categories: Vec::new(),
            author_index: HashMap::new(),
            category_index: HashMap::new(),
        }
    }

    pub fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_parts(self) -> CatalogueData {
        CatalogueData {
            podcasts: self.podcasts,
            episodes: self.episodes,
            authors: self.authors,
            categories: self.categories,
        }
    }

    // ------------------------------------------------------------------
    // Podcasts
    // ------------------------------------------------------------------

    pub fn read_podcasts(&mut self) -> AppResult<()> {
        let file = open(&self.podcasts_path)?;
        self.read_podcasts_from(file)
    }

    pub fn read_podcasts_from<R: Read>(&mut self, source: R) -> AppResult<()> {
        let mut reader = csv::Reader::from_reader(source);
        for record in reader.records() {
            let record = record?;
            let podcast = self.podcast_from_record(&record)?;
            self.podcasts.push(podcast);
        }

        // Podcasts were built before their author knew every podcast id
        for podcast in &mut self.podcasts {
            if let Some(&idx) = self.author_index.get(podcast.author().name()) {
                podcast.set_author(self.authors[idx].clone());
            }
        }

        log::info!(
            "Read {} podcasts ({} authors, {} categories)",
            self.podcasts.len(),
            self.authors.len(),
            self.categories.len()
        );
        Ok(())
    }

    fn podcast_from_record(&mut self, record: &StringRecord) -> AppResult<Podcast> {
        expect_fields(record, PODCAST_FIELDS)?;

        let id = parse_id(&record[0])?;
        let image = Some(record[2].trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let itunes_id = match record[8].trim() {
            "" => None,
            raw => Some(raw.parse::<i64>()?),
        };

        let author_idx = self.author_for(&record[7])?;
        let mut podcast = Podcast::new(id, self.authors[author_idx].clone(), &record[1])?
            .with_image(image)
            .with_description(&record[3])
            .with_language(&record[4])
            .with_website(&record[6])
            .with_itunes_id(itunes_id);
        self.authors[author_idx].add_podcast(&podcast);

        for name in record[5].split('|') {
            if let Some(category) = self.category_for(name)? {
                podcast.add_category(category);
            }
        }

        Ok(podcast)
    }

    fn author_for(&mut self, raw_name: &str) -> AppResult<usize> {
        let name = match raw_name.trim() {
            "" => UNKNOWN_AUTHOR,
            trimmed => trimmed,
        };
        if let Some(&idx) = self.author_index.get(name) {
            return Ok(idx);
        }

        let author = Author::new(self.authors.len() as u32 + 1, name)?;
        self.authors.push(author);
        let idx = self.authors.len() - 1;
        self.author_index.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Blank names between separators are skipped
    fn category_for(&mut self, raw_name: &str) -> AppResult<Option<Category>> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if let Some(&idx) = self.category_index.get(name) {
            return Ok(Some(self.categories[idx].clone()));
        }

        let category = Category::new(self.categories.len() as u32 + 1, name)?;
        self.categories.push(category.clone());
        self.category_index
            .insert(name.to_string(), self.categories.len() - 1);
        Ok(Some(category))
    }

    // ------------------------------------------------------------------
    // Episodes
    // ------------------------------------------------------------------

    pub fn read_episodes(&mut self) -> AppResult<()> {
        let file = open(&self.episodes_path)?;
        self.read_episodes_from(file)
    }

    pub fn read_episodes_from<R: Read>(&mut self, source: R) -> AppResult<()> {
        let mut reader = csv::Reader::from_reader(source);
        for record in reader.records() {
            let record = record?;
            self.episodes.push(episode_from_record(&record)?);
        }
        log::info!("Read {} episodes", self.episodes.len());
        Ok(())
    }
}

/// Everything one read produced
#[derive(Debug, Default)]
pub struct CatalogueData {
    pub podcasts: Vec<Podcast>,
    pub episodes: Vec<Episode>,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|e| {
        AppError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

fn expect_fields(record: &StringRecord, expected: usize) -> AppResult<()> {
    if record.len() != expected {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        return Err(AppError::Validation(format!(
            "Line {}: expected {} fields, found {}",
            line,
            expected,
            record.len()
        )));
    }
    Ok(())
}

fn parse_id(raw: &str) -> AppResult<u32> {
    Ok(validate_id(raw.trim().parse::<i64>()?)?)
}

fn episode_from_record(record: &StringRecord) -> AppResult<Episode> {
    expect_fields(record, EPISODE_FIELDS)?;

    let audio_length = match record[4].trim() {
        "" => 0,
        raw => u32::try_from(raw.parse::<i64>()?).map_err(|_| {
            AppError::Validation(format!("Audio length must be non-negative, got {}", raw))
        })?,
    };

    Ok(
        Episode::new(parse_id(&record[0])?, parse_id(&record[1])?, audio_length, &record[2])?
            .with_audio_link(&record[3])
            .with_description(&record[5])
            .with_pub_date(parse_pub_date(&record[6])?),
    )
}

/// Parses `YYYY-MM-DD HH:MM:SS+HHMM` (a two-digit offset is widened) or a
/// bare `YYYY-MM-DD`, which means midnight UTC. A blank cell is no date.
pub fn parse_pub_date(raw: &str) -> AppResult<Option<DateTime<FixedOffset>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let widened = SHORT_OFFSET.replace(raw, "${1}00");
    if let Ok(stamp) = DateTime::parse_from_str(&widened, "%Y-%m-%d %H:%M:%S%z") {
        return Ok(Some(stamp));
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid date: {}", raw)))?;
    Ok(Some(midnight.and_utc().fixed_offset()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const PODCASTS: &str = "\
id,title,image,description,language,categories,website,author,itunes_id
1,D-Hour Radio Network,http://is3.mzstatic.com/image.jpg,The D-Hour Radio Network,English,Society & Culture | Personal Journals,http://www.dhourshow.com,D Hour Radio Network,1138446730
2,Brian Denny Radio,,Comedy and chat,English,Comedy|Society & Culture,http://www.bdennyradio.com, D Hour Radio Network ,
3,Tallin Messages,,,Spanish,,,,
";

    const EPISODES: &str = "\
id,podcast_id,title,audio,audio_length,description,pub_date
1,1,The Mandarian Orange Show,http://archive.org/ep1.mp3,2658,A show,2017-12-01 23:00:00+00
2,1,Finding yourself,http://archive.org/ep2.mp3,,Short,2017-12-02
3,2,Dated with minutes,http://archive.org/ep3.mp3,10,,2018-01-05 10:30:00+0530
";

    fn reader() -> CsvDataReader {
        let mut reader = CsvDataReader::new("unused");
        reader.read_podcasts_from(PODCASTS.as_bytes()).unwrap();
        reader.read_episodes_from(EPISODES.as_bytes()).unwrap();
        reader
    }

    #[test]
    fn test_reads_all_rows() {
        let reader = reader();
        assert_eq!(reader.podcasts().len(), 3);
        assert_eq!(reader.episodes().len(), 3);
    }

    #[test]
    fn test_authors_deduplicated_by_trimmed_name() {
        let reader = reader();
        let names: Vec<&str> = reader.authors().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["D Hour Radio Network", UNKNOWN_AUTHOR]);
        assert_eq!(reader.authors()[0].id(), 1);
        assert_eq!(reader.authors()[0].podcast_ids(), &[1, 2]);
        // podcasts carry the final author value
        assert_eq!(reader.podcasts()[0].author().podcast_ids(), &[1, 2]);
        assert_eq!(reader.podcasts()[2].author().name(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_categories_deduplicated_with_sequential_ids() {
        let reader = reader();
        let cats: Vec<(u32, &str)> = reader
            .categories()
            .iter()
            .map(|c| (c.id(), c.name()))
            .collect();
        assert_eq!(
            cats,
            vec![(1, "Society & Culture"), (2, "Personal Journals"), (3, "Comedy")]
        );
        assert_eq!(reader.podcasts()[1].categories().len(), 2);
        assert!(reader.podcasts()[2].categories().is_empty());
    }

    #[test]
    fn test_optional_podcast_fields() {
        let reader = reader();
        let first = &reader.podcasts()[0];
        assert_eq!(first.itunes_id(), Some(1_138_446_730));
        assert_eq!(first.image(), Some("http://is3.mzstatic.com/image.jpg"));

        let second = &reader.podcasts()[1];
        assert_eq!(second.itunes_id(), None);
        assert_eq!(second.image(), None);
    }

    #[test]
    fn test_episode_fields() {
        let reader = reader();
        let first = &reader.episodes()[0];
        assert_eq!(first.podcast_id(), 1);
        assert_eq!(first.audio_length(), 2658);
        assert_eq!(first.audio_link(), "http://archive.org/ep1.mp3");

        // blank audio_length means zero
        assert_eq!(reader.episodes()[1].audio_length(), 0);
    }

    #[test]
    fn test_short_offset_is_widened() {
        let date = parse_pub_date("2017-12-01 23:00:00+00").unwrap().unwrap();
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(date.hour(), 23);
    }

    #[test]
    fn test_negative_short_offset_is_widened() {
        let date = parse_pub_date("2018-02-02 20:30:00-05").unwrap().unwrap();
        assert_eq!(date.offset().local_minus_utc(), -5 * 3600);
        assert_eq!((date.hour(), date.minute()), (20, 30));
    }

    #[test]
    fn test_full_offset_is_kept() {
        let date = parse_pub_date("2018-01-05 10:30:00+0530").unwrap().unwrap();
        assert_eq!(date.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(date.minute(), 30);
    }

    #[test]
    fn test_bare_date_is_midnight_utc() {
        let date = parse_pub_date("2017-12-02").unwrap().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2017, 12, 2));
        assert_eq!(date.hour(), 0);
        assert_eq!(date.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_blank_and_bad_dates() {
        assert_eq!(parse_pub_date("  ").unwrap(), None);
        assert!(matches!(
            parse_pub_date("yesterday"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_numbers_fail() {
        let mut reader = CsvDataReader::new("unused");
        let bad = "id,title,image,description,language,categories,website,author,itunes_id\nabc,T,,,,,,,\n";
        assert!(matches!(
            reader.read_podcasts_from(bad.as_bytes()),
            Err(AppError::Validation(_))
        ));

        let negative = "id,podcast_id,title,audio,audio_length,description,pub_date\n-1,1,T,,,,\n";
        assert!(matches!(
            reader.read_episodes_from(negative.as_bytes()),
            Err(AppError::Domain(_))
        ));
    }

    #[test]
    fn test_negative_audio_length_fails() {
        let mut reader = CsvDataReader::new("unused");
        let rows = "id,podcast_id,title,audio,audio_length,description,pub_date\n1,1,T,,-5,,\n";
        assert!(matches!(
            reader.read_episodes_from(rows.as_bytes()),
            Err(AppError::Validation(msg)) if msg.contains("-5")
        ));
        assert!(reader.episodes().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = CsvDataReader::new(dir.path());
        assert!(matches!(reader.read_podcasts(), Err(AppError::Io(_))));
    }
}
