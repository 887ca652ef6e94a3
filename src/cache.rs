use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::config_directory;
use crate::domain::ticket::TicketDraft;
use crate::error::{AppError, AppResult};

const CACHE_FILE_NAME: &str = "pending_drafts.json";
const CACHE_LIMIT: usize = 8;

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    key: String,
    title: String,
    body: String,
}

/// Holds the last failed submission per repository so a one-shot `submit` can
/// be retried in a later invocation. Entries are keyed by a hash of the
/// `owner/repo` slug; the newest entry sits first and old ones age out.
pub struct PendingDraftCache {
    file_path: PathBuf,
    file: CacheFile,
}

impl PendingDraftCache {
    pub fn load() -> AppResult<Self> {
        let path = config_directory()?.join(CACHE_FILE_NAME);
        Self::at(path)
    }

    fn at(path: PathBuf) -> AppResult<Self> {
        let file = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<CacheFile>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid draft cache: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: path,
            file,
        })
    }

    pub fn get(&self, repo_slug: &str) -> Option<TicketDraft> {
        let key = cache_key(repo_slug);
        self.file
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| TicketDraft::new(entry.title.clone(), entry.body.clone()))
    }

    pub fn store(&mut self, repo_slug: &str, draft: &TicketDraft) {
        let key = cache_key(repo_slug);
        self.file.entries.retain(|entry| entry.key != key);
        self.file.entries.insert(
            0,
            CacheEntry {
                key,
                title: draft.title.clone(),
                body: draft.body.clone(),
            },
        );
        self.file.entries.truncate(CACHE_LIMIT);
    }

    pub fn clear(&mut self, repo_slug: &str) {
        let key = cache_key(repo_slug);
        self.file.entries.retain(|entry| entry.key != key);
    }

    pub fn save(&self) -> AppResult<()> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&self.file)
            .map_err(|err| AppError::Configuration(format!("could not encode draft cache: {err}")))?;
        fs::write(&self.file_path, contents)?;
        Ok(())
    }
}

fn cache_key(repo_slug: &str) -> String {
    blake3::hash(repo_slug.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_cache() -> PendingDraftCache {
        PendingDraftCache {
            file_path: PathBuf::from("unused.json"),
            file: CacheFile::default(),
        }
    }

    #[test]
    fn store_get_clear_round_trip() {
        let mut cache = empty_cache();
        let draft = TicketDraft::new("Printer broken", "No toner");

        cache.store("acme/helpdesk", &draft);
        assert_eq!(cache.get("acme/helpdesk"), Some(draft));

        cache.clear("acme/helpdesk");
        assert_eq!(cache.get("acme/helpdesk"), None);
    }

    #[test]
    fn drafts_are_kept_per_repository() {
        let mut cache = empty_cache();
        cache.store("acme/helpdesk", &TicketDraft::new("A", ""));
        cache.store("acme/infra", &TicketDraft::new("B", ""));

        assert_eq!(cache.get("acme/helpdesk").unwrap().title, "A");
        assert_eq!(cache.get("acme/infra").unwrap().title, "B");
    }

    #[test]
    fn newer_draft_replaces_the_old_one_for_the_same_repo() {
        let mut cache = empty_cache();
        cache.store("acme/helpdesk", &TicketDraft::new("old", ""));
        cache.store("acme/helpdesk", &TicketDraft::new("new", ""));

        assert_eq!(cache.get("acme/helpdesk").unwrap().title, "new");
        assert_eq!(cache.file.entries.len(), 1);
    }

    #[test]
    fn oldest_entries_age_out_past_the_limit() {
        let mut cache = empty_cache();
        for i in 0..(CACHE_LIMIT + 3) {
            cache.store(&format!("acme/repo-{i}"), &TicketDraft::new("t", ""));
        }
        assert_eq!(cache.file.entries.len(), CACHE_LIMIT);
        assert!(cache.get("acme/repo-0").is_none());
        assert!(
            cache
                .get(&format!("acme/repo-{}", CACHE_LIMIT + 2))
                .is_some()
        );
    }

    #[test]
    fn persists_and_reloads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "helpdesk-draft-cache-test-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut cache = PendingDraftCache::at(path.clone()).unwrap();
        cache.store("acme/helpdesk", &TicketDraft::new("Printer broken", "No toner"));
        cache.save().unwrap();

        let reloaded = PendingDraftCache::at(path.clone()).unwrap();
        assert_eq!(
            reloaded.get("acme/helpdesk").unwrap().title,
            "Printer broken"
        );

        let _ = fs::remove_file(&path);
    }
}
