//! Job-list filtering and ordering on top of the fuzzy matcher.
//!
//! A listing is retained when *any* of its text fields matches the query
//! (OR across fields), while the matcher itself requires every query word
//! to match within one field (AND across words). The caller assembles the
//! request body from its own store and persists nothing here.

use serde::{Deserialize, Serialize};

use crate::models::job::Job;
use crate::search::matcher::JobMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// True if any searchable field of the job matches the query.
pub fn job_matches(job: &Job, query: &str, matcher: &dyn JobMatcher, threshold: f64) -> bool {
    let fields = [
        job.title.as_str(),
        job.company.as_str(),
        job.description.as_str(),
        job.location.as_str(),
        job.job_type.as_str(),
    ];

    fields
        .iter()
        .copied()
        .chain(job.requirements.iter().map(String::as_str))
        .any(|field| matcher.matches(field, query, threshold))
}

/// Filters `jobs` by `query` and sorts the survivors by `created_at`.
pub fn search_jobs(
    jobs: Vec<Job>,
    query: &str,
    sort_order: SortOrder,
    matcher: &dyn JobMatcher,
    threshold: f64,
) -> Vec<Job> {
    let mut matched: Vec<Job> = jobs
        .into_iter()
        .filter(|job| job_matches(job, query, matcher, threshold))
        .collect();

    match sort_order {
        SortOrder::Newest => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use crate::search::fuzzy::DEFAULT_THRESHOLD;
    use crate::search::matcher::WholeTextMatcher;
    use chrono::{TimeZone, Utc};

    fn make_job(id: &str, title: &str, description: &str, day: u32) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            description: description.to_string(),
            requirements: vec![],
            created_at: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
            status: None,
        }
    }

    #[test]
    fn test_match_on_any_field() {
        let mut job = make_job("1", "Plumber", "Fix pipes", 1);
        job.requirements = vec!["welding certificate".to_string()];

        // query misses title/description but hits a requirement
        assert!(job_matches(
            &job,
            "welding",
            &WholeTextMatcher,
            DEFAULT_THRESHOLD
        ));
        assert!(!job_matches(
            &job,
            "astrophysics",
            &WholeTextMatcher,
            DEFAULT_THRESHOLD
        ));
    }

    #[test]
    fn test_job_type_field_is_searchable() {
        let job = make_job("1", "Plumber", "Fix pipes", 1);
        assert!(job_matches(
            &job,
            "full-time",
            &WholeTextMatcher,
            DEFAULT_THRESHOLD
        ));
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let jobs = vec![make_job("1", "A", "x", 1), make_job("2", "B", "y", 2)];
        let out = search_jobs(jobs, "", SortOrder::Newest, &WholeTextMatcher, DEFAULT_THRESHOLD);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_sort_newest_first() {
        let jobs = vec![
            make_job("old", "Engineer", "x", 1),
            make_job("new", "Engineer", "y", 20),
        ];
        let out = search_jobs(
            jobs,
            "engineer",
            SortOrder::Newest,
            &WholeTextMatcher,
            DEFAULT_THRESHOLD,
        );
        assert_eq!(out[0].id, "new");
        assert_eq!(out[1].id, "old");
    }

    #[test]
    fn test_sort_oldest_first() {
        let jobs = vec![
            make_job("old", "Engineer", "x", 1),
            make_job("new", "Engineer", "y", 20),
        ];
        let out = search_jobs(
            jobs,
            "engineer",
            SortOrder::Oldest,
            &WholeTextMatcher,
            DEFAULT_THRESHOLD,
        );
        assert_eq!(out[0].id, "old");
    }

    #[test]
    fn test_non_matching_jobs_dropped() {
        let jobs = vec![
            make_job("1", "Rust Engineer", "services", 1),
            make_job("2", "Gardener", "lawns", 2),
        ];
        let out = search_jobs(
            jobs,
            "rust",
            SortOrder::Newest,
            &WholeTextMatcher,
            DEFAULT_THRESHOLD,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }
}
