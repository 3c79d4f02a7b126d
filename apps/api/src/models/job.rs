use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job listing as supplied by the caller in a search request.
///
/// Listings are never stored here (persistence lives with the caller), so
/// `id` is an opaque string (different boards use different id schemes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    Closed,
    InProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_serde_kebab_case() {
        let t: JobType = serde_json::from_str(r#""full-time""#).unwrap();
        assert_eq!(t, JobType::FullTime);
        assert_eq!(serde_json::to_string(&JobType::PartTime).unwrap(), r#""part-time""#);
    }

    #[test]
    fn test_job_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "gh-1042",
            "title": "Backend Engineer",
            "company": "Acme",
            "location": "Remote",
            "job_type": "contract",
            "description": "Build services",
            "created_at": "2025-06-01T00:00:00Z"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.requirements.is_empty());
        assert!(job.status.is_none());
        assert_eq!(job.job_type.as_str(), "contract");
    }
}
