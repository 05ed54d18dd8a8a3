use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A destination comment with the author's star rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub spot_id: String,
    pub submitted_by: Option<String>,
    pub creator_name: Option<String>,
    pub rating: u8,
    /// None when the backend sent an unparseable date.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub spot_id: String,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub date: String,
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Self {
            id: raw.id,
            content: raw.content,
            spot_id: raw.spot_id,
            submitted_by: raw.submitted_by,
            creator_name: raw.creator_name,
            rating: raw.rating,
            date: NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let raw = RawComment {
            id: "c1".to_string(),
            date: "2024-03-18".to_string(),
            ..RawComment::default()
        };
        let comment = Comment::from(raw);
        assert_eq!(
            comment.date,
            NaiveDate::from_ymd_opt(2024, 3, 18)
        );
    }

    #[test]
    fn bad_date_becomes_none() {
        let raw = RawComment {
            date: "last tuesday".to_string(),
            ..RawComment::default()
        };
        assert!(Comment::from(raw).date.is_none());
    }
}
