use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire::{count_field, float_field};

/// Workplace categories as the backend spells them, accent included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkPlaceKind {
    #[serde(rename = "café")]
    Cafe,
    #[serde(rename = "coworking")]
    Coworking,
    #[serde(rename = "coliving")]
    Coliving,
}

impl WorkPlaceKind {
    pub const ALL: [WorkPlaceKind; 3] = [
        WorkPlaceKind::Cafe,
        WorkPlaceKind::Coworking,
        WorkPlaceKind::Coliving,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkPlaceKind::Cafe => "café",
            WorkPlaceKind::Coworking => "coworking",
            WorkPlaceKind::Coliving => "coliving",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "café" => Some(WorkPlaceKind::Cafe),
            "coworking" => Some(WorkPlaceKind::Coworking),
            "coliving" => Some(WorkPlaceKind::Coliving),
            _ => None,
        }
    }
}

/// One user's rating of a workplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A café, coworking or coliving space tied to a spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPlace {
    pub id: String,
    pub name: String,
    pub kind: WorkPlaceKind,
    pub spot_id: String,
    pub submitted_by: Option<String>,
    pub creator_name: Option<String>,
    pub address: Option<String>,
    pub image_link: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub total_ratings: u32,
    pub average_rating: f64,
    pub ratings: Vec<Rating>,
}

impl WorkPlace {
    /// Replaces the acting user's rating when `edit` and one exists,
    /// otherwise appends; then recomputes the aggregate stats.
    pub fn upsert_rating(&mut self, rating: Rating, edit: bool) {
        let existing = if edit {
            self.ratings
                .iter()
                .position(|r| r.user_id == rating.user_id)
        } else {
            None
        };

        match existing {
            Some(index) => self.ratings[index] = rating,
            None => self.ratings.push(rating),
        }

        self.recompute_rating_stats();
    }

    fn recompute_rating_stats(&mut self) {
        self.total_ratings = self.ratings.len() as u32;
        self.average_rating = if self.ratings.is_empty() {
            0.0
        } else {
            let sum: u32 = self.ratings.iter().map(|r| u32::from(r.rating)).sum();
            f64::from(sum) / self.ratings.len() as f64
        };
    }

    /// Normalizes one backend record. Records with an unknown kind are
    /// dropped rather than failing the whole load.
    pub fn from_raw(raw: RawWorkPlace) -> Option<Self> {
        let kind = WorkPlaceKind::parse(&raw.kind)?;
        Some(Self {
            id: raw.id,
            name: raw.name,
            kind,
            spot_id: raw.spot_id,
            submitted_by: raw.submitted_by,
            creator_name: raw.creator_name,
            address: raw.adress,
            image_link: raw.image_link,
            latitude: float_field(&raw.latitude),
            longitude: float_field(&raw.longitude),
            total_ratings: count_field(&raw.total_ratings),
            average_rating: float_field(&raw.average_rating),
            ratings: raw.ratings,
        })
    }
}

/// One workplace as the backend serializes it. `adress` is the backend's
/// spelling and stays wire-only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkPlace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub spot_id: String,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub adress: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub total_ratings: Value,
    #[serde(default)]
    pub average_rating: Value,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}
