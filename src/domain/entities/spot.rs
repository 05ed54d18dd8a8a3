use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire::{count_field, float_field};

/// A surf destination record. Created server-side, fetched in bulk, and
/// mutated locally only by the like/unlike flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
    pub id: String,
    pub name: String,
    pub country: String,
    pub image_link: Option<String>,
    /// Season tokens: "1".."12" or "All year round".
    pub surf_season: Vec<String>,
    pub wifi_quality: u8,
    pub life_cost: u8,
    pub has_coworking: bool,
    pub has_coliving: bool,
    /// NaN when the backend sent nothing usable.
    pub latitude: f64,
    pub longitude: f64,
    pub submitted_by: Option<String>,
    pub creator_name: Option<String>,
    pub summary: Option<String>,
    /// List semantics on purpose; see the unlike path for the consequence.
    pub like_user_ids: Vec<String>,
    pub total_likes: u32,
}

impl Spot {
    /// Applies a server-confirmed like by `user_id`.
    pub fn apply_like(&mut self, user_id: &str) {
        self.like_user_ids.push(user_id.to_string());
        self.total_likes += 1;
    }

    /// Applies a server-confirmed unlike by `user_id`. Removes every
    /// occurrence of the id but decrements the counter by one.
    pub fn apply_unlike(&mut self, user_id: &str) {
        self.like_user_ids.retain(|id| id != user_id);
        self.total_likes = self.total_likes.saturating_sub(1);
    }

    pub fn liked_by(&self, user_id: &str) -> bool {
        self.like_user_ids.iter().any(|id| id == user_id)
    }
}

/// One spot as the backend serializes it. Field names follow the backend's
/// snake_case convention; numeric columns may arrive as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub image_link: Option<String>,
    /// Comma-delimited season tokens.
    #[serde(default)]
    pub surf_season: String,
    #[serde(default)]
    pub wifi_quality: u8,
    #[serde(default)]
    pub life_cost: u8,
    #[serde(default)]
    pub has_coworking: bool,
    #[serde(default)]
    pub has_coliving: bool,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub like_user_ids: Vec<String>,
    #[serde(default)]
    pub total_likes: Value,
}

impl From<RawSpot> for Spot {
    fn from(raw: RawSpot) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            country: raw.country,
            image_link: raw.image_link,
            surf_season: split_season(&raw.surf_season),
            wifi_quality: raw.wifi_quality,
            life_cost: raw.life_cost,
            has_coworking: raw.has_coworking,
            has_coliving: raw.has_coliving,
            latitude: float_field(&raw.latitude),
            longitude: float_field(&raw.longitude),
            submitted_by: raw.submitted_by,
            creator_name: raw.creator_name,
            summary: raw.summary,
            like_user_ids: raw.like_user_ids,
            total_likes: count_field(&raw.total_likes),
        }
    }
}

fn split_season(season: &str) -> Vec<String> {
    season
        .split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
