use serde::{Deserialize, Serialize};

/// Account profile as returned by the backend auth endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Authenticated session. Credential and profile always travel together;
/// "logged out" is the absence of the whole record, never half of it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub token: String,
    pub profile: Profile,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Lost => "Lost",
            ItemType::Found => "Found",
        }
    }
}

/// Fixed category set; `create` rejects anything outside it client-side.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
pub(crate) enum Category {
    Electronics,
    Accessories,
    Documents,
    Clothing,
    Keys,
    Bags,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::Accessories,
        Category::Documents,
        Category::Clothing,
        Category::Keys,
        Category::Bags,
        Category::Other,
    ];

    /// Parses a select-box value back into the enumerated set.
    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_ref() == value)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub(crate) struct GpsCoords {
    pub lat: f64,
    pub lng: f64,
}

/// One reported item as served by the backend. Owned by its reporter;
/// `ai_extracted_features` may be filled in asynchronously server-side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ItemRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    pub location: String,

    #[serde(default)]
    pub gps_coords: Option<GpsCoords>,

    #[serde(default)]
    pub image_base64: Option<String>,

    #[serde(default)]
    pub ai_extracted_features: Option<String>,

    #[serde(default)]
    pub user_name: String,

    pub created_at: String,
}

/// AI-produced pairing of a lost and a found item. The client never builds
/// one; the only write path is the rematch confidence overwrite.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct MatchRecord {
    pub id: String,
    pub lost_item: ItemRecord,
    pub found_item: ItemRecord,
    pub similarity_score: f64,
    pub created_at: String,
}

/// Form state for the report pages. `category` holds the raw select value;
/// membership in [`Category`] is checked by draft validation before any
/// network call.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ItemDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub gps_coords: Option<GpsCoords>,
    pub image_base64: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum TypeFilter {
    #[default]
    All,
    Only(ItemType),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Catalog query. Transient; never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FilterCriteria {
    pub type_filter: TypeFilter,
    pub category_filter: CategoryFilter,
    pub search_term: String,
}

impl FilterCriteria {
    /// Query parameters for `GET /items`. `all` sentinels and an empty
    /// search term are omitted entirely.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let TypeFilter::Only(t) = self.type_filter {
            params.push(("type", t.to_string()));
        }
        if let CategoryFilter::Only(c) = self.category_filter {
            params.push(("category", c.to_string()));
        }
        if !self.search_term.is_empty() {
            params.push(("search", self.search_term.clone()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_carries_no_params() {
        let criteria = FilterCriteria::default();
        assert!(criteria.query_params().is_empty());
    }

    #[test]
    fn test_full_criteria_params() {
        let criteria = FilterCriteria {
            type_filter: TypeFilter::Only(ItemType::Lost),
            category_filter: CategoryFilter::Only(Category::Keys),
            search_term: "blue".to_string(),
        };
        assert_eq!(
            criteria.query_params(),
            vec![
                ("type", "lost".to_string()),
                ("category", "Keys".to_string()),
                ("search", "blue".to_string()),
            ]
        );
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for c in Category::ALL {
            assert_eq!(Category::parse(c.as_ref()), Some(c));
        }
        assert_eq!(Category::parse("Gadgets"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_item_record_contract_deserialize() {
        // Contract based on the backend items handler.
        let json = r#"{
            "id": "it-1",
            "type": "lost",
            "title": "Blue Backpack",
            "description": "Navy, two zippers",
            "category": "Bags",
            "location": "Library Block A",
            "gps_coords": {"lat": 12.9716, "lng": 77.5946},
            "image_base64": null,
            "ai_extracted_features": null,
            "user_name": "Asha",
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let item: ItemRecord = serde_json::from_str(json).expect("item should parse");
        assert_eq!(item.item_type, ItemType::Lost);
        assert_eq!(item.category, Category::Bags);
        assert!(item.image_base64.is_none());
        let coords = item.gps_coords.expect("coords present");
        assert!((coords.lat - 12.9716).abs() < 1e-9);
    }

    #[test]
    fn test_item_record_minimal_deserialize() {
        // Optional fields may be absent entirely, not just null.
        let json = r#"{
            "id": "it-2",
            "type": "found",
            "title": "Keyring",
            "category": "Keys",
            "location": "Cafeteria",
            "created_at": "2024-05-02T08:30:00Z"
        }"#;
        let item: ItemRecord = serde_json::from_str(json).expect("item should parse");
        assert_eq!(item.item_type, ItemType::Found);
        assert!(item.description.is_empty());
        assert!(item.gps_coords.is_none());
    }

    #[test]
    fn test_match_record_contract_deserialize() {
        let json = r#"{
            "id": "m-1",
            "lost_item": {
                "id": "it-1", "type": "lost", "title": "Backpack",
                "category": "Bags", "location": "Library",
                "created_at": "2024-05-01T10:00:00Z"
            },
            "found_item": {
                "id": "it-2", "type": "found", "title": "Navy backpack",
                "category": "Bags", "location": "Front desk",
                "created_at": "2024-05-02T09:00:00Z"
            },
            "similarity_score": 0.87,
            "created_at": "2024-05-02T10:00:00Z"
        }"#;
        let m: MatchRecord = serde_json::from_str(json).expect("match should parse");
        assert_eq!(m.lost_item.item_type, ItemType::Lost);
        assert_eq!(m.found_item.item_type, ItemType::Found);
        assert!((m.similarity_score - 0.87).abs() < 1e-9);
    }

    #[test]
    fn test_session_roundtrip_serialization() {
        let session = Session {
            token: "tok-1".to_string(),
            profile: Profile {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
            },
        };
        let json = serde_json::to_string(&session).expect("should serialize");
        let back: Session = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, session);
    }
}
