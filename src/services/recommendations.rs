use crate::{
    db::PreferenceStore,
    error::AppResult,
    models::{
        is_no_preference, PreferenceRecord, Product, Recommendation, RecommendationResponse,
        RecommendationStatus, StylePreferences, MAX_RECOMMENDATIONS,
    },
    services::catalog::Catalog,
};

/// A preference set compiled into row predicates
///
/// The gender filter is an exact match on the normalized gender column. Each
/// active caption attribute keeps rows whose caption contains any of its
/// terms; attributes are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceFilter {
    gender: Option<String>,
    caption_terms: Vec<Vec<String>>,
}

impl PreferenceFilter {
    pub fn from_preferences(preferences: &StylePreferences) -> Self {
        let gender = preferences
            .gender
            .as_deref()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty() && !is_no_preference(g));

        let caption_terms = preferences
            .caption_attributes()
            .into_iter()
            .filter(|(_, values)| !values.is_empty() && !values.iter().any(|v| is_no_preference(v)))
            .map(|(_, values)| values.iter().map(|v| v.to_lowercase()).collect::<Vec<_>>())
            .collect();

        Self {
            gender,
            caption_terms,
        }
    }

    /// True when no attribute restricts the result
    pub fn is_unrestricted(&self) -> bool {
        self.gender.is_none() && self.caption_terms.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(gender) = &self.gender {
            if product.gender.as_deref() != Some(gender.as_str()) {
                return false;
            }
        }

        if self.caption_terms.is_empty() {
            return true;
        }

        // A missing caption fails every active caption filter
        let Some(caption) = product.caption.as_deref() else {
            return false;
        };

        self.caption_terms
            .iter()
            .all(|terms| terms.iter().any(|term| caption.contains(term.as_str())))
    }

    /// Matching products, at most `limit` of them, plus the total match count
    pub fn select<'a>(&self, products: &'a [Product], limit: usize) -> (Vec<&'a Product>, usize) {
        let mut selected = Vec::with_capacity(limit.min(products.len()));
        let mut matched = 0usize;
        for product in products.iter().filter(|p| self.matches(p)) {
            matched += 1;
            if selected.len() < limit {
                selected.push(product);
            }
        }

        (selected, matched)
    }
}

/// Products matching `preferences`, at most `limit` of them, in dataset order
///
/// Also returns the total number of matching rows.
pub fn filter_products<'a>(
    products: &'a [Product],
    preferences: &StylePreferences,
    limit: usize,
) -> (Vec<&'a Product>, usize) {
    PreferenceFilter::from_preferences(preferences).select(products, limit)
}

/// Saves `preferences` for `username`, replacing anything saved before
pub async fn save_preferences(
    store: &dyn PreferenceStore,
    username: &str,
    preferences: StylePreferences,
) -> AppResult<()> {
    store
        .upsert(PreferenceRecord::new(username, preferences))
        .await?;

    tracing::info!(username = %username, backend = store.name(), "Preferences saved");
    Ok(())
}

/// Builds the recommendation response for `username` from their saved preferences
pub async fn recommend_for_user(
    store: &dyn PreferenceStore,
    catalog: &Catalog,
    username: Option<&str>,
) -> AppResult<RecommendationResponse> {
    let Some(username) = username.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(RecommendationResponse::empty(
            RecommendationStatus::MissingUsername,
        ));
    };

    let Some(record) = store.find(username).await? else {
        tracing::debug!(username = %username, "No saved preferences");
        return Ok(RecommendationResponse::empty(
            RecommendationStatus::NoPreferences,
        ));
    };

    let filter = PreferenceFilter::from_preferences(&record.preferences);
    let (selected, matched) = filter.select(catalog.products(), MAX_RECOMMENDATIONS);

    tracing::debug!(
        username = %username,
        preferences = ?record.preferences,
        unrestricted = filter.is_unrestricted(),
        matched,
        returned = selected.len(),
        "Filtered dataset"
    );

    let recommendations = selected.into_iter().map(Recommendation::from).collect();
    Ok(RecommendationResponse::found(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockPreferenceStore;
    use crate::error::AppError;

    fn product(id: &str, caption: Option<&str>, gender: &str) -> Product {
        Product {
            product_id: id.to_string(),
            caption: caption.map(str::to_string),
            gender: Some(gender.to_string()),
            product_type: Some("top".to_string()),
            path: Some(format!("{}.jpg", id)),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("p1", Some("floral cotton dress with short sleeves"), "female"),
            product("p2", Some("striped denim shirt with long sleeves"), "male"),
            product("p3", Some("pure color cotton dress, v-shape neckline"), "female"),
            product("p4", None, "female"),
            product("p5", Some("floral chiffon blouse"), "female"),
            product("p6", Some("Cotton T-shirt, crew neckline"), "MALE"),
        ])
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.product_id.clone()).collect()
    }

    #[test]
    fn test_no_preferences_returns_dataset_head() {
        let catalog = catalog();
        let (selected, matched) = filter_products(catalog.products(), &StylePreferences::default(), 50);
        assert_eq!(matched, catalog.len());
        assert_eq!(ids(&selected), vec!["p1", "p2", "p3", "p4", "p5", "p6"]);
    }

    #[test]
    fn test_sentinel_disables_every_filter() {
        let catalog = catalog();
        let prefs = StylePreferences {
            gender: Some("None".to_string()),
            types: strings(&["none"]),
            sleeve_type: strings(&["dress", "none"]),
            pattern: strings(&["none"]),
            fabric: Vec::new(),
            neckline: strings(&["none"]),
        };
        let filter = PreferenceFilter::from_preferences(&prefs);
        assert!(filter.is_unrestricted());

        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert_eq!(selected.len(), catalog.len());
    }

    #[test]
    fn test_gender_is_exact_match() {
        let catalog = catalog();
        let prefs = StylePreferences {
            gender: Some("Male".to_string()),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert_eq!(ids(&selected), vec!["p2", "p6"]);
        assert!(selected.iter().all(|p| p.gender.as_deref() == Some("male")));
    }

    #[test]
    fn test_gender_surrounding_whitespace_ignored() {
        let catalog = catalog();
        let padded = StylePreferences {
            gender: Some(" Female ".to_string()),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &padded, 50);
        assert_eq!(ids(&selected), vec!["p1", "p3", "p4", "p5"]);

        let sentinel = StylePreferences {
            gender: Some(" none ".to_string()),
            ..Default::default()
        };
        assert!(PreferenceFilter::from_preferences(&sentinel).is_unrestricted());
    }

    #[test]
    fn test_gender_does_not_match_substring() {
        let catalog = catalog();
        let prefs = StylePreferences {
            gender: Some("male".to_string()),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        // "female" contains "male" but must not match
        assert!(selected.iter().all(|p| p.product_id != "p1"));
    }

    #[test]
    fn test_values_within_attribute_are_ored() {
        let catalog = catalog();
        let prefs = StylePreferences {
            types: strings(&["dress", "blouse"]),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert_eq!(ids(&selected), vec!["p1", "p3", "p5"]);
    }

    #[test]
    fn test_attributes_are_anded() {
        let catalog = catalog();
        let prefs = StylePreferences {
            types: strings(&["dress", "blouse"]),
            pattern: strings(&["floral"]),
            fabric: strings(&["cotton"]),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert_eq!(ids(&selected), vec!["p1"]);

        for product in &selected {
            let caption = product.caption.as_deref().unwrap();
            for (_, values) in prefs.caption_attributes() {
                if !values.is_empty() {
                    assert!(values.iter().any(|v| caption.contains(v.as_str())));
                }
            }
        }
    }

    #[test]
    fn test_caption_match_is_case_insensitive() {
        let catalog = catalog();
        let prefs = StylePreferences {
            types: strings(&["T-SHIRT"]),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert_eq!(ids(&selected), vec!["p6"]);
    }

    #[test]
    fn test_values_are_literal_not_patterns() {
        let catalog = catalog();
        let prefs = StylePreferences {
            types: strings(&["dress|shirt"]),
            ..Default::default()
        };
        let (selected, matched) = filter_products(catalog.products(), &prefs, 50);
        assert!(selected.is_empty());
        assert_eq!(matched, 0);
    }

    #[test]
    fn test_missing_caption_never_matches_caption_filter() {
        let catalog = catalog();
        let prefs = StylePreferences {
            gender: Some("female".to_string()),
            types: strings(&[""]),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert!(selected.iter().all(|p| p.product_id != "p4"));
        assert_eq!(ids(&selected), vec!["p1", "p3", "p5"]);
    }

    #[test]
    fn test_missing_caption_kept_without_caption_filter() {
        let catalog = catalog();
        let prefs = StylePreferences {
            gender: Some("female".to_string()),
            ..Default::default()
        };
        let (selected, _) = filter_products(catalog.products(), &prefs, 50);
        assert!(selected.iter().any(|p| p.product_id == "p4"));
    }

    #[test]
    fn test_truncates_to_limit_in_dataset_order() {
        let products: Vec<Product> = (0..120)
            .map(|i| product(&format!("p{:03}", i), Some("cotton dress"), "female"))
            .collect();
        let catalog = Catalog::new(products);
        let prefs = StylePreferences {
            types: strings(&["dress"]),
            ..Default::default()
        };

        let (selected, matched) = filter_products(catalog.products(), &prefs, MAX_RECOMMENDATIONS);
        assert_eq!(matched, 120);
        assert_eq!(selected.len(), MAX_RECOMMENDATIONS);
        assert_eq!(selected[0].product_id, "p000");
        assert_eq!(selected[49].product_id, "p049");
    }

    #[tokio::test]
    async fn test_recommend_missing_username() {
        let mut store = MockPreferenceStore::new();
        store.expect_find().never();

        let response = recommend_for_user(&store, &catalog(), Some("  ")).await.unwrap();
        assert_eq!(response.message, "Username not provided!");
        assert!(response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_no_preferences() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_find()
            .withf(|username| username == "bob")
            .times(1)
            .returning(|_| Ok(None));

        let response = recommend_for_user(&store, &catalog(), Some("bob")).await.unwrap();
        assert_eq!(
            response,
            RecommendationResponse::empty(RecommendationStatus::NoPreferences)
        );
    }

    #[tokio::test]
    async fn test_recommend_no_matches() {
        let mut store = MockPreferenceStore::new();
        store.expect_find().returning(|username| {
            Ok(Some(PreferenceRecord::new(
                username,
                StylePreferences {
                    fabric: vec!["leather".to_string()],
                    ..Default::default()
                },
            )))
        });

        let response = recommend_for_user(&store, &catalog(), Some("carol")).await.unwrap();
        assert_eq!(response.message, "No matching recommendations found!");
        assert!(response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_found() {
        let mut store = MockPreferenceStore::new();
        store.expect_find().returning(|username| {
            Ok(Some(PreferenceRecord::new(
                username,
                StylePreferences {
                    gender: Some("female".to_string()),
                    types: vec!["dress".to_string()],
                    ..Default::default()
                },
            )))
        });

        let response = recommend_for_user(&store, &catalog(), Some("alice")).await.unwrap();
        assert_eq!(response.message, "Recommendations found!");
        let ids: Vec<_> = response
            .recommendations
            .iter()
            .map(|r| r.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(
            response.recommendations[0].image.as_deref(),
            Some("/static/images/p1.jpg")
        );
    }

    #[tokio::test]
    async fn test_recommend_propagates_store_errors() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_find()
            .returning(|_| Err(AppError::Internal("store offline".to_string())));

        let result = recommend_for_user(&store, &catalog(), Some("alice")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_save_preferences_upserts_record() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_upsert()
            .withf(|record| record.username == "alice" && record.preferences.types == vec!["dress"])
            .times(1)
            .returning(|_| Ok(()));
        store.expect_name().return_const("mock");

        let prefs = StylePreferences {
            types: vec!["dress".to_string()],
            ..Default::default()
        };
        save_preferences(&store, "alice", prefs).await.unwrap();
    }
}
