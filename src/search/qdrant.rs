//! Qdrant REST client and result post-processing.
//!
//! The wire contract matches the data already in the index: point search
//! with `with_payload`, an optional `should` (OR) filter over the `tags`
//! payload key, and a ranked `{id, score, payload}` result list.

use crate::models::{PointId, SearchHit};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Request timeout for point searches.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the startup connectivity probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Client for a named Qdrant collection.
pub struct QdrantClient {
    /// Base URL of the Qdrant instance.
    base_url: String,
    /// Collection to search.
    collection: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl QdrantClient {
    /// Creates a client for the given instance and collection.
    pub fn new(base_url: impl Into<String>, collection: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| Error::UpstreamRequest {
                operation: "qdrant_client_init".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.into(),
            collection: collection.into(),
            client,
        })
    }

    /// Vector search, optionally filtered to points carrying at least one
    /// of the given tags.
    ///
    /// Filtering is a `should` (OR) match, so one query may surface chunks
    /// tagged with any of several related addresses. Zero hits is a valid
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamRequest`] on a non-success status or
    /// network fault; the caller aborts the whole query.
    pub fn search(
        &self,
        vector: &[f32],
        limit: usize,
        filter_tags: Option<&[String]>,
    ) -> Result<Vec<SearchHit>> {
        let filter = filter_tags
            .filter(|tags| !tags.is_empty())
            .map(|tags| TagFilter {
                should: tags
                    .iter()
                    .map(|tag| TagCondition {
                        key: "tags".to_string(),
                        match_value: MatchValue { value: tag.clone() },
                    })
                    .collect(),
            });

        let request = SearchRequest {
            vector: vector.to_vec(),
            limit,
            with_payload: true,
            filter,
        };

        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .map_err(|e| Error::UpstreamRequest {
                operation: "qdrant_search".to_string(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::UpstreamRequest {
                operation: "qdrant_search".to_string(),
                cause: format!("search returned status: {status} - {body}"),
            });
        }

        let response: SearchResponse =
            response.json().map_err(|e| Error::UpstreamRequest {
                operation: "qdrant_response".to_string(),
                cause: e.to_string(),
            })?;

        Ok(response.result)
    }

    /// Probes the instance before any retrieval starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`] when the collections endpoint does
    /// not answer with a success status within the probe timeout.
    pub fn check_connection(&self) -> Result<()> {
        let url = format!("{}/collections", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .map_err(|e| Error::Connectivity {
                endpoint: self.base_url.clone(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Error::Connectivity {
                endpoint: self.base_url.clone(),
                cause: format!("status {}", response.status()),
            });
        }

        Ok(())
    }
}

/// Point search request body.
#[derive(Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<TagFilter>,
}

/// OR-filter over the `tags` payload key.
#[derive(Serialize)]
struct TagFilter {
    should: Vec<TagCondition>,
}

/// One tag condition.
#[derive(Serialize)]
struct TagCondition {
    key: String,
    #[serde(rename = "match")]
    match_value: MatchValue,
}

/// Exact-match value.
#[derive(Serialize)]
struct MatchValue {
    value: String,
}

/// Point search response body.
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

/// Merges two result sets, deduplicating by point id.
///
/// Primary results keep their positions; secondary results fill the
/// remaining slots in order. First occurrence wins.
#[must_use]
pub fn merge_results(
    primary: Vec<SearchHit>,
    secondary: Vec<SearchHit>,
    limit: usize,
) -> Vec<SearchHit> {
    let mut seen: HashSet<PointId> = HashSet::with_capacity(primary.len() + secondary.len());
    let mut merged = Vec::with_capacity(limit);

    for hit in primary.into_iter().chain(secondary) {
        if merged.len() == limit {
            break;
        }
        if seen.insert(hit.id.clone()) {
            merged.push(hit);
        }
    }

    merged
}

/// Adaptively trims results based on score quality.
///
/// Keeps results scoring at least `min_score_ratio` of the best hit,
/// capped at `limit`. Narrow queries with few great matches return fewer
/// results; broad queries with many good matches return more. A
/// non-positive best score skips the ratio cut entirely.
#[must_use]
pub fn trim_by_score(
    mut results: Vec<SearchHit>,
    limit: usize,
    min_score_ratio: f32,
) -> Vec<SearchHit> {
    let Some(best) = results.first().map(|hit| hit.score) else {
        return results;
    };

    if best > 0.0 {
        let cutoff = best * min_score_ratio;
        results.retain(|hit| hit.score >= cutoff);
    }
    results.truncate(limit);
    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::ChunkPayload;

    fn hit(id: u64, score: f32) -> SearchHit {
        SearchHit {
            id: PointId::Num(id),
            score,
            payload: ChunkPayload::default(),
        }
    }

    fn ids(hits: &[SearchHit]) -> Vec<String> {
        hits.iter().map(|h| h.id.to_string()).collect()
    }

    #[test]
    fn test_merge_dedup_primary_wins() {
        let primary = vec![hit(1, 0.9), hit(2, 0.8)];
        let secondary = vec![hit(2, 0.85), hit(3, 0.7)];
        let merged = merge_results(primary, secondary, 10);
        assert_eq!(ids(&merged), vec!["1", "2", "3"]);
        // The primary copy of id 2 survives
        assert!((merged[1].score - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_merge_respects_limit() {
        let primary = vec![hit(1, 0.9), hit(2, 0.8)];
        let secondary = vec![hit(3, 0.7), hit(4, 0.6)];
        let merged = merge_results(primary, secondary, 3);
        assert_eq!(ids(&merged), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_trim_by_score_cutoff() {
        let results = vec![hit(1, 0.9), hit(2, 0.7), hit(3, 0.4)];
        let trimmed = trim_by_score(results, 10, 0.6);
        // cutoff = 0.54: 0.7 stays, 0.4 goes
        assert_eq!(ids(&trimmed), vec!["1", "2"]);
    }

    #[test]
    fn test_trim_skips_ratio_for_non_positive_best() {
        let results = vec![hit(1, 0.0), hit(2, -0.2), hit(3, -0.5)];
        let trimmed = trim_by_score(results, 2, 0.6);
        assert_eq!(ids(&trimmed), vec!["1", "2"]);
    }

    #[test]
    fn test_trim_empty_input() {
        assert!(trim_by_score(Vec::new(), 10, 0.6).is_empty());
    }

    #[test]
    fn test_filter_body_is_should_match() {
        let request = SearchRequest {
            vector: vec![0.1, 0.2],
            limit: 20,
            with_payload: true,
            filter: Some(TagFilter {
                should: vec![TagCondition {
                    key: "tags".to_string(),
                    match_value: MatchValue {
                        value: "$D020".to_string(),
                    },
                }],
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["filter"]["should"][0]["key"], "tags");
        assert_eq!(json["filter"]["should"][0]["match"]["value"], "$D020");
        assert_eq!(json["with_payload"], true);
    }

    #[test]
    fn test_unfiltered_body_omits_filter() {
        let request = SearchRequest {
            vector: vec![0.1],
            limit: 20,
            with_payload: true,
            filter: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("filter").is_none());
    }
}
