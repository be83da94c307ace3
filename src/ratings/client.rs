//! HTTP client for the RateMyProfessors GraphQL endpoint.
//!
//! Lookup flow:
//! 1. Resolve the configured school name to a school id (once per process)
//! 2. Search professors at that school id, or fetch one professor's ratings
//! 3. Decode the loosely-typed GraphQL payload, defaulting missing fields
//!
//! Results are cached with a TTL, and a circuit breaker blocks requests
//! after repeated upstream failures.

use super::cache::{CacheStats, CircuitBreaker, QueryKey, TtlCache};
use super::error::RatingsError;
use super::types::{Professor, ProfessorDetails, Rating};
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

/// Base URL for the ratings provider.
const RMP_BASE_URL: &str = "https://www.ratemyprofessors.com";

/// Public basic-auth token the provider's web client sends ("test:test").
const RMP_AUTH_HEADER: &str = "Basic dGVzdDp0ZXN0";

/// How many random professors to show when the search box is empty.
const RANDOM_SAMPLE_SIZE: usize = 5;

const SCHOOL_SEARCH_QUERY: &str = r#"query NewSearchSchoolsQuery($query: SchoolSearchQuery!) {
  newSearch {
    schools(query: $query) {
      edges {
        node {
          id
          name
        }
      }
    }
  }
}"#;

const TEACHER_SEARCH_QUERY: &str = r#"query TeacherSearchQuery($query: TeacherSearchQuery!) {
  newSearch {
    teachers(query: $query) {
      edges {
        node {
          id
          firstName
          lastName
          department
          avgRating
          avgDifficulty
          numRatings
          wouldTakeAgainPercent
        }
      }
    }
  }
}"#;

const TEACHER_RATINGS_QUERY: &str = r#"query TeacherRatingsPageQuery($id: ID!) {
  node(id: $id) {
    __typename
    ... on Teacher {
      id
      firstName
      lastName
      department
      avgRating
      avgDifficulty
      numRatings
      wouldTakeAgainPercent
      ratings(first: 100) {
        edges {
          cursor
          node {
            id
            class
            comment
            helpfulRating
            clarityRating
            difficultyRating
            wouldTakeAgain
            date
            thumbsUpTotal
            thumbsDownTotal
          }
        }
      }
    }
  }
}"#;

/// Configuration for the ratings client.
#[derive(Debug, Clone)]
pub struct RatingsConfig {
    /// Base URL for the ratings provider
    pub base_url: String,
    /// School whose professors are surfaced
    pub school_name: String,
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            base_url: RMP_BASE_URL.to_string(),
            school_name: "Hofstra University".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:129.0) Gecko/20100101 Firefox/129.0".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Cache and circuit-breaker state shared across lookups.
pub struct RatingsCacheState {
    pub searches: TtlCache<Vec<Professor>>,
    pub details: TtlCache<ProfessorDetails>,
    pub circuit_breaker: CircuitBreaker,
}

impl RatingsCacheState {
    pub fn new() -> Self {
        Self {
            searches: TtlCache::with_default_ttl(),
            details: TtlCache::with_default_ttl(),
            circuit_breaker: CircuitBreaker::with_defaults(),
        }
    }

    /// Combined stats over both caches.
    pub fn stats(&self) -> (CacheStats, CacheStats) {
        (self.searches.stats(), self.details.stats())
    }

    /// Drops every cached lookup.
    pub fn invalidate_all(&self) {
        self.searches.clear();
        self.details.clear();
    }
}

impl Default for RatingsCacheState {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for fetching professor ratings.
pub struct RatingsClient {
    client: Client,
    config: RatingsConfig,
    cache_state: Arc<RatingsCacheState>,
    /// Resolved school id, looked up once on first use
    school_id: OnceCell<String>,
}

impl RatingsClient {
    /// Creates a new ratings client with default configuration.
    pub fn new(cache_state: Arc<RatingsCacheState>) -> Result<Self, RatingsError> {
        Self::with_config(RatingsConfig::default(), cache_state)
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(
        config: RatingsConfig,
        cache_state: Arc<RatingsCacheState>,
    ) -> Result<Self, RatingsError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RatingsError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            config,
            cache_state,
            school_id: OnceCell::new(),
        })
    }

    /// Shared cache/breaker state (for stats and invalidation endpoints).
    pub fn cache_state(&self) -> &Arc<RatingsCacheState> {
        &self.cache_state
    }

    /// Searches professors at the configured school.
    ///
    /// An empty query returns a random sample of professors rather than the
    /// provider's default ordering, so the landing view varies.
    pub async fn search_professors(&self, query: &str) -> Result<Vec<Professor>, RatingsError> {
        let school_id = self.school_id().await?;
        let key = QueryKey::from_parts(&[&school_id, query.trim()]);

        if let Some(cached) = self.cache_state.searches.get(&key) {
            debug!("Ratings search cache hit for key {}", key);
            return Ok(cached);
        }

        let response = self
            .graphql(
                TEACHER_SEARCH_QUERY,
                json!({ "query": { "text": query.trim(), "schoolID": school_id } }),
            )
            .await?;

        let mut professors = parse_search_response(&response)?;
        if query.trim().is_empty() {
            professors = sample_random(professors, RANDOM_SAMPLE_SIZE, &mut rand::thread_rng());
        }

        info!(
            "Ratings search '{}' returned {} professors",
            query.trim(),
            professors.len()
        );
        self.cache_state.searches.insert(key, professors.clone());
        Ok(professors)
    }

    /// Fetches a professor's profile and individual ratings.
    pub async fn professor_details(&self, id: &str) -> Result<ProfessorDetails, RatingsError> {
        let key = QueryKey::from_parts(&["details", id]);
        if let Some(cached) = self.cache_state.details.get(&key) {
            debug!("Ratings details cache hit for key {}", key);
            return Ok(cached);
        }

        let response = self
            .graphql(TEACHER_RATINGS_QUERY, json!({ "id": id }))
            .await?;

        let details =
            parse_details_response(&response)?.ok_or_else(|| RatingsError::ProfessorNotFound {
                id: id.to_string(),
            })?;

        info!(
            "Fetched {} ratings for professor {} {}",
            details.ratings.len(),
            details.professor.first_name,
            details.professor.last_name
        );
        self.cache_state.details.insert(key, details.clone());
        Ok(details)
    }

    /// Resolves the configured school name to a provider school id,
    /// caching the result for the process lifetime.
    async fn school_id(&self) -> Result<String, RatingsError> {
        self.school_id
            .get_or_try_init(|| async {
                let response = self
                    .graphql(
                        SCHOOL_SEARCH_QUERY,
                        json!({ "query": { "text": self.config.school_name } }),
                    )
                    .await?;

                let id = parse_school_response(&response).ok_or_else(|| {
                    RatingsError::SchoolNotFound {
                        school: self.config.school_name.clone(),
                    }
                })?;

                info!("Resolved '{}' to school id {}", self.config.school_name, id);
                Ok(id)
            })
            .await
            .cloned()
    }

    /// Sends one GraphQL request and returns the decoded JSON body.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, RatingsError> {
        if self.cache_state.circuit_breaker.is_open() {
            warn!("Ratings circuit breaker open, refusing request");
            return Err(RatingsError::CircuitBreakerOpen);
        }

        let endpoint = Url::parse(&self.config.base_url)?.join("/graphql")?;

        let result = self
            .client
            .post(endpoint)
            .header(AUTHORIZATION, RMP_AUTH_HEADER)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.cache_state.circuit_breaker.record_failure();
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            self.cache_state.circuit_breaker.record_failure();
            return Err(RatingsError::UnexpectedResponse {
                message: format!("Provider returned status {}", response.status()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            self.cache_state.circuit_breaker.record_failure();
            RatingsError::Decode {
                message: e.to_string(),
            }
        })?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                self.cache_state.circuit_breaker.record_failure();
                return Err(RatingsError::GraphQl {
                    message: errors
                        .iter()
                        .filter_map(|e| e.get("message").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                        .join("; "),
                });
            }
        }

        self.cache_state.circuit_breaker.record_success();
        Ok(body)
    }
}

/// Picks up to `count` professors in random order.
fn sample_random<R: Rng>(mut professors: Vec<Professor>, count: usize, rng: &mut R) -> Vec<Professor> {
    professors.shuffle(rng);
    professors.truncate(count);
    professors
}

/// Extracts the first school id from a school search response.
fn parse_school_response(body: &Value) -> Option<String> {
    body.pointer("/data/newSearch/schools/edges")?
        .as_array()?
        .first()?
        .pointer("/node/id")?
        .as_str()
        .map(str::to_string)
}

/// Decodes a teacher search response. Missing fields default the way the
/// provider's own web client defaults them (0 / "N/A" / empty).
fn parse_search_response(body: &Value) -> Result<Vec<Professor>, RatingsError> {
    let edges = body
        .pointer("/data/newSearch/teachers/edges")
        .and_then(Value::as_array)
        .ok_or_else(|| RatingsError::Decode {
            message: "Missing newSearch.teachers.edges in response".to_string(),
        })?;

    Ok(edges
        .iter()
        .filter_map(|edge| edge.get("node"))
        .map(professor_from_node)
        .collect())
}

/// Decodes a professor details response; `None` when the node is absent.
fn parse_details_response(body: &Value) -> Result<Option<ProfessorDetails>, RatingsError> {
    let node = match body.pointer("/data/node") {
        Some(node) if !node.is_null() => node,
        _ => return Ok(None),
    };

    let professor = professor_from_node(node);
    let ratings = node
        .pointer("/ratings/edges")
        .and_then(Value::as_array)
        .map(|edges| {
            edges
                .iter()
                .filter_map(|edge| edge.get("node"))
                .map(rating_from_node)
                .collect()
        })
        .unwrap_or_default();

    Ok(Some(ProfessorDetails { professor, ratings }))
}

fn professor_from_node(node: &Value) -> Professor {
    Professor {
        id: str_field(node, "id"),
        first_name: str_field(node, "firstName"),
        last_name: str_field(node, "lastName"),
        department: node
            .get("department")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("N/A")
            .to_string(),
        avg_rating: num_field(node, "avgRating"),
        avg_difficulty: num_field(node, "avgDifficulty"),
        num_ratings: node
            .get("numRatings")
            .and_then(Value::as_i64)
            .unwrap_or(0),
        would_take_again_percent: num_field(node, "wouldTakeAgainPercent"),
    }
}

fn rating_from_node(node: &Value) -> Rating {
    let would_take_again = match node.get("wouldTakeAgain").and_then(Value::as_i64) {
        Some(1) => "Yes",
        Some(0) => "No",
        _ => "N/A",
    };

    Rating {
        id: str_field(node, "id"),
        class: node
            .get("class")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("N/A")
            .to_string(),
        comment: str_field(node, "comment"),
        rating: num_field(node, "clarityRating"),
        difficulty: num_field(node, "difficultyRating"),
        would_take_again: would_take_again.to_string(),
        date: str_field(node, "date"),
        thumbs_up: node.get("thumbsUpTotal").and_then(Value::as_i64).unwrap_or(0),
        thumbs_down: node
            .get("thumbsDownTotal")
            .and_then(Value::as_i64)
            .unwrap_or(0),
    }
}

fn str_field(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn num_field(node: &Value, field: &str) -> f64 {
    node.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}
