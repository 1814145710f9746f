use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Trust score at or above which content is presented as credible.
pub const CREDIBLE_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub publish_date: Option<String>,
    pub author: Option<String>,
    /// Server order is display order.
    pub claim_reviews: Vec<ClaimReview>,
    /// Server order is display order.
    pub checkworthy_sentences: Vec<CheckworthySentence>,
    pub domain_reputation: Option<VirusTotalSummary>,
    pub source_reputation: Option<SourceReputation>,
    /// Always within 0..=100.
    pub trust_score: u8,
    pub explanation: String,
}

impl AnalysisResult {
    pub fn is_credible(&self) -> bool {
        self.trust_score >= CREDIBLE_THRESHOLD
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        self.publish_date.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReview {
    pub publisher: Publisher,
    pub title: String,
    pub url: String,
    #[serde(rename = "reviewDate", alias = "review_date", default)]
    pub review_date: Option<String>,
    #[serde(default)]
    pub verdict: Option<Verdict>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ClaimReview {
    pub fn reviewed_on(&self) -> Option<NaiveDate> {
        self.review_date.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Verdict {
    True,
    False,
    Mixed,
    Unverified,
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "true" => Verdict::True,
            "false" => Verdict::False,
            "mixed" => Verdict::Mixed,
            _ => Verdict::Unverified,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::Mixed => "MIXED",
            Verdict::Unverified => "UNVERIFIED",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckworthySentence {
    pub sentence: String,
    /// Always within 0.0..=1.0.
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl CheckworthySentence {
    pub fn priority(&self) -> Priority {
        if self.score > 0.7 {
            Priority::High
        } else if self.score > 0.4 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineScan {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirusTotalSummary {
    pub domain: String,
    #[serde(default)]
    pub last_scans: BTreeMap<String, EngineScan>,
    pub suspicious_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_age_days: Option<u64>,
}

impl VirusTotalSummary {
    pub fn detections(&self) -> usize {
        self.last_scans.values().filter(|scan| scan.detected).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ReputationRating {
    Trustworthy,
    Mixed,
    Unreliable,
    Satire,
    Unknown,
}

impl From<String> for ReputationRating {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "trustworthy" => ReputationRating::Trustworthy,
            "mixed" => ReputationRating::Mixed,
            "unreliable" => ReputationRating::Unreliable,
            "satire" => ReputationRating::Satire,
            _ => ReputationRating::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReputation {
    pub rating: ReputationRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body of `POST /api/analyze` as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub claim_reviews: Option<Vec<ClaimReview>>,
    #[serde(default)]
    pub claimbuster: Option<ClaimBuster>,
    #[serde(default)]
    pub virustotal: Option<VirusTotalSummary>,
    #[serde(default)]
    pub source_reputation: Option<SourceReputation>,
    pub trust_score: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimBuster {
    #[serde(default)]
    pub top_sentences: Vec<CheckworthySentence>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl AnalyzeResponse {
    /// Converts the wire payload into a result, clamping every score into range.
    /// `requested_url` fills in the url when the backend omits it.
    pub fn into_result(self, requested_url: &str) -> AnalysisResult {
        let checkworthy_sentences = self
            .claimbuster
            .unwrap_or_default()
            .top_sentences
            .into_iter()
            .map(|s| CheckworthySentence {
                sentence: s.sentence,
                score: clamp_unit(s.score),
            })
            .collect();

        let domain_reputation = self.virustotal.map(|mut vt| {
            vt.suspicious_score = clamp_percent(vt.suspicious_score);
            vt
        });

        AnalysisResult {
            url: self.url.unwrap_or_else(|| requested_url.to_string()),
            title: self.title,
            snippet: self.snippet,
            publish_date: self.publish_date,
            author: self.author,
            claim_reviews: self.claim_reviews.unwrap_or_default(),
            checkworthy_sentences,
            domain_reputation,
            source_reputation: self.source_reputation,
            trust_score: clamp_percent(self.trust_score).round() as u8,
            explanation: self.explanation,
        }
    }
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

fn clamp_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> AnalysisResult {
        serde_json::from_value::<AnalyzeResponse>(value)
            .unwrap()
            .into_result("https://example.com/article")
    }

    #[test]
    fn test_minimal_payload() {
        let result = decode(json!({
            "trust_score": 82,
            "claim_reviews": [],
            "claimbuster": { "top_sentences": [] },
            "virustotal": null,
            "explanation": "Mostly consistent with known sources."
        }));

        assert_eq!(result.trust_score, 82);
        assert!(result.claim_reviews.is_empty());
        assert!(result.domain_reputation.is_none());
        assert_eq!(result.url, "https://example.com/article");
        assert!(result.is_credible());
    }

    #[test]
    fn test_scores_are_clamped() {
        let result = decode(json!({
            "trust_score": 140.2,
            "claimbuster": { "top_sentences": [
                { "sentence": "a", "score": 1.7 },
                { "sentence": "b", "score": -0.3 }
            ]},
            "virustotal": {
                "domain": "example.com",
                "last_scans": {},
                "suspicious_score": -5
            },
            "explanation": ""
        }));

        assert_eq!(result.trust_score, 100);
        assert_eq!(result.checkworthy_sentences[0].score, 1.0);
        assert_eq!(result.checkworthy_sentences[1].score, 0.0);
        assert_eq!(result.domain_reputation.unwrap().suspicious_score, 0.0);

        let result = decode(json!({
            "trust_score": -3,
            "claim_reviews": null,
            "claimbuster": null,
            "explanation": ""
        }));
        assert_eq!(result.trust_score, 0);
        assert!(!result.is_credible());
        assert!(result.claim_reviews.is_empty());
        assert!(result.checkworthy_sentences.is_empty());
    }

    #[test]
    fn test_sequences_keep_server_order() {
        let result = decode(json!({
            "trust_score": 40,
            "claim_reviews": [
                { "publisher": { "name": "B", "site": "b.org" }, "title": "second", "url": "https://b.org/1" },
                { "publisher": { "name": "A", "site": "a.org" }, "title": "first", "url": "https://a.org/1" }
            ],
            "claimbuster": { "top_sentences": [
                { "sentence": "low", "score": 0.1 },
                { "sentence": "high", "score": 0.9 }
            ]},
            "explanation": ""
        }));

        let titles: Vec<_> = result.claim_reviews.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        let sentences: Vec<_> = result.checkworthy_sentences.iter().map(|s| s.sentence.as_str()).collect();
        assert_eq!(sentences, vec!["low", "high"]);
    }

    #[test]
    fn test_claim_review_fields() {
        let review: ClaimReview = serde_json::from_value(json!({
            "publisher": { "name": "Snopes", "site": "snopes.com", "favicon": "https://snopes.com/favicon.ico" },
            "title": "Claim about tides",
            "url": "https://snopes.com/fact-check/tides",
            "reviewDate": "2024-03-01T10:00:00Z",
            "verdict": "FALSE",
            "summary": "No."
        }))
        .unwrap();

        assert_eq!(review.verdict, Some(Verdict::False));
        assert_eq!(review.reviewed_on(), NaiveDate::from_ymd_opt(2024, 3, 1));

        let review: ClaimReview = serde_json::from_value(json!({
            "publisher": { "name": "PolitiFact" },
            "title": "t",
            "url": "u",
            "review_date": "2023-12-24",
            "verdict": "half true"
        }))
        .unwrap();
        assert_eq!(review.verdict, Some(Verdict::Unverified));
        assert_eq!(review.reviewed_on(), NaiveDate::from_ymd_opt(2023, 12, 24));
    }

    #[test]
    fn test_sentence_priority() {
        let sentence = |score| CheckworthySentence { sentence: String::new(), score };
        assert_eq!(sentence(0.71).priority(), Priority::High);
        assert_eq!(sentence(0.7).priority(), Priority::Medium);
        assert_eq!(sentence(0.41).priority(), Priority::Medium);
        assert_eq!(sentence(0.4).priority(), Priority::Low);
    }

    #[test]
    fn test_reputation_and_detections() {
        let result = decode(json!({
            "trust_score": 12,
            "virustotal": {
                "domain": "bad.example",
                "last_scans": {
                    "EngineA": { "detected": true, "result": "phishing" },
                    "EngineB": { "detected": false }
                },
                "suspicious_score": 55,
                "domain_age_days": 9
            },
            "source_reputation": { "rating": "satire", "details": "Parody site" },
            "explanation": ""
        }));

        assert_eq!(result.domain_reputation.as_ref().unwrap().detections(), 1);
        assert_eq!(result.source_reputation.unwrap().rating, ReputationRating::Satire);
    }

    #[test]
    fn test_missing_trust_score_is_rejected() {
        let err = serde_json::from_value::<AnalyzeResponse>(json!({ "explanation": "" }));
        assert!(err.is_err());
    }
}
