use std::fmt::Write;

use nv_core::{AnalysisResult, ApiFailure, Priority};

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let verdict = if result.is_credible() { "CREDIBLE" } else { "QUESTIONABLE" };

    let _ = writeln!(out, "{}", result.title.as_deref().unwrap_or(&result.url));
    if result.title.is_some() {
        let _ = writeln!(out, "  {}", result.url);
    }
    if let Some(author) = &result.author {
        let _ = writeln!(out, "  by {}", author);
    }
    match (result.published_on(), &result.publish_date) {
        (Some(date), _) => {
            let _ = writeln!(out, "  published {}", date.format("%b %d, %Y"));
        }
        (None, Some(raw)) => {
            let _ = writeln!(out, "  published {}", raw);
        }
        _ => {}
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Trust score: {}% ({})", result.trust_score, verdict);
    let _ = writeln!(out, "{}", result.explanation);

    if let Some(snippet) = &result.snippet {
        let _ = writeln!(out, "\n> {}", snippet);
    }

    if !result.claim_reviews.is_empty() {
        let _ = writeln!(out, "\nFact checks:");
        for review in &result.claim_reviews {
            let verdict = review
                .verdict
                .map(|v| v.to_string())
                .unwrap_or_else(|| "UNVERIFIED".to_string());
            let _ = writeln!(out, "  [{}] {} ({})", verdict, review.title, review.publisher.name);
            if let Some(date) = review.reviewed_on() {
                let _ = writeln!(out, "      reviewed {}", date.format("%Y-%m-%d"));
            }
            if let Some(summary) = &review.summary {
                let _ = writeln!(out, "      {}", summary);
            }
            let _ = writeln!(out, "      {}", review.url);
        }
    }

    if !result.checkworthy_sentences.is_empty() {
        let _ = writeln!(out, "\nCheck-worthy sentences:");
        for sentence in &result.checkworthy_sentences {
            let tag = match sentence.priority() {
                Priority::High => "high",
                Priority::Medium => "med ",
                Priority::Low => "low ",
            };
            let _ = writeln!(
                out,
                "  {} {:>3.0}%  {}",
                tag,
                sentence.score * 100.0,
                sentence.sentence
            );
        }
    }

    if let Some(vt) = &result.domain_reputation {
        let _ = writeln!(
            out,
            "\nDomain {}: {} of {} engines flagged it, suspicious score {:.0}",
            vt.domain,
            vt.detections(),
            vt.last_scans.len(),
            vt.suspicious_score
        );
        if let Some(age) = vt.domain_age_days {
            let _ = writeln!(out, "  registered {} days ago", age);
        }
    }

    if let Some(reputation) = &result.source_reputation {
        let _ = write!(out, "\nSource reputation: {:?}", reputation.rating);
        if let Some(details) = &reputation.details {
            let _ = write!(out, " ({})", details);
        }
        let _ = writeln!(out);
    }

    out
}

pub fn render_failure(failure: &ApiFailure, base_url: &str) -> String {
    let mut out = format!("✗ {}", failure.message);
    if let Some(code) = failure.code() {
        let _ = write!(out, " [{}]", code);
    }
    if let Some(details) = &failure.details {
        let _ = write!(out, "\n  {}", details);
    }
    match failure.code() {
        Some("NETWORK_ERROR") => {
            let _ = write!(out, "\n  Is the backend running at {}?", base_url);
        }
        Some("TIMEOUT") => {
            let _ = write!(out, "\n  Large pages can take a while; try again shortly.");
        }
        _ => {}
    }
    out
}
