use std::collections::HashSet;

use super::rules::ScoringRule;

/// Validate the rule table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(rules: &[ScoringRule]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, rule) in rules.iter().enumerate() {
        if !seen_ids.insert(rule.id) {
            errors.push(format!("scoring.rules[{}].id: duplicate id {}", i, rule.id));
        }
        if rule.category.trim().is_empty() {
            errors.push(format!("scoring.rules[{}].category: must not be empty", i));
        }
        if rule.subcategory.trim().is_empty() {
            errors.push(format!("scoring.rules[{}].subcategory: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
