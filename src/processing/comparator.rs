//! Set comparison of resume skills against job description skills

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub all_jd_skills: BTreeSet<String>,
}

impl ComparisonResult {
    pub fn matched_count(&self) -> usize {
        self.matched_skills.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_skills.len()
    }

    /// Fraction of job description skills found on the resume, 0.0 when it lists none.
    pub fn coverage(&self) -> f64 {
        if self.all_jd_skills.is_empty() {
            0.0
        } else {
            self.matched_count() as f64 / self.all_jd_skills.len() as f64
        }
    }
}

/// matched = resume ∩ jd, missing = jd − resume, after lowercasing both sides.
pub fn compare<R, J>(resume_skills: R, jd_skills: J) -> ComparisonResult
where
    R: IntoIterator,
    R::Item: AsRef<str>,
    J: IntoIterator,
    J::Item: AsRef<str>,
{
    let resume: BTreeSet<String> = resume_skills.into_iter().map(|s| s.as_ref().to_lowercase()).collect();
    let jd: BTreeSet<String> = jd_skills.into_iter().map(|s| s.as_ref().to_lowercase()).collect();

    ComparisonResult {
        matched_skills: resume.intersection(&jd).cloned().collect(),
        missing_skills: jd.difference(&resume).cloned().collect(),
        all_jd_skills: jd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matched_and_missing() {
        let result = compare(["Python", "Django", "SQL"], ["python", "sql", "agile", "AGILE"]);
        assert_eq!(result.matched_skills, set(&["python", "sql"]));
        assert_eq!(result.missing_skills, set(&["agile"]));
        assert_eq!(result.all_jd_skills, set(&["agile", "python", "sql"]));
        assert_eq!(result.matched_count(), 2);
        assert!((result.coverage() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sets() {
        let none: [&str; 0] = [];

        let result = compare(none, none);
        assert_eq!(result, ComparisonResult::default());
        assert_eq!(result.coverage(), 0.0);

        let result = compare(["python"], none);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());

        let result = compare(none, ["python"]);
        assert_eq!(result.missing_skills, set(&["python"]));
        assert_eq!(result.missing_count(), 1);
    }
}
