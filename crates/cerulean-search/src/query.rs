//! Dork query construction.
//!
//! The query narrows results to LinkedIn member profiles (`/in/` paths) and
//! biases them toward people who list the organization as their current
//! employer. Google does not always honour the `-inurl` exclusions, so posts
//! and directory pages still leak through; the title filter downstream copes
//! with those.

use cerulean_core::TargetOrganization;

/// Site clause restricting results to the networking domain.
const SITE_CLAUSE: &str = "site:linkedin.com";

/// Path clause selecting member profile URLs.
const PROFILE_CLAUSE: &str = "inurl:\"/in/\"";

/// Exclusions for content that is not a profile.
const EXCLUSIONS: [&str; 2] = ["-inurl:post", "-inurl:dir"];

/// Build the profile dork for `target`.
#[must_use]
pub fn dork_query(target: &TargetOrganization) -> String {
    format!(
        "{SITE_CLAUSE} {PROFILE_CLAUSE} {} \"at {}\" \"current\"",
        EXCLUSIONS.join(" "),
        target.as_str()
    )
}
