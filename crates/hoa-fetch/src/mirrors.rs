//! Mirror base computation and candidate URL lists.
//!
//! In preview mode a data path like `../../data/water_providers.json` is
//! rewritten against each public mirror of the repository:
//!
//! ```text
//! https://raw.githubusercontent.com/{owner}/{repo}/{branch}/data/water_providers.json
//! https://cdn.jsdelivr.net/gh/{owner}/{repo}@{branch}/data/water_providers.json
//! https://raw.githack.com/{owner}/{repo}/{branch}/data/water_providers.json
//! ../../data/water_providers.json
//! ```
//!
//! The page-relative path stays last as the final resort.

use hoa_core::config::MirrorTemplate;
use hoa_core::PreviewContext;

/// Push `value` unless an equal entry is already present.
fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Expand one template for `context`, always ending with `/`.
pub fn expand_template(template: &str, context: &PreviewContext) -> String {
    let mut base = template
        .replace("{owner}", &context.owner)
        .replace("{repo}", &context.repo)
        .replace("{branch}", &context.branch);
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

/// Compute the ordered, de-duplicated mirror bases for `context`.
///
/// Templates flagged `flat_branch_only` are skipped when the branch name
/// contains `/`.
pub fn mirror_bases(context: &PreviewContext, templates: &[MirrorTemplate]) -> Vec<String> {
    let nested = context.has_nested_branch();
    let mut bases = Vec::with_capacity(templates.len());
    for template in templates {
        if template.flat_branch_only && nested {
            continue;
        }
        push_unique(&mut bases, expand_template(&template.url, context));
    }
    bases
}

/// Strip leading slashes and `../` segments, giving a repo-root path.
///
/// ```
/// use hoa_fetch::mirrors::repo_relative;
///
/// assert_eq!(repo_relative("../../data/x.json"), "data/x.json");
/// assert_eq!(repo_relative("//data/x.json"), "data/x.json");
/// assert_eq!(repo_relative("data/x.json"), "data/x.json");
/// ```
pub fn repo_relative(path: &str) -> &str {
    let mut rest = path;
    loop {
        let trimmed = rest.trim_start_matches('/');
        match trimmed.strip_prefix("../") {
            Some(stripped) => rest = stripped,
            None => return trimmed,
        }
    }
}

/// Build the candidate list for `path`: each mirror, then `path` itself.
pub fn candidate_urls(path: &str, bases: &[String]) -> Vec<String> {
    let relative = repo_relative(path);
    let mut candidates = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        push_unique(&mut candidates, format!("{base}{relative}"));
    }
    push_unique(&mut candidates, path.to_string());
    candidates
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hoa_core::config::MirrorConfig;
    use proptest::prelude::*;

    fn templates() -> Vec<MirrorTemplate> {
        MirrorConfig::default().templates
    }

    #[test]
    fn test_flat_branch_includes_cdn() {
        let ctx = PreviewContext::new("acme", "hoa", "main");
        let bases = mirror_bases(&ctx, &templates());
        assert_eq!(
            bases,
            vec![
                "https://raw.githubusercontent.com/acme/hoa/main/".to_string(),
                "https://cdn.jsdelivr.net/gh/acme/hoa@main/".to_string(),
                "https://raw.githack.com/acme/hoa/main/".to_string(),
            ]
        );
    }

    #[test]
    fn test_nested_branch_excludes_cdn() {
        let ctx = PreviewContext::new("acme", "hoa", "feature/ph");
        let bases = mirror_bases(&ctx, &templates());
        assert_eq!(bases.len(), 2);
        assert!(bases.iter().all(|b| !b.contains("jsdelivr")));
        assert_eq!(bases[0], "https://raw.githubusercontent.com/acme/hoa/feature/ph/");
    }

    #[test]
    fn test_duplicate_templates_collapse() {
        let ctx = PreviewContext::new("a", "b", "c");
        let dupes = vec![
            MirrorTemplate::new("https://m.example/{owner}/{repo}/{branch}"),
            MirrorTemplate::new("https://m.example/{owner}/{repo}/{branch}/"),
        ];
        assert_eq!(mirror_bases(&ctx, &dupes), vec!["https://m.example/a/b/c/".to_string()]);
    }

    #[test]
    fn test_repo_relative_mixed_prefix() {
        assert_eq!(repo_relative("/../..//../data/x.json"), "data/x.json");
        assert_eq!(repo_relative("./data/x.json"), "./data/x.json");
        assert_eq!(repo_relative(""), "");
    }

    #[test]
    fn test_candidates_end_with_original() {
        let bases = vec!["https://m1/".to_string(), "https://m2/".to_string()];
        let candidates = candidate_urls("../../data/x.json", &bases);
        assert_eq!(
            candidates,
            vec![
                "https://m1/data/x.json".to_string(),
                "https://m2/data/x.json".to_string(),
                "../../data/x.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_bases_leaves_only_original() {
        assert_eq!(candidate_urls("data/x.json", &[]), vec!["data/x.json".to_string()]);
    }

    proptest! {
        #[test]
        fn test_candidates_unique_and_original_last(
            path in "(\\.\\./|/){0,3}[a-z_/]{0,12}(\\.json|\\.md)",
            branch in "[a-z]{1,6}(/[a-z]{1,6})?",
        ) {
            let ctx = PreviewContext::new("acme", "hoa", branch);
            let mut bases = mirror_bases(&ctx, &templates());
            // Repeat the list to force collisions.
            bases.extend(bases.clone());

            let candidates = candidate_urls(&path, &bases);
            let mut seen = std::collections::HashSet::new();
            for c in &candidates {
                prop_assert!(seen.insert(c.clone()), "duplicate candidate {}", c);
            }
            prop_assert_eq!(candidates.last().unwrap(), &path);
        }
    }
}
