//! `lisa check` command implementation.
//!
//! Validates the route tree and verifies that every page has a content file
//! in every locale.

use std::fmt;
use std::path::PathBuf;

use clap::Args;
use lisa_content::ContentStore;
use lisa_site::{Locale, RouteIssue, RouteTable};

use crate::commands::{load_config, load_route_table};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover lisa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(long)]
    contents_dir: Option<PathBuf>,
}

/// A problem found by `lisa check`.
#[derive(Debug, PartialEq, Eq)]
enum Problem {
    Route(RouteIssue),
    MissingContent { lang: &'static str, href: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route(issue) => write!(f, "route: {issue}"),
            Self::MissingContent { lang, href } => {
                write!(f, "missing content: docs/{lang}{href}/index.mdx")
            }
        }
    }
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(self.config, self.contents_dir)?;
        let table = load_route_table(&config)?;
        let content = ContentStore::new(config.content_resolved.contents_dir.clone());

        output.info(&format!(
            "Checking {} pages in {}",
            table.pages().len(),
            content.root().display()
        ));

        let problems = find_problems(&table, &content);
        if problems.is_empty() {
            output.success("No problems found");
            return Ok(());
        }

        output.highlight(&format!("{} problem(s):", problems.len()));
        for problem in &problems {
            output.warning(&format!("  {problem}"));
        }
        Err(CliError::Validation(format!(
            "{} problem(s) found",
            problems.len()
        )))
    }
}

/// Collect route issues, then missing content per locale in route order.
fn find_problems(table: &RouteTable, content: &ContentStore) -> Vec<Problem> {
    let mut problems: Vec<Problem> = table.issues().into_iter().map(Problem::Route).collect();

    for locale in Locale::ALL {
        for page in table.pages() {
            if content.doc_path(locale.code(), &page.href).is_none() {
                problems.push(Problem::MissingContent {
                    lang: locale.code(),
                    href: page.href.clone(),
                });
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use lisa_site::RouteNode;

    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "---\ntitle: T\n---\n").unwrap();
    }

    #[test]
    fn test_find_problems_none() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/en/moves/swap/index.mdx");
        write(dir.path(), "docs/fr/moves/swap/index.md");
        let table = RouteTable::new(vec![RouteNode::section(
            "moves",
            "/moves",
            vec![RouteNode::page("swap", "/swap")],
        )]);

        let problems = find_problems(&table, &ContentStore::new(dir.path()));

        assert_eq!(problems, vec![]);
    }

    #[test]
    fn test_find_problems_missing_translation() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/en/moves/swap/index.mdx");
        let table = RouteTable::new(vec![RouteNode::section(
            "moves",
            "/moves",
            vec![RouteNode::page("swap", "/swap")],
        )]);

        let problems = find_problems(&table, &ContentStore::new(dir.path()));

        assert_eq!(
            problems,
            vec![Problem::MissingContent {
                lang: "fr",
                href: "/moves/swap".to_owned(),
            }]
        );
    }

    #[test]
    fn test_find_problems_duplicate_href() {
        let dir = tempfile::tempdir().unwrap();
        let table = RouteTable::new(vec![RouteNode::section(
            "x",
            "/x",
            vec![RouteNode::page("a", "/a"), RouteNode::page("b", "/a")],
        )]);

        let problems = find_problems(&table, &ContentStore::new(dir.path()));

        assert!(matches!(
            &problems[0],
            Problem::Route(RouteIssue::DuplicateHref { href, .. }) if href == "/x/a"
        ));
        assert_eq!(problems.len(), 1 + 2 * Locale::ALL.len());
    }

    #[test]
    fn test_problem_display() {
        let problem = Problem::MissingContent {
            lang: "fr",
            href: "/moves/swap".to_owned(),
        };

        assert_eq!(
            problem.to_string(),
            "missing content: docs/fr/moves/swap/index.mdx"
        );
    }
}
