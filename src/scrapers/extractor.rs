//! Heuristic headline extraction from arbitrary listing pages.
//!
//! Listing pages do not share markup, so headlines are located with an
//! ordered set of tiers where the first tier that matches anything wins:
//!
//! | Tier | Matches |
//! |------|---------|
//! | `article-element` | `<article>` elements |
//! | `article-class` | `<div>` with class `article`, `post` or `news-item` |
//! | `article-testid` | `<div>` whose `data-testid` contains `article` (any case) |
//! | link fallback | every `<a href>` on the page, only when no container matched |
//!
//! Inside a container the headline is the first `h1`/`h2`/`h3`, else the first
//! element classed `headline` or `title`. The link is the first `<a href>` in
//! the same container.
//!
//! New tiers are added by appending to [`CONTAINER_RULES`] or
//! [`HEADLINE_RULES`]; earlier tiers keep their priority.

use crate::models::Article;
use crate::utils::{is_http_link, resolve_link};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, trace};
use url::Url;

/// One discovery tier: a CSS selector plus an extra predicate for what CSS
/// cannot express.
pub struct Rule {
    pub name: &'static str,
    selector: Selector,
    accept: fn(&ElementRef<'_>) -> bool,
}

impl Rule {
    fn new(name: &'static str, css: &str, accept: fn(&ElementRef<'_>) -> bool) -> Self {
        Self {
            name,
            selector: Selector::parse(css).expect("built-in selector must parse"),
            accept,
        }
    }

    fn find_all<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document
            .select(&self.selector)
            .filter(|el| (self.accept)(el))
            .collect()
    }

    fn find_first<'a>(&self, scope: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(&self.selector).find(|el| (self.accept)(el))
    }
}

fn any(_: &ElementRef<'_>) -> bool {
    true
}

fn testid_mentions_article(el: &ElementRef<'_>) -> bool {
    el.value()
        .attr("data-testid")
        .is_some_and(|id| id.to_lowercase().contains("article"))
}

/// Container discovery tiers, highest priority first.
pub static CONTAINER_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("article-element", "article", any),
        Rule::new("article-class", "div.article, div.post, div.news-item", any),
        Rule::new("article-testid", "div[data-testid]", testid_mentions_article),
    ]
});

/// Headline lookup tiers inside a container, highest priority first.
pub static HEADLINE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("heading", "h1, h2, h3", any),
        Rule::new("headline-class", ".headline, .title", any),
    ]
});

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("built-in selector must parse"));

/// Which tier produced a page's articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Containers found by the named rule in [`CONTAINER_RULES`].
    Containers(&'static str),
    /// No container matched; every link on the page was considered.
    LinkFallback,
}

/// Articles found on one page and how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub strategy: Strategy,
    /// Number of candidates looked at before filtering.
    pub candidates: usize,
    pub articles: Vec<Article>,
}

/// Headline extractor with its acceptance threshold.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    /// Headlines must be strictly longer than this many characters.
    pub min_headline_len: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self { min_headline_len: 20 }
    }
}

impl Extractor {
    pub fn new(min_headline_len: usize) -> Self {
        Self { min_headline_len }
    }

    /// Extract articles from `document`, resolving links against `base`.
    ///
    /// `seen` holds headlines already emitted in the current scope; it is
    /// read to drop duplicates and updated with every accepted headline.
    /// Output preserves document order.
    pub fn extract(&self, document: &Html, base: &Url, seen: &mut HashSet<String>) -> Extraction {
        for rule in CONTAINER_RULES.iter() {
            let containers = rule.find_all(document);
            if containers.is_empty() {
                continue;
            }
            trace!(rule = rule.name, count = containers.len(), "Container rule matched");

            let articles = containers
                .iter()
                .filter_map(|container| self.from_container(container, base, seen))
                .collect::<Vec<_>>();
            debug!(
                rule = rule.name,
                containers = containers.len(),
                accepted = articles.len(),
                "Extracted from containers"
            );
            return Extraction {
                strategy: Strategy::Containers(rule.name),
                candidates: containers.len(),
                articles,
            };
        }

        let links = document.select(&LINK_SELECTOR).collect::<Vec<_>>();
        let articles = links
            .iter()
            .filter_map(|link| self.from_link(link, base, seen))
            .collect::<Vec<_>>();
        debug!(links = links.len(), accepted = articles.len(), "Extracted from link fallback");
        Extraction {
            strategy: Strategy::LinkFallback,
            candidates: links.len(),
            articles,
        }
    }

    fn from_container(
        &self,
        container: &ElementRef<'_>,
        base: &Url,
        seen: &mut HashSet<String>,
    ) -> Option<Article> {
        let heading = HEADLINE_RULES
            .iter()
            .find_map(|rule| rule.find_first(container))?;
        let headline = element_text(&heading);
        let href = container
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))?;

        if !self.accepts(&headline, seen) {
            return None;
        }
        let link = resolve_link(base, href)?;
        seen.insert(headline.clone());
        Some(Article { headline, link })
    }

    fn from_link(
        &self,
        link: &ElementRef<'_>,
        base: &Url,
        seen: &mut HashSet<String>,
    ) -> Option<Article> {
        let headline = element_text(link);
        if !self.accepts(&headline, seen) {
            return None;
        }
        let href = link.value().attr("href")?;
        let link = resolve_link(base, href).filter(|l| is_http_link(l))?;
        seen.insert(headline.clone());
        Some(Article { headline, link })
    }

    fn accepts(&self, headline: &str, seen: &HashSet<String>) -> bool {
        !headline.is_empty()
            && headline.chars().count() > self.min_headline_len
            && !seen.contains(headline)
    }
}

/// Concatenated descendant text of `el`, trimmed at both ends. Inner
/// whitespace is kept as-is, so it counts toward the length and the dedup key.
fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
