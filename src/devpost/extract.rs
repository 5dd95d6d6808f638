// src/devpost/extract.rs

//! Extraction of project records from gallery and detail page markup.
//!
//! A selector finding nothing is never an error here: the corresponding
//! field stays at its zero value and the site's markup conventions decide
//! the rest.

use ego_tree::NodeRef;
use scraper::{Html, Node};

use crate::dom::{self, Selector};
use crate::models::{Person, Project};

/// Parse one listing page into project records, in card order.
///
/// Returns an empty vector when the gallery container is missing, which is
/// how the site signals the end of pagination.
pub(crate) fn parse_gallery(html: &str) -> Vec<Project> {
    let doc = Html::parse_document(html);
    let Some(gallery) = dom::first(
        doc.tree.root(),
        &[Selector::tag("div"), Selector::id("submission-gallery")],
    ) else {
        return Vec::new();
    };
    dom::traverse(
        gallery,
        &[Selector::tag("div"), Selector::class("gallery-item")],
    )
    .map(parse_card)
    .collect()
}

/// Decode a single gallery card.
fn parse_card(node: NodeRef<'_, Node>) -> Project {
    let mut p = Project {
        id: dom::attr(node, "data-software-id").to_string(),
        ..Project::default()
    };
    if let Some(link) = dom::first(
        node,
        &[Selector::tag("a"), Selector::class("block-wrapper-link")],
    ) {
        p.url = dom::attr(link, "href").to_string();
        p.short_name = slug(&p.url);
        if let Some(img) = dom::first(
            link,
            &[
                Selector::tag("img"),
                Selector::class("software_thumbnail_image"),
            ],
        ) {
            p.image = dom::attr(img, "src").to_string();
        }
    }
    if let Some(title) = dom::first(node, &[Selector::tag("h5")]) {
        p.title = dom::text(title);
    }
    if let Some(tagline) = dom::first(node, &[Selector::tag("p"), Selector::class("tagline")]) {
        p.tagline = dom::text(tagline);
    }
    p.winner = dom::first(
        node,
        &[Selector::tag("aside"), Selector::class("entry-badge")],
    )
    .is_some();
    for member in dom::traverse(
        node,
        &[Selector::tag("span"), Selector::class("user-profile-link")],
    ) {
        if let Some(img) = dom::first(member, &[Selector::tag("img")]) {
            p.team.push(Person {
                name: dom::attr(img, "alt").to_string(),
                url: dom::attr(member, "data-url").to_string(),
                avatar_url: dom::attr(img, "src").to_string(),
            });
        }
    }
    if let Some(likes) = dom::first(
        node,
        &[
            Selector::tag("span"),
            Selector::class("count"),
            Selector::class("like-count"),
        ],
    ) {
        let raw = dom::text(likes);
        match raw.parse::<i64>() {
            Ok(n) => p.likes = n,
            Err(e) => log::warn!("bad like count {raw:?} for project {}: {e}", p.id),
        }
    }
    // The description only lives on the detail page, not the card.
    p
}

/// Apply a detail page to a project: description (text and markdown) and a
/// full replacement of the tag list.
pub(crate) fn apply_detail(project: &mut Project, html: &str) {
    let doc = Html::parse_document(html);
    let root = doc.tree.root();
    if let Some(details) = dom::first(
        root,
        &[Selector::tag("div"), Selector::id("app-details-left")],
    ) {
        project.description = dom::text(details);
        project.description_md = dom::to_markdown(details);
    }
    project.tags.clear();
    if let Some(built_with) = dom::first(root, &[Selector::tag("div"), Selector::id("built-with")])
    {
        for tag in dom::traverse(
            built_with,
            &[Selector::tag("span"), Selector::class("cp-tag")],
        ) {
            project.tags.push(dom::text(tag));
        }
    }
}

/// Last non-empty path segment of a project URL.
fn slug(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.rev().find(|s| !s.is_empty()))
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            raw.trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or("")
                .to_string()
        })
}
