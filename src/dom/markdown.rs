// src/dom/markdown.rs

//! Best-effort HTML to Markdown serialization.
//!
//! Assumes well-nested, site-typical markup. Unknown tags are transparent:
//! their children are serialized without any wrapping markup.

use ego_tree::NodeRef;
use scraper::Node;

use super::attr;

/// Serialize a subtree as Markdown.
pub fn to_markdown(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    render(&mut out, node);
    out
}

fn render(out: &mut String, node: NodeRef<'_, Node>) {
    match node.value() {
        Node::Text(t) => out.push_str(t),
        Node::Element(el) => match el.name() {
            "a" => {
                out.push('[');
                render_children(out, node);
                out.push_str("](");
                out.push_str(attr(node, "href"));
                out.push(')');
            }
            "strong" | "b" => {
                out.push_str("**");
                render_children(out, node);
                out.push_str("**");
            }
            "em" | "i" => {
                out.push('*');
                render_children(out, node);
                out.push('*');
            }
            "img" => {
                out.push_str("![");
                out.push_str(attr(node, "alt"));
                out.push_str("](");
                out.push_str(attr(node, "src"));
                out.push(')');
            }
            "p" => {
                out.push_str("\n\n");
                render_children(out, node);
                out.push_str("\n\n");
            }
            "br" => out.push('\n'),
            name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let level = (name.as_bytes()[1] - b'0') as usize;
                out.push('\n');
                for _ in 0..level {
                    out.push('#');
                }
                out.push(' ');
                render_children(out, node);
                out.push_str("\n\n");
            }
            "ul" => {
                out.push('\n');
                for item in node.children().filter(|c| is_element(*c, "li")) {
                    out.push_str("- ");
                    render_children(out, item);
                    out.push('\n');
                }
            }
            "ol" => {
                out.push('\n');
                for (i, item) in node
                    .children()
                    .filter(|c| is_element(*c, "li"))
                    .enumerate()
                {
                    out.push_str(&format!("{}. ", i + 1));
                    render_children(out, item);
                    out.push('\n');
                }
            }
            "code" => {
                out.push('`');
                render_children(out, node);
                out.push('`');
            }
            "pre" => {
                // Literal whitespace matters here, so only direct text
                // children are emitted, not a recursive serialization.
                out.push_str("\n```\n");
                out.push_str(&direct_text(node));
                out.push_str("\n```\n");
            }
            "table" => render_table(out, node),
            _ => render_children(out, node),
        },
        // Documents, fragments, doctypes and comments contribute nothing
        // themselves.
        _ => render_children(out, node),
    }
}

fn render_children(out: &mut String, node: NodeRef<'_, Node>) {
    for child in node.children() {
        render(out, child);
    }
}

fn is_element(node: NodeRef<'_, Node>, name: &str) -> bool {
    node.value().as_element().is_some_and(|el| el.name() == name)
}

/// Direct text content of a node, without recursing into child elements.
fn direct_text(node: NodeRef<'_, Node>) -> String {
    let mut buf = String::new();
    for child in node.children() {
        if let Some(t) = child.value().as_text() {
            buf.push_str(t);
        }
    }
    buf
}

fn render_table(out: &mut String, node: NodeRef<'_, Node>) {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for section in node.children() {
        let Some(el) = section.value().as_element() else {
            continue;
        };
        match el.name() {
            "thead" => {
                for tr in section.children().filter(|c| is_element(*c, "tr")) {
                    for cell in tr.children().filter(|c| is_element(*c, "th")) {
                        headers.push(to_markdown(cell));
                    }
                }
            }
            "tbody" => {
                for tr in section.children().filter(|c| is_element(*c, "tr")) {
                    rows.push(row_cells(tr));
                }
            }
            // Tables without a tbody carry their rows directly.
            "tr" => rows.push(row_cells(section)),
            _ => {}
        }
    }

    out.push('\n');
    if !headers.is_empty() {
        out.push_str("| ");
        out.push_str(&headers.join(" | "));
        out.push_str(" |\n");
        out.push('|');
        for _ in &headers {
            out.push_str(" --- |");
        }
        out.push('\n');
    }
    for row in rows {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out.push('\n');
}

fn row_cells(tr: NodeRef<'_, Node>) -> Vec<String> {
    tr.children()
        .filter(|c| is_element(*c, "td") || is_element(*c, "th"))
        .map(to_markdown)
        .collect()
}
