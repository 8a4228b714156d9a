//! Standalone HTML rendering of a board.
//!
//! The page is a tera template with autoescaping on, so every record field
//! lands in the markup escaped. Only the analysis section is inserted raw,
//! after [`analysis_markup`] has escaped it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tera::{Context, Tera};

use crate::types::Board;

const BOARD_TEMPLATE: &str = include_str!("../templates/board.html");

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)## (.*)$").unwrap());
static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static LIST_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());

/// One grid tile as the template sees it.
#[derive(Serialize)]
struct Tile<'a> {
    id: &'a str,
    src: &'a str,
    alt: String,
    source: &'a str,
    /// Present only when attribution is displayable
    photographer: Option<&'a str>,
}

/// Convert the analysis' light markdown to HTML.
///
/// The text is escaped first, so model output cannot inject markup.
pub fn analysis_markup(text: &str) -> String {
    let html = tera::escape_html(text);
    let html = HEADING.replace_all(&html, "<h4>${1}</h4>");
    let html = STRONG.replace_all(&html, "<strong>${1}</strong>");
    let html = EMPHASIS.replace_all(&html, "<em>${1}</em>");
    let html = LIST_ITEM.replace_all(&html, "<li>${1}</li>");
    let html = LIST_SPAN.replace(&html, "<ul>${1}</ul>");
    html.replace('\n', "<br>")
}

/// Render `board` as a self-contained HTML page.
pub fn page(board: &Board) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("board.html", BOARD_TEMPLATE)?;

    let tiles: Vec<Tile<'_>> = board
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| Tile {
            id: &image.id,
            src: &image.url,
            alt: if image.title.trim().is_empty() {
                format!("{} design inspiration {}", board.keywords, index + 1)
            } else {
                image.title.clone()
            },
            source: &image.source,
            photographer: image
                .shows_attribution()
                .then_some(image.photographer.as_str()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("keywords", &board.keywords);
    context.insert("tiles", &tiles);
    context.insert(
        "analysis",
        &board.analysis.as_ref().map(|a| analysis_markup(&a.text)),
    );

    tera.render("board.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisOrigin, DesignAnalysis};
    use crate::types::{ImageRecord, PHOTOGRAPHER_DEMO};

    #[test]
    fn test_markup_headings_and_emphasis() {
        let html = analysis_markup("## Theme\n**Bold** and *soft*");
        assert_eq!(html, "<h4>Theme</h4><br><strong>Bold</strong> and <em>soft</em>");
    }

    #[test]
    fn test_markup_wraps_all_items_in_one_list() {
        let html = analysis_markup("Intro\n- one\n- two\nMiddle\n- three");
        assert_eq!(
            html,
            "Intro<br><ul><li>one</li><br><li>two</li><br>Middle<br><li>three</li></ul>"
        );
        assert_eq!(html.matches("<ul>").count(), 1);
    }

    #[test]
    fn test_markup_escapes_model_output() {
        let html = analysis_markup("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    fn board() -> Board {
        Board::new(
            "sunset <beach>",
            vec![
                ImageRecord::new("a", "https://a/1.jpg", "Pexels")
                    .with_title("Warm \"glow\"")
                    .with_photographer("Ana Lee"),
                ImageRecord::new("b", "https://a/2.jpg", "Pexels").with_photographer(PHOTOGRAPHER_DEMO),
            ],
        )
    }

    #[test]
    fn test_page_tiles() {
        let html = page(&board()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Moodboard: sunset &lt;beach&gt;</title>"));
        assert!(html.contains("alt=\"Warm &quot;glow&quot;\""));
        assert!(html.contains("alt=\"sunset &lt;beach&gt; design inspiration 2\""));
        assert!(html.contains("Pexels &middot; by Ana Lee"));
        assert_eq!(html.matches("<figure class=\"tile\"").count(), 2);
        assert!(!html.contains("Demo Image"));
        assert!(!html.contains("class=\"analysis\""));
    }

    #[test]
    fn test_page_escapes_record_fields() {
        let board = Board::new(
            "pins",
            vec![ImageRecord::new("x\"", "https://a/1.jpg?a=1&b=2", "Pinterest")
                .with_title("<img onerror=alert(1)>")],
        );
        let html = page(&board).unwrap();
        assert!(!html.contains("<img onerror"));
        assert!(html.contains("alt=\"&lt;img onerror=alert(1)&gt;\""));
        assert!(html.contains("a=1&amp;b=2"));
        assert!(html.contains("data-id=\"x&quot;\""));
    }

    #[test]
    fn test_page_includes_analysis() {
        let mut board = board();
        board.analysis = Some(DesignAnalysis {
            keywords: board.keywords.clone(),
            text: "## Palette".to_string(),
            origin: AnalysisOrigin::Mock,
        });
        assert!(page(&board)
            .unwrap()
            .contains("<section class=\"analysis\"><h4>Palette</h4></section>"));
    }
}
