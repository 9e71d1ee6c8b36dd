//! Basic block structure: paragraphs, block quotes, and headings mixed in
//! one document, grounded on the teacher's own `basic()` fixture
//! (`src/tests/core.rs`).

mod common;

use common::html;

#[test]
fn mixed_blocks_render_each_on_its_own_with_blank_separators() {
    html(
        concat!(
            "My **document**.\n",
            "\n",
            "It's mine.\n",
            "\n",
            "> Yes.\n",
            "\n",
            "## Hi!\n",
            "\n",
            "Okay.\n",
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "\n",
            "<p>It's mine.</p>\n",
            "\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "\n",
            "<h2>Hi!</h2>\n",
            "\n",
            "<p>Okay.</p>\n",
        ),
    );
}

#[test]
fn setext_headings() {
    html("Title\n=====\n\nSubtitle\n--------\n", "<h1>Title</h1>\n\n<h2>Subtitle</h2>\n");
}

#[test]
fn horizontal_rule_variants() {
    html("* * *\n", "<hr />\n");
    html("---\n", "<hr />\n");
    html("___\n", "<hr />\n");
}

#[test]
fn blockquote_lazy_continuation() {
    html(
        concat!("> Para one,\n", "continued without a marker.\n"),
        "<blockquote>\n<p>Para one, continued without a marker.</p>\n</blockquote>\n",
    );
}

#[test]
fn html_block_passes_through_by_default() {
    html(
        "<div class=\"note\">\n<p>raw</p>\n</div>\n",
        "<div class=\"note\">\n<p>raw</p>\n</div>\n",
    );
}

#[test]
fn angle_bracket_in_prose_is_not_mistaken_for_a_tag() {
    // `<` only opens an autolink or raw HTML inline; failing both, it's
    // literal text, not a parse failure that would swallow the rest of the
    // sentence (see DESIGN.md's "failed specific inline production" entry).
    html("a < b and a > c\n", "<p>a &lt; b and a &gt; c</p>\n");
}
