//! Link reference definitions: collected ahead of the `Doc` pass so a link
//! can cite a definition appearing later (or earlier) in the document.

mod common;

use common::html;

#[test]
fn shortcut_reference_uses_the_label_itself_as_the_key() {
    html(
        "[Google]\n\n[Google]: http://google.com\n",
        "<p><a href=\"http://google.com\">Google</a></p>\n",
    );
}

#[test]
fn empty_bracket_reference_reuses_the_label_text() {
    html(
        "[Google][]\n\n[Google]: http://google.com\n",
        "<p><a href=\"http://google.com\">Google</a></p>\n",
    );
}

#[test]
fn title_on_the_line_following_the_url() {
    html(
        concat!("[x][y]\n\n", "[y]: http://e.x\n", "    \"a title\"\n"),
        "<p><a href=\"http://e.x\" title=\"a title\">x</a></p>\n",
    );
}

#[test]
fn angle_bracketed_url() {
    html(
        "[x][y]\n\n[y]: <http://e.x/a b>\n",
        "<p><a href=\"http://e.x/a%20b\">x</a></p>\n",
    );
}

#[test]
fn a_definition_does_not_render_as_a_paragraph() {
    html("[y]: http://e.x\n", "");
}

#[test]
fn reference_image() {
    html(
        "![alt][y]\n\n[y]: http://e.x/i.png\n",
        "<p><img src=\"http://e.x/i.png\" alt=\"alt\" /></p>\n",
    );
}

#[test]
fn first_definition_of_a_repeated_label_wins() {
    html(
        concat!(
            "[x][y]\n\n",
            "[y]: http://first.x\n",
            "[y]: http://second.x\n",
        ),
        "<p><a href=\"http://first.x\">x</a></p>\n",
    );
}
