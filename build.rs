use entities::ENTITIES;
use std::io::Write;
use std::{env, path::PathBuf};

// The block-level tag names recognized by the `HtmlBlock` production's type-6
// alternative (§4.2); lower-cased, matched case-insensitively by the grammar.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

fn main() {
    let out_dir: PathBuf = env::var("OUT_DIR").unwrap().parse().unwrap();

    let mut block_tag_set = phf_codegen::Set::new();
    for tag in BLOCK_TAGS {
        block_tag_set.entry(*tag);
    }
    let out = std::fs::File::create(out_dir.join("blocktags.rs")).unwrap();
    let mut bw = std::io::BufWriter::new(out);
    writeln!(
        bw,
        "pub static BLOCK_TAGS: phf::Set<&'static str> = {};",
        block_tag_set.build()
    )
    .unwrap();

    // entity::lookup is handed just the inner entity name, like "amp" for
    // "&amp;"; we only match those with a trailing ";".
    //
    // entities::ENTITIES includes many both with and without a trailing ";".
    // Exclude those without, and then write to source only the name, without
    // the leading or trailing "&" or ";".
    //
    // It's also not sorted; upper- and lower-case variants are interleaved.
    // Sort it for binary search.
    let mut translated_entities = ENTITIES
        .iter()
        .filter(|e| e.entity.starts_with('&') && e.entity.ends_with(';'))
        .collect::<Vec<_>>();
    translated_entities.sort_by_key(|e| e.entity);
    translated_entities.dedup_by_key(|e| e.entity);

    let out = std::fs::File::create(out_dir.join("entitydata.rs")).unwrap();
    let mut bw = std::io::BufWriter::new(out);
    writeln!(bw, "mod entitydata {{").unwrap();
    writeln!(
        bw,
        "    pub static TRANSLATED_ENTITIES: &[(&str, &str); {}] = &[",
        translated_entities.len()
    )
    .unwrap();
    for e in translated_entities {
        writeln!(
            bw,
            "        ({:?}, {:?}),",
            &e.entity[1..e.entity.len() - 1],
            &e.characters
        )
        .unwrap();
    }
    writeln!(bw, "    ];").unwrap();
    writeln!(bw, "}}").unwrap();
}
