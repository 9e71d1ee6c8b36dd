//! Configuration for the parser and renderer (§6, `ExtensionSet`).

#[cfg(feature = "bon")]
use bon::Builder;

/// Selects which of the optional grammar extensions are recognized, and how
/// raw HTML/styles are treated. All options default to off; unknown
/// combinations have no interaction (§6).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bon", derive(Builder))]
pub struct ExtensionSet {
    /// Recognize `.`/`-`/`'`/`"` as typographic atoms and emit their HTML
    /// entities instead of the literal characters.
    ///
    /// ```
    /// # use peggy_md::{parse, ExtensionSet};
    /// let ext = ExtensionSet { smart: true, ..Default::default() };
    /// let doc = parse(b"'Hi'--really...\n", ext);
    /// assert_eq!(doc.write_html_string(), "<p>&lsquo;Hi&rsquo;&mdash;really&hellip;</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub smart: bool,

    /// Recognize `[^label]`, `^[inline text]`, and block-level
    /// `[^label]: ...` footnote definitions, and emit a trailing notes
    /// section.
    ///
    /// ```
    /// # use peggy_md::{parse, ExtensionSet};
    /// let ext = ExtensionSet { notes: true, ..Default::default() };
    /// let doc = parse(b"Hi[^x].\n\n[^x]: Bye.\n", ext);
    /// assert!(doc.write_html_string().contains("footnote-ref"));
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub notes: bool,

    /// Recognize `:`/`~` definition markers (and the title lines preceding
    /// them) as a `DEFINITIONLIST`.
    #[cfg_attr(feature = "bon", builder(default))]
    pub dlists: bool,

    /// Drop raw inline HTML and `HTMLBLOCK` contents from the rendered
    /// output, rather than passing them through literally.
    #[cfg_attr(feature = "bon", builder(default))]
    pub filter_html: bool,

    /// Drop `<style>...</style>` block contents from the rendered output.
    #[cfg_attr(feature = "bon", builder(default))]
    pub filter_styles: bool,
}
