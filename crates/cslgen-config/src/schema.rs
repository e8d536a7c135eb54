//! Typed parameter schema.
//!
//! Every key the rule engine reads is a [`Param`] with a kind and a default.
//! Keys are grouped by prefix: `c-` for citation rules, `b-` for
//! bibliography rules and `a-` for the access block.

use serde::Serialize;
use std::fmt;

/// How a parameter cell is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Written verbatim into an attribute or term.
    Text,
    /// Literal `true`/`false`.
    Flag,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Text => write!(f, "text"),
            ParamKind::Flag => write!(f, "flag"),
        }
    }
}

/// Schema entry for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    /// Value used when the cell is absent or empty. Flags default to
    /// `"false"`.
    pub default: &'static str,
    pub description: &'static str,
}

macro_rules! params {
    ($($variant:ident => $key:literal, $kind:ident, $default:literal, $description:literal;)*) => {
        /// A known configuration key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Param {
            $($variant,)*
        }

        /// Every parameter, in schema order.
        pub const PARAMS: &[Param] = &[$(Param::$variant,)*];

        impl Param {
            pub fn spec(self) -> ParamSpec {
                match self {
                    $(Param::$variant => ParamSpec {
                        key: $key,
                        kind: ParamKind::$kind,
                        default: $default,
                        description: $description,
                    },)*
                }
            }
        }
    };
}

params! {
    // Citation
    CitationLeft => "c-contributor-left", Text, "（", "Opening bracket around the whole citation";
    CitationRight => "c-contributor-right", Text, "）", "Closing bracket around the whole citation";
    CitationNameDateDelimiter => "c-name-date-delimiter", Text, ", ", "Delimiter between author and date";
    CitationNameDelimiter => "c-name-delimiter", Text, "", "Delimiter between short-form names";
    CitationAndForm => "c-and-form", Text, "", "Conjunction before the last short-form name";
    CitationDelimiterPrecedesLast => "c-delimiter-precedes-last", Flag, "false", "Put the delimiter before the last short-form name";
    CitationEtAlSubsequent => "c-et-al-subsequent", Flag, "false", "Abbreviate with et al. only in subsequent citations";
    CitationPageLabelForm => "c-page-label-form", Text, "", "Form of the page label in point locators; empty omits the label";
    CitationInvertPageLabel => "c-invert-page-label", Flag, "false", "Place the page label after the locator";
    OriginalDateLeft => "c-original-date-left", Text, "", "Prefix of the original publication year";
    OriginalDateRight => "c-original-date-right", Text, "=", "Suffix of the original publication year";
    PunctuationInQuote => "c-punctuation-in-quote", Flag, "false", "Move trailing punctuation inside quotes";
    PageRangeDelimiter => "c-page-range-delimiter", Text, "", "Page range delimiter term; empty keeps the locale default";

    // Bibliography names
    AndForm => "b-and-form", Text, "", "Conjunction before the last name";
    NameDelimiter => "b-name-delimiter", Text, "・", "Delimiter between names";
    NameSortSeparator => "b-name-sort-separator", Text, ",", "Separator between family and given name in sort order";
    DelimiterPrecedesLast => "b-delimiter-precedes-last", Flag, "false", "Put the delimiter before the last name";
    NameInitializeWith => "b-name-initialize-with", Text, "", "Text after initials";
    NameInitialize => "b-name-initialize", Text, "", "Initialize given names (true/false); empty leaves the attribute out";
    NameAsSortOrder => "b-name-as-sort-order", Text, "", "Which names are inverted (first/all); empty leaves the attribute out";
    NameSplitDelimiter => "b-name-split-delimiter", Text, "", "Explicit delimiter between family and given name parts";
    BookAuthorsSuffix => "b-book-authors-suffix", Text, ". ", "Suffix after editors of the containing book";
    ContributorLabelLeft => "b-contributor-label-left", Text, " (", "Prefix of container contributor labels";
    ContributorLabelRight => "b-contributor-label-right", Text, ")", "Suffix of container contributor labels";
    SecondaryLabelLeft => "b-contributor-2-label-left", Text, " (", "Prefix of secondary contributor labels";
    SecondaryLabelRight => "b-contributor-2-label-right", Text, ")", "Suffix of secondary contributor labels";

    // Bibliography dates and titles
    DateLeft => "b-date-left", Text, "（", "Opening bracket around the date";
    DateRight => "b-date-right", Text, "）", "Closing bracket around the date";
    DateDelimiter => "b-date-delimiter", Text, "", "Delimiter inside the date group";
    TitleQuotes => "b-title-quotes", Text, "true", "Quote article titles";
    BookTitleStyle => "b-book-title-style", Text, "", "Font style of book titles; empty removes it";
    BookTitleLeft => "b-book-title-left", Text, "『", "Opening bracket around book titles";
    BookTitleRight => "b-book-title-right", Text, "』", "Closing bracket around book titles";
    JournalTitleLeft => "b-journal-title-left", Text, "", "Opening bracket around journal titles";
    JournalTitleRight => "b-journal-title-right", Text, "", "Closing bracket around journal titles";
    JournalTitleSuffix => "b-journal-title-suffix", Text, ",", "Delimiter inside the collection title group";
    EditionRight => "b-edition-right", Text, "", "Suffix after the edition";

    // Bibliography locators
    IssueDelimiter => "b-issue-delimiter", Text, "、", "Delimiter inside the issue group";
    LocatorRight => "b-locator-right", Text, "", "Suffix after the locators";
    LocatorLabelForm => "b-locator-label-form", Text, "", "Form of volume, issue and page labels; empty omits them";
    LocatorLabelInvert => "b-locator-label-invert", Flag, "false", "Place volume and issue labels after the number";
    IssueLeft => "b-issue-left", Text, "", "Opening bracket around the issue";
    IssueRight => "b-issue-right", Text, "", "Closing bracket around the issue";
    ChapterPrefix => "b-locator-chapter-prefix", Text, "、", "Prefix of chapter page ranges";
    ChapterLabelForm => "b-locator-chapter-label-form", Text, "long", "Form of the chapter page label";
    ChapterLabelInvert => "b-locator-chapter-label-invert", Flag, "false", "Place the chapter page label after the pages";
    ChapterSeparator => "b-locator-chapter-separator", Text, "", "Separator between the chapter page label and the pages";
    ArticlePrefix => "b-locator-article-prefix", Text, "、", "Prefix of article page ranges";
    ArticlePageLabelInvert => "b-article-page-label-invert", Flag, "false", "Place the article page label after the pages";

    // Access
    AccessedLeft => "a-bracket-left", Text, "（", "Opening bracket around the access date";
    AccessedRight => "a-bracket-right", Text, "）", "Closing bracket around the access date";
    AccessedLabelRight => "b-accessed-label-right", Text, "", "Delimiter between the accessed label and the date";
    HideAccessedLabel => "a-hide-accessed-label", Flag, "false", "Drop the accessed label";
}

impl Param {
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn kind(self) -> ParamKind {
        self.spec().kind
    }

    pub fn default_value(self) -> &'static str {
        self.spec().default
    }

    /// Look up a parameter by its key.
    pub fn from_key(key: &str) -> Option<Param> {
        PARAMS.iter().copied().find(|p| p.key() == key)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
