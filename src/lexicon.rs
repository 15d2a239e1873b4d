//! Document-type lexicon and keyword gate.
//!
//! Each recognized document type has a handful of synonyms, including the
//! misspellings that show up in real mail. The gate is a cheap substring
//! check run before the statistical model: an email that mentions none of
//! these terms is offtopic without consulting the classifier.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Canonical document type with its synonyms
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DocumentType {
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
}

/// Static document-type table
pub const DOCUMENT_TYPES: &[DocumentType] = &[
    DocumentType {
        name: "Distribution_Notice",
        synonyms: &[
            "Distribution Notice",
            "Distribtn Notice",
            "Dist Notice",
            "Distribution",
            "Distribution Letter",
            "Dist Letter",
            "dist letter",
        ],
    },
    DocumentType {
        name: "SOA",
        synonyms: &["SOA", "Statement of Account", "Statmnt of Acct", "soa"],
    },
    DocumentType {
        name: "Advance_Tax",
        synonyms: &[
            "statement of income",
            "addance tax",
            "smt of income",
            "advance letter",
            "tax advance",
            "advanc doc",
        ],
    },
    DocumentType {
        name: "Annual_Tax",
        synonyms: &[
            "annaully tax report",
            "anual tax",
            "yearly tax letter",
            "annnual tax",
            "tax annual",
            "annual",
        ],
    },
    DocumentType {
        name: "Form_64C",
        synonyms: &["Form 64C", "Form64C", "Frm 64C", "form 64", "64c"],
    },
    DocumentType {
        name: "Drawdown_Grace_Period_Notice",
        synonyms: &[
            "Drawdown Grace Period Notice",
            "Drawdon Grace Notice",
            "drqwd grace notice",
        ],
    },
    DocumentType {
        name: "Drawdown_Notice",
        synonyms: &[
            "Drawdown Notice",
            "Drawdwn Notice",
            "draw down ntice",
            "DDN",
            "ddn",
            "drawdown",
        ],
    },
    DocumentType {
        name: "TDS",
        synonyms: &[
            "TDS",
            "FORM16A",
            "frm 16a",
            "Tax Deducted at Source",
            "tds's",
            "form 16:A",
            "form 16",
        ],
    },
    DocumentType {
        name: "Newsletter",
        synonyms: &[
            "newsletter",
            "news letter",
            "news",
            "nws lter",
            "NEWSLETTER",
            "NEWS letter",
            "News Letter",
        ],
    },
];

/// Every synonym, lowercased, in table order (duplicates kept)
static DOC_KEYWORDS: Lazy<Vec<String>> = Lazy::new(|| {
    DOCUMENT_TYPES
        .iter()
        .flat_map(|doc| doc.synonyms.iter().map(|s| s.to_lowercase()))
        .collect()
});

/// Flattened lowercase keyword list
pub fn keywords() -> &'static [String] {
    &DOC_KEYWORDS
}

/// True iff any lexicon keyword occurs as a substring of `text`, ignoring case.
///
/// `None` stands in for a missing or non-text value and never matches.
/// Matches are not word-bounded: "annual" matches inside "biannually".
pub fn contains_document_keywords(text: Option<&str>) -> bool {
    let Some(text) = text else {
        return false;
    };
    let lower_text = text.to_lowercase();
    DOC_KEYWORDS.iter().any(|keyword| lower_text.contains(keyword.as_str()))
}

/// Document types with at least one synonym present in `text`
pub fn matching_types(text: &str) -> Vec<&'static str> {
    let lower_text = text.to_lowercase();
    DOCUMENT_TYPES
        .iter()
        .filter(|doc| {
            doc.synonyms
                .iter()
                .any(|s| lower_text.contains(s.to_lowercase().as_str()))
        })
        .map(|doc| doc.name)
        .collect()
}
