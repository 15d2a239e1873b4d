//! Lexicon inspection command

use email_triage::lexicon::{contains_document_keywords, matching_types, DOCUMENT_TYPES};

/// Print the lexicon, or the document types `text` mentions
pub fn handle(text: Option<String>) {
    match text {
        Some(text) => {
            let types = matching_types(&text);
            if contains_document_keywords(Some(&text)) {
                println!("✓ Document keywords found: {}", types.join(", "));
            } else {
                println!("✗ No document keywords found (would be offtopic without the model)");
            }
        }
        None => {
            for doc in DOCUMENT_TYPES {
                println!("{}", doc.name);
                for synonym in doc.synonyms {
                    println!("   {}", synonym);
                }
            }
        }
    }
}
