//! Pariyesana - Pali Text Search Engine
//! Command-line front end for searching plain-text documents

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pariyesana_lib::{
    DocumentTree, FindManager, MemorySettings, NullViewport, HIGHLIGHT_CLASS,
};

#[derive(Parser)]
#[command(name = "pariyesana", about = "Accent-folded text search over a document", version)]
struct Args {
    /// Plain-text file to search; blank lines separate paragraphs
    file: std::path::PathBuf,

    /// Search term (2 characters minimum)
    term: String,

    /// Match diacritics exactly instead of folding them
    #[arg(long)]
    no_accent_fold: bool,

    /// Case-sensitive matching
    #[arg(long)]
    case_sensitive: bool,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct MatchOutput {
    text: String,
    paragraph: usize,
}

#[derive(Serialize)]
struct SearchOutput {
    term: String,
    counter: String,
    total: usize,
    error: Option<String>,
    matches: Vec<MatchOutput>,
}

/// Build a document tree from plain text: one `<p>` per blank-line
/// separated paragraph.
fn document_from_text(text: &str) -> DocumentTree {
    let mut doc = DocumentTree::new("div");
    for paragraph in text.split("\n\n") {
        let trimmed = paragraph.trim_end_matches('\n');
        if trimmed.is_empty() {
            continue;
        }
        let p = doc.append_element(doc.root(), "p", "");
        doc.append_text(p, trimmed);
    }
    doc
}

/// Paragraph ordinal of a marker: which `<p>` under the root holds it.
fn paragraph_of(doc: &DocumentTree, marker: usize) -> usize {
    let mut node = marker;
    while let Some(parent) = doc.node(node).parent {
        if parent == doc.root() {
            return doc
                .node(doc.root())
                .children
                .iter()
                .position(|&c| c == node)
                .unwrap_or(0);
        }
        node = parent;
    }
    0
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {:?}", args.file))?;

    let mut manager = FindManager::new(
        document_from_text(&text),
        Box::new(MemorySettings::new()),
        Box::new(NullViewport),
    );
    if args.no_accent_fold {
        manager.set_accent_fold(false);
    }
    if args.case_sensitive {
        manager.set_case_sensitive(true);
    }

    manager.search(&args.term);

    let doc = manager.document();
    let matches: Vec<MatchOutput> = doc
        .elements_with_class(HIGHLIGHT_CLASS)
        .into_iter()
        .map(|marker| MatchOutput {
            text: doc.subtree_text(marker),
            paragraph: paragraph_of(doc, marker),
        })
        .collect();

    let output = SearchOutput {
        term: args.term.clone(),
        counter: manager.bar().counter().to_string(),
        total: matches.len(),
        error: manager.bar().error().map(str::to_string),
        matches,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(error) = &output.error {
        println!("{}", error);
        return Ok(());
    }
    println!("Matches: {} ({})", output.total, output.counter);
    for m in &output.matches {
        println!("  [paragraph {}] {}", m.paragraph, m.text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text_splits_paragraphs() {
        let doc = document_from_text("first paragraph\n\nsecond paragraph\n");
        assert_eq!(doc.node(doc.root()).children.len(), 2);
        assert_eq!(doc.text_content(), "first paragraphsecond paragraph");
    }

    #[test]
    fn test_paragraph_of_marker() {
        let mut manager = FindManager::new(
            document_from_text("nothing here\n\nsati appears here"),
            Box::new(MemorySettings::new()),
            Box::new(NullViewport),
        );
        manager.search("sati");

        let doc = manager.document();
        let markers = doc.elements_with_class(HIGHLIGHT_CLASS);
        assert_eq!(markers.len(), 1);
        assert_eq!(paragraph_of(doc, markers[0]), 1);
    }
}
