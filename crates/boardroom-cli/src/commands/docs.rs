use std::path::Path;

use anyhow::{Context, Result, bail};

use boardroom_application::Bootstrap;
use boardroom_core::document::{AnalysisResult, DocumentIntake};

use super::report_save;

pub fn list(app: &Bootstrap) {
    let documents = app.state_manager.state().documents;
    if documents.is_empty() {
        println!("No documents.");
        return;
    }
    for doc in documents {
        let status = if doc.has_analysis() { "analyzed" } else { "pending" };
        println!(
            "{} {}  {}  {} bytes  {}",
            doc.file_kind.icon, doc.id, doc.name, doc.size_bytes, status
        );
    }
}

pub async fn add(app: &Bootstrap, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let document = DocumentIntake::prepare(&name, mime.essence_str(), &bytes)?;
    let metadata = app.state_manager.add_document(document).await?;
    println!("Uploaded {} as {}", metadata.name, metadata.id);
    Ok(())
}

pub async fn show(app: &Bootstrap, id: &str, output: Option<&Path>) -> Result<()> {
    let Some(metadata) = app.state_manager.state().find_document(id).cloned() else {
        bail!("Document not found: {}", id);
    };
    println!("{}", serde_json::to_string_pretty(&metadata)?);

    if let Some(output) = output {
        let Some(content) = app.state_manager.get_document_content(id).await else {
            bail!("Content of {} is missing from the document store", id);
        };
        let bytes = content.decode_bytes()?;
        tokio::fs::write(output, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Wrote {} bytes to {}", bytes.len(), output.display());
    }
    Ok(())
}

/// Parses an analysis result and checks its relevance score range.
fn parse_analysis(bytes: &[u8]) -> Result<AnalysisResult> {
    let analysis: AnalysisResult =
        serde_json::from_slice(bytes).context("Invalid analysis JSON")?;
    if !(0.0..=1.0).contains(&analysis.relevance_score) {
        bail!(
            "relevanceScore must be between 0 and 1, got {}",
            analysis.relevance_score
        );
    }
    Ok(analysis)
}

pub async fn analyze(app: &Bootstrap, id: &str, from: &Path) -> Result<()> {
    let bytes = tokio::fs::read(from)
        .await
        .with_context(|| format!("Failed to read {}", from.display()))?;
    let analysis = parse_analysis(&bytes)?;

    let outcome = app.state_manager.record_analysis(id, analysis)?;
    report_save(outcome);
    println!("Recorded analysis for {}", id);
    Ok(())
}

pub async fn remove(app: &Bootstrap, id: &str) -> Result<()> {
    if app.state_manager.state().find_document(id).is_none() {
        bail!("Document not found: {}", id);
    }
    report_save(app.state_manager.delete_document(id).await);
    println!("Deleted {}", id);
    Ok(())
}
