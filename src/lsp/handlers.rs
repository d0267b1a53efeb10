use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::parser::{parse_line, CronEntry, CronField, FieldKind, ParsedLine};
use crate::validation::engine::{validate_document, LineError, LintOptions};
use crate::validation::grammar::accepted_forms;

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let pos = tdpp.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line_idx = pos.line as usize;
        let line = match doc_state.line(line_idx) {
            Some(line) => line,
            None => return Ok(None),
        };
        let offset = DocumentState::byte_offset(line, pos.character);

        let ParsedLine::Entry(entry) = parse_line(line) else {
            return Ok(None);
        };

        let field = match entry.field_at(offset) {
            Some(field) => field,
            None => return Ok(None),
        };

        let m = MarkupContent {
            kind: MarkupKind::Markdown,
            value: field_hover_text(field, &self.options),
        };
        Ok(Some(Hover {
            contents: HoverContents::Markup(m),
            range: Some(DocumentState::range(
                line_idx,
                line,
                field.span.start,
                field.span.end,
            )),
        }))
    }
}

/// Markdown describing a schedule field and its accepted forms
fn field_hover_text(field: &CronField<'_>, options: &LintOptions) -> String {
    let mut text = format!("**{}**: `{}`", field.kind, field.raw);

    if field.kind == FieldKind::Month && !options.validate_month {
        text.push_str("\n\n_Not validated unless month validation is enabled._");
    }

    text.push_str("\n\n**Accepted forms** (comma-separated):");
    for form in accepted_forms(field.kind) {
        text.push_str(&format!("\n- `{}`", form));
    }

    text
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let diagnostics = document_diagnostics(&doc_state.content, &self.options);
        drop(docs); // Release the lock before publishing

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }
}

/// LSP diagnostics for a whole document, in line order
pub fn document_diagnostics(content: &str, options: &LintOptions) -> Vec<Diagnostic> {
    let lines: Vec<&str> = content.split('\n').collect();

    validate_document(content, options)
        .into_iter()
        .map(|(line_no, error)| {
            let line = lines.get(line_no - 1).copied().unwrap_or("");
            create_lsp_diagnostic(line_no - 1, line, &error)
        })
        .collect()
}

/// Convert a line error into an LSP diagnostic on a 0-based line
pub fn create_lsp_diagnostic(line_idx: usize, line: &str, error: &LineError) -> Diagnostic {
    let range = match error.span() {
        Some(span) => DocumentState::range(line_idx, line, span.start, span.end),
        None => DocumentState::line_range(line_idx, line),
    };

    // Every line error fails a run
    Diagnostic::new(
        range,
        Some(DiagnosticSeverity::ERROR),
        None,
        Some("cron-ls".to_string()),
        error.to_string(),
        None,
        None,
    )
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let symbols = doc_state
            .content
            .split('\n')
            .enumerate()
            .filter_map(|(line_idx, line)| match parse_line(line) {
                ParsedLine::Entry(entry) => Some(entry_symbol(line_idx, line, &entry)),
                _ => None,
            })
            .collect();

        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }
}

/// Symbol for a schedule line: named by its schedule, detailed by its command
fn entry_symbol(line_idx: usize, line: &str, entry: &CronEntry<'_>) -> DocumentSymbol {
    let schedule_end = entry.field(FieldKind::DayOfWeek).span.end;

    DocumentSymbol {
        name: entry.schedule(),
        detail: (!entry.command.is_empty()).then(|| entry.command.clone()),
        kind: SymbolKind::EVENT,
        tags: None,
        #[allow(deprecated)]
        deprecated: Some(false), // Required by tower-lsp 0.20, use tags instead in future versions
        range: DocumentState::line_range(line_idx, line),
        selection_range: DocumentState::range(
            line_idx,
            line,
            entry.field(FieldKind::Minute).span.start,
            schedule_end,
        ),
        children: None,
    }
}
