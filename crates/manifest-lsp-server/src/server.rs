//! LSP server implementation — LanguageServer trait.

use std::sync::Arc;

use dashmap::DashMap;
use manifest_lsp_completion::context::{detect_context, KeyContext};
use manifest_lsp_completion::provider::provide_completions;
use manifest_lsp_parser::diagnostics::extract_syntax_errors;
use manifest_lsp_parser::parser::ManifestParser;
use manifest_lsp_schema::SchemaProvider;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::ls_types::*;
use tower_lsp::{Client, LanguageServer};

/// Main LSP backend holding all state.
pub struct ManifestLspBackend {
    /// Client handle for sending notifications to the editor.
    client: Client,
    /// Open document parsers (URI string → ManifestParser).
    open_files: Arc<DashMap<String, ManifestParser>>,
    /// Lazily built, process-wide manifest key schema.
    schema: Arc<SchemaProvider>,
    /// Trace level from InitializeParams (off/messages/verbose).
    trace_level: Mutex<TraceValue>,
}

impl ManifestLspBackend {
    pub fn new(client: Client) -> Self {
        ManifestLspBackend {
            client,
            open_files: Arc::new(DashMap::new()),
            schema: Arc::new(SchemaProvider::new()),
            trace_level: Mutex::new(TraceValue::Off),
        }
    }

    /// Log a message to the client if trace level is verbose.
    async fn log_trace(&self, message: &str) {
        let level = *self.trace_level.lock().await;
        if level == TraceValue::Verbose {
            tracing::trace!("{}", message);
            self.client.log_message(MessageType::LOG, message).await;
        }
    }

    /// Publish syntax diagnostics for a file.
    async fn publish_diagnostics(&self, uri: &Uri) {
        let uri_str = uri.as_str().to_string();

        let diagnostics = {
            if let Some(parser) = self.open_files.get(&uri_str) {
                compute_diagnostics(&parser)
            } else {
                vec![]
            }
        };

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;
    }
}

/// Compute syntax diagnostics (ERROR / MISSING nodes) for an open file.
fn compute_diagnostics(parser: &ManifestParser) -> Vec<Diagnostic> {
    let tree = match parser.tree() {
        Some(t) => t,
        None => return vec![],
    };

    extract_syntax_errors(tree)
        .into_iter()
        .map(|d| Diagnostic {
            range: Range {
                start: Position::new(d.range.start.line, d.range.start.character),
                end: Position::new(d.range.end.line, d.range.end.character),
            },
            severity: Some(DiagnosticSeverity::ERROR),
            source: d.source,
            message: d.message,
            ..Default::default()
        })
        .collect()
}

/// Convert lsp_types::CompletionItemKind to ls_types::CompletionItemKind.
fn completion_kind_to_ls(kind: lsp_types::CompletionItemKind) -> CompletionItemKind {
    // Both crates use the same numeric values from the LSP spec; the
    // provider only emits STRUCT (tables) and FIELD (keys)
    match kind {
        lsp_types::CompletionItemKind::STRUCT => CompletionItemKind::STRUCT,
        lsp_types::CompletionItemKind::FIELD => CompletionItemKind::FIELD,
        _ => CompletionItemKind::TEXT,
    }
}

impl LanguageServer for ManifestLspBackend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("cargo-manifest-lsp: initialize");

        if let Some(trace) = params.trace {
            *self.trace_level.lock().await = trace;
            tracing::info!("Trace level: {:?}", trace);
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..Default::default()
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["[".to_string(), ".".to_string()]),
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cargo-manifest-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        tracing::info!("cargo-manifest-lsp: initialized");
        self.client
            .log_message(MessageType::INFO, "cargo-manifest-lsp server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("cargo-manifest-lsp: shutdown");
        Ok(())
    }

    // --- Document Synchronization ---

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let uri_str = uri.as_str().to_string();

        tracing::debug!("didOpen: {}", uri_str);
        self.log_trace(&format!("didOpen: {}", uri_str)).await;

        let mut parser = ManifestParser::new();
        parser.parse_full(&params.text_document.text);
        self.open_files.insert(uri_str, parser);

        self.publish_diagnostics(&uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let uri_str = uri.as_str().to_string();

        tracing::debug!("didChange: {}", uri_str);

        if let Some(mut parser) = self.open_files.get_mut(&uri_str) {
            for change in &params.content_changes {
                if let Some(range) = change.range {
                    parser.apply_edit(
                        range.start.line,
                        range.start.character,
                        range.end.line,
                        range.end.character,
                        &change.text,
                    );
                } else {
                    // Full content replacement
                    parser.parse_full(&change.text);
                }
            }
        }

        self.publish_diagnostics(&uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let uri_str = uri.as_str().to_string();
        tracing::debug!("didClose: {}", uri_str);
        self.open_files.remove(&uri_str);
        // Clear diagnostics for closed file
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        tracing::debug!("didSave: {}", params.text_document.uri.as_str());
    }

    // --- Language Features ---

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri_str = params
            .text_document_position
            .text_document
            .uri
            .as_str()
            .to_string();
        let pos = params.text_document_position.position;
        tracing::debug!("completion: {}:{}:{}", uri_str, pos.line, pos.character);

        let context = {
            let parser = match self.open_files.get(&uri_str) {
                Some(p) => p,
                None => return Ok(None),
            };
            let tree = match parser.tree() {
                Some(t) => t,
                None => return Ok(None),
            };
            let source = parser.source();
            detect_context(tree, &source, pos.line, pos.character)
        };

        if context == KeyContext::None {
            return Ok(None);
        }

        let schema = self.schema.get();
        let lsp_items = provide_completions(&context, &schema);
        tracing::debug!("completion: {} candidates", lsp_items.len());

        // Convert lsp_types::CompletionItem to the ls_types item used here
        let items: Vec<CompletionItem> = lsp_items
            .into_iter()
            .map(|item| CompletionItem {
                label: item.label,
                kind: item.kind.map(completion_kind_to_ls),
                ..Default::default()
            })
            .collect();

        Ok(Some(CompletionResponse::Array(items)))
    }
}
