//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CursorAction, InvokeArgs};
use crate::error::{Error, Result};
use crate::loader::{load_operation, OperationDefinition};
use crate::operation::{HttpOperation, JsonRequest, JsonResponse};
use crate::output::{OutputSelector, OutputWriter};
use crate::pagination::{
    IterationMode, IteratorConfig, PageControl, PageIterator, RunOutcome, StopReason,
};
use crate::state::CursorStore;
use crate::types::{Cursor, JsonValue};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        match &self.cli.command {
            Commands::Invoke(args) => self.invoke(args, stdout).await.map(|_| ()),
            Commands::Validate { definition } => self.validate(definition, stdout),
            Commands::Cursor { action } => self.cursor(action, stdout).await,
        }
    }

    /// Invoke an operation, writing projected output to `out`
    pub async fn invoke<W: Write>(&self, args: &InvokeArgs, out: W) -> Result<RunOutcome> {
        let def = load_operation(&args.definition)?;
        let request = build_request(&def, args)?;
        let selector: OutputSelector = match &args.select {
            Some(raw) => raw.parse()?,
            None => def.default_selector(),
        };

        let store = args.state.as_ref().map(CursorStore::from_file).transpose()?;
        let (starting_cursor, mode) = match (&store, args.resume) {
            (Some(store), true) => {
                let saved = store.get_cursor(&def.name).await;
                match &saved {
                    Some(cursor) => info!(
                        operation = %def.name,
                        cursor = cursor.as_str(),
                        "Resuming from saved cursor"
                    ),
                    None => info!(
                        operation = %def.name,
                        path = %store.path().display(),
                        "No saved cursor; starting from the first page"
                    ),
                }
                let mode = if args.no_auto_iteration {
                    IterationMode::ManualSinglePage
                } else {
                    IterationMode::AutoPaginate
                };
                (saved, mode)
            }
            _ => {
                let cursor = args.starting_token.clone().and_then(Cursor::new);
                let mode = IterationMode::resolve(args.no_auto_iteration, cursor.as_ref());
                (cursor, mode)
            }
        };

        let mut config = IteratorConfig::default()
            .with_starting_cursor(starting_cursor)
            .with_mode(mode);
        if let Some(limit) = args.max_items {
            config = config.with_emit_limit(limit);
        }
        if let Some(max) = def.pagination.max_page_size {
            config = config.with_max_page_size(max);
        }

        let mut writer = OutputWriter::new(out, self.cli.format);
        let request_value = request.to_value();

        let invoker = HttpOperation::from_definition(&def)?;
        let iterator = PageIterator::new(request, invoker, config)?;

        // Parameter echoes are written once, after the first page succeeds
        let mut echoed = false;
        let mut write_error = None;
        let mut sink = |page: &JsonResponse| {
            let values = if selector.per_page() {
                selector.project(page.body(), &request_value)
            } else if !echoed {
                echoed = true;
                selector.project(&JsonValue::Null, &request_value)
            } else {
                return PageControl::Continue;
            };
            match writer.write_all(&values).and_then(|()| writer.flush()) {
                Ok(()) => PageControl::Continue,
                Err(e) => {
                    write_error = Some(e);
                    PageControl::Stop
                }
            }
        };

        let outcome = iterator.run(&mut sink).await.map_err(|failure| {
            if failure.pages_emitted > 0 {
                warn!(
                    operation = %def.name,
                    page = failure.page,
                    pages_emitted = failure.pages_emitted,
                    "Output is partial; the run failed after writing earlier pages"
                );
            }
            Error::from(failure)
        })?;
        if let Some(e) = write_error {
            return Err(e);
        }

        report(&def, &outcome);
        if let Some(store) = &store {
            store
                .set_cursor(&def.name, outcome.final_cursor.clone())
                .await?;
        }

        Ok(outcome)
    }

    /// Validate an operation definition
    pub(crate) fn validate<W: Write>(&self, path: &Path, out: W) -> Result<()> {
        let def = load_operation(path)?;
        info!(operation = %def.name, "Operation definition is valid");

        let mut writer = OutputWriter::new(out, self.cli.format);
        writer.write_value(&json!({
            "operation": def.name,
            "method": def.method,
            "cursor_param": def.pagination.cursor_param,
            "items_path": def.items_path,
            "valid": true,
        }))?;
        writer.flush()
    }

    /// Show or clear saved cursors
    pub(crate) async fn cursor<W: Write>(&self, action: &CursorAction, out: W) -> Result<()> {
        let mut writer = OutputWriter::new(out, self.cli.format);
        match action {
            CursorAction::Show { state, operation } => {
                let store = CursorStore::from_file(state)?;
                let value = match operation {
                    Some(name) => {
                        let cursor = store.get_cursor(name).await;
                        json!({"operation": name, "cursor": cursor})
                    }
                    None => serde_json::to_value(store.snapshot().await)?,
                };
                writer.write_value(&value)?;
            }
            CursorAction::Clear { state, operation } => {
                let store = CursorStore::from_file(state)?;
                match operation {
                    Some(name) => store.clear_operation(name).await?,
                    None => store.clear().await?,
                }
                info!(
                    path = %state.display(),
                    operation = operation.as_deref().unwrap_or("*"),
                    "Cleared saved cursors"
                );
            }
        }
        writer.flush()
    }
}

/// Build the request from definition defaults, then `--request-json`, then
/// each `--param`
pub(crate) fn build_request(def: &OperationDefinition, args: &InvokeArgs) -> Result<JsonRequest> {
    let mut request = JsonRequest::from_definition(def);

    if let Some(raw) = &args.request_json {
        let value: JsonValue = serde_json::from_str(raw)
            .map_err(|e| Error::invalid_value("request-json", format!("Invalid JSON: {e}")))?;
        let JsonValue::Object(map) = value else {
            return Err(Error::invalid_value("request-json", "Expected a JSON object"));
        };
        for (key, value) in map {
            request.set_param(key, value);
        }
    }

    for raw in &args.params {
        let (key, value) = parse_param(raw)?;
        request.set_param(key, value);
    }

    if request.params().contains_key(&def.pagination.cursor_param) {
        return Err(Error::invalid_value(
            def.pagination.cursor_param.clone(),
            "Pass the cursor with --starting-token",
        ));
    }

    Ok(request)
}

/// Parse `KEY=VALUE`; the value is JSON when it parses, else a string
pub(crate) fn parse_param(raw: &str) -> Result<(String, JsonValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::invalid_value("param", format!("Expected KEY=VALUE, got '{raw}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_value("param", format!("Missing key in '{raw}'")));
    }

    let value =
        serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Log where the run ended so the caller can continue it
fn report(def: &OperationDefinition, outcome: &RunOutcome) {
    info!(
        operation = %def.name,
        pages = outcome.pages,
        items = outcome.items,
        next_token = outcome.final_cursor.as_ref().map(Cursor::as_str),
        "Run complete"
    );

    if let StopReason::LateFailure { message } = &outcome.stop {
        warn!(
            operation = %def.name,
            error = %message,
            next_token = outcome.final_cursor.as_ref().map(Cursor::as_str),
            "Output is partial; continue with --starting-token"
        );
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("command", &self.cli.command)
            .finish_non_exhaustive()
    }
}
