use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server on stdio
pub async fn serve(config: Config) -> Result<()> {
    let options = config.lint_options();
    log::info!(
        "starting cron-ls (month validation {})",
        if options.validate_month { "on" } else { "off" }
    );

    let (service, socket) = LspService::build(move |client| Backend::new(client, options)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
