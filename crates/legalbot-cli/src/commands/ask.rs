//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use legalbot_domain::{Domain, Message};
use legalbot_sdk::{Assistant, IgnoreReason, SubmitOutcome};

/// Execute the ask command.
pub async fn execute_ask(args: AskArgs, assistant: &Assistant, formatter: &Formatter) -> Result<()> {
    let domain: Domain = args.domain.into();
    let replies = submit_and_collect(assistant, domain, &args.query_text(), formatter).await?;
    println!("{}", formatter.format_messages(&replies)?);
    Ok(())
}

/// Submit `query` and return the bot messages it produced.
pub async fn submit_and_collect(
    assistant: &Assistant,
    domain: Domain,
    query: &str,
    formatter: &Formatter,
) -> Result<Vec<Message>> {
    let controller = assistant.controller(domain);
    let start = controller.message_count();

    if !formatter.is_json() {
        eprintln!("{}", formatter.pending(domain));
    }

    match controller.submit(query).await {
        SubmitOutcome::Ignored(IgnoreReason::EmptyQuery) => {
            Err(CliError::InvalidInput("Query must not be empty".to_string()))
        }
        SubmitOutcome::Ignored(IgnoreReason::Busy) => Err(CliError::NotPermitted(format!(
            "A {} request is already in flight",
            domain.tag()
        ))),
        _ => Ok(controller
            .messages_since(start)
            .into_iter()
            .filter(|m| !m.is_user())
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use legalbot_sdk::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_collects_only_new_bot_messages() {
        let mock = MockTransport::new();
        mock.respond_json("/query/ipc", json!({"answer": "Section 379 covers theft."}));
        let assistant = Assistant::new(Arc::new(mock));
        let formatter = Formatter::new(OutputFormat::Json, false);

        let first = submit_and_collect(&assistant, Domain::CodeSection, "theft", &formatter)
            .await
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].citations, vec!["Section 379"]);

        let second = submit_and_collect(&assistant, Domain::CodeSection, "again", &formatter)
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_still_yields_a_reply() {
        let assistant = Assistant::new(Arc::new(MockTransport::new()));
        let formatter = Formatter::new(OutputFormat::Json, false);

        let replies = submit_and_collect(&assistant, Domain::Precedent, "q", &formatter)
            .await
            .unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content, Domain::Precedent.transport_failure_text());
    }

    #[tokio::test]
    async fn test_empty_query_is_an_error() {
        let assistant = Assistant::new(Arc::new(MockTransport::new()));
        let formatter = Formatter::new(OutputFormat::Json, false);

        let result = submit_and_collect(&assistant, Domain::Document, "  ", &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
